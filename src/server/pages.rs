//! HTML page handlers. Every handler here runs behind the route guard.

use axum::extract::{Form, Path, Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;
use tracing::error;

use super::AppState;
use crate::error::AppError;
use crate::identity::{LoginOutcome, LoginRequest, LOGIN_PATH};
use crate::layout::{escape, Content};

fn page(ctx: &AppState, title: &str, content: Content, path: &str) -> Html<String> {
    Html(ctx.layout(title, content, path).render_html())
}

fn bare_page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>{} | EduManage</title></head>\n<body class=\"auth\">\n<main>\n<h1>{}</h1>\n{}\n</main>\n</body></html>\n",
        escape(title), escape(title), body
    ))
}

/// `/` and `/dashboard`: send the visitor to their role home, or to login.
pub async fn entry(State(ctx): State<AppState>) -> Redirect {
    match ctx.current() {
        Some(id) => Redirect::to(&id.role.home_path()),
        None => Redirect::to(LOGIN_PATH),
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    #[serde(default)]
    pub error: Option<String>,
}

pub async fn login_page(State(ctx): State<AppState>, Query(q): Query<LoginQuery>) -> Html<String> {
    let mut body = String::new();
    if q.error.is_some() {
        body.push_str("<p class=\"error\" role=\"alert\">Invalid email or password</p>\n");
    }
    if ctx.logins.is_pending() {
        body.push_str("<p class=\"pending\">Signing in...</p>\n");
    }
    body.push_str(concat!(
        "<form method=\"post\" action=\"/login\">\n",
        "<label>Email <input type=\"email\" name=\"email\" required></label>\n",
        "<label>Password <input type=\"password\" name=\"password\" required></label>\n",
        "<button type=\"submit\">Sign in</button>\n",
        "</form>\n",
        "<p><a href=\"/register\">Create an account</a></p>"
    ));
    bare_page("Sign in", &body)
}

pub async fn register_page() -> Html<String> {
    bare_page(
        "Register",
        "<p>Accounts are issued by your school administrator.</p>\n<p><a href=\"/login\">Back to sign in</a></p>",
    )
}

pub async fn login_form(State(ctx): State<AppState>, Form(req): Form<LoginRequest>) -> Response {
    match ctx.logins.login(&req).await {
        Ok(LoginOutcome::Authenticated(id)) => Redirect::to(&id.role.home_path()).into_response(),
        Ok(LoginOutcome::Rejected) => Redirect::to("/login?error=1").into_response(),
        // a newer login owns the session now; let the guard route from the entry point
        Ok(LoginOutcome::Superseded) => Redirect::to("/").into_response(),
        Err(e) => {
            error!("login error: {e}");
            AppError::from(e).into_response()
        }
    }
}

pub async fn logout_form(State(ctx): State<AppState>) -> Redirect {
    ctx.logins.logout();
    Redirect::to(LOGIN_PATH)
}

pub async fn calendar(State(ctx): State<AppState>, uri: Uri) -> Html<String> {
    page(&ctx, "Calendar", Content::Text("No events scheduled.".into()), uri.path())
}

/// `/dashboard/{section}`: the guard has already matched the section to the session role.
pub async fn dashboard_home(State(ctx): State<AppState>, Path(_section): Path<String>, uri: Uri) -> Response {
    let Some(id) = ctx.current() else { return Redirect::to(LOGIN_PATH).into_response(); };
    let title = format!("{} Dashboard", id.role.label());
    let nav = ctx.navigation(uri.path());
    let mut links = String::from("<ul class=\"shortcuts\">\n");
    for e in nav.iter().skip(2) {
        links.push_str(&format!("<li><a href=\"{}\">{}</a></li>\n", escape(&e.href), escape(e.label)));
    }
    links.push_str("</ul>");
    let welcome = format!("<p>Welcome back, {}.</p>\n{}", escape(&id.name), links);
    page(&ctx, &title, Content::Trusted(welcome), uri.path()).into_response()
}

/// Section sub-pages are content slots for the entity views; the title comes from the nav entry.
pub async fn dashboard_page(State(ctx): State<AppState>, uri: Uri) -> Response {
    let path = uri.path();
    let nav = ctx.navigation(path);
    match nav.iter().find(|e| e.active) {
        Some(entry) => page(&ctx, entry.label, Content::Text(format!("{} will appear here.", entry.label)), path).into_response(),
        None => not_found_page(&ctx, path),
    }
}

fn not_found_page(ctx: &AppState, path: &str) -> Response {
    let body = page(ctx, "Not found", Content::Text(format!("Nothing lives at {}.", path)), path);
    (StatusCode::NOT_FOUND, body).into_response()
}

pub async fn not_found(State(ctx): State<AppState>, uri: Uri) -> Response { not_found_page(&ctx, uri.path()) }
