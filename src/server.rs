//!
//! edumanage HTTP server
//! ---------------------
//! Axum host for the role-based dashboard.
//!
//! Responsibilities:
//! - Bootstrap the application context (config, session storage, session restore).
//! - Run the route guard in front of every page request and answer mismatches
//!   with `303 See Other` redirects.
//! - Login/logout over HTML forms and a small JSON API under `/api/`.
//! - Render dashboard pages through the layout composer.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{any, get, post};
use axum::Router;
use tracing::info;

use crate::config::Config;
use crate::context::AppContext;
use crate::identity::GuardDecision;

pub mod api;
pub mod pages;

/// Shared state injected into all handlers.
pub type AppState = Arc<AppContext>;

fn log_startup(config: &Config, ctx: &AppContext) {
    let cwd = std::env::current_dir().ok();
    info!(
        target: "startup",
        "edumanage starting: cwd={:?}, data_dir={:?}, persist_session={}, login_delay_ms={}",
        cwd, config.data_dir, config.persist_session, config.login_delay.as_millis()
    );
    match ctx.current() {
        Some(id) => info!(target: "startup", "restored session for {} ({})", id.email, id.role.label()),
        None => info!(target: "startup", "no restored session; pages redirect to /login"),
    }
}

/// Page requests pass through the route guard; `/api/` handlers authorize themselves.
async fn guard_pages(State(ctx): State<AppState>, req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    if path.starts_with("/api/") {
        return next.run(req).await;
    }
    match ctx.check(&path) {
        GuardDecision::Allow => next.run(req).await,
        GuardDecision::Redirect(to) => Redirect::to(&to).into_response(),
    }
}

pub fn router(ctx: AppState) -> Router {
    Router::new()
        .route("/", get(pages::entry))
        .route("/login", get(pages::login_page).post(pages::login_form))
        .route("/register", get(pages::register_page))
        .route("/logout", post(pages::logout_form))
        .route("/calendar", get(pages::calendar))
        .route("/dashboard", get(pages::entry))
        .route("/dashboard/{section}", get(pages::dashboard_home))
        .route("/dashboard/{section}/{*rest}", get(pages::dashboard_page))
        .route("/api/login", post(api::login))
        .route("/api/logout", post(api::logout))
        .route("/api/session", get(api::session))
        .route("/api/navigation", get(api::navigation))
        .route("/api/{*rest}", any(api::not_found))
        .fallback(pages::not_found)
        .layer(middleware::from_fn_with_state(ctx.clone(), guard_pages))
        .with_state(ctx)
}

/// Serve the dashboard on an already bound listener.
pub async fn serve(ctx: AppState, listener: tokio::net::TcpListener) -> anyhow::Result<()> {
    axum::serve(listener, router(ctx)).await?;
    Ok(())
}

pub async fn run_with_config(config: Config) -> anyhow::Result<()> {
    let ctx = AppContext::bootstrap(config.clone())?;
    log_startup(&config, &ctx);
    let addr: SocketAddr = config.addr().parse()?;
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    serve(ctx, listener).await
}
