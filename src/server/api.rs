//! JSON API. Not subject to the page guard; each handler checks what it needs.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::Uri;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use super::AppState;
use crate::error::{AppError, AppResult};
use crate::identity::{LoginOutcome, LoginRequest};

pub async fn login(State(ctx): State<AppState>, body: Result<Json<LoginRequest>, JsonRejection>) -> AppResult<Response> {
    let Json(req) = body.map_err(|rej| AppError::user("invalid_body", rej.body_text()))?;
    match ctx.logins.login(&req).await? {
        LoginOutcome::Authenticated(identity) => Ok((StatusCode::OK, Json(identity)).into_response()),
        LoginOutcome::Rejected => Ok((StatusCode::UNAUTHORIZED, Json(json!({"status":"unauthorized"}))).into_response()),
        LoginOutcome::Superseded => Err(AppError::conflict("superseded", "a newer login replaced this one")),
    }
}

pub async fn logout(State(ctx): State<AppState>) -> Json<serde_json::Value> {
    ctx.logins.logout();
    Json(json!({"status":"ok"}))
}

pub async fn session(State(ctx): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({"user": ctx.current(), "pending": ctx.logins.is_pending()}))
}

#[derive(Debug, Deserialize)]
pub struct NavQuery {
    #[serde(default)]
    pub path: Option<String>,
}

pub async fn navigation(State(ctx): State<AppState>, Query(q): Query<NavQuery>) -> Json<serde_json::Value> {
    let path = q.path.unwrap_or_default();
    Json(json!({"role": ctx.sessions.role(), "entries": ctx.navigation(&path)}))
}

pub async fn not_found(uri: Uri) -> AppError {
    AppError::not_found("no_such_endpoint", format!("no API endpoint at {}", uri.path()))
}
