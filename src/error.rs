//! Application error model shared by the HTTP handlers.
//! Carries a machine-readable code plus a message and maps onto HTTP statuses
//! and a JSON body `{ "status": "error", "type": .., "code": .., "message": .. }`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::fmt::{Display, Formatter};

use crate::identity::AuthError;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppError {
    UserInput { code: String, message: String },
    NotFound { code: String, message: String },
    Conflict { code: String, message: String },
    Auth { code: String, message: String },
    Io { code: String, message: String },
}

impl AppError {
    pub fn code_str(&self) -> &str {
        match self {
            AppError::UserInput { code, .. }
            | AppError::NotFound { code, .. }
            | AppError::Conflict { code, .. }
            | AppError::Auth { code, .. }
            | AppError::Io { code, .. } => code.as_str(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AppError::UserInput { message, .. }
            | AppError::NotFound { message, .. }
            | AppError::Conflict { message, .. }
            | AppError::Auth { message, .. }
            | AppError::Io { message, .. } => message.as_str(),
        }
    }

    pub fn user(code: impl Into<String>, msg: impl Into<String>) -> Self {
        AppError::UserInput { code: code.into(), message: msg.into() }
    }
    pub fn not_found(code: impl Into<String>, msg: impl Into<String>) -> Self {
        AppError::NotFound { code: code.into(), message: msg.into() }
    }
    pub fn conflict(code: impl Into<String>, msg: impl Into<String>) -> Self {
        AppError::Conflict { code: code.into(), message: msg.into() }
    }

    pub fn http_status(&self) -> u16 {
        match self {
            AppError::UserInput { .. } => 400,
            AppError::NotFound { .. } => 404,
            AppError::Conflict { .. } => 409,
            AppError::Auth { .. } => 401,
            AppError::Io { .. } => 503,
        }
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code_str(), self.message())
    }
}

impl std::error::Error for AppError {}

pub type AppResult<T> = Result<T, AppError>;

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        let message = err.to_string();
        match err {
            AuthError::InvalidCredentials => AppError::Auth { code: "invalid_credentials".into(), message },
            AuthError::StorageUnavailable(_) => AppError::Io { code: "storage_unavailable".into(), message },
            AuthError::UnknownRole(_) => AppError::UserInput { code: "unknown_role".into(), message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut body = serde_json::to_value(&self).unwrap_or_else(|_| serde_json::json!({}));
        if let Some(obj) = body.as_object_mut() {
            obj.insert("status".into(), serde_json::json!("error"));
        }
        (status, Json(body)).into_response()
    }
}
