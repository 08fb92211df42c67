//! # Error Handling
//!
//! This module defines the application error type and how it turns into an
//! HTTP response.
//!
//! Handlers never render error pages themselves. They return `AppError`, which
//! becomes a bare response tagged with an [`ErrorPage`] extension. The
//! `middleware::errors::render_error_pages` layer sees the tag and swaps the
//! body for the rendered `error/404.html` or `error/500.html` template.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Extension,
};
use std::any::Any;
use thiserror::Error;

/// Application-wide error type
///
/// The `#[from]` attributes let handlers use `?` directly on sqlx, session,
/// template and bcrypt results.
#[derive(Error, Debug)]
pub enum AppError {
    /// Database errors (SQLx library errors)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Session store errors (loading, saving or cycling a session)
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Template lookup or rendering errors
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    /// Password hashing/verification failures (not a wrong password)
    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    /// Resource not found (404)
    #[error("{0}")]
    NotFound(String),

    /// The current user may not touch this resource (403)
    #[error("{0}")]
    Forbidden(String),

    /// A guarded view was reached without a logged-in user
    #[error("Login required")]
    LoginRequired,

    /// Unexpected errors that shouldn't normally occur (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Marker attached to error responses produced by the application.
///
/// Carries the user-facing message for the HTML error page. Untagged 4xx and
/// 5xx responses get a page too, just without a message.
#[derive(Debug, Clone)]
pub struct ErrorPage {
    /// Message safe to show to the user, if any
    pub message: Option<String>,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::LoginRequired => StatusCode::SEE_OTHER,
            AppError::Database(_)
            | AppError::Session(_)
            | AppError::Template(_)
            | AppError::PasswordHash(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Convert AppError into an HTTP response
///
/// Internal errors are logged with full detail and reach the user only as a
/// generic 500 page. Not-found and forbidden messages are user-facing.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self {
            AppError::LoginRequired => {
                tracing::debug!("Login required, redirecting to login page");
                return Redirect::to(crate::urls::LOGIN).into_response();
            }
            AppError::NotFound(msg) => {
                tracing::debug!("Not found: {}", msg);
                Some(msg.clone())
            }
            AppError::Forbidden(msg) => Some(msg.clone()),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                None
            }
            AppError::Session(e) => {
                tracing::error!("Session error: {:?}", e);
                None
            }
            AppError::Template(e) => {
                tracing::error!("Template error: {:#}", e);
                None
            }
            AppError::PasswordHash(e) => {
                tracing::error!("Password hashing error: {:?}", e);
                None
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                None
            }
        };

        // Plain-text body in case nothing upstream renders the page
        let body = message
            .clone()
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Error").to_string());

        (status, Extension(ErrorPage { message }), body).into_response()
    }
}

/// Response for a panic caught by `CatchPanicLayer`.
///
/// Goes through `AppError` so the error middleware renders the 500 page.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::Internal(format!("Handler panicked: {}", detail)).into_response()
}

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;
