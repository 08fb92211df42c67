//! # HTTP Request Handlers
//!
//! Each submodule is one route group:
//! - `health`: liveness check
//! - `auth`: register, login, logout
//! - `blog`: list, create, update, delete posts
//!
//! ## Handler Pattern
//! Handlers are async functions that:
//! 1. Extract what they need (state, current user, session, a db connection, the form)
//! 2. Run one or two queries
//! 3. Render a template or redirect

pub mod auth;
pub mod blog;
pub mod health;

use crate::db::models::User;
use crate::error::{AppError, AppResult};
use crate::flash;
use crate::state::AppState;
use axum::response::Html;
use minijinja::Value;
use tower_sessions::Session;

/// Render a page, draining any flashed messages into it.
pub(crate) async fn render(
    state: &AppState,
    session: &Session,
    user: Option<&User>,
    template: &str,
    extra: Value,
) -> AppResult<Html<String>> {
    let messages = flash::take(session).await?;
    state.templates.render_page(template, user, messages, extra)
}

/// Fallback for unmatched routes and missing static files.
pub async fn not_found() -> AppError {
    AppError::NotFound("The requested URL was not found on the server.".to_string())
}
