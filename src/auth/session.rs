//! Session contents for a logged-in user, and the current-user extractors.

use crate::db::models::User;
use crate::error::{AppError, AppResult};
use axum::{extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;
use tower_sessions::Session;

/// Session key holding the logged-in user's id.
pub const USER_ID_KEY: &str = "user_id";

/// The user attached to the current request, if any.
///
/// Inserted into the request extensions by
/// `middleware::auth::load_logged_in_user`. Extracting it never fails: a
/// request that didn't pass through the middleware simply has no user.
#[derive(Debug, Clone, Default)]
pub struct CurrentUser(pub Option<User>);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<CurrentUser>().cloned().unwrap_or_default())
    }
}

/// The current user, required.
///
/// Rejects with `AppError::LoginRequired`, which redirects to the login page.
#[derive(Debug, Clone)]
pub struct LoggedIn(pub User);

impl<S> FromRequestParts<S> for LoggedIn
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<CurrentUser>() {
            Some(CurrentUser(Some(user))) => Ok(LoggedIn(user.clone())),
            _ => Err(AppError::LoginRequired),
        }
    }
}

/// Id of the logged-in user, as stored in the session.
pub async fn user_id(session: &Session) -> AppResult<Option<i64>> {
    Ok(session.get::<i64>(USER_ID_KEY).await?)
}

/// Start a fresh authenticated session for `user_id`.
///
/// The session id is cycled first so an id fixed before login is worthless
/// afterwards; anything else in the session is dropped.
pub async fn log_in(session: &Session, user_id: i64) -> AppResult<()> {
    session.cycle_id().await?;
    session.clear().await;
    session.insert(USER_ID_KEY, user_id).await?;
    Ok(())
}

/// Delete the session from the store and expire the cookie.
pub async fn log_out(session: &Session) -> AppResult<()> {
    session.flush().await?;
    Ok(())
}
