use crate::auth::session::{self, CurrentUser};
use crate::db::users;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tower_sessions::Session;

/// Runs before every request: turn the session's `user_id` into a `User`.
///
/// The result is stored as `CurrentUser` in the request extensions. A stale
/// id (the user row is gone) is treated the same as no id at all.
pub async fn load_logged_in_user(
    State(state): State<AppState>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = match session::user_id(&session).await? {
        Some(user_id) => {
            let mut conn = state.db.acquire().await?;
            let user = users::find_by_id(&mut conn, user_id).await?;
            if user.is_none() {
                tracing::debug!(user_id, "Session refers to a missing user");
            }
            user
        }
        None => None,
    };

    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).await)
}

/// Guard for views that need a logged-in user; redirects to the login page otherwise.
pub async fn require_login(request: Request, next: Next) -> Result<Response, AppError> {
    match request.extensions().get::<CurrentUser>() {
        Some(CurrentUser(Some(_))) => Ok(next.run(request).await),
        _ => Err(AppError::LoginRequired),
    }
}
