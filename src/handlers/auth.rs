//! Register, log in, log out.

use crate::auth::password;
use crate::auth::session::{self, CurrentUser};
use crate::db::{users, DbConn};
use crate::error::AppResult;
use crate::flash::flash;
use crate::handlers::render;
use crate::state::AppState;
use crate::urls;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use minijinja::context;
use serde::Deserialize;
use tower_sessions::Session;

/// The `/auth` route group.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(urls::REGISTER, get(register_form).post(register))
        .route(urls::LOGIN, get(login_form).post(login))
        .route(urls::LOGOUT, get(logout))
}

/// Body of the register and login forms.
///
/// Missing fields deserialize as empty strings so they hit the same
/// "is required" checks as fields submitted blank.
#[derive(Debug, Default, Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

pub async fn register_form(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    session: Session,
) -> AppResult<Response> {
    let page = render(
        &state,
        &session,
        user.as_ref(),
        "auth/register.html",
        context! { form => context! { username => "" } },
    )
    .await?;

    Ok(page.into_response())
}

pub async fn register(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    session: Session,
    mut conn: DbConn,
    Form(form): Form<CredentialsForm>,
) -> AppResult<Response> {
    let error = if form.username.is_empty() {
        Some("Username is required.".to_string())
    } else if form.password.is_empty() {
        Some("Password is required.".to_string())
    } else {
        let hash = password::hash_password(form.password.clone(), state.config.bcrypt_cost).await?;

        match users::create_user(&mut conn, &form.username, &hash).await? {
            Some(user_id) => {
                tracing::info!(user_id, username = %form.username, "User registered");
                return Ok(Redirect::to(urls::LOGIN).into_response());
            }
            None => Some(format!("User {} is already registered.", form.username)),
        }
    };

    if let Some(error) = error {
        flash(&session, error).await?;
    }

    let page = render(
        &state,
        &session,
        user.as_ref(),
        "auth/register.html",
        context! { form => context! { username => form.username } },
    )
    .await?;

    Ok(page.into_response())
}

pub async fn login_form(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    session: Session,
) -> AppResult<Response> {
    let page = render(
        &state,
        &session,
        user.as_ref(),
        "auth/login.html",
        context! { form => context! { username => "" } },
    )
    .await?;

    Ok(page.into_response())
}

pub async fn login(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    session: Session,
    mut conn: DbConn,
    Form(form): Form<CredentialsForm>,
) -> AppResult<Response> {
    let error = match users::find_by_username(&mut conn, &form.username).await? {
        None => "Incorrect username.",
        Some(user) => {
            if password::verify_password(form.password.clone(), user.password.clone()).await? {
                session::log_in(&session, user.id).await?;
                tracing::info!(user_id = user.id, username = %user.username, "User logged in");
                return Ok(Redirect::to(urls::INDEX).into_response());
            }
            "Incorrect password."
        }
    };

    tracing::debug!(username = %form.username, "Login rejected: {}", error);
    flash(&session, error).await?;

    let page = render(
        &state,
        &session,
        current.as_ref(),
        "auth/login.html",
        context! { form => context! { username => form.username } },
    )
    .await?;

    Ok(page.into_response())
}

/// Clear the current session, including the stored user id.
pub async fn logout(CurrentUser(user): CurrentUser, session: Session) -> AppResult<Redirect> {
    session::log_out(&session).await?;

    if let Some(user) = user {
        tracing::info!(user_id = user.id, "User logged out");
    }

    Ok(Redirect::to(urls::INDEX))
}
