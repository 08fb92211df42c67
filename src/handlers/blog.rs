//! List, create, update and delete posts.
//!
//! Only `index` is public; everything else sits behind `require_login`, and
//! update/delete additionally check that the current user wrote the post.

use crate::auth::session::{CurrentUser, LoggedIn};
use crate::db::models::{Post, User};
use crate::db::{posts, DbConn};
use crate::error::{AppError, AppResult};
use crate::flash::flash;
use crate::handlers::render;
use crate::middleware::auth::require_login;
use crate::state::AppState;
use crate::urls;
use axum::{
    extract::{Path, State},
    middleware,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use minijinja::context;
use serde::{Deserialize, Serialize};
use sqlx::SqliteConnection;
use tower_sessions::Session;

/// The blog route group.
pub fn routes() -> Router<AppState> {
    let protected = Router::new()
        .route(urls::CREATE, get(create_form).post(create))
        .route(urls::UPDATE, get(update_form).post(update))
        .route(urls::DELETE, post(delete))
        .route_layer(middleware::from_fn(require_login));

    Router::new().route(urls::INDEX, get(index)).merge(protected)
}

/// Body of the create and update forms. Also echoed back into the form when
/// validation fails.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PostForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

impl From<&Post> for PostForm {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            body: post.body.clone(),
        }
    }
}

/// Show all the posts, most recent first.
pub async fn index(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    session: Session,
    mut conn: DbConn,
) -> AppResult<Html<String>> {
    let posts = posts::list_posts(&mut conn).await?;

    render(&state, &session, user.as_ref(), "blog/index.html", context! { posts => posts }).await
}

pub async fn create_form(
    State(state): State<AppState>,
    LoggedIn(user): LoggedIn,
    session: Session,
) -> AppResult<Html<String>> {
    render(
        &state,
        &session,
        Some(&user),
        "blog/create.html",
        context! { form => PostForm::default() },
    )
    .await
}

pub async fn create(
    State(state): State<AppState>,
    LoggedIn(user): LoggedIn,
    session: Session,
    mut conn: DbConn,
    Form(form): Form<PostForm>,
) -> AppResult<Response> {
    if form.title.is_empty() {
        flash(&session, "Title is required.").await?;
        let page = render(&state, &session, Some(&user), "blog/create.html", context! { form => form }).await?;
        return Ok(page.into_response());
    }

    let post_id = posts::create_post(&mut conn, user.id, &form.title, &form.body).await?;
    tracing::info!(post_id, author_id = user.id, "Post created");

    Ok(Redirect::to(urls::INDEX).into_response())
}

pub async fn update_form(
    State(state): State<AppState>,
    LoggedIn(user): LoggedIn,
    session: Session,
    mut conn: DbConn,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let post = get_post(&mut conn, &id, &user, true).await?;
    let form = PostForm::from(&post);

    render(
        &state,
        &session,
        Some(&user),
        "blog/update.html",
        context! { post => post, form => form },
    )
    .await
}

pub async fn update(
    State(state): State<AppState>,
    LoggedIn(user): LoggedIn,
    session: Session,
    mut conn: DbConn,
    Path(id): Path<String>,
    Form(form): Form<PostForm>,
) -> AppResult<Response> {
    let post = get_post(&mut conn, &id, &user, true).await?;

    if form.title.is_empty() {
        flash(&session, "Title is required.").await?;
        let page = render(
            &state,
            &session,
            Some(&user),
            "blog/update.html",
            context! { post => post, form => form },
        )
        .await?;
        return Ok(page.into_response());
    }

    posts::update_post(&mut conn, post.id, &form.title, &form.body).await?;
    tracing::info!(post_id = post.id, "Post updated");

    Ok(Redirect::to(urls::INDEX).into_response())
}

/// Delete a post. Ensures that the post exists and that the logged in user
/// is the author of the post.
pub async fn delete(LoggedIn(user): LoggedIn, mut conn: DbConn, Path(id): Path<String>) -> AppResult<Redirect> {
    let post = get_post(&mut conn, &id, &user, true).await?;

    posts::delete_post(&mut conn, post.id).await?;
    tracing::info!(post_id = post.id, "Post deleted");

    Ok(Redirect::to(urls::INDEX))
}

/// Get a post and its author by id.
///
/// Checks that the id exists and optionally that the current user is the
/// author. The raw path segment is taken so that a non-numeric id is a 404
/// like any other missing post.
async fn get_post(conn: &mut SqliteConnection, raw_id: &str, user: &User, check_author: bool) -> AppResult<Post> {
    let not_found = || AppError::NotFound(format!("Post id {} doesn't exist.", raw_id));

    let id: i64 = raw_id.parse().map_err(|_| not_found())?;
    let post = posts::find_post(conn, id).await?.ok_or_else(not_found)?;

    if check_author && post.author_id != user.id {
        tracing::warn!(post_id = post.id, author_id = post.author_id, user_id = user.id, "Not the author");
        return Err(AppError::Forbidden("You can only change your own posts.".to_string()));
    }

    Ok(post)
}
