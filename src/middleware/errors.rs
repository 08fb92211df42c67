//! Error page rendering.
//!
//! Two handlers, chosen by status: `error/404.html` for not-found and
//! `error/500.html` for every other 4xx or 5xx. Responses tagged with
//! [`ErrorPage`] may carry a user-facing message. Redirects and successful
//! pages pass straight through.

use crate::auth::session;
use crate::db::{models::User, users};
use crate::error::ErrorPage;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use minijinja::context;
use tower_sessions::Session;

pub async fn render_error_pages(
    State(state): State<AppState>,
    session: Session,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;

    let status = response.status();

    // Rejections raised by axum itself (405, 415, 422, ...) carry no tag but
    // still get a page; their plain-text body is not shown.
    let page = match response.extensions().get::<ErrorPage>() {
        Some(page) => page.clone(),
        None if status.is_client_error() || status.is_server_error() => {
            tracing::debug!(status = status.as_u16(), "Rendering error page for untagged response");
            ErrorPage { message: None }
        }
        None => return response,
    };

    let template = if status == StatusCode::NOT_FOUND {
        "error/404.html"
    } else {
        "error/500.html"
    };

    // The page still shows the nav bar, so look the user up again; if that
    // fails too (e.g. the database is down) render as logged out.
    let user = current_user(&state, &session).await;

    let rendered = state.templates.render_page(
        template,
        user.as_ref(),
        Vec::new(),
        context! {
            status => status.as_u16(),
            message => page.message,
        },
    );

    match rendered {
        Ok(html) => {
            let mut rendered = (status, html).into_response();
            if let Some(allow) = response.headers().get(header::ALLOW) {
                rendered.headers_mut().insert(header::ALLOW, allow.clone());
            }
            rendered
        }
        Err(e) => {
            tracing::error!("Failed to render {}: {}", template, e);
            response
        }
    }
}

async fn current_user(state: &AppState, session: &Session) -> Option<User> {
    let user_id = session::user_id(session).await.ok().flatten()?;
    let mut conn = state.db.acquire().await.ok()?;
    users::find_by_id(&mut conn, user_id).await.ok().flatten()
}
