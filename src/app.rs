//! # Application Factory
//!
//! [`create_app`] turns a [`Config`] into a ready-to-serve [`Application`]:
//! state, session store, route groups, error pages and middleware.
//!
//! ## Request lifecycle
//! Layers run outside-in:
//! 1. `TraceLayer` logs the request
//! 2. `SessionManagerLayer` loads the session from the cookie
//! 3. `render_error_pages` swaps 4xx/5xx responses for HTML pages
//! 4. `load_logged_in_user` attaches the current user
//! 5. `CatchPanicLayer` turns a panicking handler into a 500
//! 6. the matched view runs, with its own `DbConn` for the duration of the request

use crate::config::Config;
use crate::error::handle_panic;
use crate::handlers::{self, health::health_check};
use crate::middleware::{auth::load_logged_in_user, errors::render_error_pages};
use crate::state::AppState;
use crate::urls;
use anyhow::{Context, Result};
use axum::{handler::HandlerWithoutStateExt, middleware as axum_middleware, routing::get, Router};
use sha2::{Digest, Sha512};
use time::Duration;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tower_sessions::{cookie::Key, Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

/// A configured application, not yet bound to a socket.
pub struct Application {
    pub router: Router,
    pub state: AppState,
    pub session_store: SqliteStore,
}

/// Build the application.
///
/// Opens (and migrates) the database, prepares the session table, and wires
/// the auth and blog route groups together with the error pages.
pub async fn create_app(config: Config) -> Result<Application> {
    tracing::debug!(testing = config.testing, "Creating application");

    let state = AppState::new(config).await?;

    // Sessions live server-side in the same SQLite database; the cookie only
    // carries the (signed) session id.
    let session_store = SqliteStore::new(state.db.clone());
    session_store
        .migrate()
        .await
        .context("Failed to create the session table")?;

    let session_layer = SessionManagerLayer::new(session_store.clone())
        .with_secure(state.config.session_cookie_secure)
        .with_expiry(Expiry::OnInactivity(Duration::hours(
            state.config.session_inactivity_hours,
        )))
        .with_signed(signing_key(state.config.secret_key.as_deref()));

    let static_files = ServeDir::new(&state.config.static_dir)
        .not_found_service(handlers::not_found.into_service());

    let router = Router::new()
        .merge(handlers::auth::routes())
        .merge(handlers::blog::routes())
        .nest_service(urls::STATIC, static_files)
        .fallback(handlers::not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            load_logged_in_user,
        ))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            render_error_pages,
        ))
        .layer(session_layer)
        // Added after the session layers so it never touches the session or the database
        .route(urls::HEALTH, get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    Ok(Application {
        router,
        state,
        session_store,
    })
}

impl Application {
    /// Serve on an already-bound listener until Ctrl-C.
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("Server error")?;
        Ok(())
    }
}

/// Derive the cookie signing key.
///
/// `Key` needs 64 bytes of key material, which is exactly one SHA-512 digest
/// of the configured secret. Without a secret every process gets a random key.
fn signing_key(secret: Option<&str>) -> Key {
    match secret {
        Some(secret) => Key::from(Sha512::digest(secret.as_bytes()).as_slice()),
        None => {
            tracing::warn!("SECRET_KEY is not set; sessions will not survive a restart");
            Key::generate()
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
