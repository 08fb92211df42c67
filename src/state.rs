//! # Application State
//!
//! This module defines the shared state that's accessible to all request handlers.
//! In Axum, state is how you share resources (database connections, configuration, etc.)
//! across different parts of your application.
//!
//! ## The State Pattern
//! Instead of creating new database connections for each request, we:
//! 1. Create a connection pool once at startup
//! 2. Store it in AppState
//! 3. Let each request check out one connection (see `db::DbConn`)
//! 4. Axum clones the state for each request (cheap because everything inside is a handle)

use crate::config::Config;
use crate::db;
use crate::templates::Templates;
use anyhow::{Context, Result};
use sqlx::sqlite::SqlitePool;
use std::sync::Arc;

/// Shared application state
///
/// ## Why Clone?
/// Each request handler gets a clone of the state:
/// - `SqlitePool` is already a clone-able handle to a pool of connections
/// - `Templates` and `Arc<Config>` only clone a pointer
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,

    /// Compiled HTML templates
    pub templates: Templates,

    /// Settings the handlers need at runtime (bcrypt cost, ...)
    pub config: Arc<Config>,
}

impl AppState {
    /// Initialize application state
    ///
    /// This function:
    /// 1. Connects to the SQLite database (creating the file if needed)
    /// 2. Runs database migrations (creates tables if they don't exist)
    /// 3. Compiles the templates
    ///
    /// # Errors
    /// Returns an error if:
    /// - Database connection fails
    /// - Migrations fail
    /// - A template doesn't parse
    pub async fn new(config: Config) -> Result<Self> {
        let db = db::connect(&config.database_url).await?;
        db::migrate(&db).await?;

        let templates = Templates::new().context("Failed to compile templates")?;

        Ok(AppState {
            db,
            templates,
            config: Arc::new(config),
        })
    }
}
