//! # Database Module
//!
//! This module organizes all database-related code into submodules:
//! - `models`: Data structures (User, Post)
//! - `users`: queries on the `user` table
//! - `posts`: queries on the `post` table
//!
//! The module itself owns the connection lifecycle:
//! - [`connect`] builds the pool and creates the instance directory
//! - [`migrate`] applies the embedded migrations at startup
//! - [`init_db`] runs `schema.sql`, wiping and recreating every table
//! - [`DbConn`] hands each request its own pooled connection

pub mod models;
pub mod posts;
pub mod users;

use crate::error::AppError;
use crate::state::AppState;
use anyhow::{Context, Result};
use axum::{extract::FromRequestParts, http::request::Parts};
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, SqliteConnection};
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

/// Destructive schema script: drops and recreates all tables.
pub const SCHEMA: &str = include_str!("schema.sql");

/// Create the connection pool.
///
/// The SQLite file is created if it doesn't exist, along with its parent
/// directory (the "instance" folder).
pub async fn connect(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("Invalid DATABASE_URL '{}'", database_url))?
        .create_if_missing(true)
        .foreign_keys(true);

    if let Some(parent) = options.get_filename().parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create instance directory {:?}", parent))?;
        }
    }

    let pool = SqlitePoolOptions::new()
        .connect_with(options)
        .await
        .context("Failed to open the database")?;

    Ok(pool)
}

/// Apply the embedded migrations.
///
/// The migrations only ever create missing tables, so this is safe to run on
/// every startup.
pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to run database migrations")?;
    Ok(())
}

/// Clear the existing data and create new tables.
pub async fn init_db(pool: &SqlitePool) -> Result<()> {
    sqlx::raw_sql(SCHEMA)
        .execute(pool)
        .await
        .context("Failed to execute schema.sql")?;

    tracing::info!("Initialized the database");
    Ok(())
}

/// A pooled connection owned by a single request.
///
/// Extracting `DbConn` checks a connection out of the pool; it goes back to
/// the pool when the handler returns and the extractor is dropped.
pub struct DbConn(PoolConnection<Sqlite>);

impl FromRequestParts<AppState> for DbConn {
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let conn = state.db.acquire().await?;
        Ok(DbConn(conn))
    }
}

impl Deref for DbConn {
    type Target = SqliteConnection;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for DbConn {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
