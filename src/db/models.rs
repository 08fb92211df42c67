//! # Database Models
//!
//! Rows of the `user` and `post` tables. The structs derive `Serialize` so
//! they can be handed straight to the templates.

use chrono::NaiveDateTime;
use serde::Serialize;

/// User account
///
/// ## Derive Macros Explained
/// - `Serialize`: lets templates read `user.id` / `user.username`
/// - `sqlx::FromRow`: maps a `SELECT * FROM user` row onto the struct
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    /// Autoincrement primary key
    pub id: i64,

    /// Unique login name
    pub username: String,

    /// bcrypt hash of the password (never the password itself)
    ///
    /// Skipped when serializing so the hash can never leak into a page.
    #[serde(skip_serializing)]
    pub password: String,
}

/// Blog post joined with its author's username
///
/// This is the shape every post query returns: the `post` columns plus
/// `user.username` so pages can show "by alice on 2024-01-15".
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Post {
    pub id: i64,

    /// Foreign key to `user.id`; ownership checks compare against this
    pub author_id: i64,

    /// Set by the database on insert (`CURRENT_TIMESTAMP`, UTC)
    pub created: NaiveDateTime,

    pub title: String,

    /// Markdown source; rendered at display time
    pub body: String,

    pub username: String,
}
