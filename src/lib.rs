//! # tinyblog
//!
//! A small server-rendered blog: users register and log in with a password,
//! then write, edit and delete Markdown posts. Everyone can read.
//!
//! ## Key Pieces
//! - **Sessions**: server-side, stored in SQLite, cookie holds a signed id
//! - **Templates**: minijinja, compiled into the binary
//! - **Database**: one SQLite file, one pooled connection per request

pub mod app;         // Application factory (routes, layers, error pages)
pub mod auth;        // Password hashing and current-user extractors
pub mod config;      // Configuration management (environment variables)
pub mod db;          // Database operations (users, posts, schema)
pub mod error;       // Error handling and custom error types
pub mod flash;       // One-shot messages carried in the session
pub mod handlers;    // HTTP request handlers (routes)
pub mod markdown;    // Markdown rendering for post bodies
pub mod middleware;  // Request/response interceptors
pub mod state;       // Shared application state
pub mod templates;   // HTML templates
pub mod urls;        // Endpoint names and URL building

pub use app::{create_app, Application};
pub use config::Config;
