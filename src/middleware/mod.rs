//! # Middleware Module
//!
//! Middleware intercepts HTTP requests and responses.
//! Used for cross-cutting concerns that every view shares.
//!
//! ## Our Middleware
//! - `auth`: loads the logged-in user before each request, and guards the
//!   views that need one
//! - `errors`: renders HTML error pages for error responses

pub mod auth;
pub mod errors;
