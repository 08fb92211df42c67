//! # Health Check Handler
//!
//! Simple endpoint to check if the server is running.
//! Used by load balancers and monitoring systems.

/// Health check endpoint
///
/// ## Route
/// GET /health
///
/// ## Response
/// `200 OK` with the plain-text body `ok`.
///
/// Deliberately touches neither the session nor the database, so it stays up
/// even when those don't.
pub async fn health_check() -> &'static str {
    "ok"
}
