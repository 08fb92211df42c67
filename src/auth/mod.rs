//! # Authentication
//!
//! Password-based login on top of server-side sessions.
//!
//! ## Submodules
//! - `password`: bcrypt hashing and verification (off the async runtime)
//! - `session`: what the session stores for a logged-in user, and the
//!   extractors handlers use to get at the current user
//!
//! ## Login Flow
//! 1. User submits username and password → `handlers::auth::login`
//! 2. Server looks up the user and verifies the password hash
//! 3. Session id is cycled and `user_id` is stored → `session::log_in`
//! 4. On every later request `middleware::auth::load_logged_in_user` turns
//!    the stored id back into a `User` and attaches it as [`session::CurrentUser`]

pub mod password;
pub mod session;
