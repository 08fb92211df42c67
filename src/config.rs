//! # Configuration Management
//!
//! This module handles loading configuration from environment variables.
//! It uses the "12-factor app" methodology where configuration comes from the environment.
//!
//! ## Environment Variables
//! - `HOST`: Server bind address (default: 127.0.0.1)
//! - `PORT`: Server port (default: 5000)
//! - `DATABASE_URL`: SQLite database connection string
//! - `SECRET_KEY`: Key material used to sign the session cookie
//! - `STATIC_DIR`: Directory served under `/static`
//! - `BCRYPT_COST`: Work factor for password hashing
//! - `SESSION_INACTIVITY_HOURS`: Idle time before a session expires
//! - `SESSION_COOKIE_SECURE`: Only send the session cookie over HTTPS
//! - `TESTING`: Marks the app as running under tests

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Application configuration
///
/// This struct holds all configuration values needed to run the server.
/// All fields are public so tests can build a config by hand and override
/// single values, the same way a test would pass overrides to the app factory.
#[derive(Clone)]
pub struct Config {
    /// Server host/IP address to bind to
    /// Examples: "127.0.0.1" (localhost only), "0.0.0.0" (all interfaces)
    pub host: String,

    /// Server port number. `0` asks the OS for a free port.
    pub port: u16,

    /// SQLite database connection URL
    /// Format: "sqlite:instance/app.sqlite"
    /// The file and its parent directory are created if missing.
    pub database_url: String,

    /// Secret used to derive the cookie signing key.
    /// `None` means a random key is generated for each process, so sessions
    /// do not survive a restart.
    pub secret_key: Option<String>,

    /// Directory holding `css/`, `js/` and other static assets.
    pub static_dir: PathBuf,

    /// bcrypt work factor (4..=31)
    pub bcrypt_cost: u32,

    /// Hours of inactivity after which a session expires
    pub session_inactivity_hours: i64,

    /// Set the `Secure` attribute on the session cookie
    pub session_cookie_secure: bool,

    /// Marks a config built for the test suite. Only logged at startup;
    /// no code path branches on it.
    pub testing: bool,
}

impl std::fmt::Debug for Config {
    // Hand-written so the secret never ends up in the logs.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_url", &self.database_url)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "<redacted>"))
            .field("static_dir", &self.static_dir)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("session_inactivity_hours", &self.session_inactivity_hours)
            .field("session_cookie_secure", &self.session_cookie_secure)
            .field("testing", &self.testing)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads variables from .env file (if present) using dotenvy
    /// 2. Reads each configuration value from environment
    /// 3. Falls back to sensible defaults if variables aren't set
    /// 4. Returns an error if required parsing fails (e.g., invalid port number)
    ///
    /// ## Example .env file
    /// ```text
    /// HOST=127.0.0.1
    /// PORT=5000
    /// DATABASE_URL=sqlite:instance/app.sqlite
    /// SECRET_KEY=change-me
    /// ```
    pub fn from_env() -> Result<Self> {
        // dotenvy doesn't error if the file is missing
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    ///
    /// `from_env` is a thin wrapper around this; tests feed it a map instead
    /// of mutating the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            host: var("HOST", "127.0.0.1"),
            port: var("PORT", "5000")
                .parse()
                .context("PORT must be a number between 0 and 65535")?,
            database_url: var("DATABASE_URL", "sqlite:instance/app.sqlite"),
            // An empty SECRET_KEY is treated as unset
            secret_key: lookup("SECRET_KEY").filter(|key| !key.is_empty()),
            static_dir: PathBuf::from(var("STATIC_DIR", "static")),
            bcrypt_cost: parse_cost(&var("BCRYPT_COST", &bcrypt::DEFAULT_COST.to_string()))?,
            session_inactivity_hours: var("SESSION_INACTIVITY_HOURS", "24")
                .parse()
                .context("SESSION_INACTIVITY_HOURS must be an integer")?,
            session_cookie_secure: parse_flag(&var("SESSION_COOKIE_SECURE", "false"))
                .context("SESSION_COOKIE_SECURE must be a boolean")?,
            testing: parse_flag(&var("TESTING", "false")).context("TESTING must be a boolean")?,
        })
    }

    /// Get the socket address to bind the server to
    ///
    /// Combines host and port into a format suitable for TCP binding.
    /// Example: "127.0.0.1:5000"
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// Range accepted by `bcrypt::hash`
const BCRYPT_COSTS: std::ops::RangeInclusive<u32> = 4..=31;

fn parse_cost(value: &str) -> Result<u32> {
    let cost: u32 = value
        .parse()
        .context("BCRYPT_COST must be a positive integer")?;
    anyhow::ensure!(
        BCRYPT_COSTS.contains(&cost),
        "BCRYPT_COST must be between {} and {}, got {}",
        BCRYPT_COSTS.start(),
        BCRYPT_COSTS.end(),
        cost
    );
    Ok(cost)
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => anyhow::bail!("invalid boolean value '{}'", other),
    }
}
