//! One-shot messages shown on the next rendered page.
//!
//! Messages are queued in the session and drained by whichever page renders
//! next, in the order they were added.

use crate::error::AppResult;
use tower_sessions::Session;

const FLASHES_KEY: &str = "_flashes";

/// Queue a message for the next rendered page.
pub async fn flash(session: &Session, message: impl Into<String>) -> AppResult<()> {
    let mut messages: Vec<String> = session.get(FLASHES_KEY).await?.unwrap_or_default();
    messages.push(message.into());
    session.insert(FLASHES_KEY, messages).await?;
    Ok(())
}

/// Drain all queued messages.
///
/// Reads before removing: a removal marks the session modified, and an
/// anonymous visitor with nothing queued shouldn't get a session saved.
pub async fn take(session: &Session) -> AppResult<Vec<String>> {
    if session.get::<Vec<String>>(FLASHES_KEY).await?.is_none() {
        return Ok(Vec::new());
    }

    let messages = session.remove::<Vec<String>>(FLASHES_KEY).await?;
    Ok(messages.unwrap_or_default())
}
