//! Stable caller identity for this installation.
//!
//! The remote assistant distinguishes callers by an opaque id. One is
//! generated on first use and persisted under the platform data dir; later
//! runs reuse it. Distinct from the per-session id a [`crate::chat::ChatSession`]
//! generates for itself.

use std::path::Path;
use tracing::debug;
use uuid::Uuid;

use crate::config::ensure_data_dir;
use crate::error::ScoutResult;

const CALLER_ID_FILE: &str = "caller-id";

/// The persisted caller id, generating and storing a fresh one if none
/// exists yet.
pub fn load_or_generate() -> ScoutResult<String> {
    let dir = ensure_data_dir()?;
    load_or_generate_at(&dir.join(CALLER_ID_FILE))
}

/// Same as [`load_or_generate`] against an explicit path. Empty or
/// unreadable files regenerate.
pub fn load_or_generate_at(path: &Path) -> ScoutResult<String> {
    if let Ok(existing) = std::fs::read_to_string(path) {
        let trimmed = existing.trim();
        if !trimmed.is_empty() {
            return Ok(trimmed.to_string());
        }
    }

    let id = Uuid::new_v4().to_string();
    std::fs::write(path, &id)?;
    debug!(path = %path.display(), "Generated new caller id");
    Ok(id)
}
