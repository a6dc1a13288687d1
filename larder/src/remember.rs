//! Persisted sign-in between command invocations
//!
//! The session file under the root folder holds only the signed-in user id;
//! the profile is reloaded from the users table on restore.

use larder_common::Result;
use larder_store::LocalIdentity;
use std::path::Path;
use tracing::{debug, warn};

/// Restore the session recorded in `path`, if any.
///
/// A stale file naming an unknown user is removed.
pub async fn restore_session(identity: &LocalIdentity, path: &Path) -> Result<()> {
    let user_id = match std::fs::read_to_string(path) {
        Ok(content) => content.trim().to_string(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e.into()),
    };

    if user_id.is_empty() {
        return Ok(());
    }

    match identity.restore(&user_id).await? {
        Some(session) => debug!(user_id = %session.user_id, "Restored session"),
        None => {
            warn!(user_id = %user_id, "Session file names an unknown user; discarding");
            forget_session(path)?;
        }
    }
    Ok(())
}

pub fn remember_session(path: &Path, user_id: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, user_id)?;
    Ok(())
}

pub fn forget_session(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
