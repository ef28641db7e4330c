/*
 * Persistence Module
 *
 * The single piece of persisted state: whether the intro animation has
 * been seen. It lives in a small JSON file in the state directory, is
 * read once at startup and written when the intro completes or is
 * skipped. A missing or unreadable file means "not seen".
 */

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const STATE_FILE_NAME: &str = "cosmic_state.json";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub has_seen_big_bang: bool,
}

pub struct IntroFlagStore {
    path: PathBuf,
}

impl IntroFlagStore {
    pub fn new(state_dir: impl AsRef<Path>) -> Self {
        Self {
            path: state_dir.as_ref().join(STATE_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_state(&self) -> Result<PersistedState> {
        if !self.path.exists() {
            return Ok(PersistedState::default());
        }
        let text = fs::read_to_string(&self.path).with_context(|| format!("read state file: {}", self.path.display()))?;
        let state = serde_json::from_str(&text).with_context(|| format!("parse state file: {}", self.path.display()))?;
        Ok(state)
    }

    // Whether the intro has been seen; problems reading the file count as "no"
    pub fn has_seen_intro(&self) -> bool {
        match self.read_state() {
            Ok(state) => state.has_seen_big_bang,
            Err(e) => {
                warn!("{:#}; treating intro as unseen", e);
                false
            }
        }
    }

    // Record that the intro has been seen. Setting the flag again leaves
    // the file unchanged.
    pub fn mark_seen(&self) -> Result<()> {
        let state = self.read_state().unwrap_or_default();
        if state.has_seen_big_bang {
            return Ok(());
        }

        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir).with_context(|| format!("create state directory: {}", dir.display()))?;
            }
        }

        let state = PersistedState { has_seen_big_bang: true };
        let text = serde_json::to_string_pretty(&state)?;
        fs::write(&self.path, text).with_context(|| format!("write state file: {}", self.path.display()))?;
        info!("Recorded intro as seen in {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn unset_by_default() {
        let dir = tempdir().unwrap();
        let store = IntroFlagStore::new(dir.path());
        assert!(!store.has_seen_intro());
    }

    #[test]
    fn marking_twice_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = IntroFlagStore::new(dir.path());

        store.mark_seen().unwrap();
        let first = fs::read_to_string(store.path()).unwrap();
        assert!(store.has_seen_intro());

        store.mark_seen().unwrap();
        let second = fs::read_to_string(store.path()).unwrap();
        assert!(store.has_seen_intro());
        assert_eq!(first, second);
    }

    #[test]
    fn flag_survives_a_new_store() {
        let dir = tempdir().unwrap();
        IntroFlagStore::new(dir.path()).mark_seen().unwrap();
        assert!(IntroFlagStore::new(dir.path()).has_seen_intro());
    }

    #[test]
    fn malformed_file_counts_as_unseen_and_is_repaired() {
        let dir = tempdir().unwrap();
        let store = IntroFlagStore::new(dir.path());
        fs::write(store.path(), "not json").unwrap();
        assert!(!store.has_seen_intro());
        store.mark_seen().unwrap();
        assert!(store.has_seen_intro());
    }

    #[test]
    fn creates_missing_state_directory() {
        let dir = tempdir().unwrap();
        let store = IntroFlagStore::new(dir.path().join("a").join("b"));
        store.mark_seen().unwrap();
        assert!(store.has_seen_intro());
    }
}
