//! CTF progress record and its store.
//!
//! The record lives under one storage key as JSON. Reads never fail: a
//! missing, corrupt or unreachable record reads as first-run progress.
//! Writes never fail either; a failed write is logged and the in-memory
//! copy stays authoritative for the rest of the session.

use crate::achievements;
use crate::catalog::Catalog;
use crate::error::StorageError;
use crate::storage::Storage;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Storage key of the structured progress record
pub const PROGRESS_KEY: &str = "ctf_progress";

/// Older builds only stored this boolean after the Konami code
pub const LEGACY_UNLOCK_KEY: &str = "ctf_unlocked";

/// One user's cumulative puzzle state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Progress {
    pub solved_challenges: BTreeSet<String>,
    pub unlocked_challenges: BTreeSet<String>,
    pub achievements: BTreeSet<String>,
    pub konami_unlocked: bool,
}

impl Progress {
    pub fn is_solved(&self, id: &str) -> bool {
        self.solved_challenges.contains(id)
    }

    pub fn solved_count(&self) -> usize {
        self.solved_challenges.len()
    }

    pub fn has_achievement(&self, id: &str) -> bool {
        self.achievements.contains(id)
    }

    /// Union of both records. Nothing already held is ever dropped.
    pub fn merge(&mut self, other: Progress) {
        self.solved_challenges.extend(other.solved_challenges);
        self.unlocked_challenges.extend(other.unlocked_challenges);
        self.achievements.extend(other.achievements);
        self.konami_unlocked |= other.konami_unlocked;
    }
}

/// Reads and writes the progress record through a `Storage` port.
pub struct ProgressStore {
    storage: Box<dyn Storage>,
    known_ids: BTreeSet<String>,
    current: Progress,
}

impl ProgressStore {
    pub fn new(storage: Box<dyn Storage>, catalog: &Catalog) -> Self {
        let mut store = Self {
            storage,
            known_ids: catalog.ids().map(str::to_string).collect(),
            current: Progress::default(),
        };
        store.current = store.load();
        store
    }

    /// Read the persisted record, falling back to first-run progress.
    pub fn load(&self) -> Progress {
        match self.read() {
            Ok(Some(progress)) => progress,
            Ok(None) => self.first_run(),
            Err(e) => {
                warn!(error = %e, "progress record unreadable, starting fresh");
                self.first_run()
            }
        }
    }

    /// The in-memory copy of the last record read or written.
    pub fn current(&self) -> &Progress {
        &self.current
    }

    /// Persist a record. Failures are logged, not returned.
    pub fn save(&mut self, progress: &Progress) {
        self.current = progress.clone();
        let result = serde_json::to_string(progress)
            .map_err(StorageError::from)
            .and_then(|json| self.storage.set(PROGRESS_KEY, &json));
        if let Err(e) = result {
            warn!(error = %e, "failed to persist progress");
        }
    }

    /// Record a solved challenge. Solving twice changes nothing; unknown
    /// ids are ignored.
    pub fn mark_solved(&mut self, challenge_id: &str) -> Progress {
        if !self.known_ids.contains(challenge_id) {
            warn!(challenge = challenge_id, "refusing to mark unknown challenge solved");
            return self.current.clone();
        }
        let mut progress = self.latest();
        progress.solved_challenges.insert(challenge_id.to_string());
        self.apply_rules(&mut progress);
        self.save(&progress);
        debug!(
            challenge = challenge_id,
            solved = progress.solved_count(),
            "challenge solved"
        );
        progress
    }

    /// Re-derive achievements from the current state and persist them.
    pub fn recompute_achievements(&mut self) -> Progress {
        let mut progress = self.latest();
        self.apply_rules(&mut progress);
        self.save(&progress);
        progress
    }

    /// Record the Konami unlock: flag it, open every challenge, and grant
    /// whatever achievements that earns.
    pub fn unlock_konami(&mut self) -> Progress {
        let mut progress = self.latest();
        progress.konami_unlocked = true;
        progress.unlocked_challenges = self.known_ids.clone();
        self.apply_rules(&mut progress);
        self.save(&progress);
        if let Err(e) = self.storage.set(LEGACY_UNLOCK_KEY, "true") {
            warn!(error = %e, "failed to persist legacy unlock flag");
        }
        progress
    }

    /// Forget everything, back to first-run state.
    pub fn reset(&mut self) {
        for key in [PROGRESS_KEY, LEGACY_UNLOCK_KEY] {
            if let Err(e) = self.storage.remove(key) {
                warn!(key, error = %e, "failed to clear stored progress");
            }
        }
        self.current = Progress::default();
    }

    pub fn catalog_size(&self) -> usize {
        self.known_ids.len()
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    fn read(&self) -> Result<Option<Progress>, StorageError> {
        let Some(raw) = self.storage.get(PROGRESS_KEY)? else {
            return Ok(None);
        };
        let mut progress: Progress = serde_json::from_str(&raw)?;
        progress
            .solved_challenges
            .retain(|id| self.known_ids.contains(id));
        progress
            .unlocked_challenges
            .retain(|id| self.known_ids.contains(id));
        Ok(Some(progress))
    }

    /// The in-memory copy merged with whatever storage holds, so a record
    /// written elsewhere is picked up and a failed write loses nothing.
    fn latest(&self) -> Progress {
        let mut progress = self.current.clone();
        match self.read() {
            Ok(Some(stored)) => progress.merge(stored),
            Ok(None) => {}
            Err(e) => debug!(error = %e, "using in-memory progress"),
        }
        progress
    }

    fn first_run(&self) -> Progress {
        let legacy = match self.storage.get(LEGACY_UNLOCK_KEY) {
            Ok(Some(flag)) => flag.trim() == "true",
            Ok(None) => false,
            Err(e) => {
                debug!(error = %e, "legacy unlock flag unreadable");
                false
            }
        };
        Progress {
            konami_unlocked: legacy,
            ..Progress::default()
        }
    }

    fn apply_rules(&self, progress: &mut Progress) {
        let earned = achievements::earned(
            progress.solved_count(),
            self.known_ids.len(),
            progress.konami_unlocked,
        );
        progress.achievements.extend(earned);
    }
}
