//! Per-user score table
//!
//! Persisted under `highScores` as a JSON object `{ "<username>": <score> }`.
//! Recording overwrites the user's entry with the latest score, even when it
//! is lower than the stored one.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::storage::{self, KeyValueStore};

/// Username → most recently recorded score
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreTable {
    entries: BTreeMap<String, u32>,
}

impl ScoreTable {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "highScores";

    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the entry for `username`
    pub fn record(&mut self, username: &str, score: u32) {
        self.entries.insert(username.to_string(), score);
    }

    /// Highest score across all users (0 when empty)
    pub fn best(&self) -> u32 {
        self.entries.values().copied().max().unwrap_or(0)
    }

    pub fn get(&self, username: &str) -> Option<u32> {
        self.entries.get(username).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by score (descending), ties by username
    pub fn leaderboard(&self) -> Vec<(&str, u32)> {
        let mut rows: Vec<_> = self
            .entries
            .iter()
            .map(|(name, score)| (name.as_str(), *score))
            .collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        rows
    }
}

/// Score table backed by a persistent store.
///
/// Writes go through to the backend immediately. When the backend fails the
/// table keeps working in memory and the store is flagged non-durable. The
/// stored table is never overwritten until it has been read successfully.
pub struct ScoreStore {
    table: ScoreTable,
    backend: Box<dyn KeyValueStore>,
    durable: bool,
    /// Stored table has been read (or confirmed absent)
    loaded: bool,
}

impl ScoreStore {
    /// Load the table from `backend` (empty if missing or corrupt)
    pub fn load(backend: Box<dyn KeyValueStore>) -> Self {
        let mut store = Self {
            table: ScoreTable::new(),
            backend,
            durable: false,
            loaded: false,
        };
        store.reload();
        store
    }

    /// Read the stored table. Entries already recorded in memory win over
    /// stored ones, since they are newer.
    fn reload(&mut self) -> bool {
        match storage::read_json::<ScoreTable>(self.backend.as_ref(), ScoreTable::STORAGE_KEY) {
            Ok(stored) => {
                let mut table = stored.unwrap_or_default();
                table.entries.append(&mut self.table.entries);
                self.table = table;
                self.loaded = true;
                self.durable = true;
                log::info!("Loaded {} score entries", self.table.len());
                true
            }
            Err(e) => {
                log::warn!("Could not read stored scores, keeping scores in memory: {e}");
                self.durable = false;
                false
            }
        }
    }

    /// Overwrite `username`'s score and persist the table
    pub fn record_score(&mut self, username: &str, score: u32) {
        if username.is_empty() {
            log::warn!("Refusing to record score {score} without a username");
            return;
        }
        self.table.record(username, score);

        // Writing before the stored table is known would erase other players
        if !self.loaded && !self.reload() {
            return;
        }

        match storage::save_json(self.backend.as_mut(), ScoreTable::STORAGE_KEY, &self.table) {
            Ok(()) => {
                if !self.durable {
                    log::info!("Score storage recovered");
                }
                self.durable = true;
            }
            Err(e) => {
                if self.durable {
                    log::warn!("Score storage unavailable, keeping scores in memory: {e}");
                }
                self.durable = false;
            }
        }
    }

    /// Highest recorded score (0 when empty)
    pub fn best_score(&self) -> u32 {
        self.table.best()
    }

    /// False after a failed read or write, until storage works again
    pub fn is_durable(&self) -> bool {
        self.durable
    }

    pub fn table(&self) -> &ScoreTable {
        &self.table
    }

    /// Backend shared with other persisted values (remembered username)
    pub fn backend_mut(&mut self) -> &mut dyn KeyValueStore {
        self.backend.as_mut()
    }

    pub fn backend(&self) -> &dyn KeyValueStore {
        self.backend.as_ref()
    }
}

impl std::fmt::Debug for ScoreStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreStore")
            .field("table", &self.table)
            .field("durable", &self.durable)
            .finish_non_exhaustive()
    }
}
