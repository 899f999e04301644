//! # History Tape
//!
//! Every successful evaluation is recorded as an entry on the tape, and the
//! tape is saved to `~/.calcpad/history.json`.
//!
//! Writes use atomic rename (write `.tmp`, then `rename()`), so a crash
//! mid-save leaves the previous file intact. There is no merging: the
//! last writer wins.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::core::config;

pub const DEFAULT_HISTORY_LIMIT: usize = 100;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HistoryEntry {
    pub expression: String,
    pub result: String,
    /// Unix timestamp (seconds).
    pub timestamp: i64,
}

impl HistoryEntry {
    pub fn new(expression: String, result: String) -> Self {
        Self {
            expression,
            result,
            timestamp: Utc::now().timestamp(),
        }
    }
}

/// On-disk shape of the history file.
#[derive(Serialize, Deserialize, Default, Debug)]
struct HistoryFile {
    entries: Vec<HistoryEntry>,
}

/// Bounded list of entries, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    entries: Vec<HistoryEntry>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl History {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit,
        }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// Append an entry, dropping the oldest ones past the limit.
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
        if self.entries.len() > self.limit {
            let excess = self.entries.len() - self.limit;
            self.entries.drain(..excess);
        }
    }

    pub fn remove(&mut self, index: usize) -> Option<HistoryEntry> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[derive(Debug)]
pub enum HistoryError {
    Io(io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::Io(e) => write!(f, "history I/O error: {e}"),
            HistoryError::Parse(e) => write!(f, "history parse error: {e}"),
        }
    }
}

impl std::error::Error for HistoryError {}

impl From<io::Error> for HistoryError {
    fn from(e: io::Error) -> Self {
        HistoryError::Io(e)
    }
}

impl From<serde_json::Error> for HistoryError {
    fn from(e: serde_json::Error) -> Self {
        HistoryError::Parse(e)
    }
}

/// Returns `~/.calcpad/history.json`, creating the directory if needed.
pub fn history_path() -> io::Result<PathBuf> {
    let dir = config::app_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no home directory"))?;
    fs::create_dir_all(&dir)?;
    Ok(dir.join("history.json"))
}

/// Load history from `path`. A missing file is an empty history.
pub fn load_from(path: &Path, limit: usize) -> Result<History, HistoryError> {
    let mut history = History::with_limit(limit);
    if !path.exists() {
        debug!("No history file at {}", path.display());
        return Ok(history);
    }
    let contents = fs::read_to_string(path)?;
    let file: HistoryFile = serde_json::from_str(&contents)?;
    for entry in file.entries {
        history.push(entry);
    }
    info!("Loaded {} history entries from {}", history.len(), path.display());
    Ok(history)
}

/// Write history to `path` atomically.
pub fn save_to(history: &History, path: &Path) -> Result<(), HistoryError> {
    let file = HistoryFile {
        entries: history.entries.clone(),
    };
    let json = serde_json::to_string_pretty(&file)?;
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    debug!("Saved {} history entries to {}", history.len(), path.display());
    Ok(())
}

pub fn load(limit: usize) -> Result<History, HistoryError> {
    load_from(&history_path()?, limit)
}

pub fn save(history: &History) -> Result<(), HistoryError> {
    save_to(history, &history_path()?)
}
