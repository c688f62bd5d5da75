use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::atomic::write_atomic;

/// Durable set of session ids that have already been appended.
///
/// An id is recorded only after its documents were written; [`ProcessedSessions::record`]
/// persists immediately so a crash later in the batch cannot re-append it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedSessions {
    path: PathBuf,
    ids: BTreeSet<String>,
}

impl ProcessedSessions {
    /// Load the set from `path`; a missing file is an empty set.
    ///
    /// # Errors
    ///
    /// A file that exists but is not a JSON array of strings is an error rather than an
    /// empty set, since treating it as empty would re-append every session.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::empty(path));
        }
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read processed sessions: {}", path.display()))?;
        let ids: BTreeSet<String> = if json.trim().is_empty() {
            BTreeSet::new()
        } else {
            serde_json::from_str(&json).with_context(|| {
                format!("Failed to parse processed sessions: {}", path.display())
            })?
        };
        Ok(Self { path: path.to_path_buf(), ids })
    }

    pub fn empty(path: &Path) -> Self {
        Self { path: path.to_path_buf(), ids: BTreeSet::new() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.ids.contains(session_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Add an id in memory without persisting
    pub fn insert(&mut self, session_id: impl Into<String>) -> bool {
        self.ids.insert(session_id.into())
    }

    /// Add an id and persist the whole set; on failure the id is not kept
    pub fn record(&mut self, session_id: &str) -> Result<()> {
        let added = self.ids.insert(session_id.to_string());
        if let Err(e) = self.save() {
            if added {
                self.ids.remove(session_id);
            }
            return Err(e);
        }
        Ok(())
    }

    /// Write the set as a sorted JSON array
    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.ids)
            .context("Failed to serialize processed sessions")?;
        write_atomic(&self.path, json)
    }
}
