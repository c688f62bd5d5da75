//! Per-project documents under `<project_dir>/goldfish/`.
//!
//! - [`large_log`]: `large.md`, the append-only transcript history
//! - [`inbox`]: `inbox.md`, a stable header followed by newest-first
//!   `NEEDS_PROCESSING` flags
//! - [`seed`]: `small.md` for directories created in the uncategorized namespace
//!
//! Documents are rewritten whole on every append: read, splice in memory, write back.
//! Appending is not idempotent on its own; the pipeline's processed set guarantees each
//! session reaches [`ProjectDocuments::append_session`] at most once.

pub mod inbox;
pub mod large_log;
pub mod seed;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub use inbox::{InboxDocument, InboxEntry};
pub use large_log::{extend_large_log, render_transcript};

use crate::models::SessionRecord;
use crate::storage::write_atomic;

/// Subfolder of every project directory holding goldfish documents
pub const DOCS_SUBDIR: &str = "goldfish";

/// The document pair of one project directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDocuments {
    project_dir: PathBuf,
    name: String,
}

impl ProjectDocuments {
    pub fn new(project_dir: &Path) -> Self {
        let name = project_dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Self { project_dir: project_dir.to_path_buf(), name }
    }

    /// Project name used in document titles (the directory name)
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn docs_dir(&self) -> PathBuf {
        self.project_dir.join(DOCS_SUBDIR)
    }

    pub fn large_log_path(&self) -> PathBuf {
        self.docs_dir().join(large_log::LARGE_LOG_FILENAME)
    }

    pub fn inbox_path(&self) -> PathBuf {
        self.docs_dir().join(inbox::INBOX_FILENAME)
    }

    pub fn small_note_path(&self) -> PathBuf {
        self.docs_dir().join(seed::SMALL_NOTE_FILENAME)
    }

    /// Append the session to `large.md` and flag it at the top of `inbox.md`.
    ///
    /// Both documents are read and spliced before either is written, so a read failure
    /// leaves both untouched. `fallback_date` stands in for a missing session date in
    /// the inbox entry.
    pub fn append_session(&self, record: &SessionRecord, fallback_date: &str) -> Result<()> {
        let large_path = self.large_log_path();
        let inbox_path = self.inbox_path();

        let large = read_optional(&large_path)?;
        let inbox = read_optional(&inbox_path)?;

        let large = extend_large_log(large.as_deref(), &self.name, record);
        let mut inbox = InboxDocument::load_or_new(inbox.as_deref(), &self.name);
        inbox.insert(&InboxEntry::for_session(record, fallback_date));

        write_atomic(&large_path, large)
            .with_context(|| format!("Failed to append to {}", large_path.display()))?;
        write_atomic(&inbox_path, inbox.render())
            .with_context(|| format!("Failed to update {}", inbox_path.display()))?;
        Ok(())
    }

    /// Write the uncategorized seed note
    pub fn write_seed_note(&self, project: &str, last_date: &str) -> Result<()> {
        let path = self.small_note_path();
        write_atomic(&path, seed::render_small_note(project, last_date))
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}

/// File contents, or `None` if it does not exist
fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
    }
}
