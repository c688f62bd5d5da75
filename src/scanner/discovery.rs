use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use walkdir::WalkDir;

/// Maximum number of session files to scan (prevents resource exhaustion)
const MAX_SESSION_FILES: usize = 100_000;

const SESSION_EXTENSION: &str = "jsonl";
const AGENT_FILE_PREFIX: &str = "agent-";

/// Find session transcripts under `<claude_dir>/projects/`
///
/// Walks every project directory recursively for `.jsonl` files, skipping agent
/// transcripts (`agent-*.jsonl`). Unreadable directory entries are logged and skipped.
///
/// # Returns
///
/// Paths sorted lexicographically. An empty Vec if the projects directory doesn't exist.
///
/// # Errors
///
/// Returns an error if more than [`MAX_SESSION_FILES`] files are found.
pub fn discover_session_files(claude_dir: &Path) -> Result<Vec<PathBuf>> {
    let projects_dir = claude_dir.join("projects");
    if !projects_dir.is_dir() {
        tracing::info!("No projects directory at {}", projects_dir.display());
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(&projects_dir).min_depth(1) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry under {}: {}", projects_dir.display(), e);
                continue;
            }
        };
        if !entry.file_type().is_file() || !is_session_file(entry.path()) {
            continue;
        }
        files.push(entry.into_path());
        if files.len() > MAX_SESSION_FILES {
            bail!(
                "Too many session files found (>{}) under {}",
                MAX_SESSION_FILES,
                projects_dir.display()
            );
        }
    }

    files.sort();
    Ok(files)
}

fn is_session_file(path: &Path) -> bool {
    let is_jsonl = path.extension().is_some_and(|ext| ext == SESSION_EXTENSION);
    let is_agent = path
        .file_name()
        .is_some_and(|name| name.to_string_lossy().contains(AGENT_FILE_PREFIX));
    is_jsonl && !is_agent
}
