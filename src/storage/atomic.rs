use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

fn temp_path(path: &Path) -> PathBuf {
    let name = path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", name))
}

/// Write `contents` to `path` via a sibling temp file and rename, creating parent dirs
pub fn write_atomic(path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let temp = temp_path(path);
    fs::write(&temp, contents)
        .with_context(|| format!("Failed to write temp file: {}", temp.display()))?;
    fs::rename(&temp, path).with_context(|| {
        // Best effort: a stale temp file is harmless but untidy
        let _ = fs::remove_file(&temp);
        format!("Failed to rename temp file into place: {}", path.display())
    })?;
    Ok(())
}
