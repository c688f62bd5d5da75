use std::borrow::Cow;
use std::env;
use std::fs::File;
use std::path::{Component, Path};

use anyhow::{Context, Result, bail};

// Maximum size for a session transcript: 64MB
const MAX_FILE_SIZE_BYTES: u64 = 64 * 1024 * 1024;

/// Validates that a file's size is within acceptable limits (64MB)
///
/// Takes an open file handle to avoid TOCTOU (time-of-check-time-of-use)
/// race conditions where the file could be modified between the size check
/// and subsequent file operations.
///
/// # Errors
///
/// Returns an error if:
/// - The file metadata cannot be read
/// - The file is larger than 64MB
pub fn validate_file_size(file: &File, path: &Path) -> Result<()> {
    let metadata = file
        .metadata()
        .with_context(|| format!("Failed to read file metadata: {}", path.display()))?;

    let file_size = metadata.len();
    if file_size > MAX_FILE_SIZE_BYTES {
        bail!(
            "File too large: {} ({} bytes, max {} bytes)",
            path.display(),
            file_size,
            MAX_FILE_SIZE_BYTES
        );
    }

    Ok(())
}

/// Open a file for reading and check its size on the same handle
pub fn safe_open_file(path: &Path) -> Result<File> {
    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    validate_file_size(&file, path)?;
    Ok(file)
}

/// Check that a project name is a relative path made only of normal components.
///
/// Project names become directories under `<memory_path>/<vault>/`, so `..`, absolute
/// paths and empty names are rejected.
pub fn validate_project_name(project: &str) -> Result<()> {
    if project.trim().is_empty() {
        bail!("Project name is empty");
    }
    let path = Path::new(project);
    if path.is_absolute() {
        bail!("Project name must be relative: {}", project);
    }
    for component in path.components() {
        if !matches!(component, Component::Normal(_)) {
            bail!("Project name contains a non-normal path component: {}", project);
        }
    }
    Ok(())
}

/// First `max_chars` characters of `text` (never splits a UTF-8 sequence)
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Formats a path with ~ substitution for the home directory
///
/// # Examples
///
/// ```no_run
/// use std::path::PathBuf;
/// use goldfish::format_path_with_tilde;
///
/// let path = PathBuf::from("/Users/alice/Goldfish/work");
/// // Returns "~/Goldfish/work" if HOME=/Users/alice
/// let formatted = format_path_with_tilde(&path);
/// ```
pub fn format_path_with_tilde(path: &Path) -> String {
    format_path_with_tilde_internal(path, None)
}

/// Internal helper for path formatting with optional home override (for testing)
pub(crate) fn format_path_with_tilde_internal(path: &Path, home_override: Option<&str>) -> String {
    let home_from_env = env::var("HOME").ok();
    let home = home_override.or(home_from_env.as_deref());

    let path_str = path.to_string_lossy();
    if let Some(home) = home
        && path_str.starts_with(home)
    {
        return path_str.replacen(home, "~", 1);
    }

    match path_str {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => s,
    }
}
