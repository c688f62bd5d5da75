//! `large.md`: append-only transcript log

use crate::models::SessionRecord;
use crate::utils::truncate_chars;

pub const LARGE_LOG_FILENAME: &str = "large.md";

const PREVIEW_CHARS: usize = 500;
const MAX_FILES: usize = 20;
const MAX_TOOLS: usize = 10;

/// Title block for a new log
pub fn large_log_header(project_name: &str) -> String {
    format!(
        "# {} - Complete History\n\n*Full session transcripts appended automatically*\n",
        project_name
    )
}

/// Transcript block for one session, starting with a horizontal rule
pub fn render_transcript(record: &SessionRecord) -> String {
    let mut lines = vec![
        "\n\n---\n".to_string(),
        format!("## Session: {}...", record.short_id()),
        format!("**Date:** {}", record.date_label().unwrap_or_else(|| "unknown".to_string())),
        format!("**Messages:** {}", record.message_count),
        String::new(),
    ];

    let message = record.message();
    if !message.is_empty() {
        let mut preview = truncate_chars(message, PREVIEW_CHARS).to_string();
        if preview.len() < message.len() {
            preview.push_str("...");
        }
        lines.push("**First message:**".to_string());
        lines.push(format!("> {}", preview));
        lines.push(String::new());
    }

    if !record.files_touched.is_empty() {
        lines.push("**Files touched:**".to_string());
        lines.extend(record.files_touched.iter().take(MAX_FILES).map(|f| format!("- `{}`", f)));
        if record.files_touched.len() > MAX_FILES {
            lines.push(format!("- ... and {} more", record.files_touched.len() - MAX_FILES));
        }
        lines.push(String::new());
    }

    if !record.tools_used.is_empty() {
        let tools: Vec<&str> =
            record.tools_used.iter().take(MAX_TOOLS).map(String::as_str).collect();
        lines.push(format!("**Tools:** {}", tools.join(", ")));
        lines.push(String::new());
    }

    lines.push("*Raw transcript in ~/.claude session files*".to_string());
    lines.join("\n")
}

/// Existing log content (or a fresh header) with the session's transcript appended.
///
/// Not idempotent: callers must gate on the processed set.
pub fn extend_large_log(
    existing: Option<&str>,
    project_name: &str,
    record: &SessionRecord,
) -> String {
    let mut content = match existing {
        Some(text) => text.to_string(),
        None => large_log_header(project_name),
    };
    content.push_str(&render_transcript(record));
    content
}
