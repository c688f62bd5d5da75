use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use regex::Regex;
use serde_json::Value;

use crate::models::SessionRecord;
use crate::models::session::FIRST_MESSAGE_MAX_CHARS;
use crate::parsers::topics::extract_topics;
use crate::utils::{safe_open_file, truncate_chars};

const ENTRY_TYPE_USER: &str = "user";
const ENTRY_TYPE_ASSISTANT: &str = "assistant";
const CONTENT_TYPE_TEXT: &str = "text";
const AGENT_FILE_MARKER: &str = "agent-";
const FILE_INPUT_KEYS: [&str; 3] = ["file_path", "path", "filepath"];

static MKDIR_TARGET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"mkdir\s+(?:-p\s+)?["']?([^"'&;]+)"#).expect("valid mkdir regex")
});

/// Extract a [`SessionRecord`] from one session transcript (JSONL).
///
/// Undecodable lines are skipped and only counted. An empty file yields a record with
/// `error` set rather than an error, mirroring how the scanner reports such sessions.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read, or exceeds the size cap.
pub fn parse_session_file(path: &Path) -> Result<SessionRecord> {
    let file = safe_open_file(path)?;
    let metadata = file
        .metadata()
        .with_context(|| format!("Failed to read file metadata: {}", path.display()))?;

    let filename = path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
    let mut record = SessionRecord {
        session_id: filename.trim_end_matches(".jsonl").to_string(),
        filepath: path.display().to_string(),
        is_agent_session: filename.contains(AGENT_FILE_MARKER),
        filename,
        file_size: metadata.len(),
        date: metadata.modified().ok().map(|t| DateTime::<Local>::from(t).naive_local()),
        ..SessionRecord::default()
    };

    if record.file_size == 0 {
        record.error = Some("Empty file".to_string());
        return Ok(record);
    }

    let reader = BufReader::new(file);
    let mut messages = Vec::new();
    let mut skipped = 0usize;
    for line in reader.lines() {
        let line = line.with_context(|| format!("Failed to read line from {}", path.display()))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<Value>(line) {
            Ok(value) => messages.push(value),
            Err(_) => skipped += 1,
        }
    }
    if skipped > 0 {
        tracing::debug!("{}: skipped {} undecodable lines", path.display(), skipped);
    }

    record.message_count = messages.len() as u64;
    record.conversation_message_count = messages
        .iter()
        .filter(|m| matches!(entry_type(m), Some(ENTRY_TYPE_USER | ENTRY_TYPE_ASSISTANT)))
        .count() as u64;
    record.is_metadata_only = record.conversation_message_count == 0 && !messages.is_empty();

    record.first_user_message = messages
        .iter()
        .find(|m| entry_type(m) == Some(ENTRY_TYPE_USER))
        .and_then(first_message_text);

    for message in messages.iter().filter(|m| entry_type(m) == Some(ENTRY_TYPE_ASSISTANT)) {
        collect_tool_use(message, &mut record);
    }

    record.topics =
        extract_topics(record.message(), record.files_touched.iter().map(String::as_str));

    Ok(record)
}

fn entry_type(message: &Value) -> Option<&str> {
    message.get("type").and_then(Value::as_str)
}

/// Text of a user line: plain string content, or its `text` blocks joined by spaces
fn first_message_text(message: &Value) -> Option<String> {
    let text = match message.get("message")? {
        Value::String(s) => s.clone(),
        Value::Object(inner) => match inner.get("content") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Array(blocks)) => blocks
                .iter()
                .filter(|b| b.get("type").and_then(Value::as_str) == Some(CONTENT_TYPE_TEXT))
                .map(|b| b.get("text").and_then(Value::as_str).unwrap_or_default())
                .collect::<Vec<_>>()
                .join(" "),
            _ => String::new(),
        },
        _ => return None,
    };
    if text.is_empty() {
        return None;
    }
    Some(truncate_chars(&text, FIRST_MESSAGE_MAX_CHARS).to_string())
}

/// Tool names, file paths and `mkdir` targets from an assistant line's content blocks
fn collect_tool_use(message: &Value, record: &mut SessionRecord) {
    let Some(Value::Array(blocks)) = message.get("message").and_then(|m| m.get("content")) else {
        return;
    };

    for block in blocks {
        if let Some(name) = block.get("name").and_then(Value::as_str)
            && !name.is_empty()
        {
            record.tools_used.insert(name.to_string());
        }

        let Some(Value::Object(input)) = block.get("input") else {
            continue;
        };
        for key in FILE_INPUT_KEYS {
            if let Some(path) = input.get(key).and_then(Value::as_str)
                && !path.is_empty()
            {
                record.files_touched.insert(path.to_string());
            }
        }
        if let Some(command) = input.get("command").and_then(Value::as_str)
            && let Some(captures) = MKDIR_TARGET.captures(command)
        {
            let target = captures[1].trim();
            if !target.is_empty() {
                record.directories_created.insert(target.to_string());
            }
        }
    }
}
