//! `inbox.md`: header block followed by newest-first session entries

use crate::models::SessionRecord;
use crate::utils::truncate_chars;

pub const INBOX_FILENAME: &str = "inbox.md";
pub const NEEDS_PROCESSING: &str = "NEEDS_PROCESSING";

const ENTRY_HEADING: &str = "## NEW SESSION";
const RULE: &str = "---";
const PREVIEW_CHARS: usize = 200;

/// Header for a new inbox
pub fn inbox_header(project_name: &str) -> String {
    format!("# {} - Inbox\n\nNew sessions waiting for quality summaries.\n", project_name)
}

/// A pending-summary flag for one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboxEntry {
    pub short_id: String,
    pub date: String,
    pub preview: String,
}

impl InboxEntry {
    /// Entry for `record`; `fallback_date` is used when the record has no date
    pub fn for_session(record: &SessionRecord, fallback_date: &str) -> Self {
        Self {
            short_id: record.short_id(),
            date: record.date_label().unwrap_or_else(|| fallback_date.to_string()),
            preview: truncate_chars(record.message(), PREVIEW_CHARS).to_string(),
        }
    }

    pub fn render(&self) -> String {
        format!(
            "\n{RULE}\n{ENTRY_HEADING}: {}...\n**Date:** {}\n**Status:** {NEEDS_PROCESSING}\n\n**Preview:**\n> {}...\n\n*Run /gfsave to generate quality summaries*\n{RULE}\n",
            self.short_id, self.date, self.preview
        )
    }
}

/// Parsed inbox: header lines, inserted entries, then the existing entries region.
///
/// The header is every line before the first line that starts with `---` or
/// `## NEW SESSION` (the whole document if there is none). The existing entries region is
/// kept verbatim, so rendering without an insertion reproduces the document byte for byte.
/// Inserted entries each start with a newline and take the place of the separator between
/// the header and the old region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboxDocument {
    header_lines: Vec<String>,
    entry_blocks: Vec<String>,
    remainder: Option<String>,
}

impl InboxDocument {
    pub fn parse(content: &str) -> Self {
        let lines: Vec<&str> = content.split('\n').collect();
        let header_end = lines
            .iter()
            .position(|line| line.starts_with(RULE) || line.starts_with(ENTRY_HEADING))
            .unwrap_or(lines.len());

        let header_lines = lines[..header_end].iter().map(|l| l.to_string()).collect();
        let remainder = (header_end < lines.len()).then(|| lines[header_end..].join("\n"));
        Self { header_lines, entry_blocks: Vec::new(), remainder }
    }

    /// Inbox with only the canonical header
    pub fn new(project_name: &str) -> Self {
        Self::parse(&inbox_header(project_name))
    }

    /// Parse `existing`, or start a new inbox when there is none
    pub fn load_or_new(existing: Option<&str>, project_name: &str) -> Self {
        match existing {
            Some(content) => Self::parse(content),
            None => Self::new(project_name),
        }
    }

    /// Splice `entry` directly after the header, ahead of every existing entry
    pub fn insert(&mut self, entry: &InboxEntry) {
        self.entry_blocks.insert(0, entry.render());
    }

    /// Header text exactly as it appears before the first entry line
    pub fn header(&self) -> String {
        let mut out = self.header_lines.join("\n");
        if self.has_separator() {
            out.push('\n');
        }
        out
    }

    /// Short session ids in document order (newest first)
    pub fn session_ids(&self) -> Vec<String> {
        self.entry_blocks
            .iter()
            .map(String::as_str)
            .chain(self.remainder.as_deref())
            .flat_map(str::lines)
            .filter_map(|line| line.strip_prefix(ENTRY_HEADING))
            .filter_map(|rest| rest.strip_prefix(": "))
            .map(|rest| rest.trim_end_matches("...").to_string())
            .collect()
    }

    pub fn render(&self) -> String {
        let mut out = self.header_lines.join("\n");
        if self.entry_blocks.is_empty() && self.has_separator() {
            out.push('\n');
        }
        for block in &self.entry_blocks {
            out.push_str(block);
        }
        if let Some(remainder) = &self.remainder {
            out.push_str(remainder);
        }
        out
    }

    /// A newline joins a non-empty header to the existing entries region
    fn has_separator(&self) -> bool {
        self.remainder.is_some() && !self.header_lines.is_empty()
    }
}
