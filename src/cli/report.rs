//! Text reports printed by `goldfish scan`

use std::collections::BTreeMap;

use crate::models::SessionAnalysis;
use crate::utils::truncate_chars;

const RULE_WIDTH: usize = 60;
const MESSAGE_PREVIEW_CHARS: usize = 300;
const MAX_TOPICS: usize = 8;
const MAX_FILES: usize = 10;
const MAX_DIRECTORIES: usize = 5;

fn rule() -> String {
    "═".repeat(RULE_WIDTH)
}

/// Per-session block: what was extracted and how it was classified
pub fn format_session_report(session: &SessionAnalysis) -> String {
    let info = &session.info;
    let mut lines = vec![
        rule(),
        format!("Session: {}", info.filename),
        format!("Date: {}", info.date_label().as_deref().unwrap_or("unknown")),
        format!("Messages: {}", info.message_count),
        format!("Size: {:.1} KB", info.file_size as f64 / 1024.0),
        String::new(),
    ];

    if let Some(error) = &info.error {
        lines.push(format!("ERROR: {}", error));
        lines.push(rule());
        return lines.join("\n");
    }

    lines.push("FIRST USER MESSAGE:".to_string());
    let message = info.message();
    if message.is_empty() {
        lines.push("(no user message found)".to_string());
    } else {
        let preview = truncate_chars(message, MESSAGE_PREVIEW_CHARS);
        let mut preview = preview.replace('\n', " ").trim().to_string();
        if message.chars().count() > MESSAGE_PREVIEW_CHARS {
            preview.push_str("...");
        }
        lines.push(format!("\"{}\"", preview));
    }
    lines.push(String::new());

    if !info.topics.is_empty() {
        lines.push("KEY TOPICS:".to_string());
        lines.extend(info.topics.iter().take(MAX_TOPICS).map(|t| format!("  - {}", t)));
        lines.push(String::new());
    }

    if !info.files_touched.is_empty() {
        let total = info.files_touched.len();
        lines.push(format!("FILES TOUCHED ({} total):", total));
        lines.extend(info.files_touched.iter().take(MAX_FILES).map(|f| format!("  - {}", f)));
        if total > MAX_FILES {
            lines.push(format!("  ... and {} more", total - MAX_FILES));
        }
        lines.push(String::new());
    }

    if !info.directories_created.is_empty() {
        lines.push("DIRECTORIES CREATED:".to_string());
        lines.extend(
            info.directories_created.iter().take(MAX_DIRECTORIES).map(|d| format!("  - {}", d)),
        );
        lines.push(String::new());
    }

    let classification = &session.classification;
    lines.push("CLASSIFICATION:".to_string());
    lines.push(format!("  Project: {}", classification.project));
    lines.push(format!("  Vault: {}", classification.vault));
    lines.push(format!("  Confidence: {}%", classification.confidence));
    lines.push(format!("  Reasoning: \"{}\"", classification.reasoning));
    lines.push(rule());

    lines.join("\n")
}

/// Session counts grouped by vault and by project, names sorted
pub fn format_scan_summary(sessions: &[SessionAnalysis]) -> String {
    let mut by_vault: BTreeMap<&str, usize> = BTreeMap::new();
    let mut by_project: BTreeMap<&str, usize> = BTreeMap::new();
    for session in sessions {
        *by_vault.entry(session.classification.vault.as_str()).or_default() += 1;
        *by_project.entry(session.classification.project.as_str()).or_default() += 1;
    }

    let mut lines = vec![rule(), format!("{:^width$}", "SUMMARY", width = RULE_WIDTH), rule()];
    lines.push("\nBy Vault:".to_string());
    lines.extend(by_vault.iter().map(|(vault, count)| format!("  {}: {} sessions", vault, count)));
    lines.push("\nBy Project:".to_string());
    lines.extend(
        by_project.iter().map(|(project, count)| format!("  {}: {} sessions", project, count)),
    );
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClassificationResult, SessionRecord};

    fn analysis() -> SessionAnalysis {
        let mut info = SessionRecord::new("0d3b1f09-aaaa");
        info.filename = "0d3b1f09-aaaa.jsonl".to_string();
        info.message_count = 12;
        info.file_size = 2048;
        info.first_user_message = Some("line one\nline two".to_string());
        info.files_touched = (0..12).map(|i| format!("/acme/f{i:02}.rs")).collect();
        SessionAnalysis::new(info, ClassificationResult::resolved("acme", "work", 70, "alias"))
    }

    #[test]
    fn test_session_report_sections() {
        let report = format_session_report(&analysis());
        assert!(report.contains("Session: 0d3b1f09-aaaa.jsonl"));
        assert!(report.contains("Date: unknown"));
        assert!(report.contains("Size: 2.0 KB"));
        assert!(report.contains("\"line one line two\""));
        assert!(report.contains("FILES TOUCHED (12 total):"));
        assert!(report.contains("  ... and 2 more"));
        assert!(report.contains("  Confidence: 70%"));
        assert!(!report.contains("KEY TOPICS:"));
    }

    #[test]
    fn test_long_message_is_cut() {
        let mut session = analysis();
        session.info.first_user_message = Some("z".repeat(301));
        let report = format_session_report(&session);
        assert!(report.contains(&format!("\"{}...\"", "z".repeat(300))));
    }

    #[test]
    fn test_error_report_stops_early() {
        let mut session = analysis();
        session.info.error = Some("Empty file".to_string());
        let report = format_session_report(&session);
        assert!(report.contains("ERROR: Empty file"));
        assert!(!report.contains("CLASSIFICATION:"));
    }

    #[test]
    fn test_summary_groups_counts() {
        let mut other = analysis();
        other.classification = ClassificationResult::resolved("notes", "personal", 60, "");
        let summary = format_scan_summary(&[analysis(), analysis(), other]);
        assert!(summary.contains("By Vault:\n  personal: 1 sessions\n  work: 2 sessions"));
        assert!(summary.contains("By Project:\n  acme: 2 sessions\n  notes: 1 sessions"));
    }
}
