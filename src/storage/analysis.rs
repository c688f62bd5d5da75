use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value;

use super::atomic::write_atomic;
use crate::models::{ClassificationResult, SessionAnalysis, SessionRecord};

/// Load `session-analysis.json`.
///
/// Returns `Ok(None)` when the file does not exist. Accepts the list form
/// `[{"info": {...}, "classification": {...}}]` and the legacy object form
/// `{"sessions": [{...record fields..., "project": .., "vault": ..}]}`.
///
/// Items are decoded one by one with permissive defaults; an item that is not an object
/// or has no `session_id` is logged and skipped.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not JSON, or has neither shape.
pub fn load_analysis(path: &Path) -> Result<Option<Vec<SessionAnalysis>>> {
    if !path.exists() {
        return Ok(None);
    }
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read session analysis: {}", path.display()))?;
    let value: Value = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse session analysis: {}", path.display()))?;
    Ok(Some(parse_analysis(value)?))
}

/// Decode an already-parsed analysis document
pub fn parse_analysis(value: Value) -> Result<Vec<SessionAnalysis>> {
    let (items, legacy) = match value {
        Value::Array(items) => (items, false),
        Value::Object(mut map) => match map.remove("sessions") {
            Some(Value::Array(items)) => (items, true),
            _ => bail!("Session analysis object has no \"sessions\" list"),
        },
        _ => bail!("Session analysis must be a list or an object with \"sessions\""),
    };

    let total = items.len();
    let mut sessions = Vec::with_capacity(total);
    for (position, item) in items.into_iter().enumerate() {
        let decoded = if legacy { decode_flat_item(item) } else { decode_item(item) };
        match decoded {
            Ok(analysis) if !analysis.session_id().is_empty() => sessions.push(analysis),
            Ok(_) => tracing::warn!(position, "Skipping analysis item without session_id"),
            Err(e) => tracing::warn!(position, error = %e, "Skipping malformed analysis item"),
        }
    }

    if sessions.len() < total {
        tracing::warn!("Loaded {} of {} analysis items", sessions.len(), total);
    }
    Ok(sessions)
}

fn decode_item(item: Value) -> Result<SessionAnalysis> {
    if !item.is_object() {
        bail!("analysis item is not an object");
    }
    Ok(serde_json::from_value(item)?)
}

fn decode_flat_item(item: Value) -> Result<SessionAnalysis> {
    if !item.is_object() {
        bail!("analysis item is not an object");
    }
    let classification: ClassificationResult = serde_json::from_value(item.clone())?;
    let info: SessionRecord = serde_json::from_value(item)?;
    Ok(SessionAnalysis::new(info, classification))
}

/// Write the analysis list atomically as pretty JSON
pub fn save_analysis(path: &Path, sessions: &[SessionAnalysis]) -> Result<()> {
    let json =
        serde_json::to_string_pretty(sessions).context("Failed to serialize session analysis")?;
    write_atomic(path, json)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_missing_file_is_none() {
        let temp = TempDir::new().unwrap();
        assert!(load_analysis(&temp.path().join("session-analysis.json")).unwrap().is_none());
    }

    #[test]
    fn test_list_form_with_partial_items() {
        let value = json!([
            {"info": {"session_id": "s1", "files_touched": ["/a"]},
             "classification": {"project": "acme", "vault": "work", "confidence": 70}},
            {"info": {"session_id": "s2"}},
            {"info": {"files_touched": []}, "classification": {"project": "acme"}},
            "garbage",
            {"info": "also garbage"}
        ]);

        let sessions = parse_analysis(value).unwrap();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].classification.project, "acme");
        assert!(sessions[1].classification.is_unclear());
    }

    #[test]
    fn test_wrong_typed_fields_keep_the_item() {
        let value = json!([
            {"info": {"session_id": "s1", "first_user_message": 42},
             "classification": {"project": "acme", "vault": "work"}},
            {"info": {"session_id": "s2", "is_agent_session": null},
             "classification": {"project": "acme", "vault": "work"}},
            {"info": {"session_id": "s3", "error": 1},
             "classification": {"project": "acme", "vault": "work"}},
            {"info": {"session_id": "s4"}, "classification": "acme"}
        ]);

        let sessions = parse_analysis(value).unwrap();
        let ids: Vec<&str> = sessions.iter().map(SessionAnalysis::session_id).collect();
        assert_eq!(ids, vec!["s1", "s2", "s3", "s4"]);
        assert_eq!(sessions[0].info.first_user_message, None);
        assert!(!sessions[1].info.is_agent_session);
        assert_eq!(sessions[2].info.error, None);
        assert_eq!(sessions[2].classification.project, "acme");
        assert!(sessions[3].classification.is_unclear());
    }

    #[test]
    fn test_legacy_object_form() {
        let value = json!({"sessions": [
            {"session_id": "s1", "project": "acme", "vault": "work", "message_count": 4}
        ]});

        let sessions = parse_analysis(value).unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].info.message_count, 4);
        assert_eq!(sessions[0].classification.project, "acme");
        assert_eq!(sessions[0].classification.vault, "work");
    }

    #[test]
    fn test_unrecognised_shapes_are_errors() {
        assert!(parse_analysis(json!({"items": []})).is_err());
        assert!(parse_analysis(json!(42)).is_err());
    }

    #[test]
    fn test_save_then_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".goldfish").join("session-analysis.json");
        let mut record = SessionRecord::new("s1");
        record.first_user_message = Some("hello".to_string());
        let sessions = vec![SessionAnalysis::new(
            record,
            ClassificationResult::resolved("acme", "work", 70, "Matched 'acme'"),
        )];

        save_analysis(&path, &sessions).unwrap();
        assert_eq!(load_analysis(&path).unwrap(), Some(sessions));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("session-analysis.json");
        fs::write(&path, "[{").unwrap();
        assert!(load_analysis(&path).is_err());
    }
}
