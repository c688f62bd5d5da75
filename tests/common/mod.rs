//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use goldfish::models::{ClassificationResult, SessionAnalysis, SessionRecord};
use goldfish::{Config, load_config, save_analysis};
use tempfile::TempDir;

/// Config used by most integration tests
pub const STANDARD_CONFIG: &str = "\
default_vault: personal
vaults:
  work:
    keywords: [invoice, client]
  personal:
    keywords: [garden]
projects:
  velona: { vault: work }
consolidation_rules:
  - name: acme
    vault: work
    aliases: [acme-api, acme-web]
  - name: notes
    aliases: [journal]
";

/// Builder for a memory tree: `<root>/.goldfish/` state plus `<root>/<vault>/<project>/` dirs
pub struct MemoryTreeBuilder {
    temp_dir: TempDir,
}

impl MemoryTreeBuilder {
    /// Create a new builder with an empty memory root
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    /// Get the memory root
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `.goldfish/config.yaml`
    pub fn with_config(self, yaml: &str) -> Self {
        let state = self.temp_dir.path().join(".goldfish");
        fs::create_dir_all(&state).expect("Failed to create state dir");
        fs::write(state.join("config.yaml"), yaml).expect("Failed to write config");
        self
    }

    /// Create an (empty) project directory
    pub fn with_project(self, vault: &str, project: &str) -> Self {
        fs::create_dir_all(self.temp_dir.path().join(vault).join(project))
            .expect("Failed to create project dir");
        self
    }

    /// Write a project's `goldfish/inbox.md`
    pub fn with_inbox(self, vault: &str, project: &str, content: &str) -> Self {
        let docs = self.temp_dir.path().join(vault).join(project).join("goldfish");
        fs::create_dir_all(&docs).expect("Failed to create goldfish dir");
        fs::write(docs.join("inbox.md"), content).expect("Failed to write inbox");
        self
    }

    /// Write `.goldfish/session-analysis.json`
    pub fn with_analysis(self, sessions: &[SessionAnalysis]) -> Self {
        save_analysis(&self.analysis_path(), sessions).expect("Failed to write analysis");
        self
    }

    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join(".goldfish").join("config.yaml")
    }

    pub fn analysis_path(&self) -> PathBuf {
        self.temp_dir.path().join(".goldfish").join("session-analysis.json")
    }

    pub fn processed_path(&self) -> PathBuf {
        self.temp_dir.path().join(".goldfish").join("processed-sessions.json")
    }

    /// Path of a project document such as `large.md`
    pub fn document(&self, vault: &str, project: &str, name: &str) -> PathBuf {
        self.temp_dir.path().join(vault).join(project).join("goldfish").join(name)
    }

    /// Load the config the same way the binary does
    pub fn config(&self) -> Config {
        load_config(Some(&self.config_path())).expect("Failed to load config")
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for MemoryTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for session records and their classification
pub struct SessionBuilder {
    record: SessionRecord,
    classification: ClassificationResult,
}

impl SessionBuilder {
    /// Create a session with two conversation messages and no classification
    pub fn new(session_id: &str) -> Self {
        let mut record = SessionRecord::new(session_id);
        record.filename = format!("{session_id}.jsonl");
        record.message_count = 2;
        record.conversation_message_count = 2;
        Self { record, classification: ClassificationResult::unclear("personal") }
    }

    /// Set the first user message
    pub fn message(mut self, message: &str) -> Self {
        self.record.first_user_message = Some(message.to_string());
        self
    }

    /// Add touched file paths
    pub fn files(mut self, files: &[&str]) -> Self {
        self.record.files_touched.extend(files.iter().map(|f| f.to_string()));
        self
    }

    /// Set the conversation message count
    pub fn conversation_messages(mut self, count: u64) -> Self {
        self.record.conversation_message_count = count;
        self
    }

    /// Set the date from a minute-precision string
    pub fn date(mut self, date: &str) -> Self {
        self.record.date = Some(
            chrono::NaiveDateTime::parse_from_str(date, "%Y-%m-%d %H:%M").expect("Valid date"),
        );
        self
    }

    /// Classify as `project` in `vault`
    pub fn classified(mut self, project: &str, vault: &str) -> Self {
        self.classification = ClassificationResult::resolved(project, vault, 70, "test");
        self
    }

    pub fn record(self) -> SessionRecord {
        self.record
    }

    pub fn analysis(self) -> SessionAnalysis {
        SessionAnalysis::new(self.record, self.classification)
    }
}

/// Builder for a `.claude` directory with session transcripts under `projects/`
pub struct ClaudeDirBuilder {
    temp_dir: TempDir,
}

impl ClaudeDirBuilder {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Add a session file `<encoded_project>/<session_id>.jsonl` with the given lines
    pub fn with_session(self, encoded_project: &str, session_id: &str, lines: &[String]) -> Self {
        let dir = self.temp_dir.path().join("projects").join(encoded_project);
        fs::create_dir_all(&dir).expect("Failed to create project dir");
        fs::write(dir.join(format!("{session_id}.jsonl")), lines.join("\n"))
            .expect("Failed to write session file");
        self
    }

    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for ClaudeDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A `user` transcript line with plain string content
pub fn user_line(text: &str) -> String {
    serde_json::json!({"type": "user", "message": {"role": "user", "content": text}}).to_string()
}

/// An `assistant` transcript line with one tool call touching `file_path`
pub fn tool_line(tool: &str, file_path: &str) -> String {
    serde_json::json!({
        "type": "assistant",
        "message": {
            "role": "assistant",
            "content": [{"type": "tool_use", "name": tool, "input": {"file_path": file_path}}]
        }
    })
    .to_string()
}
