//! Session discovery and batch extraction under `~/.claude/projects/`

pub mod builder;
pub mod discovery;

pub use builder::{MIN_CONVERSATION_MESSAGES, ScanOutcome, scan_sessions};
pub use discovery::discover_session_files;
