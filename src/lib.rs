//! Goldfish - classify Claude Code sessions into projects and file them into a memory tree
//!
//! This library reads Claude Code session transcripts from `~/.claude/projects/`, assigns
//! each session a vault and project, and appends it to that project's documents:
//!
//! - Extracting session records from JSONL transcripts
//! - Classifying sessions with an ordered waterfall of strategies (aliases, keywords,
//!   path frequency, setup detection, research fallback)
//! - Appending each session exactly once to `large.md` and flagging it in `inbox.md`
//! - Tracking appended sessions in a durable processed set
//!
//! # Example
//!
//! ```no_run
//! use goldfish::{AppendPipeline, ProcessedSessions, load_analysis, load_config};
//!
//! let config = load_config(None)?;
//! if let Some(sessions) = load_analysis(&config.analysis_path())? {
//!     let mut processed = ProcessedSessions::load(&config.processed_path())?;
//!     let report = AppendPipeline::new(&config).run(&sessions, &mut processed);
//!     println!("{}", report.summary());
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod classifier;
pub mod cli;
pub mod config;
pub mod documents;
pub mod models;
pub mod parsers;
pub mod pipeline;
pub mod scanner;
pub mod storage;
pub mod utils;

// Re-export commonly used types
pub use classifier::{Classifier, classify};
pub use config::{Config, load_config};
pub use models::{ClassificationResult, SessionAnalysis, SessionRecord};
pub use parsers::parse_session_file;
pub use pipeline::{AppendPipeline, AppendReport, AppendSummary};
pub use scanner::scan_sessions;
pub use storage::{ProcessedSessions, load_analysis, save_analysis};
pub use utils::paths::format_path_with_tilde;
