//! Batch scan of session transcripts into classified analysis records.
//!
//! # Error Handling Strategy
//!
//! This module follows a **graceful degradation** approach:
//!
//! - **File-level errors**: unreadable or oversized session files are logged and counted
//!   but don't fail the scan
//! - **Failure threshold**: the scan fails if more than 50% of discovered files fail, which
//!   points at a systematic problem rather than a few bad files
//! - **Filtering**: metadata-only sessions and sessions with fewer than two conversation
//!   messages are dropped and counted, not reported as failures

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use rayon::prelude::*;

use crate::classifier::Classifier;
use crate::config::Config;
use crate::models::{SessionAnalysis, SessionRecord};
use crate::parsers::parse_session_file;
use crate::scanner::discovery::discover_session_files;

/// Sessions below this many user/assistant messages are treated as abandoned
pub const MIN_CONVERSATION_MESSAGES: u64 = 2;

/// Result of a scan: kept sessions in path order plus what was dropped
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub sessions: Vec<SessionAnalysis>,
    pub discovered: usize,
    pub skipped_metadata: usize,
    pub skipped_empty: usize,
    pub failed: usize,
}

/// Discover, extract and classify every session under `claude_dir`.
///
/// Extraction is read-only and runs in parallel; results are kept in the sorted
/// discovery order so repeated scans produce identical analysis documents.
///
/// # Errors
///
/// Returns an error if discovery fails or more than 50% of the session files fail to parse.
pub fn scan_sessions(claude_dir: &Path, config: &Config) -> Result<ScanOutcome> {
    let files = discover_session_files(claude_dir)?;
    let records: Vec<(PathBuf, Result<SessionRecord>)> = files
        .into_par_iter()
        .map(|path| {
            let record = parse_session_file(&path);
            (path, record)
        })
        .collect();

    let classifier = Classifier::new(config);
    let mut outcome = ScanOutcome { discovered: records.len(), ..ScanOutcome::default() };

    for (path, record) in records {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("Failed to parse session file {}: {:#}", path.display(), e);
                outcome.failed += 1;
                continue;
            }
        };
        if record.is_metadata_only {
            outcome.skipped_metadata += 1;
            continue;
        }
        if record.conversation_message_count < MIN_CONVERSATION_MESSAGES {
            outcome.skipped_empty += 1;
            continue;
        }
        let classification = classifier.classify(&record);
        outcome.sessions.push(SessionAnalysis::new(record, classification));
    }

    if outcome.discovered > 0 {
        let failure_rate = outcome.failed as f64 / outcome.discovered as f64;
        if failure_rate > 0.5 {
            bail!(
                "Scan failed: {}/{} session files failed to parse ({}% failure rate)",
                outcome.failed,
                outcome.discovered,
                (failure_rate * 100.0) as u32
            );
        }
    }

    tracing::info!(
        "Scanned {} session files ({} kept, {} metadata-only, {} empty, {} failed)",
        outcome.discovered,
        outcome.sessions.len(),
        outcome.skipped_metadata,
        outcome.skipped_empty,
        outcome.failed
    );

    Ok(outcome)
}
