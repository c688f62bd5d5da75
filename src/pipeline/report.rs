//! Per-session outcomes of an append run and the summary counts shown to the user

use std::fmt;
use std::path::PathBuf;

/// What happened to one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeKind {
    Appended { vault: String, project: String, dir: PathBuf, created_directory: bool },
    AlreadyProcessed,
    Unclassified,
    NoDirectory { tried: Vec<PathBuf> },
    /// A document or processed-set write failed; the session stays eligible for retry
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOutcome {
    pub session_id: String,
    pub kind: OutcomeKind,
}

impl SessionOutcome {
    pub fn new(session_id: impl Into<String>, kind: OutcomeKind) -> Self {
        Self { session_id: session_id.into(), kind }
    }

    pub fn is_appended(&self) -> bool {
        matches!(self.kind, OutcomeKind::Appended { .. })
    }
}

impl fmt::Display for SessionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let short: String = self.session_id.chars().take(8).collect();
        match &self.kind {
            OutcomeKind::Appended { vault, project, created_directory, .. } => {
                let created = if *created_directory { " (created)" } else { "" };
                write!(f, "  {}... -> {}/{}{}", short, vault, project, created)
            }
            OutcomeKind::AlreadyProcessed => write!(f, "  SKIP: {}... (already processed)", short),
            OutcomeKind::Unclassified => {
                write!(f, "  SKIP: {}... (couldn't determine project)", short)
            }
            OutcomeKind::NoDirectory { tried } => match tried.first() {
                Some(dir) => {
                    write!(f, "  SKIP: {}... (project dir doesn't exist: {})", short, dir.display())
                }
                None => write!(f, "  SKIP: {}... (invalid project name)", short),
            },
            OutcomeKind::Failed { error } => write!(f, "  FAIL: {}... ({})", short, error),
        }
    }
}

/// Everything one pipeline run did, in input order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppendReport {
    pub outcomes: Vec<SessionOutcome>,
}

impl AppendReport {
    pub fn push(&mut self, outcome: SessionOutcome) {
        self.outcomes.push(outcome);
    }

    /// Outcomes worth listing individually (everything except already-processed skips)
    pub fn notable(&self) -> impl Iterator<Item = &SessionOutcome> {
        self.outcomes.iter().filter(|o| o.kind != OutcomeKind::AlreadyProcessed)
    }

    pub fn summary(&self) -> AppendSummary {
        let mut summary = AppendSummary::default();
        for outcome in &self.outcomes {
            match &outcome.kind {
                OutcomeKind::Appended { created_directory, .. } => {
                    summary.appended += 1;
                    if *created_directory {
                        summary.created_directory += 1;
                    }
                }
                OutcomeKind::AlreadyProcessed => summary.skipped_already_processed += 1,
                OutcomeKind::Unclassified => summary.skipped_unclassified += 1,
                OutcomeKind::NoDirectory { .. } => summary.skipped_no_directory += 1,
                OutcomeKind::Failed { .. } => summary.failed += 1,
            }
        }
        summary
    }
}

/// Counts per outcome; `created_directory` is a subset of `appended`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppendSummary {
    pub appended: usize,
    pub skipped_already_processed: usize,
    pub skipped_unclassified: usize,
    pub skipped_no_directory: usize,
    pub created_directory: usize,
    pub failed: usize,
}

impl AppendSummary {
    pub fn total(&self) -> usize {
        self.appended
            + self.skipped_already_processed
            + self.skipped_unclassified
            + self.skipped_no_directory
            + self.failed
    }
}

impl fmt::Display for AppendSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = [
            ("Appended", self.appended),
            ("Skipped (already processed)", self.skipped_already_processed),
            ("Skipped (unclassified)", self.skipped_unclassified),
            ("Skipped (no directory)", self.skipped_no_directory),
            ("Created directories", self.created_directory),
            ("Failed", self.failed),
        ];
        for (i, (label, count)) in rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{:<29}{}", format!("{}:", label), count)?;
        }
        Ok(())
    }
}
