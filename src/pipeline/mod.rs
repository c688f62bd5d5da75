//! Idempotent append pipeline: classified sessions into per-project documents

pub mod appender;
pub mod location;
pub mod report;

pub use appender::AppendPipeline;
pub use location::{Location, UNCATEGORIZED_PREFIX, locate_project, resolve_vault};
pub use report::{AppendReport, AppendSummary, OutcomeKind, SessionOutcome};
