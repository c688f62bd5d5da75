//! Data models for session classification and appending.
//!
//! - [`SessionRecord`] - facts extracted from one session transcript
//! - [`ClassificationResult`] - vault/project decision for a session
//! - [`SessionAnalysis`] - a record paired with its classification, the unit persisted
//!   in `session-analysis.json` and consumed by the append pipeline
//!
//! Records are decoded permissively (see `parsers::deserializers`): a field that is
//! missing or has the wrong shape falls back to its empty value instead of failing
//! the whole document.

pub mod analysis;
pub mod classification;
pub mod session;

pub use analysis::SessionAnalysis;
pub use classification::{ClassificationResult, UNCLEAR_PROJECT};
pub use session::SessionRecord;
