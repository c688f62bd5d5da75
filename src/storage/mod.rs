//! Persistent run state under `<memory_path>/.goldfish/`
//!
//! - `processed-sessions.json`: sorted JSON array of session ids already appended
//! - `session-analysis.json`: `[{info, classification}]` written by `scan`, read by `append`
//!
//! Both are written atomically (temp file + rename).

pub mod analysis;
pub mod atomic;
pub mod processed;

pub use analysis::{load_analysis, save_analysis};
pub use atomic::write_atomic;
pub use processed::ProcessedSessions;
