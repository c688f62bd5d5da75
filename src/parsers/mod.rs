//! Session transcript extraction
//!
//! # Error Handling Strategy
//!
//! Parsing is permissive at every level:
//!
//! - **Transcript lines**: undecodable JSONL lines are skipped and counted; the record is
//!   built from whatever decoded.
//! - **Analysis items**: the `deserializers` here turn wrong-typed or missing fields into
//!   defaults (empty strings, empty sets, zero, the prior confidence) instead of failing
//!   the whole item.
//!
//! Only I/O failures (unreadable or oversized files) surface as errors, via
//! `anyhow::Result` with path context.

pub mod deserializers;
pub mod session;
pub mod topics;

pub use session::parse_session_file;
pub use topics::extract_topics;
