//! Goldfish configuration.
//!
//! Loaded once per run from `config.yaml` and passed by reference into the classifier
//! and the append pipeline. A missing file yields [`Config::default`] rooted at the
//! goldfish home directory; an unparseable file is a hard error.

pub mod settings;

pub use settings::{Config, ConsolidationRule, ProjectOverride, VaultConfig, load_config};
