//! Session classification.
//!
//! A [`Classifier`] is built once per run from the [`Config`] and maps each
//! [`SessionRecord`] to a [`ClassificationResult`] by running the ordered
//! [`strategies::STRATEGIES`] waterfall:
//!
//! 1. path token that is a known alias
//! 2. alias mentioned in the first message
//! 3. vault keyword in the message (adjusts the vault, keeps looking for a project)
//! 4. most frequent path token
//! 5. setup/configuration work
//! 6. research conversation without file activity
//!
//! If nothing names a project the result stays `UNCLEAR` at the prior confidence.
//! Classification is pure: the same record and config always give the same result.

pub mod alias_index;
pub mod candidates;
pub mod research;
pub mod strategies;

pub use alias_index::{AliasIndex, AliasTarget};
pub use candidates::{NoiseFilter, PathCandidates};
use strategies::{Evidence, Outcome, STRATEGIES};

use crate::config::Config;
use crate::models::{ClassificationResult, SessionRecord};

#[derive(Debug, Clone)]
pub struct Classifier {
    index: AliasIndex,
    noise: NoiseFilter,
}

impl Classifier {
    pub fn new(config: &Config) -> Self {
        Self { index: AliasIndex::from_config(config), noise: NoiseFilter::from_config(config) }
    }

    pub fn alias_index(&self) -> &AliasIndex {
        &self.index
    }

    pub fn classify(&self, record: &SessionRecord) -> ClassificationResult {
        let evidence = Evidence {
            record,
            message: record.message().to_lowercase(),
            candidates: PathCandidates::from_paths(&record.files_touched, &self.noise),
        };

        let mut result = ClassificationResult::unclear(self.index.default_vault());
        for strategy in STRATEGIES {
            match (strategy.apply)(&evidence, &self.index) {
                Outcome::Project { project, vault, confidence, reasoning } => {
                    tracing::debug!(
                        session = %record.session_id,
                        strategy = strategy.name,
                        %project,
                        "classified"
                    );
                    let vault = vault.unwrap_or(result.vault);
                    return ClassificationResult::resolved(project, vault, confidence, reasoning);
                }
                Outcome::Vault { vault, reasoning } => {
                    result.vault = vault;
                    result.reasoning = reasoning;
                }
                Outcome::Unresolved => {}
            }
        }
        result
    }
}

/// Classify a single record against `config`
///
/// Builds the alias index on every call; use [`Classifier`] for batches.
pub fn classify(record: &SessionRecord, config: &Config) -> ClassificationResult {
    Classifier::new(config).classify(record)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    fn config() -> Config {
        Config::from_yaml(
            "default_vault: personal\nvaults:\n  work: {keywords: [client]}\n  personal: {keywords: []}\nconsolidation_rules:\n  - {name: acme, vault: work, aliases: []}\n",
            Path::new("/m"),
        )
        .unwrap()
    }

    fn record(files: &[&str], message: Option<&str>, conversation: u64) -> SessionRecord {
        let mut record = SessionRecord::new("0d3b1f09-aaaa-bbbb-cccc-123456789abc");
        record.files_touched = files.iter().map(|f| f.to_string()).collect();
        record.first_user_message = message.map(str::to_string);
        record.conversation_message_count = conversation;
        record
    }

    #[test]
    fn test_alias_path_scenario() {
        let result = classify(&record(&["/Users/x/Projects/acme/src/api.py"], None, 2), &config());
        assert_eq!(result.project, "acme");
        assert_eq!(result.vault, "work");
        assert_eq!(result.confidence, 70);
        assert_eq!(result.reasoning, "Matched 'acme' to known project 'acme'");
    }

    #[test]
    fn test_research_scenario() {
        let result = classify(
            &record(&[], Some("Can you research quantum error correction codes"), 4),
            &config(),
        );
        assert_eq!(result.project, "quantum-error-correction-research");
        assert_eq!(result.vault, "personal");
        assert_eq!(result.confidence, 60);
    }

    #[test]
    fn test_vault_keyword_carries_into_frequency_guess() {
        let result =
            classify(&record(&["/widgets/main.py"], Some("client asked for a fix"), 2), &config());
        assert_eq!(result.project, "widgets");
        assert_eq!(result.vault, "work");
        assert_eq!(result.confidence, 50);
    }

    #[test]
    fn test_vault_keyword_alone_leaves_project_unclear() {
        let result = classify(&record(&[], Some("client"), 1), &config());
        assert!(result.is_unclear());
        assert_eq!(result.vault, "work");
        assert_eq!(result.confidence, 50);
        assert_eq!(result.reasoning, "Message contains vault keyword 'client'");
    }

    #[test]
    fn test_nothing_matches_is_unclear_in_default_vault() {
        let result = classify(&record(&[], Some("hi"), 1), &config());
        assert!(result.is_unclear());
        assert_eq!(result.vault, "personal");
        assert_eq!(result.confidence, 50);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let classifier = Classifier::new(&config());
        let r = record(&["/a/one/x.py", "/a/two/y.py", "/a/two/z.py"], Some("hello"), 3);
        let first = classifier.classify(&r);
        for _ in 0..10 {
            assert_eq!(classifier.classify(&r), first);
        }
        assert_eq!(first.project, "two");
    }
}
