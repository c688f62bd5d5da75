use serde::{Deserialize, Serialize};

use crate::parsers::deserializers::{deserialize_lenient_confidence, deserialize_lenient_string};

/// Sentinel project name for sessions no strategy could resolve
pub const UNCLEAR_PROJECT: &str = "UNCLEAR";

/// Prior confidence carried by an unresolved classification
pub const PRIOR_CONFIDENCE: u8 = 50;

/// Classifier output for one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub vault: String,
    #[serde(default = "unclear_project", deserialize_with = "deserialize_lenient_string")]
    pub project: String,
    #[serde(default = "prior_confidence", deserialize_with = "deserialize_lenient_confidence")]
    pub confidence: u8,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub reasoning: String,
}

fn unclear_project() -> String {
    UNCLEAR_PROJECT.to_string()
}

pub(crate) fn prior_confidence() -> u8 {
    PRIOR_CONFIDENCE
}

impl ClassificationResult {
    /// Unresolved classification in the given vault
    pub fn unclear(vault: impl Into<String>) -> Self {
        Self {
            vault: vault.into(),
            project: unclear_project(),
            confidence: PRIOR_CONFIDENCE,
            reasoning: String::new(),
        }
    }

    pub fn resolved(
        project: impl Into<String>,
        vault: impl Into<String>,
        confidence: u8,
        reasoning: impl Into<String>,
    ) -> Self {
        Self {
            vault: vault.into(),
            project: project.into(),
            confidence: confidence.min(100),
            reasoning: reasoning.into(),
        }
    }

    pub fn is_unclear(&self) -> bool {
        self.project.is_empty() || self.project == UNCLEAR_PROJECT
    }
}

impl Default for ClassificationResult {
    fn default() -> Self {
        Self::unclear(String::new())
    }
}
