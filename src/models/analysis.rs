use serde::{Deserialize, Serialize};

use super::{ClassificationResult, SessionRecord};
use crate::parsers::deserializers::deserialize_object_or_default;

/// A session record paired with its classification.
///
/// Serialized as `{"info": {...}, "classification": {...}}`, the shape of each item in
/// `session-analysis.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionAnalysis {
    #[serde(default, deserialize_with = "deserialize_object_or_default")]
    pub info: SessionRecord,
    #[serde(default, deserialize_with = "deserialize_object_or_default")]
    pub classification: ClassificationResult,
}

impl SessionAnalysis {
    pub fn new(info: SessionRecord, classification: ClassificationResult) -> Self {
        Self { info, classification }
    }

    pub fn session_id(&self) -> &str {
        &self.info.session_id
    }
}
