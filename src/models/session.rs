use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::parsers::deserializers::{
    deserialize_lenient_bool, deserialize_lenient_count, deserialize_lenient_date,
    deserialize_lenient_opt_string, deserialize_lenient_string, deserialize_string_set,
    serialize_minute_date,
};

/// Maximum number of characters kept from the first user message
pub const FIRST_MESSAGE_MAX_CHARS: usize = 500;

/// One conversation session as produced by the extractor.
///
/// Set-typed fields are `BTreeSet`s so they serialize as sorted, deduplicated arrays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub session_id: String,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub filepath: String,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub filename: String,
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_date",
        serialize_with = "serialize_minute_date"
    )]
    pub date: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "deserialize_lenient_count")]
    pub message_count: u64,
    #[serde(
        default,
        rename = "conversation_messages",
        alias = "conversation_message_count",
        deserialize_with = "deserialize_lenient_count"
    )]
    pub conversation_message_count: u64,
    #[serde(default, deserialize_with = "deserialize_lenient_opt_string")]
    pub first_user_message: Option<String>,
    #[serde(default, deserialize_with = "deserialize_string_set")]
    pub topics: BTreeSet<String>,
    #[serde(default, deserialize_with = "deserialize_string_set")]
    pub files_touched: BTreeSet<String>,
    #[serde(default, deserialize_with = "deserialize_string_set")]
    pub directories_created: BTreeSet<String>,
    #[serde(default, deserialize_with = "deserialize_string_set")]
    pub tools_used: BTreeSet<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_bool")]
    pub is_agent_session: bool,
    #[serde(default, deserialize_with = "deserialize_lenient_bool")]
    pub is_metadata_only: bool,
    #[serde(default, deserialize_with = "deserialize_lenient_count")]
    pub file_size: u64,
    #[serde(default, deserialize_with = "deserialize_lenient_opt_string")]
    pub error: Option<String>,
}

impl SessionRecord {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self { session_id: session_id.into(), ..Self::default() }
    }

    /// First user message, or the empty string when the session has none
    pub fn message(&self) -> &str {
        self.first_user_message.as_deref().unwrap_or_default()
    }

    /// First eight characters of the session id, used in rendered headings
    pub fn short_id(&self) -> String {
        if self.session_id.is_empty() {
            return "unknown".to_string();
        }
        self.session_id.chars().take(8).collect()
    }

    /// Date formatted at minute precision, as shown in project documents
    pub fn date_label(&self) -> Option<String> {
        self.date.map(|d| d.format("%Y-%m-%d %H:%M").to_string())
    }
}
