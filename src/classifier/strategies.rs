//! Ordered classification strategies.
//!
//! Each strategy inspects the [`Evidence`] for a session and either names a project,
//! nudges the vault, or passes. [`STRATEGIES`] lists them in priority order; the
//! classifier stops at the first one that names a project.

use super::alias_index::AliasIndex;
use super::candidates::PathCandidates;
use super::research::{research_project_name, research_topic};
use crate::models::SessionRecord;

pub const SETUP_PROJECT: &str = "claude-setup";

/// Path fragment marking the assistant's own configuration tree
const SETUP_PATH_MARKER: &str = "/.claude/";
const SETUP_KEYWORDS: &[&str] = &["setup", "install", "config", "configure"];
const MCP_KEYWORD: &str = "mcp";

/// Everything a strategy may look at for one session
#[derive(Debug)]
pub struct Evidence<'a> {
    pub record: &'a SessionRecord,
    /// Lowercased first user message
    pub message: String,
    pub candidates: PathCandidates,
}

/// Result of applying one strategy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A project was resolved; `vault: None` keeps the vault chosen so far
    Project { project: String, vault: Option<String>, confidence: u8, reasoning: String },
    /// Only the vault was adjusted; later strategies still run
    Vault { vault: String, reasoning: String },
    Unresolved,
}

pub type StrategyFn = fn(&Evidence<'_>, &AliasIndex) -> Outcome;

/// A named classification rule
#[derive(Clone, Copy)]
pub struct Strategy {
    pub name: &'static str,
    pub apply: StrategyFn,
}

pub const STRATEGIES: [Strategy; 6] = [
    Strategy { name: "path-alias", apply: path_alias },
    Strategy { name: "message-alias", apply: message_alias },
    Strategy { name: "vault-keyword", apply: vault_keyword },
    Strategy { name: "path-frequency", apply: path_frequency },
    Strategy { name: "setup", apply: setup_detection },
    Strategy { name: "research", apply: research_fallback },
];

/// Confidence for a path candidate found in the alias index
pub fn alias_confidence(count: usize) -> u8 {
    count.saturating_mul(10).saturating_add(60).min(95) as u8
}

/// Confidence for the bare most-frequent path candidate
pub fn frequency_confidence(count: usize) -> u8 {
    count.saturating_mul(10).saturating_add(40).min(70) as u8
}

/// Most frequent path candidate that is a known alias
pub fn path_alias(evidence: &Evidence<'_>, index: &AliasIndex) -> Outcome {
    for (candidate, count) in evidence.candidates.ranked() {
        if let Some(target) = index.lookup(candidate) {
            return Outcome::Project {
                project: target.project.clone(),
                vault: Some(target.vault.clone()),
                confidence: alias_confidence(count),
                reasoning: format!(
                    "Matched '{}' to known project '{}'",
                    candidate, target.project
                ),
            };
        }
    }
    Outcome::Unresolved
}

/// First alias, in index order, mentioned in the opening message
pub fn message_alias(evidence: &Evidence<'_>, index: &AliasIndex) -> Outcome {
    match index.iter().find(|(alias, _)| evidence.message.contains(*alias)) {
        Some((alias, target)) => Outcome::Project {
            project: target.project.clone(),
            vault: Some(target.vault.clone()),
            confidence: 70,
            reasoning: format!("Message contains project keyword '{}'", alias),
        },
        None => Outcome::Unresolved,
    }
}

/// First vault keyword mentioned in the message; sets the vault only
pub fn vault_keyword(evidence: &Evidence<'_>, index: &AliasIndex) -> Outcome {
    for (vault, keywords) in index.vault_keywords() {
        if let Some(keyword) = keywords.iter().find(|k| evidence.message.contains(k.as_str())) {
            return Outcome::Vault {
                vault: vault.clone(),
                reasoning: format!("Message contains vault keyword '{}'", keyword),
            };
        }
    }
    Outcome::Unresolved
}

pub fn path_frequency(evidence: &Evidence<'_>, _index: &AliasIndex) -> Outcome {
    match evidence.candidates.most_frequent() {
        Some((candidate, count)) => Outcome::Project {
            project: candidate.to_string(),
            vault: None,
            confidence: frequency_confidence(count),
            reasoning: format!("Best guess from path frequency: '{}'", candidate),
        },
        None => Outcome::Unresolved,
    }
}

/// Work on the assistant's own setup: config paths, install/config talk, MCP servers
pub fn setup_detection(evidence: &Evidence<'_>, index: &AliasIndex) -> Outcome {
    let hit = if evidence.record.files_touched.iter().any(|f| f.contains(SETUP_PATH_MARKER)) {
        Some((65, "Working on Claude Code configuration (/.claude/ path)"))
    } else if SETUP_KEYWORDS.iter().any(|k| evidence.message.contains(*k)) {
        Some((55, "Appears to be setup/configuration work"))
    } else if evidence.message.contains(MCP_KEYWORD) {
        Some((55, "MCP server configuration"))
    } else {
        None
    };

    match hit {
        Some((confidence, reasoning)) => Outcome::Project {
            project: SETUP_PROJECT.to_string(),
            vault: Some(index.default_vault().to_string()),
            confidence,
            reasoning: reasoning.to_string(),
        },
        None => Outcome::Unresolved,
    }
}

/// Conversations with content but no file activity are filed as research
pub fn research_fallback(evidence: &Evidence<'_>, index: &AliasIndex) -> Outcome {
    let record = evidence.record;
    let has_content = !record.message().is_empty();
    if !has_content || !record.files_touched.is_empty() || record.conversation_message_count < 2 {
        return Outcome::Unresolved;
    }

    let topic = research_topic(record.message());
    let label = if topic.is_empty() { "general" } else { topic.as_str() };
    Outcome::Project {
        project: research_project_name(&topic),
        vault: Some(index.default_vault().to_string()),
        confidence: 60,
        reasoning: format!("Research session: '{}'", label),
    }
}
