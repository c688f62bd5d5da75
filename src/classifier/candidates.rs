use std::collections::HashSet;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::config::Config;

/// Path components that are infrastructure, never project names
const EXCLUDED_TOKENS: &[&str] = &[
    // System paths
    "users", "home", "desktop", "documents", "downloads", "library", "cloudstorage",
    "dropbox-personal", "applications", "tmp", "var", "opt",
    // Memory tree
    "goldfish",
    // Source-tree scaffolding
    "src", "lib", "app", "components", "pages", "api", "public", "static", "node_modules",
    "dist", "build", "out", "__pycache__", "tests", "test", "spec", "scripts", "config",
    "utils", "helpers", "docs", "doc", "documentation", "examples", "assets", "images",
    "styles",
    // Assistant tooling
    "claude", "projects", "agents", "commands", "skills",
];

const EXCLUDED_EXTENSIONS: &[&str] =
    &[".py", ".md", ".json", ".yaml", ".yml", ".js", ".ts", ".tsx", ".jsx", ".sh", ".jsonl"];

static UUID_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-f]{8}-[0-9a-f]{4}-").expect("valid UUID prefix regex"));

/// Decides which path tokens may name a project
#[derive(Debug, Clone)]
pub struct NoiseFilter {
    excluded: HashSet<String>,
}

impl NoiseFilter {
    /// Built-in exclusions plus vault names and `ignored_path_tokens` from the config
    pub fn from_config(config: &Config) -> Self {
        let mut excluded: HashSet<String> = EXCLUDED_TOKENS.iter().map(|t| t.to_string()).collect();
        excluded.extend(config.vault_names().into_iter().map(str::to_lowercase));
        excluded.extend(config.ignored_path_tokens.iter().map(|t| t.to_lowercase()));
        Self { excluded }
    }

    /// Lowercased candidate for `token`, or `None` when it is noise
    pub fn candidate(&self, token: &str) -> Option<String> {
        if token.chars().count() <= 2 || token.starts_with('.') || token.starts_with('-') {
            return None;
        }
        let lower = token.to_lowercase();
        if self.excluded.contains(&lower)
            || EXCLUDED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
            || UUID_PREFIX.is_match(&lower)
            || lower.starts_with(|c: char| c.is_ascii_digit())
        {
            return None;
        }
        Some(lower)
    }
}

/// Frequency table of project-name candidates, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathCandidates {
    counts: IndexMap<String, usize>,
}

impl PathCandidates {
    pub fn from_paths<'a, I>(paths: I, filter: &NoiseFilter) -> Self
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut counts: IndexMap<String, usize> = IndexMap::new();
        for path in paths {
            for token in path.split(['/', '\\']) {
                if let Some(candidate) = filter.candidate(token) {
                    *counts.entry(candidate).or_insert(0) += 1;
                }
            }
        }
        Self { counts }
    }

    /// Candidates by descending count; ties keep first-seen order
    pub fn ranked(&self) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> =
            self.counts.iter().map(|(name, count)| (name.as_str(), *count)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// Single most frequent candidate, earliest on ties
    pub fn most_frequent(&self) -> Option<(&str, usize)> {
        self.ranked().into_iter().next()
    }

    pub fn count(&self, candidate: &str) -> usize {
        self.counts.get(candidate).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
