use indexmap::IndexMap;

use crate::config::Config;

/// Canonical project and vault an alias resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTarget {
    pub project: String,
    pub vault: String,
}

/// Lowercase alias → project mapping plus per-vault message keywords.
///
/// Built once from [`Config`]. Iteration follows configuration order: rules in order,
/// each rule's canonical name before its aliases. A later rule that reuses an alias
/// overwrites the target but keeps the alias's original position.
#[derive(Debug, Clone, Default)]
pub struct AliasIndex {
    aliases: IndexMap<String, AliasTarget>,
    vault_keywords: Vec<(String, Vec<String>)>,
    default_vault: String,
}

impl AliasIndex {
    pub fn from_config(config: &Config) -> Self {
        let mut aliases = IndexMap::new();
        for rule in &config.consolidation_rules {
            let project = rule.name.trim().to_lowercase();
            if project.is_empty() {
                continue;
            }
            let target = AliasTarget {
                project: project.clone(),
                vault: rule.vault.clone().unwrap_or_else(|| config.default_vault.clone()),
            };
            // Every canonical name is an alias of itself
            aliases.insert(project, target.clone());
            for alias in &rule.aliases {
                let alias = alias.trim().to_lowercase();
                if !alias.is_empty() {
                    aliases.insert(alias, target.clone());
                }
            }
        }

        let vault_keywords = config
            .vaults
            .iter()
            .map(|(vault, cfg)| {
                let keywords = cfg
                    .keywords
                    .iter()
                    .map(|k| k.trim().to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect();
                (vault.clone(), keywords)
            })
            .collect();

        Self { aliases, vault_keywords, default_vault: config.default_vault.clone() }
    }

    pub fn lookup(&self, alias: &str) -> Option<&AliasTarget> {
        self.aliases.get(alias)
    }

    /// Aliases in index order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AliasTarget)> {
        self.aliases.iter().map(|(alias, target)| (alias.as_str(), target))
    }

    /// `(vault, lowercase keywords)` in configuration order
    pub fn vault_keywords(&self) -> &[(String, Vec<String>)] {
        &self.vault_keywords
    }

    pub fn default_vault(&self) -> &str {
        &self.default_vault
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
