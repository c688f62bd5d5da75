use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::utils::{get_goldfish_home, home_user_name};

pub const DEFAULT_VAULT: &str = "personal";
pub const STATE_DIR: &str = ".goldfish";
pub const CONFIG_FILENAME: &str = "config.yaml";
pub const ANALYSIS_FILENAME: &str = "session-analysis.json";
pub const PROCESSED_FILENAME: &str = "processed-sessions.json";

/// Keyword list attached to a vault
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultConfig {
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Per-project vault override
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectOverride {
    pub vault: String,
}

/// A canonical project with the names it is also known by
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsolidationRule {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub vault: Option<String>,
    #[serde(default)]
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Root of the vault/project tree
    #[serde(default)]
    pub memory_path: PathBuf,
    #[serde(default = "default_vault")]
    pub default_vault: String,
    /// Vaults in declaration order; keyword matching honours this order
    #[serde(default)]
    pub vaults: IndexMap<String, VaultConfig>,
    #[serde(default)]
    pub projects: IndexMap<String, ProjectOverride>,
    #[serde(default)]
    pub consolidation_rules: Vec<ConsolidationRule>,
    /// Extra path tokens that are never project names
    #[serde(default)]
    pub ignored_path_tokens: Vec<String>,
}

fn default_vault() -> String {
    DEFAULT_VAULT.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            memory_path: PathBuf::new(),
            default_vault: default_vault(),
            vaults: IndexMap::new(),
            projects: IndexMap::new(),
            consolidation_rules: Vec::new(),
            ignored_path_tokens: Vec::new(),
        }
    }
}

impl Config {
    /// Parse a YAML document; relative or empty `memory_path` resolves against `base_dir`
    pub fn from_yaml(yaml: &str, base_dir: &Path) -> Result<Self> {
        let mut config: Config = if yaml.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(yaml).context("Failed to parse goldfish config YAML")?
        };
        config.memory_path = if config.memory_path.as_os_str().is_empty() {
            base_dir.to_path_buf()
        } else if config.memory_path.is_relative() {
            base_dir.join(&config.memory_path)
        } else {
            config.memory_path
        };
        Ok(config)
    }

    /// Names accepted as a classification vault: every key of `vaults` plus the default
    pub fn is_configured_vault(&self, vault: &str) -> bool {
        !vault.is_empty() && (vault == self.default_vault || self.vaults.contains_key(vault))
    }

    /// Configured vaults, declaration order first, the default vault last if undeclared
    pub fn vault_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.vaults.keys().map(String::as_str).collect();
        if !self.vaults.contains_key(&self.default_vault) {
            names.push(self.default_vault.as_str());
        }
        names
    }

    /// Vault for a project from the override table and consolidation rules
    pub fn vault_for_project(&self, project: &str) -> Option<&str> {
        let project = project.to_lowercase();
        if let Some((_, entry)) =
            self.projects.iter().find(|(name, _)| name.to_lowercase() == project)
        {
            return Some(entry.vault.as_str());
        }
        self.consolidation_rules
            .iter()
            .find(|rule| rule.name.to_lowercase() == project)
            .map(|rule| rule.vault.as_deref().unwrap_or(&self.default_vault))
    }

    pub fn state_dir(&self) -> PathBuf {
        self.memory_path.join(STATE_DIR)
    }

    pub fn analysis_path(&self) -> PathBuf {
        self.state_dir().join(ANALYSIS_FILENAME)
    }

    pub fn processed_path(&self) -> PathBuf {
        self.state_dir().join(PROCESSED_FILENAME)
    }
}

/// Default location of `config.yaml` under the goldfish home
pub fn default_config_path() -> Result<PathBuf> {
    Ok(get_goldfish_home()?.join(STATE_DIR).join(CONFIG_FILENAME))
}

/// Load configuration from `path`, or from the default location when `None`.
///
/// A missing file yields defaults rooted at the goldfish home. The current user's home
/// directory name is always added to `ignored_path_tokens`.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };
    // config.yaml lives in <root>/.goldfish/, so paths resolve against <root>
    let base_dir = match config_path.parent() {
        Some(state_dir) if state_dir.file_name().is_some_and(|n| n == STATE_DIR) => {
            state_dir.parent().map(Path::to_path_buf).unwrap_or_default()
        }
        Some(dir) => dir.to_path_buf(),
        None => PathBuf::new(),
    };

    let mut config = if config_path.exists() {
        let yaml = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
        Config::from_yaml(&yaml, &base_dir)
            .with_context(|| format!("Invalid config file: {}", config_path.display()))?
    } else {
        tracing::info!("No config at {}, using defaults", config_path.display());
        Config::from_yaml("", &base_dir)?
    };

    if let Some(user) = home_user_name()
        && !config.ignored_path_tokens.iter().any(|t| t.eq_ignore_ascii_case(&user))
    {
        config.ignored_path_tokens.push(user);
    }

    Ok(config)
}
