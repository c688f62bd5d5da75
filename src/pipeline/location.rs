//! Vault and project-directory resolution for the append pipeline

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::documents::DOCS_SUBDIR;
use crate::models::ClassificationResult;
use crate::utils::validate_project_name;

/// Reserved namespace whose project directories may be created on demand
pub const UNCATEGORIZED_PREFIX: &str = "no-category/";

/// Where a classified session lands on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// An existing project directory, possibly found in a vault other than the one guessed
    Existing { vault: String, dir: PathBuf },
    /// A freshly created uncategorized directory
    Created { vault: String, dir: PathBuf },
    /// No vault holds the project; `tried` lists every probed directory
    Missing { tried: Vec<PathBuf> },
}

/// Vault a classification should be filed under.
///
/// The classifier's vault is trusted only when it names a configured vault; otherwise the
/// project override table and consolidation rules decide, then the default vault.
pub fn resolve_vault(config: &Config, classification: &ClassificationResult) -> String {
    if config.is_configured_vault(&classification.vault) {
        return classification.vault.clone();
    }
    config
        .vault_for_project(&classification.project)
        .unwrap_or(&config.default_vault)
        .to_string()
}

/// Find the directory for `project`, preferring `vault` and probing the others in
/// configured order.
///
/// An existing directory always wins over the vault guess. When several vaults hold the
/// same project name the first match is used and the ambiguity is logged, not resolved.
pub fn locate_project(config: &Config, vault: &str, project: &str) -> Result<Location> {
    let project = project.to_lowercase();
    if let Err(e) = validate_project_name(&project) {
        tracing::warn!("Refusing project name {:?}: {}", project, e);
        return Ok(Location::Missing { tried: Vec::new() });
    }

    let mut probe_order = vec![vault];
    probe_order.extend(config.vault_names().into_iter().filter(|v| *v != vault));

    let candidates: Vec<(&str, PathBuf)> =
        probe_order.into_iter().map(|v| (v, config.memory_path.join(v).join(&project))).collect();
    let existing: Vec<&(&str, PathBuf)> =
        candidates.iter().filter(|(_, dir)| dir.is_dir()).collect();

    if let Some((found_vault, dir)) = existing.first() {
        if existing.len() > 1 {
            let vaults: Vec<&str> = existing.iter().map(|(v, _)| *v).collect();
            tracing::warn!(
                "Project '{}' exists in several vaults ({}), using '{}'",
                project,
                vaults.join(", "),
                found_vault
            );
        }
        return Ok(Location::Existing { vault: found_vault.to_string(), dir: dir.clone() });
    }

    if project.starts_with(UNCATEGORIZED_PREFIX) {
        let dir = config.memory_path.join(vault).join(&project);
        fs::create_dir_all(dir.join(DOCS_SUBDIR))
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        tracing::info!("Created uncategorized project directory {}", dir.display());
        return Ok(Location::Created { vault: vault.to_string(), dir });
    }

    Ok(Location::Missing { tried: candidates.into_iter().map(|(_, dir)| dir).collect() })
}
