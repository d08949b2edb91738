//! Settings model and loader for migrationiq.yaml

use crate::error::{CoreError, CoreResult};
use crate::risk::RiskWeights;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// File names searched for, in priority order, in each directory
pub const CONFIG_FILE_NAMES: &[&str] = &[
    "migrationiq.yaml",
    "migrationiq.yml",
    ".migrationiq.yaml",
    ".migrationiq.yml",
    "migrasafe.yaml",
    "migrasafe.yml",
];

/// Top-level MigrationIQ settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Target database engine
    #[serde(default)]
    pub database: DatabaseEngine,

    /// Git ref to compare against
    #[serde(default = "default_target_branch")]
    pub target_branch: String,

    /// Maximum acceptable cumulative risk score
    #[serde(default = "default_risk_threshold")]
    pub risk_threshold: u32,

    /// Directories (relative to the project root) to scan for migrations
    #[serde(default = "default_migration_dirs")]
    pub migration_dirs: Vec<String>,

    /// Migration framework, or `auto` for detection
    #[serde(default)]
    pub framework: Framework,

    /// Per-rule toggles
    #[serde(default)]
    pub rules: RulesConfig,

    /// Risk weight overrides by category
    #[serde(default)]
    pub risk_weights: HashMap<String, u32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database: DatabaseEngine::default(),
            target_branch: default_target_branch(),
            risk_threshold: default_risk_threshold(),
            migration_dirs: default_migration_dirs(),
            framework: Framework::default(),
            rules: RulesConfig::default(),
            risk_weights: HashMap::new(),
        }
    }
}

fn default_target_branch() -> String {
    "origin/main".to_string()
}

fn default_risk_threshold() -> u32 {
    7
}

fn default_migration_dirs() -> Vec<String> {
    vec![".".to_string()]
}

/// Per-rule toggles and behaviour settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RulesConfig {
    /// Allow DROP TABLE operations without raising a violation
    #[serde(default)]
    pub allow_drop_table: bool,

    /// Allow DROP COLUMN operations without raising a violation
    #[serde(default)]
    pub allow_drop_column: bool,

    /// Require a two-step migration for adding non-null columns
    #[serde(default = "default_require_two_step_non_null")]
    pub require_two_step_non_null: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            allow_drop_table: false,
            allow_drop_column: false,
            require_two_step_non_null: default_require_two_step_non_null(),
        }
    }
}

fn default_require_two_step_non_null() -> bool {
    true
}

/// Migration framework selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    /// Detect from project layout
    #[default]
    Auto,
    Django,
    Alembic,
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Framework::Auto => write!(f, "auto"),
            Framework::Django => write!(f, "django"),
            Framework::Alembic => write!(f, "alembic"),
        }
    }
}

/// Target database engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseEngine {
    #[default]
    Postgres,
    Mysql,
    Sqlite,
}

impl fmt::Display for DatabaseEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseEngine::Postgres => write!(f, "postgres"),
            DatabaseEngine::Mysql => write!(f, "mysql"),
            DatabaseEngine::Sqlite => write!(f, "sqlite"),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.is_file() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let settings = Self::from_yaml(&content).map_err(|source| CoreError::ConfigParse {
            path: path.display().to_string(),
            source,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parse settings from YAML text. An empty document yields the defaults.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Walk up from `search_dir` looking for a config file
    pub fn find_config_file(search_dir: &Path) -> Option<PathBuf> {
        let start = search_dir
            .canonicalize()
            .unwrap_or_else(|_| search_dir.to_path_buf());
        let mut current = Some(start.as_path());
        while let Some(dir) = current {
            for name in CONFIG_FILE_NAMES {
                let candidate = dir.join(name);
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
            current = dir.parent();
        }
        None
    }

    /// Resolve settings for a run.
    ///
    /// An explicit path is used when it exists; a missing explicit path falls
    /// back to the defaults. Without an explicit path the nearest config file
    /// above `search_dir` is used, or the defaults when there is none.
    pub fn resolve(explicit: Option<&Path>, search_dir: &Path) -> CoreResult<Self> {
        match explicit {
            Some(path) if path.is_file() => Self::load(path),
            Some(path) => {
                log::warn!(
                    "Config file '{}' not found, using default settings",
                    path.display()
                );
                Ok(Self::default())
            }
            None => match Self::find_config_file(search_dir) {
                Some(found) => {
                    log::debug!("Using config file {}", found.display());
                    Self::load(&found)
                }
                None => Ok(Self::default()),
            },
        }
    }

    /// Risk weight table with this configuration's overrides applied
    pub fn weights(&self) -> RiskWeights {
        RiskWeights::default().with_overrides(&self.risk_weights)
    }

    /// Validate the settings
    fn validate(&self) -> CoreResult<()> {
        if self.target_branch.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "target_branch cannot be empty".to_string(),
            });
        }
        if self.migration_dirs.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "At least one migration_dirs entry must be specified".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
