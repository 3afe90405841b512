use crate::error::{IronfitError, Result};
use config::{Config, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IronfitConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub progress: ProgressConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_backend")]
    pub backend: String,
    /// Custom path for the SQLite database. Defaults to `~/.config/ironfit/ironfit.db`.
    #[serde(default)]
    pub path: Option<String>,
    /// Prefix for every key, so several apps can share one database.
    #[serde(default)]
    pub namespace: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_storage_backend(),
            path: None,
            namespace: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Logout also empties Profiles, DietPlans, WorkoutPlans and
    /// ProgressRecords for every user, not just the one logging out.
    #[serde(default = "default_true")]
    pub wipe_on_logout: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            wipe_on_logout: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressConfig {
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            recent_limit: default_recent_limit(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Valid storage backend names.
pub const VALID_STORAGE_BACKENDS: &[&str] = &["sqlite", "memory"];

// -- Defaults --

fn default_storage_backend() -> String {
    "sqlite".to_string()
}
fn default_true() -> bool {
    true
}
fn default_recent_limit() -> usize {
    5
}

impl IronfitConfig {
    /// Load configuration with three-layer TOML merge:
    /// 1. ~/.config/ironfit/config.toml (global)
    /// 2. .ironfit/config.toml (project)
    /// 3. .ironfit/config.local.toml (local, gitignored)
    pub fn load(project_dir: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                builder = builder.add_source(File::from(global_path).required(false));
            }
        }

        if let Some(dir) = project_dir {
            for name in ["config.toml", "config.local.toml"] {
                let path = dir.join(".ironfit").join(name);
                if path.exists() {
                    builder = builder.add_source(File::from(path).required(false));
                }
            }
        }

        let mut cfg: Self = builder
            .build()
            .and_then(Config::try_deserialize)
            .map_err(|e| IronfitError::Config(e.to_string()))?;

        cfg.validate();
        Ok(cfg)
    }

    /// Load a single TOML file on top of the defaults (no layering).
    pub fn load_file(path: &Path) -> Result<Self> {
        let mut cfg: Self = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(true))
            .build()
            .and_then(Config::try_deserialize)
            .map_err(|e| IronfitError::Config(format!("{}: {e}", path.display())))?;
        cfg.validate();
        Ok(cfg)
    }

    /// Defaults only (no files).
    pub fn default_config() -> Self {
        Self::default()
    }

    /// Validate config values, fixing what can be fixed and logging warnings.
    /// Lenient: never rejects the config.
    pub fn validate(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();

        if !VALID_STORAGE_BACKENDS.contains(&self.storage.backend.as_str()) {
            warnings.push(format!(
                "unknown storage backend '{}', valid: {}",
                self.storage.backend,
                VALID_STORAGE_BACKENDS.join(", ")
            ));
        }

        if self.storage.backend == "memory" && self.storage.path.is_some() {
            warnings.push("storage.path is ignored by the memory backend".to_string());
        }

        if let Some(ns) = &self.storage.namespace {
            if ns.trim().is_empty() {
                warnings.push("storage.namespace is blank, ignoring".to_string());
                self.storage.namespace = None;
            }
        }

        if self.progress.recent_limit == 0 {
            warnings.push("progress.recent_limit = 0, setting to 1".to_string());
            self.progress.recent_limit = 1;
        }

        for w in &warnings {
            tracing::warn!("config: {}", w);
        }

        warnings
    }
}

pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("ironfit").join("config.toml"))
}
