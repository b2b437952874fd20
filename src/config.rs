//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/fbtree/fbtree.toml`
//! 3. Environment variables: `FBTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::{BaseDirs, ProjectDirs};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;

/// Unified configuration for fbtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Snapshot file used when no `--file` is given
    pub tree_file: PathBuf,
    /// Create missing parent directories when saving
    pub create_dirs: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tree_file: default_tree_file(),
            create_dirs: true,
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, keep base).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub tree_file: Option<PathBuf>,
    pub create_dirs: Option<bool>,
}

/// Default snapshot location: the platform data dir, else `~/.fbtree/tree.bin`.
fn default_tree_file() -> PathBuf {
    ProjectDirs::from("", "", "fbtree")
        .map(|dirs| dirs.data_dir().join("tree.bin"))
        .or_else(|| BaseDirs::new().map(|dirs| dirs.home_dir().join(".fbtree").join("tree.bin")))
        .unwrap_or_else(|| PathBuf::from("tree.bin"))
}

/// Get the XDG config directory for fbtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "fbtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("fbtree.toml"))
}

/// Expand `~`, `$VAR` and `${VAR}`; unresolvable input is returned unchanged.
fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Expand shell variables and tilde in `tree_file`.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.tree_file.to_string_lossy().as_ref());
        self.tree_file = PathBuf::from(expanded);
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            tree_file: overlay
                .tree_file
                .clone()
                .unwrap_or_else(|| self.tree_file.clone()),
            create_dirs: overlay.create_dirs.unwrap_or(self.create_dirs),
        }
    }

    /// Load settings from defaults, the global config file and `FBTREE_*` variables.
    pub fn load() -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref())
    }

    /// Load settings using `config_file` in place of the global config file.
    ///
    /// A missing file is skipped; an unreadable or malformed one is an error.
    pub fn load_from(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(path) = config_file {
            if path.exists() {
                let raw = load_raw_settings(path)?;
                current = current.merge_with(&raw);
                debug!("settings: merged {}", path.display());
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply FBTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("FBTREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("tree_file") {
            settings.tree_file = PathBuf::from(val);
        }
        if let Ok(val) = config.get_bool("create_dirs") {
            settings.create_dirs = val;
        }

        Ok(settings)
    }

    /// Render as TOML, e.g. for `fbtree config`.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_with_keeps_base_for_unspecified_fields() {
        let base = Settings {
            tree_file: PathBuf::from("/base/tree.bin"),
            create_dirs: true,
        };
        let overlay = RawSettings {
            tree_file: None,
            create_dirs: Some(false),
        };

        let merged = base.merge_with(&overlay);

        assert_eq!(merged.tree_file, PathBuf::from("/base/tree.bin"));
        assert!(!merged.create_dirs);
    }

    #[test]
    fn default_tree_file_is_named_tree_bin() {
        assert_eq!(
            default_tree_file().file_name().and_then(|n| n.to_str()),
            Some("tree.bin")
        );
    }
}
