//! File-based config discovery for CLI use
//!
//! Handles finding and loading duet configuration files from a project root.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::config::DuetConfig;
use crate::error::{ConfigError, Result};

/// File-based configuration discovery
///
/// # Example
///
/// ```no_run
/// use duet_config::ConfigDiscovery;
///
/// let config = ConfigDiscovery::new(".").load_or_default().unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Find a config file in the root directory
    ///
    /// Searches in this order:
    /// 1. TOML config: duet.toml
    /// 2. package.json (duet field)
    pub fn find(&self) -> Option<PathBuf> {
        let toml_path = self.root.join("duet.toml");
        if toml_path.is_file() {
            return Some(toml_path);
        }

        let pkg_path = self.root.join("package.json");
        let content = fs::read_to_string(&pkg_path).ok()?;
        let parsed = serde_json::from_str::<Value>(&content).ok()?;
        match parsed.get("duet") {
            Some(field) if !field.is_null() => Some(pkg_path),
            _ => None,
        }
    }

    /// Load config from the discovered file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no config file is found.
    pub fn load(&self) -> Result<DuetConfig> {
        let path = self
            .find()
            .ok_or_else(|| ConfigError::NotFound(self.root.clone()))?;
        self.load_from(&path)
    }

    /// Like [`ConfigDiscovery::load`], falling back to defaults when no file exists.
    pub fn load_or_default(&self) -> Result<DuetConfig> {
        match self.load() {
            Err(ConfigError::NotFound(_)) => {
                tracing::debug!(
                    root = %self.root.display(),
                    "No duet config found, using defaults"
                );
                Ok(DuetConfig::default())
            }
            other => other,
        }
    }

    /// Load config and apply the profile named after the build mode
    pub fn load_with_profile(&self, profile: &str) -> Result<DuetConfig> {
        self.load_or_default()?.materialize_profile(Some(profile))
    }

    fn load_from(&self, path: &Path) -> Result<DuetConfig> {
        if path.file_name() == Some(std::ffi::OsStr::new("package.json")) {
            return self.load_from_package_json(path);
        }

        let content = fs::read_to_string(path)?;

        let toml_val: toml::Value = toml::from_str(&content).map_err(|e| ConfigError::InvalidValue {
            field: "toml".to_string(),
            hint: Some(format!("Invalid TOML syntax: {}", e)),
        })?;

        let value = serde_json::to_value(toml_val).map_err(|e| ConfigError::InvalidValue {
            field: "toml".to_string(),
            hint: Some(format!("TOML to JSON conversion failed: {}", e)),
        })?;

        tracing::debug!(path = %path.display(), "Loaded duet config");
        DuetConfig::from_value(value)
    }

    fn load_from_package_json(&self, path: &Path) -> Result<DuetConfig> {
        let content = fs::read_to_string(path)?;

        let mut parsed: Value =
            serde_json::from_str(&content).map_err(|e| ConfigError::InvalidValue {
                field: "package.json".to_string(),
                hint: Some(format!("Invalid JSON: {}", e)),
            })?;

        let duet_value = parsed
            .get_mut("duet")
            .map(Value::take)
            .filter(|v| !v.is_null())
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "duet".to_string(),
                hint: Some("Add a 'duet' field to your package.json".to_string()),
            })?;

        DuetConfig::from_value(duet_value)
    }
}

/// Discover and load config from the current directory (convenience function)
pub fn discover() -> Result<DuetConfig> {
    let root = std::env::current_dir()?;
    ConfigDiscovery::new(&root).load_or_default()
}
