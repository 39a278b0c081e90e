//! File-level configuration structure and profile merging.
//!
//! For file discovery, see the `discovery` module.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, Result as ConfigResult};
use crate::options::ConfigureOptions;
use crate::settings::EnvSettings;

/// Contents of `duet.toml` (or the `duet` field of `package.json`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DuetConfig {
    #[serde(default)]
    pub env: EnvSettings,

    #[serde(default)]
    pub options: ConfigureOptions,

    /// Overrides keyed by build mode (`development`, `production`)
    #[serde(default)]
    pub profiles: HashMap<String, ProfileConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default)]
    pub env: Value,

    #[serde(default)]
    pub options: Value,
}

impl DuetConfig {
    /// Create from serde_json::Value
    ///
    /// # Example
    ///
    /// ```
    /// use duet_config::DuetConfig;
    /// use serde_json::json;
    ///
    /// let config = DuetConfig::from_value(json!({
    ///     "env": { "server_port": 8080 },
    ///     "options": { "lightBundle": false }
    /// }))
    /// .unwrap();
    ///
    /// assert_eq!(config.env.server_port, 8080);
    /// assert_eq!(config.options.light_bundle, Some(false));
    /// ```
    pub fn from_value(value: Value) -> ConfigResult<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Convert to serde_json::Value
    pub fn to_value(&self) -> ConfigResult<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Apply the overrides of `profile` (usually the build mode), if present.
    pub fn materialize_profile(mut self, profile: Option<&str>) -> ConfigResult<Self> {
        let Some(name) = profile else {
            return Ok(self);
        };
        let Some(profile_cfg) = self.profiles.get(name).cloned() else {
            return Ok(self);
        };

        if !profile_cfg.env.is_null() {
            self.env = merged(&self.env, &profile_cfg.env)?;
        }
        if !profile_cfg.options.is_null() {
            self.options = merged(&self.options, &profile_cfg.options)?;
        }

        tracing::debug!(profile = name, "Applied config profile");
        Ok(self)
    }
}

fn merged<T>(base: &T, update: &Value) -> ConfigResult<T>
where
    T: Serialize + for<'de> Deserialize<'de>,
{
    let mut value = serde_json::to_value(base).map_err(|err| ConfigError::InvalidProfileOverride {
        message: err.to_string(),
    })?;
    merge_values(&mut value, update);
    serde_json::from_value(value).map_err(|err| ConfigError::InvalidProfileOverride {
        message: err.to_string(),
    })
}

fn merge_values(target: &mut Value, update: &Value) {
    match (target, update) {
        (Value::Object(target_map), Value::Object(update_map)) => {
            for (key, value) in update_map {
                merge_values(target_map.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
        (target_slot, _) => {
            *target_slot = update.clone();
        }
    }
}
