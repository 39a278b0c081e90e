//! Per-invocation options recognized by the configuration factory.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Options accepted by `configure(target, mode, options, root)`.
///
/// All fields are optional; an empty record reproduces the default build for
/// the chosen target and mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigureOptions {
    /// Overrides the default entry module (`src/<target>/index.js`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,

    /// Overrides the vendor bundle entry; only used by production client builds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,

    /// Externalize third-party packages of the server bundle.
    ///
    /// Defaults to `true` in development and `false` in production.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub light_bundle: Option<bool>,

    /// Force development-level runtime flags regardless of mode
    pub debug: bool,
}

impl ConfigureOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from serde_json::Value (for programmatic config)
    ///
    /// # Example
    ///
    /// ```
    /// use duet_config::ConfigureOptions;
    /// use serde_json::json;
    ///
    /// let options = ConfigureOptions::from_value(json!({ "lightBundle": false })).unwrap();
    /// assert_eq!(options.light_bundle, Some(false));
    /// ```
    pub fn from_value(value: Value) -> crate::Result<Self> {
        serde_json::from_value(value).map_err(|e| crate::ConfigError::InvalidValue {
            field: "options".to_string(),
            hint: Some(e.to_string()),
        })
    }

    pub fn with_entry(mut self, entry: impl Into<String>) -> Self {
        self.entry = Some(entry.into());
        self
    }

    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = Some(vendor.into());
        self
    }

    pub fn with_light_bundle(mut self, enabled: bool) -> Self {
        self.light_bundle = Some(enabled);
        self
    }

    pub fn with_debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    /// Overlay `other` on top of `self`; set fields of `other` win.
    pub fn overridden_by(mut self, other: &ConfigureOptions) -> Self {
        if other.entry.is_some() {
            self.entry.clone_from(&other.entry);
        }
        if other.vendor.is_some() {
            self.vendor.clone_from(&other.vendor);
        }
        if other.light_bundle.is_some() {
            self.light_bundle = other.light_bundle;
        }
        self.debug |= other.debug;
        self
    }

    /// True when no option deviates from the defaults.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_camel_case() {
        let options = ConfigureOptions::from_value(json!({
            "entry": "./src/client/app.js",
            "lightBundle": true,
            "debug": true
        }))
        .unwrap();

        assert_eq!(options.entry.as_deref(), Some("./src/client/app.js"));
        assert_eq!(options.light_bundle, Some(true));
        assert!(options.debug);
        assert!(options.vendor.is_none());
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(ConfigureOptions::from_value(json!({ "lightBundle": "yes" })).is_err());
    }

    #[test]
    fn override_keeps_unset_fields() {
        let base = ConfigureOptions::new().with_entry("a.js").with_light_bundle(false);
        let merged = base.overridden_by(&ConfigureOptions::new().with_vendor("v.js"));

        assert_eq!(merged.entry.as_deref(), Some("a.js"));
        assert_eq!(merged.vendor.as_deref(), Some("v.js"));
        assert_eq!(merged.light_bundle, Some(false));
    }

    #[test]
    fn empty_detection() {
        assert!(ConfigureOptions::default().is_empty());
        assert!(!ConfigureOptions::new().with_debug(true).is_empty());
    }
}
