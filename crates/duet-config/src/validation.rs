//! Validation of the settings record before it reaches the factory.

use crate::error::{ConfigError, Result};
use crate::settings::EnvSettings;

/// Trait for pluggable settings validation strategies
pub trait SettingsValidator {
    fn validate(&self, settings: &EnvSettings) -> Result<()>;
}

/// Schema-only validation (no filesystem checks)
///
/// # Example
///
/// ```
/// use duet_config::{EnvSettings, SettingsValidator, validation::SchemaValidator};
///
/// SchemaValidator.validate(&EnvSettings::default()).unwrap();
/// ```
pub struct SchemaValidator;

impl SettingsValidator for SchemaValidator {
    fn validate(&self, settings: &EnvSettings) -> Result<()> {
        let paths = [
            ("server_bundle_output_path", &settings.server_bundle_output_path),
            ("client_bundle_output_path", &settings.client_bundle_output_path),
            ("client_bundle_assets_filename", &settings.client_bundle_assets_filename),
            (
                "client_bundle_chunk_manifest_filename",
                &settings.client_bundle_chunk_manifest_filename,
            ),
        ];
        for (field, value) in paths {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidSetting {
                    field,
                    message: "must not be empty".to_string(),
                });
            }
        }

        if settings.server_port == 0 {
            return Err(ConfigError::InvalidSetting {
                field: "server_port",
                message: "port 0 is not a valid listening port".to_string(),
            });
        }
        if settings.client_devserver_port == 0 {
            return Err(ConfigError::InvalidSetting {
                field: "client_devserver_port",
                message: "port 0 is not a valid listening port".to_string(),
            });
        }

        if !settings.client_bundle_http_path.starts_with('/') {
            return Err(ConfigError::InvalidSetting {
                field: "client_bundle_http_path",
                message: format!(
                    "'{}' must start with '/'",
                    settings.client_bundle_http_path
                ),
            });
        }

        Ok(())
    }
}

/// Convenience function for schema validation
pub fn validate_settings(settings: &EnvSettings) -> Result<()> {
    SchemaValidator.validate(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_defaults() {
        assert!(validate_settings(&EnvSettings::default()).is_ok());
    }

    #[test]
    fn rejects_empty_output_path() {
        let settings = EnvSettings {
            client_bundle_output_path: "  ".to_string(),
            ..EnvSettings::default()
        };
        assert!(matches!(
            validate_settings(&settings),
            Err(ConfigError::InvalidSetting {
                field: "client_bundle_output_path",
                ..
            })
        ));
    }

    #[test]
    fn rejects_zero_port() {
        let settings = EnvSettings {
            client_devserver_port: 0,
            ..EnvSettings::default()
        };
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn rejects_relative_http_path() {
        let settings = EnvSettings {
            client_bundle_http_path: "client/".to_string(),
            ..EnvSettings::default()
        };
        let err = validate_settings(&settings).unwrap_err();
        assert!(err.to_string().contains("must start with '/'"));
    }
}
