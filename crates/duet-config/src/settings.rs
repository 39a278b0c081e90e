//! Environment-derived settings shared by both build targets.

use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ConfigError, Result};

/// Process environment variables read by [`EnvSettings::from_environment`].
///
/// Names are matched case-insensitively and map onto the snake_case fields of
/// [`EnvSettings`].
pub const ENV_KEYS: &[&str] = &[
    "SERVER_PORT",
    "CLIENT_DEVSERVER_PORT",
    "DISABLE_SSR",
    "SERVER_BUNDLE_OUTPUT_PATH",
    "CLIENT_BUNDLE_OUTPUT_PATH",
    "CLIENT_PUBLIC_PATH",
    "CLIENT_BUNDLE_ASSETS_FILENAME",
    "CLIENT_BUNDLE_CHUNK_MANIFEST_FILENAME",
    "CLIENT_BUNDLE_HTTP_PATH",
    "CLIENT_BUNDLE_CACHE_MAXAGE",
];

/// Immutable settings record handed by value to the configuration factory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvSettings {
    /// Port of the server-side rendering process
    pub server_port: u16,

    /// Port of the development asset server (hot reload endpoint)
    pub client_devserver_port: u16,

    /// Serve the client bundle without server-side rendering
    pub disable_ssr: bool,

    /// Output directory of the server bundle, relative to the project root
    pub server_bundle_output_path: String,

    /// Output directory of the client bundle, relative to the project root
    pub client_bundle_output_path: String,

    /// Directory of static files served next to the client bundle
    pub client_public_path: String,

    /// Filename of the asset manifest written into the client output directory
    pub client_bundle_assets_filename: String,

    /// Filename of the chunk manifest written by production client builds
    pub client_bundle_chunk_manifest_filename: String,

    /// Web path the client bundle is served from (e.g. `/client/`)
    pub client_bundle_http_path: String,

    /// Cache lifetime for hashed client files (e.g. `365d`)
    #[serde(deserialize_with = "string_or_number")]
    pub client_bundle_cache_maxage: String,
}

impl Default for EnvSettings {
    fn default() -> Self {
        Self {
            server_port: 1337,
            client_devserver_port: 7331,
            disable_ssr: false,
            server_bundle_output_path: "./build/server".to_string(),
            client_bundle_output_path: "./build/client".to_string(),
            client_public_path: "./public".to_string(),
            client_bundle_assets_filename: "assets.json".to_string(),
            client_bundle_chunk_manifest_filename: "manifest.json".to_string(),
            client_bundle_http_path: "/client/".to_string(),
            client_bundle_cache_maxage: "365d".to_string(),
        }
    }
}

impl EnvSettings {
    /// Layer the process environment over `base`.
    ///
    /// Priority: environment variables > `base` (usually the `[env]` table of
    /// `duet.toml`, itself defaulted field by field).
    pub fn from_environment(base: EnvSettings) -> Result<Self> {
        Self::figment(base).extract().map_err(|e| ConfigError::InvalidValue {
            field: "env".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// The figment used by [`EnvSettings::from_environment`].
    pub fn figment(base: EnvSettings) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(base))
            .merge(Env::raw().only(ENV_KEYS))
    }

    /// Output directory for the given side of the application.
    pub fn output_path(&self, client: bool) -> &str {
        if client {
            &self.client_bundle_output_path
        } else {
            &self.server_bundle_output_path
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(n) => n.to_string(),
    })
}
