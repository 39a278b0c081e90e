//! # duet-config
//!
//! Loading of the inputs consumed by the duet configuration factory:
//!
//! - [`EnvSettings`]: the immutable environment record (output paths, ports,
//!   manifest filenames) assembled once from defaults, `duet.toml` and the
//!   process environment.
//! - [`ConfigureOptions`]: the per-invocation factory options (`entry`,
//!   `vendor`, `lightBundle`, `debug`).
//!
//! The factory in `duet-bundler` never reads ambient process state; this crate
//! is the only place that does.

pub mod config;
pub mod discovery;
pub mod error;
pub mod options;
pub mod settings;
pub mod validation;

pub use config::{DuetConfig, ProfileConfig};
pub use discovery::{ConfigDiscovery, discover};
pub use error::{ConfigError, Result};
pub use options::ConfigureOptions;
pub use settings::{ENV_KEYS, EnvSettings};
pub use validation::{SettingsValidator, validate_settings};
