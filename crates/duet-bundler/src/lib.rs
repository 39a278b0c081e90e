#![cfg_attr(docsrs, feature(doc_cfg))]

//! # duet-bundler
//!
//! Build-configuration synthesis for applications compiled twice: once for the
//! browser (`client`) and once for the rendering server (`server`), each in a
//! `development` or `production` flavor.
//!
//! The crate does not compile anything. [`configure`] turns a target, a mode,
//! a small options record and a project root into a [`BuildConfiguration`]
//! that a webpack-style engine consumes: entry points, output layout, the
//! per-file-kind transformation pipelines, externals, the ordered plugin list
//! and the lifecycle hooks that observe the compilation.
//!
//! ## Quick Start
//!
//! ```no_run
//! use duet_bundler::{ConfigureOptions, configure};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = configure("server", "development", &ConfigureOptions::default(), ".")?;
//!
//! assert!(config.externals.is_some());
//! for plugin in &config.plugins {
//!     println!("{}", plugin.kind);
//! }
//! # Ok(()) }
//! ```
//!
//! ### Using explicit settings
//!
//! ```no_run
//! use duet_bundler::{ConfigFactory, ConfigureOptions, EnvSettings};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = EnvSettings {
//!     client_devserver_port: 9000,
//!     ..EnvSettings::default()
//! };
//!
//! let config = ConfigFactory::validated(settings)?.configure(
//!     "client",
//!     "production",
//!     &ConfigureOptions::new().with_vendor("./src/client/vendor.js"),
//!     "/srv/app",
//! )?;
//! println!("{}", serde_json::to_string_pretty(&config)?);
//! # Ok(()) }
//! ```

pub mod axes;
pub mod chunk_ids;
pub mod config;
pub mod externals;
pub mod factory;
pub mod failure;
pub mod lifecycle;
pub mod pipeline;
pub mod plugins;
pub mod progress;

// Logging utilities (optional, enabled with "logging" feature)
#[cfg(feature = "logging")]
#[cfg_attr(docsrs, doc(cfg(feature = "logging")))]
pub mod logging;

#[cfg(feature = "logging")]
#[cfg_attr(docsrs, doc(cfg(feature = "logging")))]
pub use logging::{LogLevel, init_logging, init_logging_from_env};

pub use axes::{Axis, BuildAxes, Mode, Predicate, Target};
pub use chunk_ids::{ChunkIdSanitizer, ChunkIdTable, SAFE_CHUNK_ID_MAX};
pub use config::{
    BuildConfiguration, EntryMap, NodeShims, OutputSpec, ResolutionSpec, StatsOptions,
    TargetPlatform,
};
pub use externals::{
    Classification, ClassificationRule, DependencyClassifier, ExternalModule, ExternalsHook,
    is_loader_specific_file, package_name,
};
pub use factory::{ConfigFactory, FileProbe, NativeProbe, configure};
pub use failure::{BuildIssue, FailurePolicy};
pub use lifecycle::{
    BuildObserver, ChunkOrderHook, JobContext, LifecycleEvent, LifecycleRegistry, Phase,
    SettleOutcome,
};
pub use pipeline::{
    Exclusion, FileCategory, Handler, LoaderPipeline, ModuleRule, PipelineSelector, StepOptions,
    StyleExtraction, TransformStep,
};
pub use plugins::{CANDIDATES, DefineTable, PluginComposer, PluginConfig, PluginEntry, PluginKind};
pub use progress::{ModuleStart, ProgressObserver};

// Settings and options are owned by duet-config; re-exported for convenience
pub use duet_config::{ConfigError, ConfigureOptions, EnvSettings};

/// Error types for duet-bundler operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Missing or unrecognized target/mode value.
    #[error("{}", describe_axis_error(.axis, .value.as_deref()))]
    Configuration {
        axis: Axis,
        /// The rejected value; `None` when the axis was not provided at all.
        value: Option<String>,
    },

    /// The settings record failed validation.
    #[error("Invalid settings: {0}")]
    Settings(#[from] ConfigError),
}

/// Result type alias for duet-bundler operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn missing(axis: Axis) -> Self {
        Error::Configuration { axis, value: None }
    }

    pub fn invalid(axis: Axis, value: &str) -> Self {
        Error::Configuration {
            axis,
            value: Some(value.to_string()),
        }
    }
}

fn describe_axis_error(axis: &Axis, value: Option<&str>) -> String {
    match value {
        None => format!(
            "You must provide a \"{}\" ({})",
            axis,
            axis.allowed_values().join("|")
        ),
        Some(value) => format!(
            "Invalid {} \"{}\", expected one of {}",
            axis,
            value,
            axis.allowed_values().join("|")
        ),
    }
}

impl miette::Diagnostic for Error {
    fn code(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        Some(Box::new(match self {
            Error::Configuration { .. } => "CONFIGURATION_ERROR",
            Error::Settings(_) => "SETTINGS_ERROR",
        }))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(miette::Severity::Error)
    }

    fn help(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        match self {
            Error::Configuration { axis, .. } => Some(Box::new(format!(
                "Pass one of: {}",
                axis.allowed_values().join(", ")
            ))),
            Error::Settings(err) => Some(Box::new(format!(
                "Check the [env] table of duet.toml and the process environment.\nError: {}",
                err
            ))),
        }
    }
}
