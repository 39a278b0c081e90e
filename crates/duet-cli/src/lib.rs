//! Duet CLI - build configurations for server-rendered JavaScript apps.
//!
//! Loads the environment settings and factory options of a project, runs the
//! `duet-bundler` factory and prints the result.
//!
//! - [`cli`] - clap argument definitions
//! - [`commands`] - `configure` and `classify`
//! - [`error`] - `CliError` and its miette conversion
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - colored status messages and the configuration summary
//!
//! # Example
//!
//! ```rust,no_run
//! use duet_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result};
