use std::path::PathBuf;

use clap::{Args, Subcommand};

use super::enums::OutputFormat;

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Synthesize the build configuration for one target and mode
    Configure(ConfigureArgs),

    /// Classify import specifiers with the server externals policy
    Classify(ClassifyArgs),
}

/// Build axes and project location shared by every command
#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    /// Build target
    ///
    /// `client` bundles for the browser, `server` for the Node.js renderer.
    #[arg(short, long, value_name = "client|server", default_value = "")]
    pub target: String,

    /// Build mode
    #[arg(
        short,
        long,
        value_name = "development|production",
        default_value = ""
    )]
    pub mode: String,

    /// Project root containing duet.toml and src/
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,

    /// Externalize every dependency the server can require at runtime
    ///
    /// Defaults to true in development and false in production.
    #[arg(long, value_name = "BOOL")]
    pub light_bundle: Option<bool>,
}

/// Arguments for `duet configure`
#[derive(Args, Debug, Clone)]
pub struct ConfigureArgs {
    #[command(flatten)]
    pub build: BuildArgs,

    /// Main entry module (default: src/<target>/index.js when present)
    #[arg(short, long, value_name = "MODULE")]
    pub entry: Option<String>,

    /// Vendor entry module, used by production client builds
    #[arg(long, value_name = "MODULE")]
    pub vendor: Option<String>,

    /// Force development runtime flags regardless of mode
    #[arg(long)]
    pub debug: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

/// Arguments for `duet classify`
#[derive(Args, Debug, Clone)]
pub struct ClassifyArgs {
    /// Import specifiers to classify
    #[arg(required = true, value_name = "SPECIFIER")]
    pub specifiers: Vec<String>,

    #[command(flatten)]
    pub build: BuildArgs,
}
