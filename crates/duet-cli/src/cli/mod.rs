//! Command-line interface definition for Duet.
//!
//! - `duet configure` - synthesize and print a build configuration
//! - `duet classify` - show how the server externals policy treats specifiers

mod commands;
pub mod enums;

use clap::Parser;

pub use commands::{BuildArgs, ClassifyArgs, Command, ConfigureArgs};
pub use enums::*;

/// Duet - build configurations for server-rendered JavaScript apps
#[derive(Parser, Debug)]
#[command(
    name = "duet",
    version,
    about = "Build configurations for server-rendered JavaScript apps",
    long_about = "Duet synthesizes the bundler configuration for the four builds of a\n\
                  server-rendered app: client and server, each in development or production."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
