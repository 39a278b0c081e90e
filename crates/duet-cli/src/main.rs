//! Duet CLI entry point.
//!
//! Parses arguments, initializes logging and dispatches to a command.

use clap::Parser;
use duet_cli::{cli, commands, error, logger, ui};
use miette::Result;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = match args.command {
        cli::Command::Configure(configure_args) => commands::configure_execute(configure_args),
        cli::Command::Classify(classify_args) => commands::classify_execute(classify_args),
    };

    // Convert CLI errors to miette diagnostics
    result.map_err(error::cli_error_to_miette)
}
