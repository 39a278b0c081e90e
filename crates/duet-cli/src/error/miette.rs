//! Miette diagnostic conversion for CLI errors.

use ::miette::Report;

use crate::error::CliError;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        // Keeps the diagnostic code and help text of the factory error
        CliError::Bundler(e) => Report::new(e),
        CliError::Config(e) => {
            ::miette::miette!(help = config_hint(&e), "Configuration error: {}", e)
        }
        CliError::RootNotFound(path) => ::miette::miette!(
            help = "Pass an existing project directory with --root",
            "Project root not found: {}",
            path.display()
        ),
        other => ::miette::miette!("{}", other),
    }
}

fn config_hint(err: &duet_config::ConfigError) -> &'static str {
    match err {
        duet_config::ConfigError::InvalidSetting { .. } => {
            "Check the [env] table of duet.toml and the matching environment variables"
        }
        duet_config::ConfigError::InvalidProfileOverride { .. } => {
            "Check the [profiles.<mode>] tables of duet.toml"
        }
        _ => "Check duet.toml or the \"duet\" field of package.json",
    }
}
