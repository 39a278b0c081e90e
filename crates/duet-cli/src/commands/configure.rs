//! `duet configure`: print the build configuration for one target and mode.

use std::io::Write;

use duet_config::ConfigureOptions;
use tracing::info;

use crate::cli::{ConfigureArgs, OutputFormat};
use crate::commands::utils::load_inputs;
use crate::error::Result;
use crate::ui;

/// Execute the configure command.
///
/// JSON goes to stdout; status lines go to stderr.
pub fn execute(args: ConfigureArgs) -> Result<()> {
    let inputs = load_inputs(&args.build, &flag_options(&args))?;
    let config = inputs
        .factory
        .configure_axes(inputs.axes, &inputs.options, &inputs.root);

    if config.entry.is_empty() {
        ui::warning(&format!(
            "No entry module found under {}/src/{}",
            inputs.root.display(),
            inputs.axes.target()
        ));
    }

    let mut stdout = std::io::stdout().lock();
    match args.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut stdout, &config)?;
            writeln!(stdout)?;
        }
        OutputFormat::Summary => {
            writeln!(stdout, "{}", ui::summary(&config))?;
            ui::success(&format!(
                "Configured {} {} build",
                inputs.axes.target(),
                inputs.axes.mode()
            ));
        }
    }

    info!(
        plugins = config.plugins.len(),
        rules = config.module_rules.len(),
        "Configured {} {} build",
        inputs.axes.target(),
        inputs.axes.mode()
    );
    Ok(())
}

fn flag_options(args: &ConfigureArgs) -> ConfigureOptions {
    ConfigureOptions {
        entry: args.entry.clone(),
        vendor: args.vendor.clone(),
        light_bundle: args.build.light_bundle,
        debug: args.debug,
    }
}
