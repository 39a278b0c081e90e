//! `duet classify`: show how a build treats import specifiers.

use std::io::Write;

use duet_bundler::{ClassificationRule, DependencyClassifier};
use duet_config::ConfigureOptions;

use crate::cli::ClassifyArgs;
use crate::commands::utils::load_inputs;
use crate::error::Result;
use crate::ui;

/// Execute the classify command.
///
/// Client builds bundle every non-empty specifier; server builds apply the
/// externals policy selected by the mode and `--light-bundle`.
pub fn execute(args: ClassifyArgs) -> Result<()> {
    let mut flags = ConfigureOptions::new();
    flags.light_bundle = args.build.light_bundle;
    let inputs = load_inputs(&args.build, &flags)?;

    let classifier = DependencyClassifier::for_build(&inputs.axes, &inputs.options);
    if inputs.axes.is_client() {
        ui::info("Client builds bundle every dependency");
    }

    let mut stdout = std::io::stdout().lock();
    for specifier in &args.specifiers {
        let rule = if inputs.axes.is_client() {
            client_rule(specifier)
        } else {
            classifier.explain(specifier)
        };
        writeln!(stdout, "{}", ui::classification_line(specifier, rule))?;
    }
    Ok(())
}

fn client_rule(specifier: &str) -> ClassificationRule {
    if specifier.trim().is_empty() {
        ClassificationRule::Empty
    } else {
        ClassificationRule::FullBundle
    }
}
