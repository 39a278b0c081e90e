//! Terminal output: status messages on stderr, results on stdout.

use std::fmt::Display;

use duet_bundler::{BuildConfiguration, Classification, ClassificationRule};
use owo_colors::{OwoColorize, Stream};

/// Print a success message to stderr.
pub fn success(message: &str) {
    eprintln!(
        "{} {}",
        "✓".if_supports_color(Stream::Stderr, |t| t.green()),
        message
    );
}

/// Print an info message to stderr.
pub fn info(message: &str) {
    eprintln!(
        "{} {}",
        "ℹ".if_supports_color(Stream::Stderr, |t| t.blue()),
        message
    );
}

/// Print a warning message to stderr.
pub fn warning(message: &str) {
    eprintln!(
        "{} {}",
        "⚠".if_supports_color(Stream::Stderr, |t| t.yellow()),
        message.if_supports_color(Stream::Stderr, |t| t.yellow())
    );
}

/// Apply `--no-color`, `NO_COLOR` and `FORCE_COLOR`.
///
/// Without any of them, colors follow terminal detection per stream.
pub fn init_colors(no_color: bool) {
    if no_color || std::env::var_os("NO_COLOR").is_some() {
        owo_colors::set_override(false);
    } else if std::env::var_os("FORCE_COLOR").is_some() {
        owo_colors::set_override(true);
    }
}

fn bold(text: impl Display) -> String {
    text.if_supports_color(Stream::Stdout, |t| t.bold())
        .to_string()
}

/// One `specifier → classification (rule)` line.
pub fn classification_line(specifier: &str, rule: ClassificationRule) -> String {
    let classification = rule.classification();
    let name = classification.as_str();
    let label = match classification {
        Classification::Bundle => name
            .if_supports_color(Stream::Stdout, |t| t.green())
            .to_string(),
        Classification::External => name
            .if_supports_color(Stream::Stdout, |t| t.cyan())
            .to_string(),
        Classification::Ignore => name
            .if_supports_color(Stream::Stdout, |t| t.dimmed())
            .to_string(),
    };
    format!("{specifier} → {label} ({})", rule.as_str())
}

/// Human-readable overview of a configuration.
pub fn summary(config: &BuildConfiguration) -> String {
    let mut lines = vec![format!(
        "{} {} build ({})",
        bold(config.axes.target()),
        bold(config.axes.mode()),
        config.node_env
    )];

    lines.push(bold("entry:"));
    if config.entry.is_empty() {
        lines.push("  (none)".to_string());
    }
    for (chunk, modules) in &config.entry {
        lines.push(format!("  {chunk}: {}", modules.join(", ")));
    }

    lines.push(format!("{} {}", bold("output:"), config.output.path.display()));
    lines.push(format!("  filename: {}", config.output.filename));
    lines.push(format!("  public path: {}", config.output.public_path));

    if let Some(hook) = &config.externals {
        let policy = if hook.classifier().light_bundle() {
            "light bundle"
        } else {
            "full bundle"
        };
        lines.push(format!("{} {policy}", bold("externals:")));
    }

    lines.push(bold("rules:"));
    for rule in &config.module_rules {
        let handlers: Vec<_> = rule.pipeline.iter().map(|step| step.handler.as_str()).collect();
        lines.push(format!("  {}: {}", rule.category.pattern(), handlers.join(" → ")));
    }

    lines.push(format!("{} {}", bold("plugins:"), config.plugins.len()));
    for plugin in &config.plugins {
        lines.push(format!("  {}", plugin.kind));
    }

    lines.join("\n")
}
