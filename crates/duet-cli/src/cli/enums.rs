use clap::ValueEnum;

/// How `duet configure` prints the configuration
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON, ready for the bundling engine
    #[default]
    #[value(name = "json")]
    Json,

    /// Short human-readable overview
    #[value(name = "summary")]
    Summary,
}
