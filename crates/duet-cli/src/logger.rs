//! Logging setup for the Duet CLI.
//!
//! Log lines go to stderr so that `duet configure --format json` output can
//! be piped.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "duet=debug,duet_bundler=debug,duet_config=debug,duet_cli=debug";
const QUIET_FILTER: &str = "error";
const DEFAULT_FILTER: &str = "duet=info,duet_bundler=info,duet_config=info,duet_cli=info";

/// Initialize the tracing subscriber.
///
/// Level precedence: `--verbose` (debug for duet crates), then `--quiet`
/// (errors only), then `RUST_LOG`, then info for duet crates.
///
/// ```rust,no_run
/// use duet_cli::logger::init_logger;
///
/// init_logger(false, false, false);
/// ```
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = filter_for(verbose, quiet);

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .without_time()
        .compact();

    // A subscriber may already be installed when embedded in tests
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn quiet_filter_only_shows_errors() {
        let filter = filter_for(false, true);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::ERROR));
    }

    #[test]
    fn verbose_wins_over_quiet() {
        let filter = filter_for(true, true);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }
}
