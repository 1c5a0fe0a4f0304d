// Log output for the CLI
//
// Library crates log through the `log` facade; tracing-subscriber picks those
// records up through its tracing-log bridge. Everything goes to stderr so
// `--json` output on stdout stays clean.

use tracing_subscriber::{fmt, EnvFilter};

/// Default filter for a verbosity count: 0 = warn, 1 = info, 2+ = debug.
fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `-v` when set.
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    // A second init (tests) is not an error worth reporting
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
