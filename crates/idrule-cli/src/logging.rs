//! Tracing initialization for the `idrule` binary.

use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static INIT: Once = Once::new();

/// Environment variable holding an `EnvFilter` directive string.
pub const LOG_ENV: &str = "IDRULE_LOG";

/// Installs the stderr log subscriber.
///
/// `IDRULE_LOG` wins when set and valid, e.g.
/// `IDRULE_LOG=idrule_core=debug`. Otherwise the level comes from the flags:
/// `debug` with `--verbose`, `error` with `--quiet`, `warn` by default.
///
/// Calling it more than once is a no-op.
pub fn init_tracing(verbose: bool, quiet: bool) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .without_time(),
            )
            .with(filter)
            .init();
    });
}

fn default_directive(verbose: bool, quiet: bool) -> &'static str {
    if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_follows_flags() {
        assert_eq!(default_directive(false, false), "warn");
        assert_eq!(default_directive(true, false), "debug");
        assert_eq!(default_directive(false, true), "error");
    }
}
