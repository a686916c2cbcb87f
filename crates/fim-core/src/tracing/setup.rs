//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::{DEFAULT_LOG_FILTER, LOG_ENV_VAR, VERBOSE_LOG_FILTER};

static INIT: Once = Once::new();

/// Initialize logging.
///
/// Reads `FIM_LOG` for per-target log levels, e.g. `FIM_LOG=fim_engine=debug`.
/// Falls back to `fim=info` if `FIM_LOG` is not set or is invalid.
/// Output goes to stderr so reports on stdout stay clean.
///
/// Idempotent: only the first call installs a subscriber.
pub fn init_tracing() {
    install(DEFAULT_LOG_FILTER);
}

/// Like [`init_tracing`], but falls back to `fim=debug`. `FIM_LOG` still wins.
pub fn init_tracing_verbose() {
    install(VERBOSE_LOG_FILTER);
}

fn install(fallback: &'static str) {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(fallback));

        // A subscriber may already be set by an embedding application.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .with(filter)
            .try_init();
    });
}
