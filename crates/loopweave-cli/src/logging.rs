//! Diagnostics for the demos.
//!
//! Demo output goes to stdout; tracing goes to stderr and is controlled by
//! `RUST_LOG` (e.g. `RUST_LOG=loopweave_core=trace` shows every scheduler step).

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the subscriber. Defaults to `warn` when `RUST_LOG` is unset.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
