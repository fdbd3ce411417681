//! Diagnostics via `RUST_LOG`, written to stderr.
//!
//! The report and error log are the product output; tracing is for following a run
//! (`RUST_LOG=branchguard_devops=debug` prints every request URL).

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Reads `RUST_LOG`. Defaults to `warn` if unset, so captured request failures are visible.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
