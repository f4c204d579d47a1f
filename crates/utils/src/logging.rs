//! Logging setup for binaries and tests that use the infra crates.

use infra_core::{BoxError, DEFAULT_LOG_FILTER, INFRA_LOG_VAR};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// The filter is read from `INFRA_LOG`, then `RUST_LOG`, and falls back to
/// `info`. Events are written to stderr in compact form. Fails if a global
/// subscriber is already installed.
pub fn init() -> Result<(), BoxError> {
    let filter = EnvFilter::try_from_env(INFRA_LOG_VAR)
        .or_else(|_| EnvFilter::try_from_default_env())
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .compact()
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
