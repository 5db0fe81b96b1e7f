use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding a `tracing` filter directive, e.g. `tfguard_loader=debug`.
pub const LOG_ENV: &str = "TFGUARD_LOG";

/// Install a stderr `tracing` subscriber.
///
/// The filter is read from `TFGUARD_LOG`; `default_directive` applies when it is unset or
/// invalid. Library crates only emit events and never call this.
pub fn init_tracing(default_directive: &str) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}
