use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "problem_tracker=info,tower_http=info";

/// Install the global `tracing` subscriber, honouring `RUST_LOG`.
///
/// Logs go to stderr so the CLI can keep stdout for its own output.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
