use tracing_subscriber::EnvFilter;

/// Initialize logging with tracing-subscriber.
///
/// Library crates log through the `log` facade; the subscriber's log bridge
/// picks those records up. `RUST_LOG` wins over `--verbose` when set.
/// Output goes to stderr so test results on stdout stay clean.
pub(crate) fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
