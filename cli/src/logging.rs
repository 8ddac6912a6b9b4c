use tracing_subscriber::EnvFilter;

/// Logs go to stderr so stdout only carries the transfer result. `RUST_LOG`
/// takes precedence over `--verbose`.
pub fn init_console_subscriber(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .init();
}
