use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt};

/// Log level for a `-v` count: warnings by default, `-v` info, `-vv` debug.
pub fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    }
}

/// Installs a stderr fmt subscriber. `RUST_LOG` wins over `verbosity` when set.
pub fn init_logging(verbosity: u8) {
    let level = level_for(verbosity);
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    // Ignore error if a global subscriber is already set (e.g., when running in tests)
    let _ = tracing::subscriber::set_global_default(subscriber);
}
