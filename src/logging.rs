use tracing::Level;
use tracing_subscriber::EnvFilter;

/// `0` warnings only, `1` info, `2` debug, anything above trace.
pub fn level_for_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Installs a stderr subscriber. `RUST_LOG` wins over `verbosity` when set.
///
/// Calling this more than once is harmless; later calls leave the first
/// subscriber in place.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "pert_gantt={}",
            level_for_verbosity(verbosity).as_str().to_ascii_lowercase()
        ))
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
