use tracing_subscriber::EnvFilter;

/// Workspace crate targets that should receive log output.
const CRATE_TARGETS: &[&str] = &["bikram", "bs_core", "bs_time", "bs_calendar", "bs_data"];

/// Install a `fmt` subscriber filtered by verbosity.
///
/// Mapping:
/// - 0 (none) -> warn
/// - 1 (-v)   -> info
/// - 2 (-vv)  -> debug
/// - 3+ (-vvv)-> trace
///
/// `RUST_LOG` overrides the level if set.  Returns `false` if a global
/// subscriber was already installed.
pub fn init(verbosity: u8) -> bool {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let default_filter: String = CRATE_TARGETS
        .iter()
        .map(|t| format!("{t}={level}"))
        .collect::<Vec<_>>()
        .join(",");

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt().with_env_filter(filter).try_init().is_ok()
}
