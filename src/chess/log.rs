use log::LevelFilter;
use std::env;

const LOG_ENV: &str = "CHESS_LOG";
const DEFAULT_LEVEL: LevelFilter = LevelFilter::Warn;

fn level_from_str(s: &str) -> LevelFilter {
    match s.trim().to_lowercase().as_str() {
        "off" | "none" => LevelFilter::Off,
        "error" | "err" => LevelFilter::Error,
        "warn" | "warning" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => DEFAULT_LEVEL,
    }
}

/// Level requested through `CHESS_LOG`, or the default when unset.
pub fn configured_level() -> LevelFilter {
    env::var(LOG_ENV)
        .map(|s| level_from_str(&s))
        .unwrap_or(DEFAULT_LEVEL)
}

/// Installs the stderr logger. Safe to call more than once.
pub fn init() {
    let _ = env_logger::Builder::new()
        .filter_level(configured_level())
        .format_timestamp(None)
        .format_target(false)
        .target(env_logger::Target::Stderr)
        .try_init();
}
