pub mod agent;
pub mod config;
pub mod error;
pub mod game_repr;

use log::LevelFilter;

/// Route the `log` facade to stderr through `env_logger`.
///
/// `RUST_LOG` still overrides `level` per module. Calling this more than once,
/// or after another logger was installed, leaves the first logger in place.
pub fn init_logging(level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_millis()
        .try_init();
}
