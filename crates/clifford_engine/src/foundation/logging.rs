//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system.
///
/// Defaults to the `info` level unless `RUST_LOG` says otherwise. Returns
/// `false` when a logger was already installed, which makes the call safe
/// to repeat from tests and demos.
pub fn init() -> bool {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init()
        .is_ok()
}
