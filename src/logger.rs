//! Log backend for the bridge

use env_logger::Env;

/// Environment variable holding the log filter, e.g. `QUILT_BRIDGE_LOG=debug`.
pub const LOG_FILTER_VAR: &str = "QUILT_BRIDGE_LOG";

/// Installs the `env_logger` backend. Calling it again, or after the host
/// installed its own logger, does nothing.
pub fn init() {
    let env = Env::default().filter_or(LOG_FILTER_VAR, "info");
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .try_init();
}
