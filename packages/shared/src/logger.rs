//! Logging setup utilities for the chatroom binaries.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Build the default filter directive used when `RUST_LOG` is not set.
///
/// Both the library crate and the binary get the same level, so log lines
/// emitted from either side show up.
pub fn default_directive(crate_name: &str, binary_name: &str, default_log_level: &str) -> String {
    format!(
        "{}={},{}={}",
        crate_name.replace('-', "_"),
        default_log_level,
        binary_name.replace('-', "_"),
        default_log_level
    )
}

/// Initialize the tracing subscriber with the specified default log level.
///
/// The log level can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `crate_name` - The library crate whose logs should be shown (e.g., "chatroom-server")
/// * `binary_name` - The name of the binary (e.g., "chatroom-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use chatroom_shared::logger::setup_logger;
///
/// setup_logger("chatroom-server", "chatroom-server", "info");
/// ```
pub fn setup_logger(crate_name: &str, binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            default_directive(crate_name, binary_name, default_log_level).into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
