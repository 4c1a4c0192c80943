//! Process-wide logging setup shared by RevLine binaries.

mod subscriber;

pub use subscriber::{LOG_FORMAT_ENV, LogFormat};

/// Initialize tracing/logging for the process.
///
/// Format comes from `REVLINE_LOG_FORMAT`, filtering from `RUST_LOG`.
/// Safe to call multiple times; later calls are no-ops.
pub fn init() {
    subscriber::init(LogFormat::from_env());
}
