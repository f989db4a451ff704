//! Structured logging hooks.
//!
//! With the `tracing` feature, sequence mutations emit `trace` events and
//! listener registration or failure emits `debug` events, all carrying the
//! sequence id (`seq`) and its configured `label`. Without the feature every
//! call site compiles away.
//!
//! The `tracing-json` feature adds [`init_json_logging`], which installs a
//! process-wide JSON subscriber filtered by `RUST_LOG`.

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, error, info, info_span, trace, trace_span, warn};

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "info";

/// Install a JSON `tracing` subscriber on stderr.
///
/// Returns `false` if a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
