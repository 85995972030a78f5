#![forbid(unsafe_code)]

//! Logging facade.
//!
//! With the `tracing` feature the `tracing` macros are re-exported here so
//! downstream crates can log through `pageflip_core::debug!` and friends
//! without a direct dependency. `tracing-json` adds a one-call subscriber
//! setup that emits JSON lines filtered by `RUST_LOG`.

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

/// Install a global JSON subscriber filtered by `RUST_LOG`.
///
/// Returns `false` if a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging() -> bool {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .is_ok()
}
