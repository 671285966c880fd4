//! Clinic booking platform core
//!
//! Mode-aware configuration and content store with pluggable backends,
//! a hot-search aggregator, and CRUD services for the booking
//! marketplace (clinics, treatments, consultants, appointments,
//! reviews).
//!
//! The content store serves one of two datasets depending on the
//! platform [`Mode`](contract::Mode): `review` (reduced, fail-safe
//! default) or `production` (full marketplace). Reads never fail:
//! missing or unreachable documents resolve to compiled-in defaults
//! for the active mode.

// Public exports
pub mod contract;
pub use contract::{
    AuthContext, ConfigDocument, HotSearchEntry, Mode, PlatformError, ResolvedConfig,
};

pub mod config;
pub use config::Config;

pub use api::rest::{routes::router, AppState};

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;

/// Install a `tracing` subscriber honoring `RUST_LOG`, defaulting to
/// `info`. Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}
