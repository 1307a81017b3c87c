//! Opt-in tracing setup.
//!
//! Library code only emits `tracing` events. Hosts either call
//! [`init_default_tracing`] or install their own subscriber.

/// Environment variable holding the log filter, e.g. `riskview=debug`.
pub const LOG_FILTER_ENV: &str = "RISKVIEW_LOG";

/// Filter used when `RISKVIEW_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Installs a compact fmt subscriber filtered by `RISKVIEW_LOG`.
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
