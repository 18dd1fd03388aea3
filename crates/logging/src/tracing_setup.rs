//! Global tracing subscriber installation.

use crate::config::VerbosityConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs the process-wide tracing subscriber.
///
/// `RUST_LOG` takes precedence when set; otherwise the filter comes from
/// `config`. Diagnostics go to stderr so they never interleave with progress
/// lines on stdout. Returns `false` when a subscriber was already installed,
/// which makes repeated calls harmless.
///
/// # Example
///
/// ```rust,ignore
/// use logging::{VerbosityConfig, init_tracing};
///
/// init_tracing(VerbosityConfig::from_verbose_level(2));
/// tracing::debug!(target: "treesync::copy", "copying file");
/// ```
pub fn init_tracing(config: VerbosityConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_directive()));

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .is_ok()
}
