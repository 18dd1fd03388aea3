//! Verbosity configuration for tracing output.

use tracing::level_filters::LevelFilter;

/// Maps the number of `-v` flags to a tracing level.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct VerbosityConfig {
    level: u8,
}

impl VerbosityConfig {
    /// Create a configuration from a verbose level (0 = warnings only).
    #[must_use]
    pub const fn from_verbose_level(level: u8) -> Self {
        Self { level }
    }

    /// The verbose level this configuration was built from.
    #[must_use]
    pub const fn verbose_level(self) -> u8 {
        self.level
    }

    /// Maximum tracing level enabled at this verbosity.
    #[must_use]
    pub const fn level_filter(self) -> LevelFilter {
        match self.level {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }

    /// Default filter directive used when `RUST_LOG` is not set.
    #[must_use]
    pub fn default_directive(self) -> String {
        self.level_filter().to_string().to_lowercase()
    }
}
