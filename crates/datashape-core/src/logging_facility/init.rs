//! Logging initialization
//!
//! `RUST_LOG` overrides the per-profile default filter.

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output at debug level
    Development,
    /// JSON lines at info level
    Production,
    /// Bare registry; tests attach a capture layer instead
    Test,
}

impl Profile {
    /// Filter used when `RUST_LOG` is unset
    pub fn default_filter(&self) -> &'static str {
        match self {
            Profile::Development => "datashape=debug",
            Profile::Production => "datashape=info",
            Profile::Test => "off",
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// Only the first call has any effect. Output goes to stderr so that
/// command results on stdout stay machine-readable.
///
/// ```
/// use datashape_core::logging_facility::{init, Profile};
///
/// init(Profile::Production);
/// init(Profile::Development); // no-op
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(profile.default_filter()));
        match profile {
            Profile::Development => {
                tracing_subscriber::fmt()
                    .with_writer(std::io::stderr)
                    .with_env_filter(filter)
                    .init();
            }
            Profile::Production => {
                tracing_subscriber::fmt()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_env_filter(filter)
                    .init();
            }
            Profile::Test => {
                // try_init: a capture layer may already own the global slot
                tracing_subscriber::registry().try_init().ok();
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_idempotent() {
        init(Profile::Test);
        init(Profile::Test);
    }

    #[test]
    fn test_default_filters_scope_to_datashape() {
        assert_eq!(Profile::Development.default_filter(), "datashape=debug");
        assert_eq!(Profile::Production.default_filter(), "datashape=info");
    }
}
