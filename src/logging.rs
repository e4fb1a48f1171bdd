//! Tracing setup.
//!
//! The filter comes from `PINBOARD_LOG` (same syntax as `RUST_LOG`) and
//! defaults to `pinboard=info`.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV_VAR: &str = "PINBOARD_LOG";
const DEFAULT_FILTER: &str = "pinboard=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Returns false if one was already set.
pub fn init() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .try_init()
        .is_ok()
}
