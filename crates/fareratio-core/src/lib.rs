//! Shared domain types, configuration, and the price-per-kilometre search
//! used by both the `fareratio` CLI and the HTTP server.

mod app_config;
mod config;
pub mod geo;
pub mod optimizer;
pub mod types;
pub mod window;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{haversine_km, Coordinates};
pub use optimizer::{find_best_flight, resolve_location, FareTracker, FlightApi};
pub use types::{BestFlight, FareCandidate, Location};
pub use window::SearchWindow;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
