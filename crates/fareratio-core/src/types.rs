//! Transient values produced during a single search.

use serde::{Deserialize, Serialize};

use crate::geo::Coordinates;

/// A resolved city: its code, display name, and position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// IATA city code, e.g. `"PAR"`.
    pub code: String,
    pub name: String,
    pub coordinates: Coordinates,
}

/// One fare considered for a destination.
#[derive(Debug, Clone, PartialEq)]
pub struct FareCandidate {
    pub destination: String,
    pub price: f64,
    pub distance_km: f64,
    /// `price / distance_km`, unrounded.
    pub ratio: f64,
}

impl FareCandidate {
    #[must_use]
    pub fn new(destination: impl Into<String>, price: f64, distance_km: f64) -> Self {
        Self {
            destination: destination.into(),
            price,
            distance_km,
            ratio: price / distance_km,
        }
    }
}

/// The reported winner. `distance` is rounded to 2 decimals and `ratio` to 4.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestFlight {
    pub destination: String,
    pub price: f64,
    pub distance: f64,
    pub ratio: f64,
}

impl From<FareCandidate> for BestFlight {
    fn from(candidate: FareCandidate) -> Self {
        Self {
            destination: candidate.destination,
            price: candidate.price,
            distance: round_to(candidate.distance_km, 2),
            ratio: round_to(candidate.ratio, 4),
        }
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}
