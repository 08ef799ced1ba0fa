//! Tequila API response types.
//!
//! Only the fields the search reads are modelled; everything else in the
//! payload is ignored by serde.

use serde::Deserialize;

// ---------------------------------------------------------------------------
// /locations/query
// ---------------------------------------------------------------------------

/// Wrapper for the `/locations/query` response: `{ "locations": [ ... ] }`.
#[derive(Debug, Deserialize)]
pub struct LocationsResponse {
    pub locations: Vec<CityLocation>,
}

/// One city match.
#[derive(Debug, Deserialize)]
pub struct CityLocation {
    /// IATA city code, e.g. `"LON"`.
    pub code: String,
    pub name: String,
    pub location: GeoPoint,
}

#[derive(Debug, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

// ---------------------------------------------------------------------------
// /v2/search
// ---------------------------------------------------------------------------

/// Wrapper for the `/v2/search` response. `data` may be absent when nothing
/// matched.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Vec<Itinerary>,
}

/// A single priced itinerary.
#[derive(Debug, Deserialize)]
pub struct Itinerary {
    /// Total price in the requested currency.
    pub price: f64,
}
