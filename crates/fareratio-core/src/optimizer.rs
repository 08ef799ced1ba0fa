//! Price-per-kilometre search over a list of destinations.
//!
//! The search is sequential: each destination is resolved, measured, and
//! priced before the next one is touched. Failures for one destination are
//! logged and skipped; they never abort the whole search.

use std::future::Future;

use crate::geo::haversine_km;
use crate::types::{BestFlight, FareCandidate, Location};
use crate::window::SearchWindow;

/// The two remote operations a search needs.
pub trait FlightApi {
    type Error: std::fmt::Display;

    /// Resolves a city name. `Ok(None)` means the API knows no such city.
    fn lookup_city(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<Location>, Self::Error>> + Send;

    /// Prices of one-adult fares from `from_code` to `to_code` departing in
    /// `window`. An empty list means no fares.
    fn search_prices(
        &self,
        from_code: &str,
        to_code: &str,
        window: &SearchWindow,
    ) -> impl Future<Output = Result<Vec<f64>, Self::Error>> + Send;
}

/// Keeps the candidate with the strictly smallest price/distance ratio.
///
/// Ties keep whichever candidate was offered first.
#[derive(Debug, Default)]
pub struct FareTracker {
    best: Option<FareCandidate>,
}

impl FareTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Offers a candidate; returns `true` if it became the new best.
    pub fn offer(&mut self, candidate: FareCandidate) -> bool {
        let improves = self
            .best
            .as_ref()
            .is_none_or(|best| candidate.ratio < best.ratio);
        if improves {
            self.best = Some(candidate);
        }
        improves
    }

    #[must_use]
    pub fn best(&self) -> Option<&FareCandidate> {
        self.best.as_ref()
    }

    #[must_use]
    pub fn into_best(self) -> Option<BestFlight> {
        self.best.map(BestFlight::from)
    }
}

/// Resolves `name`, folding lookup failures into `None` after logging them.
pub async fn resolve_location<A>(api: &A, name: &str) -> Option<Location>
where
    A: FlightApi + Sync,
{
    match api.lookup_city(name).await {
        Ok(location) => location,
        Err(e) => {
            tracing::warn!(city = name, error = %e, "city lookup failed");
            None
        }
    }
}

/// Finds the destination with the lowest price per great-circle kilometre.
///
/// Destinations that cannot be resolved, sit zero kilometres from `origin`,
/// or whose fare search fails are skipped. Returns `None` when no fare was
/// found for any destination.
#[allow(clippy::float_cmp)]
pub async fn find_best_flight<A, S>(
    api: &A,
    origin: &Location,
    destinations: &[S],
    window: &SearchWindow,
) -> Option<BestFlight>
where
    A: FlightApi + Sync,
    S: AsRef<str> + Sync,
{
    let mut tracker = FareTracker::new();

    for requested in destinations {
        let requested = requested.as_ref();
        let Some(destination) = resolve_location(api, requested).await else {
            tracing::warn!(city = requested, "could not find details for destination");
            continue;
        };

        let distance_km = haversine_km(origin.coordinates, destination.coordinates);
        if distance_km == 0.0 {
            tracing::info!(
                destination = %destination.name,
                "skipping destination: distance is 0 km"
            );
            continue;
        }

        let prices = match api
            .search_prices(&origin.code, &destination.code, window)
            .await
        {
            Ok(prices) => prices,
            Err(e) => {
                tracing::warn!(
                    destination = requested,
                    error = %e,
                    "fare search failed"
                );
                continue;
            }
        };

        tracing::debug!(
            destination = %destination.name,
            code = %destination.code,
            distance_km,
            fares = prices.len(),
            "fares received"
        );

        for price in prices {
            tracker.offer(FareCandidate::new(
                destination.name.clone(),
                price,
                distance_km,
            ));
        }
    }

    tracker.into_best()
}

#[cfg(test)]
#[path = "optimizer_test.rs"]
mod tests;
