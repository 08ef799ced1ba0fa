use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::NaiveDate;

use super::*;
use crate::geo::Coordinates;

/// In-memory `FlightApi` that counts calls.
#[derive(Default)]
struct FakeApi {
    cities: HashMap<String, Location>,
    prices: HashMap<String, Vec<f64>>,
    failing_lookups: HashSet<String>,
    failing_searches: HashSet<String>,
    lookup_calls: AtomicUsize,
    search_calls: AtomicUsize,
}

impl FakeApi {
    fn with_city(mut self, name: &str, code: &str, lat: f64, lon: f64) -> Self {
        self.cities.insert(
            name.to_string(),
            Location {
                code: code.to_string(),
                name: name.to_string(),
                coordinates: Coordinates::new(lat, lon),
            },
        );
        self
    }

    fn with_prices(mut self, code: &str, prices: &[f64]) -> Self {
        self.prices.insert(code.to_string(), prices.to_vec());
        self
    }

    fn failing_lookup(mut self, name: &str) -> Self {
        self.failing_lookups.insert(name.to_string());
        self
    }

    fn failing_search(mut self, code: &str) -> Self {
        self.failing_searches.insert(code.to_string());
        self
    }

    fn searches(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }
}

impl FlightApi for FakeApi {
    type Error = String;

    async fn lookup_city(&self, name: &str) -> Result<Option<Location>, String> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_lookups.contains(name) {
            return Err(format!("lookup of {name} blew up"));
        }
        Ok(self.cities.get(name).cloned())
    }

    async fn search_prices(
        &self,
        _from_code: &str,
        to_code: &str,
        _window: &SearchWindow,
    ) -> Result<Vec<f64>, String> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_searches.contains(to_code) {
            return Err(format!("search to {to_code} returned 500"));
        }
        Ok(self.prices.get(to_code).cloned().unwrap_or_default())
    }
}

fn window() -> SearchWindow {
    SearchWindow::starting(NaiveDate::from_ymd_opt(2026, 5, 1).unwrap())
}

fn paris() -> Location {
    Location {
        code: "PAR".to_string(),
        name: "Paris".to_string(),
        coordinates: Coordinates::new(48.856_6, 2.352_2),
    }
}

/// Paris origin plus London (~344 km), Berlin (~878 km), and Madrid (~1053 km).
fn europe() -> FakeApi {
    FakeApi::default()
        .with_city("Paris", "PAR", 48.856_6, 2.352_2)
        .with_city("London", "LON", 51.507_4, -0.127_8)
        .with_city("Berlin", "BER", 52.520_0, 13.405_0)
        .with_city("Madrid", "MAD", 40.416_8, -3.703_8)
}

#[test]
fn tracker_keeps_strictly_smaller_ratio() {
    let mut tracker = FareTracker::new();
    assert!(tracker.offer(FareCandidate::new("A", 100.0, 1_000.0)));
    assert!(!tracker.offer(FareCandidate::new("B", 200.0, 1_000.0)));
    assert!(tracker.offer(FareCandidate::new("C", 50.0, 1_000.0)));
    assert_eq!(tracker.best().map(|c| c.destination.as_str()), Some("C"));
}

#[test]
fn tracker_keeps_first_on_tie() {
    let mut tracker = FareTracker::new();
    tracker.offer(FareCandidate::new("First", 100.0, 1_000.0));
    assert!(!tracker.offer(FareCandidate::new("Second", 200.0, 2_000.0)));
    assert_eq!(
        tracker.into_best().map(|b| b.destination),
        Some("First".to_string())
    );
}

#[test]
fn empty_tracker_reports_nothing() {
    assert!(FareTracker::new().into_best().is_none());
}

#[tokio::test]
async fn picks_lowest_price_per_km_across_destinations() {
    // London: 80/343.56 = 0.233; Berlin: 150/878 = 0.171; Madrid: 300/1053 = 0.285
    let api = europe()
        .with_prices("LON", &[80.0, 120.0])
        .with_prices("BER", &[150.0])
        .with_prices("MAD", &[300.0]);

    let best = find_best_flight(&api, &paris(), &["London", "Berlin", "Madrid"], &window())
        .await
        .expect("a fare should be found");

    assert_eq!(best.destination, "Berlin");
    assert!((best.price - 150.0).abs() < f64::EPSILON);
    assert_eq!(api.searches(), 3);
}

#[tokio::test]
async fn considers_every_fare_of_a_destination() {
    let api = europe().with_prices("LON", &[120.0, 45.0, 90.0]);

    let best = find_best_flight(&api, &paris(), &["London"], &window())
        .await
        .expect("a fare should be found");

    assert!((best.price - 45.0).abs() < f64::EPSILON);
    assert!((best.distance - 343.56).abs() < 0.01);
}

#[tokio::test]
async fn zero_distance_destination_is_skipped_without_fare_search() {
    let api = europe().with_prices("PAR", &[1.0]);

    let best = find_best_flight(&api, &paris(), &["Paris"], &window()).await;

    assert!(best.is_none());
    assert_eq!(api.searches(), 0, "no fare search for a 0 km destination");
}

#[tokio::test]
async fn unresolved_destination_is_skipped() {
    let api = europe().with_prices("LON", &[80.0]);

    let best = find_best_flight(&api, &paris(), &["Atlantis", "London"], &window())
        .await
        .expect("London should still be found");

    assert_eq!(best.destination, "London");
    assert_eq!(api.searches(), 1);
}

#[tokio::test]
async fn lookup_failure_is_treated_as_miss() {
    let api = europe()
        .failing_lookup("Berlin")
        .with_prices("BER", &[1.0])
        .with_prices("LON", &[80.0]);

    let best = find_best_flight(&api, &paris(), &["Berlin", "London"], &window())
        .await
        .expect("London should still be found");

    assert_eq!(best.destination, "London");
}

#[tokio::test]
async fn fare_search_failure_skips_only_that_destination() {
    let api = europe()
        .failing_search("BER")
        .with_prices("MAD", &[300.0]);

    let best = find_best_flight(&api, &paris(), &["Berlin", "Madrid"], &window())
        .await
        .expect("Madrid should still be found");

    assert_eq!(best.destination, "Madrid");
    assert_eq!(api.searches(), 2);
}

#[tokio::test]
async fn no_fares_anywhere_yields_none() {
    let api = europe();
    let best = find_best_flight(&api, &paris(), &["London", "Berlin"], &window()).await;
    assert!(best.is_none());
}

#[tokio::test]
async fn resolve_location_returns_none_on_error() {
    let api = europe().failing_lookup("Paris");
    assert!(resolve_location(&api, "Paris").await.is_none());
    assert_eq!(api.lookup_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn resolve_location_returns_known_city() {
    let api = europe();
    let location = resolve_location(&api, "Madrid").await.expect("known city");
    assert_eq!(location.code, "MAD");
}
