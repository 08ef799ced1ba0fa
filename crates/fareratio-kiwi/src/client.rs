//! HTTP client for the Kiwi.com Tequila REST API.
//!
//! Wraps `reqwest` with the static `apikey` header, typed response
//! deserialization, and the two calls a price-per-kilometre search needs:
//! city lookup and one-adult fare search.

use std::time::Duration;

use fareratio_core::{Coordinates, FlightApi, Location, SearchWindow};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode, Url};

use crate::error::KiwiError;
use crate::types::{LocationsResponse, SearchResponse};

const DEFAULT_BASE_URL: &str = "https://tequila-api.kiwi.com/";

/// Client for the Tequila API.
///
/// Use [`KiwiClient::new`] for production or [`KiwiClient::with_base_url`]
/// to point at a mock server in tests.
pub struct KiwiClient {
    client: Client,
    base_url: Url,
    currency: String,
}

impl KiwiClient {
    /// Creates a new client pointed at the production Tequila API.
    ///
    /// `timeout_secs = None` leaves `reqwest`'s default in place.
    ///
    /// # Errors
    ///
    /// Returns [`KiwiError::InvalidApiKey`] if the key cannot be sent as a
    /// header, or [`KiwiError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        api_key: &str,
        timeout_secs: Option<u64>,
        currency: &str,
    ) -> Result<Self, KiwiError> {
        Self::with_base_url(api_key, timeout_secs, currency, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Same as [`KiwiClient::new`], plus [`KiwiError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: Option<u64>,
        currency: &str,
        base_url: &str,
    ) -> Result<Self, KiwiError> {
        let mut key = HeaderValue::from_str(api_key).map_err(|_| KiwiError::InvalidApiKey)?;
        key.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert("apikey", key);

        let mut builder = Client::builder()
            .default_headers(headers)
            .user_agent("fareratio/0.1 (price-per-km)");
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        // Exactly one trailing slash so `Url::join` appends to the base path
        // instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| KiwiError::InvalidBaseUrl {
            base_url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            currency: currency.to_owned(),
        })
    }

    /// Resolves a city name to its code, display name, and coordinates.
    ///
    /// Only the best match is requested. Returns `Ok(None)` when the API
    /// knows no matching city.
    ///
    /// # Errors
    ///
    /// - [`KiwiError::Http`] on network failure or non-2xx HTTP status.
    /// - [`KiwiError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn find_city(&self, name: &str) -> Result<Option<Location>, KiwiError> {
        let url = self.build_url(
            "locations/query",
            &[("term", name), ("location_types", "city"), ("limit", "1")],
        )?;

        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        let parsed: LocationsResponse =
            serde_json::from_str(&body).map_err(|e| KiwiError::Deserialize {
                context: format!("locations/query(term={name})"),
                source: e,
            })?;

        let location = parsed.locations.into_iter().next().map(|city| Location {
            code: city.code,
            name: city.name,
            coordinates: Coordinates::new(city.location.lat, city.location.lon),
        });

        match &location {
            Some(found) => tracing::debug!(
                term = name,
                code = %found.code,
                lat = found.coordinates.lat,
                lon = found.coordinates.lon,
                "city resolved"
            ),
            None => tracing::debug!(term = name, "no city matched"),
        }

        Ok(location)
    }

    /// Fetches prices for one-adult fares between two city codes, at most
    /// one itinerary per destination city, departing within `window`.
    ///
    /// # Errors
    ///
    /// - [`KiwiError::UnexpectedStatus`] if the API does not answer `200 OK`.
    /// - [`KiwiError::Http`] on network failure.
    /// - [`KiwiError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn search_fares(
        &self,
        fly_from: &str,
        fly_to: &str,
        window: &SearchWindow,
    ) -> Result<Vec<f64>, KiwiError> {
        let date_from = window.date_from_param();
        let date_to = window.date_to_param();
        let url = self.build_url(
            "v2/search",
            &[
                ("fly_from", fly_from),
                ("fly_to", fly_to),
                ("date_from", &date_from),
                ("date_to", &date_to),
                ("one_for_city", "1"),
                ("adults", "1"),
                ("curr", &self.currency),
            ],
        )?;

        let response = self.client.get(url.clone()).send().await?;
        if response.status() != StatusCode::OK {
            return Err(KiwiError::UnexpectedStatus {
                status: response.status().as_u16(),
                url: redact(&url),
            });
        }

        let body = response.text().await?;
        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|e| KiwiError::Deserialize {
                context: format!("v2/search(fly_from={fly_from}, fly_to={fly_to})"),
                source: e,
            })?;

        Ok(parsed.data.into_iter().map(|it| it.price).collect())
    }

    /// Joins `path` onto the base URL and appends percent-encoded query
    /// parameters.
    fn build_url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, KiwiError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| KiwiError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }
}

/// URL without its query string, for error messages.
fn redact(url: &Url) -> String {
    let mut bare = url.clone();
    bare.set_query(None);
    bare.to_string()
}

impl FlightApi for KiwiClient {
    type Error = KiwiError;

    async fn lookup_city(&self, name: &str) -> Result<Option<Location>, KiwiError> {
        self.find_city(name).await
    }

    async fn search_prices(
        &self,
        from_code: &str,
        to_code: &str,
        window: &SearchWindow,
    ) -> Result<Vec<f64>, KiwiError> {
        self.search_fares(from_code, to_code, window).await
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
