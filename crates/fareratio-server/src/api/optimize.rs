use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use fareratio_core::{find_best_flight, resolve_location, BestFlight, SearchWindow};
use serde::Deserialize;

use super::{ApiError, AppState};
use crate::middleware::RequestId;

const MISSING_DATA: &str = "Missing data (origin or destinations required)";

#[derive(Debug, Deserialize)]
pub(super) struct OptimizeRequest {
    #[serde(default)]
    origin: Option<String>,
    #[serde(default)]
    destinations: Option<Vec<String>>,
}

impl OptimizeRequest {
    /// Returns the origin and destinations when both are present and non-empty.
    fn validated(self) -> Option<(String, Vec<String>)> {
        let origin = self.origin.filter(|o| !o.trim().is_empty())?;
        let destinations = self.destinations.filter(|d| !d.is_empty())?;
        Some((origin, destinations))
    }
}

/// `POST /api/optimize`: best price-per-km flight from `origin` to any of
/// `destinations` departing within the next 24 hours.
pub(super) async fn optimize(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<OptimizeRequest>, JsonRejection>,
) -> Result<Json<BestFlight>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(request_id = %req_id.0, error = %rejection, "rejected optimize body");
        ApiError::BadRequest(MISSING_DATA.to_string())
    })?;

    let (origin, destinations) = request
        .validated()
        .ok_or_else(|| ApiError::BadRequest(MISSING_DATA.to_string()))?;

    let api = state.api.as_ref();
    let Some(origin_location) = resolve_location(api, &origin).await else {
        tracing::info!(request_id = %req_id.0, origin = %origin, "origin city not found");
        return Err(ApiError::NotFound(format!("Invalid origin city: {origin}")));
    };

    let window = SearchWindow::next_24h();
    match find_best_flight(api, &origin_location, destinations.as_slice(), &window).await {
        Some(best) => {
            tracing::info!(
                request_id = %req_id.0,
                destination = %best.destination,
                price = best.price,
                ratio = best.ratio,
                "best flight found"
            );
            Ok(Json(best))
        }
        None => Err(ApiError::NoFlights),
    }
}
