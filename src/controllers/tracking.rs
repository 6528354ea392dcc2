use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::controllers::ApiResult;
use crate::models::{BusLocation, TripTracking};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tracking", get(search_buses))
        .route("/tracking/{pnr}", get(track_trip))
}

#[derive(Debug, Deserialize)]
pub struct TrackingQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct TrackingResponse {
    pub success: bool,
    pub buses: Vec<BusLocation>,
    pub count: usize,
}

// GET /api/tracking?q=
async fn search_buses(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TrackingQuery>,
) -> Json<TrackingResponse> {
    let buses = state.tracking.search(&params.q);
    Json(TrackingResponse {
        success: true,
        count: buses.len(),
        buses,
    })
}

// GET /api/tracking/{pnr}
async fn track_trip(
    State(state): State<Arc<AppState>>,
    Path(pnr): Path<String>,
) -> ApiResult<Json<TripTracking>> {
    Ok(Json(state.tracking.find_by_pnr(&pnr)?))
}
