use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::controllers::{ApiError, ApiResult};
use crate::directory::SearchCriteria;
use crate::error::BookingError;
use crate::models::{BusType, Schedule};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/schedules", get(search_schedules))
        .route("/schedules/{id}", get(get_schedule))
        .route("/cities", get(list_cities))
}

#[derive(Debug, Deserialize)]
pub struct SchedulesQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    #[serde(rename = "busType")]
    pub bus_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SchedulesResponse {
    pub success: bool,
    pub schedules: Vec<Schedule>,
    pub count: usize,
}

// GET /api/schedules
async fn search_schedules(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SchedulesQuery>,
) -> ApiResult<Json<SchedulesResponse>> {
    let bus_type = match params.bus_type.as_deref() {
        None | Some("") => None,
        Some(raw) => Some(raw.parse::<BusType>().map_err(|_| {
            ApiError::new(
                StatusCode::BAD_REQUEST,
                "INVALID_BUS_TYPE",
                "busType must be AC | Non-AC | Sleeper | Seater",
            )
        })?),
    };

    let criteria = SearchCriteria {
        from: params.from,
        to: params.to,
        bus_type,
    };
    let schedules = state.directory.search(&criteria).await;
    tracing::debug!("Schedule search {:?} -> {} results", criteria, schedules.len());

    Ok(Json(SchedulesResponse {
        success: true,
        count: schedules.len(),
        schedules,
    }))
}

// GET /api/schedules/{id}
async fn get_schedule(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Schedule>> {
    let schedule = state
        .directory
        .find_by_id(&id)
        .await
        .ok_or(BookingError::ScheduleNotFound(id))?;
    Ok(Json(schedule))
}

// GET /api/cities
async fn list_cities(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.directory.cities().await)
}
