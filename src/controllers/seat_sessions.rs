use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{patch, post, put},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::controllers::ApiResult;
use crate::models::BookingSummary;
use crate::services::seat_session::SessionView;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/seat-sessions", post(open_session))
        .route(
            "/seat-sessions/{id}",
            axum::routing::get(get_session).delete(discard_session),
        )
        .route("/seat-sessions/{id}/toggle", patch(toggle_seat))
        .route("/seat-sessions/{id}/schedule", put(reload_schedule))
        .route("/seat-sessions/{id}/proceed", post(proceed_to_payment))
}

#[derive(Debug, Deserialize)]
struct OpenSessionRequest {
    schedule_id: String,
}

#[derive(Debug, Deserialize)]
struct ToggleSeatRequest {
    seat_id: u32,
}

// POST /api/seat-sessions
async fn open_session(
    State(state): State<Arc<AppState>>,
    Json(req): Json<OpenSessionRequest>,
) -> ApiResult<impl IntoResponse> {
    let view = state.sessions.open(&req.schedule_id).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

// GET /api/seat-sessions/{id}
async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SessionView>> {
    Ok(Json(state.sessions.get(id).await?))
}

// PATCH /api/seat-sessions/{id}/toggle
async fn toggle_seat(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<ToggleSeatRequest>,
) -> ApiResult<Json<SessionView>> {
    Ok(Json(state.sessions.toggle(id, req.seat_id).await?))
}

// PUT /api/seat-sessions/{id}/schedule
async fn reload_schedule(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<OpenSessionRequest>,
) -> ApiResult<Json<SessionView>> {
    Ok(Json(state.sessions.reload(id, &req.schedule_id).await?))
}

// POST /api/seat-sessions/{id}/proceed
async fn proceed_to_payment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<BookingSummary>> {
    Ok(Json(state.sessions.proceed(id).await?))
}

// DELETE /api/seat-sessions/{id}
async fn discard_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> StatusCode {
    if state.sessions.discard(id).await {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}
