use axum::{extract::State, routing::post, Json, Router};
use std::sync::Arc;

use crate::controllers::ApiResult;
use crate::models::PaymentConfirmation;
use crate::services::payment::PaymentRequest;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/payments", post(make_payment))
}

/// POST /api/payments
///
/// Оплата сводки, сформированной сессией выбора мест. Шлюза нет:
/// форма проверяется, затем бронирование подтверждается.
async fn make_payment(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PaymentRequest>,
) -> ApiResult<Json<PaymentConfirmation>> {
    let confirmation = state.sessions.pay(&req).await?;
    Ok(Json(confirmation))
}
