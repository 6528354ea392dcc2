pub mod schedules;
pub mod seat_sessions;
pub mod payment;
pub mod tracking;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

use crate::error::BookingError;

pub fn routes() -> Router<Arc<crate::AppState>> {
    Router::new()
        .merge(schedules::routes())
        .merge(seat_sessions::routes())
        .merge(payment::routes())
        .merge(tracking::routes())
}

/// Тело ответа с ошибкой.
#[derive(Debug, Serialize)]
pub struct ApiError {
    success: bool,
    code: &'static str,
    message: String,
    #[serde(skip)]
    status: StatusCode,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            success: false,
            code,
            message: message.into(),
            status,
        }
    }
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        match &err {
            BookingError::ScheduleNotFound(_) => {
                ApiError::new(StatusCode::NOT_FOUND, "SCHEDULE_NOT_FOUND", err.to_string())
            }
            BookingError::SessionNotFound(_) => {
                ApiError::new(StatusCode::NOT_FOUND, "SESSION_NOT_FOUND", err.to_string())
            }
            BookingError::NoSeatsSelected => ApiError::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                "NO_SEATS_SELECTED",
                err.to_string(),
            ),
            BookingError::PaymentInvalid(message) => ApiError::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                "PAYMENT_INVALID",
                message.clone(),
            ),
            BookingError::TrackingNotFound(_) => {
                ApiError::new(StatusCode::NOT_FOUND, "TRACKING_NOT_FOUND", err.to_string())
            }
            BookingError::SessionNotReady(_) => {
                ApiError::new(StatusCode::CONFLICT, "SESSION_NOT_READY", err.to_string())
            }
            BookingError::InvalidArgument(detail) => {
                // локальный сбой: подробности в лог, пользователю общее сообщение
                tracing::error!("Invalid argument: {}", detail);
                ApiError::new(
                    StatusCode::BAD_REQUEST,
                    "INVALID_ARGUMENT",
                    "Something went wrong, please try again",
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
