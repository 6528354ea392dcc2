use thiserror::Error;
use uuid::Uuid;

/// Ошибки ядра бронирования. Все восстанавливаемые: обрабатываются на
/// границе контроллеров и показываются пользователю.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("Bus schedule not found: {0}")]
    ScheduleNotFound(String),

    #[error("Please select at least one seat")]
    NoSeatsSelected,

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Seat selection session not found: {0}")]
    SessionNotFound(Uuid),

    #[error("Seat selection session is {0}")]
    SessionNotReady(&'static str),

    #[error("{0}")]
    PaymentInvalid(String),

    #[error("No trip found for PNR {0}")]
    TrackingNotFound(String),
}

pub type BookingResult<T> = Result<T, BookingError>;
