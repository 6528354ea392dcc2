pub mod money;
pub mod schedule;
pub mod seat;
pub mod booking;
pub mod tracking;

pub use money::Money;
pub use schedule::{BusType, Schedule};
pub use seat::{Seat, SeatCategory, SeatDisplay, SeatView};
pub use booking::{BookingSummary, PaymentConfirmation, PaymentMethod};
pub use tracking::{BusLocation, TrackingStatus, TripStatus, TripTracking};
