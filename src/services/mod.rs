pub mod cleanup;
pub mod fare;
pub mod payment;
pub mod seat_grid;
pub mod seat_session;
pub mod selection;
pub mod session_store;
pub mod summary;
