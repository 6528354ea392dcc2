use crate::error::{BookingError, BookingResult};
use crate::models::Money;

/// Итог = количество мест × цена места. Точно, без округления.
pub fn total(selected_count: usize, per_seat_price: Money) -> BookingResult<Money> {
    if per_seat_price.is_negative() {
        return Err(BookingError::InvalidArgument(format!(
            "per-seat price must not be negative, got {}",
            per_seat_price
        )));
    }

    let count = i64::try_from(selected_count).map_err(|_| {
        BookingError::InvalidArgument(format!("seat count {} is out of range", selected_count))
    })?;

    per_seat_price.checked_mul(count).ok_or_else(|| {
        BookingError::InvalidArgument(format!(
            "fare overflow: {} seats at {}",
            selected_count, per_seat_price
        ))
    })
}
