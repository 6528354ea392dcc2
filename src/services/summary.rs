use chrono::{Local, NaiveDate};

use crate::error::{BookingError, BookingResult};
use crate::models::{seat::seat_label, BookingSummary, Schedule};
use crate::services::{fare, selection::Selection};

/// Собирает сводку на текущую дату.
pub fn build(schedule: &Schedule, selection: &Selection) -> BookingResult<BookingSummary> {
    build_on(schedule, selection, Local::now().date_naive())
}

pub fn build_on(
    schedule: &Schedule,
    selection: &Selection,
    booking_date: NaiveDate,
) -> BookingResult<BookingSummary> {
    if selection.is_empty() {
        return Err(BookingError::NoSeatsSelected);
    }

    let seat_ids = selection.sorted_ids();
    let seats = seat_ids.iter().map(|id| seat_label(*id)).collect();
    let total = fare::total(seat_ids.len(), schedule.price)?;

    Ok(BookingSummary {
        schedule_id: schedule.id.clone(),
        operator: schedule.operator.clone(),
        bus_number: schedule.bus_number.clone(),
        bus_type: schedule.bus_type,
        origin: schedule.origin.clone(),
        destination: schedule.destination.clone(),
        departure_time: schedule.departure_time.clone(),
        arrival_time: schedule.arrival_time.clone(),
        booking_date,
        seat_ids,
        seats,
        price_per_seat: schedule.price,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::sample_schedules;
    use crate::models::Money;
    use crate::services::seat_grid::{generate, FixedInventory};

    fn gwalior_nagpur() -> Schedule {
        sample_schedules()
            .into_iter()
            .find(|s| s.id == "1")
            .unwrap()
    }

    fn select(ids: &[u32]) -> Selection {
        let layout = generate(4, 4, &mut FixedInventory::new()).unwrap();
        let mut selection = Selection::new();
        for id in ids {
            selection.toggle(&layout, *id).unwrap();
        }
        selection
    }

    #[test]
    fn empty_selection_is_rejected() {
        let err = build(&gwalior_nagpur(), &Selection::new()).unwrap_err();
        assert_eq!(err, BookingError::NoSeatsSelected);
    }

    #[test]
    fn labels_are_sorted_by_id() {
        let schedule = gwalior_nagpur();
        let summary = build(&schedule, &select(&[3, 1, 2])).unwrap();
        assert_eq!(summary.seats, vec!["Seat 1", "Seat 2", "Seat 3"]);
        assert_eq!(summary.seat_ids, vec![1, 2, 3]);
        assert_eq!(summary.total, schedule.price.checked_mul(3).unwrap());
    }

    #[test]
    fn gwalior_to_nagpur_two_seats() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let summary = build_on(&gwalior_nagpur(), &select(&[5, 2]), date).unwrap();

        assert_eq!(summary.seats, vec!["Seat 2", "Seat 5"]);
        assert_eq!(summary.total, Money::from_rupees(900));
        assert_eq!(summary.origin, "Gwalior");
        assert_eq!(summary.destination, "Nagpur");
        assert_eq!(summary.operator, "Gwalior Express");
        assert_eq!(summary.bus_number, "GW-001");

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["booking_date"], "2024-03-15");
        assert_eq!(json["total"], "900.00");
        assert_eq!(json["from"], "Gwalior");
    }
}
