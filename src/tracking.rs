//! Справочник отслеживания автобусов. Данные статические: положение
//! не обновляется, поиск только по сохраненным записям.

use tracing::debug;

use crate::error::{BookingError, BookingResult};
use crate::models::{BusLocation, TrackingStatus, TripStatus, TripTracking};

#[derive(Debug, Clone)]
pub struct TrackingDirectory {
    buses: Vec<BusLocation>,
    trips: Vec<TripStatus>,
}

impl TrackingDirectory {
    pub fn new(buses: Vec<BusLocation>, trips: Vec<TripStatus>) -> Self {
        Self { buses, trips }
    }

    pub fn with_sample_data() -> Self {
        Self::new(sample_buses(), sample_trips())
    }

    /// Подстрока без учета регистра по номеру, названию, перевозчику
    /// и маршруту. Пустой запрос ничего не находит.
    pub fn search(&self, query: &str) -> Vec<BusLocation> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let found: Vec<BusLocation> = self
            .buses
            .iter()
            .filter(|bus| {
                [&bus.bus_number, &bus.name, &bus.operator, &bus.route]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&query))
            })
            .cloned()
            .collect();
        debug!("Tracking search {:?} -> {} buses", query, found.len());
        found
    }

    pub fn find_by_bus_number(&self, bus_number: &str) -> Option<&BusLocation> {
        self.buses.iter().find(|bus| bus.bus_number == bus_number)
    }

    pub fn find_by_pnr(&self, pnr: &str) -> BookingResult<TripTracking> {
        let pnr = pnr.trim();
        let trip = self
            .trips
            .iter()
            .find(|trip| trip.pnr.eq_ignore_ascii_case(pnr))
            .cloned()
            .ok_or_else(|| BookingError::TrackingNotFound(pnr.to_string()))?;
        let bus = self.find_by_bus_number(&trip.bus_number).cloned();
        Ok(TripTracking { trip, bus })
    }
}

fn bus(
    id: &str,
    (bus_number, name): (&str, &str),
    (current_location, progress, speed): (&str, u8, u32),
    (status, delay): (TrackingStatus, &str),
    (next_stop, estimated_arrival): (&str, &str),
    route: &str,
) -> BusLocation {
    BusLocation {
        id: id.to_string(),
        bus_number: bus_number.to_string(),
        name: name.to_string(),
        current_location: current_location.to_string(),
        progress,
        speed,
        status,
        delay: delay.to_string(),
        next_stop: next_stop.to_string(),
        estimated_arrival: estimated_arrival.to_string(),
        route: route.to_string(),
        // в демонстрационных данных перевозчик совпадает с названием
        operator: name.to_string(),
    }
}

pub fn sample_buses() -> Vec<BusLocation> {
    use TrackingStatus::*;
    vec![
        bus(
            "BUS001",
            ("GW-001", "Gwalior Express"),
            ("Route 95, 25 miles from destination", 65, 65),
            (Delayed, "15 minutes"),
            ("Central Station", "2:45 PM"),
            "Gwalior → Nagpur",
        ),
        bus(
            "BUS002",
            ("DL-002", "Delhi Travels"),
            ("Highway 1, 10 miles from destination", 85, 70),
            (OnTime, "0 minutes"),
            ("City Center", "3:15 PM"),
            "Jhansi → Delhi",
        ),
        bus(
            "BUS003",
            ("MU-003", "Mumbai Express"),
            ("Expressway, 5 miles from destination", 90, 75),
            (OnTime, "0 minutes"),
            ("Terminal Station", "1:30 PM"),
            "Bangalore → Mumbai",
        ),
        bus(
            "BUS004",
            ("CH-004", "Chennai Travels"),
            ("Route 66, 40 miles from destination", 45, 60),
            (Delayed, "30 minutes"),
            ("South Station", "4:20 PM"),
            "Calcutta → Chennai",
        ),
    ]
}

fn trip(
    pnr: &str,
    bus_number: &str,
    (origin, destination): (&str, &str),
    (departure_time, arrival_time): (&str, &str),
    status: TrackingStatus,
    current_location: &str,
) -> TripStatus {
    TripStatus {
        pnr: pnr.to_string(),
        bus_number: bus_number.to_string(),
        origin: origin.to_string(),
        destination: destination.to_string(),
        departure_time: departure_time.to_string(),
        arrival_time: arrival_time.to_string(),
        status,
        current_location: current_location.to_string(),
    }
}

#[rustfmt::skip]
pub fn sample_trips() -> Vec<TripStatus> {
    use TrackingStatus::*;
    vec![
        trip("PNR123456", "GW-001", ("Gwalior", "Nagpur"), ("10:00 AM", "2:30 PM"), OnTime, "Bhopal"),
        trip("PNR789012", "DL-002", ("Delhi", "Jaipur"), ("9:00 AM", "3:00 PM"), Delayed, "Gurugram"),
        trip("PNR345678", "MU-003", ("Mumbai", "Pune"), ("11:30 AM", "2:00 PM"), OnTime, "Lonavala"),
    ]
}
