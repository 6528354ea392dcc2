use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackingStatus {
    OnTime,
    Delayed,
}

/// Последнее известное положение автобуса на маршруте.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusLocation {
    pub id: String,
    pub bus_number: String,
    pub name: String,
    pub current_location: String,
    /// Пройденная часть маршрута, 0..=100
    pub progress: u8,
    pub speed: u32,
    pub status: TrackingStatus,
    pub delay: String,
    pub next_stop: String,
    pub estimated_arrival: String,
    pub route: String,
    pub operator: String,
}

/// Статус поездки по номеру PNR.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripStatus {
    pub pnr: String,
    pub bus_number: String,
    #[serde(rename = "from")]
    pub origin: String,
    #[serde(rename = "to")]
    pub destination: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub status: TrackingStatus,
    pub current_location: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TripTracking {
    pub trip: TripStatus,
    pub bus: Option<BusLocation>,
}
