use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::time::Duration;
use tracing::{debug, info};

use crate::models::{BusType, Money, Schedule};

/// Фильтры поиска рейсов. Пустой фильтр пропускает все.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchCriteria {
    pub from: Option<String>,
    pub to: Option<String>,
    #[serde(rename = "busType")]
    pub bus_type: Option<BusType>,
}

impl SearchCriteria {
    pub fn matches(&self, schedule: &Schedule) -> bool {
        if let Some(from) = self.from.as_deref().filter(|s| !s.is_empty()) {
            if schedule.origin != from {
                return false;
            }
        }
        if let Some(to) = self.to.as_deref().filter(|s| !s.is_empty()) {
            if schedule.destination != to {
                return false;
            }
        }
        if let Some(bus_type) = self.bus_type {
            if schedule.bus_type != bus_type {
                return false;
            }
        }
        true
    }
}

/// Справочник рейсов, только чтение. Создается один раз при старте.
#[async_trait]
pub trait ScheduleDirectory: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Option<Schedule>;

    async fn search(&self, criteria: &SearchCriteria) -> Vec<Schedule>;

    async fn cities(&self) -> Vec<String>;
}

/// Справочник в памяти с имитацией сетевой задержки.
#[derive(Debug, Clone)]
pub struct InMemoryScheduleDirectory {
    schedules: Vec<Schedule>,
    latency: Duration,
}

impl InMemoryScheduleDirectory {
    pub fn new(schedules: Vec<Schedule>, latency: Duration) -> Self {
        info!("Schedule directory loaded with {} schedules", schedules.len());
        Self { schedules, latency }
    }

    pub fn with_sample_data(latency: Duration) -> Self {
        Self::new(sample_schedules(), latency)
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl ScheduleDirectory for InMemoryScheduleDirectory {
    async fn find_by_id(&self, id: &str) -> Option<Schedule> {
        self.simulate_latency().await;
        let found = self.schedules.iter().find(|s| s.id == id).cloned();
        debug!("Schedule lookup {} -> {}", id, if found.is_some() { "hit" } else { "miss" });
        found
    }

    async fn search(&self, criteria: &SearchCriteria) -> Vec<Schedule> {
        self.simulate_latency().await;
        self.schedules
            .iter()
            .filter(|s| criteria.matches(s))
            .cloned()
            .collect()
    }

    async fn cities(&self) -> Vec<String> {
        let cities: BTreeSet<&str> = self
            .schedules
            .iter()
            .flat_map(|s| [s.origin.as_str(), s.destination.as_str()])
            .collect();
        cities.into_iter().map(str::to_string).collect()
    }
}

/// Строка демонстрационного расписания: id, откуда, куда, отправление,
/// прибытие, в пути, цена в рупиях, свободных мест, тип, перевозчик, номер.
type ScheduleRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    i64,
    u32,
    BusType,
    &'static str,
    &'static str,
);

#[rustfmt::skip]
const SAMPLE_SCHEDULES: [ScheduleRow; 8] = [
    ("1", "Gwalior", "Nagpur", "06:00 AM", "10:30 AM", "4h 30m", 450, 15, BusType::Ac, "Gwalior Express", "GW-001"),
    ("2", "Jhansi", "Delhi", "08:00 PM", "02:15 AM", "6h 15m", 650, 8, BusType::Sleeper, "Delhi Travels", "DL-002"),
    ("3", "Bangalore", "Mumbai", "07:30 PM", "12:15 PM", "4h 45m", 940, 12, BusType::Ac, "Mumbai Express", "MU-003"),
    ("4", "Calcutta", "Chennai", "09:00 PM", "04:30 AM", "7h 30m", 1200, 20, BusType::Sleeper, "Chennai Travels", "CH-004"),
    ("5", "Dharwad", "Bangalore", "10:00 PM", "03:45 AM", "5h 45m", 750, 18, BusType::Ac, "Bangalore Express", "BL-005"),
    ("6", "Jaipur", "Delhi", "11:00 PM", "04:15 AM", "5h 15m", 850, 10, BusType::Ac, "Delhi Travels", "DL-006"),
    ("7", "Hyderabad", "Chennai", "08:30 PM", "03:00 AM", "6h 30m", 950, 14, BusType::Sleeper, "Chennai Travels", "CH-007"),
    ("8", "Pune", "Mumbai", "07:00 PM", "10:45 PM", "3h 45m", 550, 22, BusType::Ac, "Mumbai Express", "MU-008"),
];

fn schedule(row: &ScheduleRow) -> Schedule {
    let &(id, from, to, departs, arrives, duration, price, seats, bus_type, operator, number) = row;
    Schedule {
        id: id.to_string(),
        origin: from.to_string(),
        destination: to.to_string(),
        departure_time: departs.to_string(),
        arrival_time: arrives.to_string(),
        duration: duration.to_string(),
        price: Money::from_rupees(price),
        seats_available: seats,
        bus_type,
        operator: operator.to_string(),
        bus_number: number.to_string(),
    }
}

/// Демонстрационные рейсы сайта.
pub fn sample_schedules() -> Vec<Schedule> {
    SAMPLE_SCHEDULES.iter().map(schedule).collect()
}
