use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{BusType, Money};

/// Сводка бронирования, передается на шаг оплаты по значению.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingSummary {
    pub schedule_id: String,
    pub operator: String,
    pub bus_number: String,
    pub bus_type: BusType,
    #[serde(rename = "from")]
    pub origin: String,
    #[serde(rename = "to")]
    pub destination: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub booking_date: NaiveDate,
    pub seat_ids: Vec<u32>,
    pub seats: Vec<String>,
    pub price_per_seat: Money,
    pub total: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Netbanking,
    Upi,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentConfirmation {
    pub reference: Uuid,
    pub method: PaymentMethod,
    pub amount: Money,
    pub summary: BookingSummary,
    pub confirmed_at: DateTime<Utc>,
}
