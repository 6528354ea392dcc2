use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BookingError;
use crate::models::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BusType {
    #[serde(rename = "AC")]
    Ac,
    #[serde(rename = "Non-AC")]
    NonAc,
    Sleeper,
    Seater,
}

impl BusType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BusType::Ac => "AC",
            BusType::NonAc => "Non-AC",
            BusType::Sleeper => "Sleeper",
            BusType::Seater => "Seater",
        }
    }
}

impl fmt::Display for BusType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BusType {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AC" => Ok(BusType::Ac),
            "Non-AC" => Ok(BusType::NonAc),
            "Sleeper" => Ok(BusType::Sleeper),
            "Seater" => Ok(BusType::Seater),
            other => Err(BookingError::InvalidArgument(format!(
                "busType must be AC | Non-AC | Sleeper | Seater, got {:?}",
                other
            ))),
        }
    }
}

/// Рейс из справочника. Только для чтения: счетчик свободных мест
/// справочный и при выборе мест не уменьшается.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: String,
    #[serde(rename = "from")]
    pub origin: String,
    #[serde(rename = "to")]
    pub destination: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub duration: String,
    pub price: Money,
    pub seats_available: u32,
    pub bus_type: BusType,
    pub operator: String,
    pub bus_number: String,
}
