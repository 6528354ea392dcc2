use serde::Deserialize;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::error::BookingResult;
use crate::services::seat_grid::{
    RandomInventory, DEFAULT_BOOKED_PROBABILITY, DEFAULT_LADIES_PROBABILITY,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub seats: SeatLayoutConfig,
    pub directory: DirectoryConfig,
    pub sessions: SessionConfig,
    pub payment: PaymentConfig,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub rust_log: String,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

// Схема мест и вероятности занятости
#[derive(Debug, Clone, Deserialize)]
pub struct SeatLayoutConfig {
    pub rows: u32,
    pub columns: u32,
    pub booked_probability: f64,
    pub ladies_probability: f64,
    /// Если задан, все схемы мест воспроизводимы.
    pub seed: Option<u64>,
}

impl SeatLayoutConfig {
    pub fn inventory(&self) -> BookingResult<RandomInventory> {
        match self.seed {
            Some(seed) => {
                RandomInventory::seeded(seed, self.booked_probability, self.ladies_probability)
            }
            None => RandomInventory::new(self.booked_probability, self.ladies_probability),
        }
    }
}

// Справочник рейсов
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryConfig {
    pub latency_ms: u64,
}

impl DirectoryConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

// Сессии выбора мест
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub ttl_seconds: u64,
    pub sweep_interval_seconds: u64,
}

impl SessionConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_seconds.max(1))
    }
}

// Имитация оплаты
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    pub processing_delay_ms: u64,
}

impl PaymentConfig {
    pub fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.processing_delay_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            app: AppConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
                environment: "development".to_string(),
                rust_log: "bus_booking=debug,tower_http=debug".to_string(),
                log_format: LogFormat::Text,
            },
            seats: SeatLayoutConfig {
                rows: 4,
                columns: 4,
                booked_probability: DEFAULT_BOOKED_PROBABILITY,
                ladies_probability: DEFAULT_LADIES_PROBABILITY,
                seed: None,
            },
            directory: DirectoryConfig { latency_ms: 0 },
            sessions: SessionConfig {
                ttl_seconds: 1800,
                sweep_interval_seconds: 300,
            },
            payment: PaymentConfig {
                processing_delay_ms: 2000,
            },
        }
    }
}

fn parse_var<T: FromStr>(
    name: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            expected,
            value,
        }),
        Err(_) => Ok(default),
    }
}

fn parse_optional<T: FromStr>(
    name: &'static str,
    expected: &'static str,
) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { name, expected, value }),
        Err(_) => Ok(None),
    }
}

fn parse_probability(name: &'static str, default: f64) -> Result<f64, ConfigError> {
    let p: f64 = parse_var(name, default, "a probability between 0 and 1")?;
    if (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(ConfigError::Invalid {
            name,
            expected: "a probability between 0 and 1",
            value: p.to_string(),
        })
    }
}

fn parse_positive(name: &'static str, default: u32) -> Result<u32, ConfigError> {
    let value: u32 = parse_var(name, default, "a positive integer")?;
    if value == 0 {
        return Err(ConfigError::Invalid {
            name,
            expected: "a positive integer",
            value: value.to_string(),
        });
    }
    Ok(value)
}

/// Верхняя граница числа мест в схеме (SEAT_ROWS x SEAT_COLUMNS).
pub const MAX_SEATS: u32 = 2_000;

fn check_layout_size(rows: u32, columns: u32) -> Result<(), ConfigError> {
    match rows.checked_mul(columns) {
        Some(total) if total <= MAX_SEATS => Ok(()),
        _ => Err(ConfigError::Invalid {
            name: "SEAT_ROWS x SEAT_COLUMNS",
            expected: "a layout of at most 2000 seats",
            value: format!("{}x{}", rows, columns),
        }),
    }
}

impl Config {
    /// Переменные окружения поверх значений по умолчанию.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Config::default();

        let log_format = match env::var("LOG_FORMAT") {
            Ok(value) => match value.to_lowercase().as_str() {
                "text" | "" => LogFormat::Text,
                "json" => LogFormat::Json,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "LOG_FORMAT",
                        expected: "text or json",
                        value,
                    })
                }
            },
            Err(_) => defaults.app.log_format,
        };

        let rows = parse_positive("SEAT_ROWS", defaults.seats.rows)?;
        let columns = parse_positive("SEAT_COLUMNS", defaults.seats.columns)?;
        check_layout_size(rows, columns)?;

        Ok(Config {
            app: AppConfig {
                host: env::var("HOST").unwrap_or(defaults.app.host),
                port: parse_var("PORT", defaults.app.port, "a valid port number")?,
                environment: env::var("ENVIRONMENT").unwrap_or(defaults.app.environment),
                rust_log: env::var("RUST_LOG").unwrap_or(defaults.app.rust_log),
                log_format,
            },
            seats: SeatLayoutConfig {
                rows,
                columns,
                booked_probability: parse_probability(
                    "SEAT_BOOKED_PROBABILITY",
                    defaults.seats.booked_probability,
                )?,
                ladies_probability: parse_probability(
                    "SEAT_LADIES_PROBABILITY",
                    defaults.seats.ladies_probability,
                )?,
                seed: parse_optional("SEAT_LAYOUT_SEED", "an unsigned integer")?,
            },
            directory: DirectoryConfig {
                latency_ms: parse_var(
                    "DIRECTORY_LATENCY_MS",
                    defaults.directory.latency_ms,
                    "a number of milliseconds",
                )?,
            },
            sessions: SessionConfig {
                ttl_seconds: parse_var(
                    "SESSION_TTL_SECONDS",
                    defaults.sessions.ttl_seconds,
                    "a number of seconds",
                )?,
                sweep_interval_seconds: parse_var(
                    "SESSION_SWEEP_INTERVAL_SECONDS",
                    defaults.sessions.sweep_interval_seconds,
                    "a number of seconds",
                )?,
            },
            payment: PaymentConfig {
                processing_delay_ms: parse_var(
                    "PAYMENT_PROCESSING_DELAY_MS",
                    defaults.payment.processing_delay_ms,
                    "a number of milliseconds",
                )?,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Все переменные трогаем в одном тесте: окружение общее для потоков
    #[test]
    fn reads_environment_over_defaults() {
        env::set_var("SEAT_ROWS", "10");
        env::set_var("SEAT_LAYOUT_SEED", "42");
        env::set_var("LOG_FORMAT", "JSON");
        let config = Config::from_env().unwrap();
        assert_eq!(config.seats.rows, 10);
        assert_eq!(config.seats.columns, 4);
        assert_eq!(config.seats.seed, Some(42));
        assert_eq!(config.app.log_format, LogFormat::Json);

        env::set_var("SEAT_ROWS", "0");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid { name: "SEAT_ROWS", .. })
        ));

        // каждое измерение допустимо, но мест слишком много
        env::set_var("SEAT_ROWS", "70000");
        env::set_var("SEAT_COLUMNS", "70000");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid { name: "SEAT_ROWS x SEAT_COLUMNS", .. })
        ));
        env::set_var("SEAT_ROWS", "50");
        env::set_var("SEAT_COLUMNS", "40");
        assert_eq!(Config::from_env().unwrap().seats.columns, 40);
        env::set_var("SEAT_COLUMNS", "41");
        assert!(Config::from_env().is_err());
        env::remove_var("SEAT_COLUMNS");

        env::set_var("SEAT_ROWS", "4");
        env::set_var("SEAT_BOOKED_PROBABILITY", "1.5");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid { name: "SEAT_BOOKED_PROBABILITY", .. })
        ));

        env::remove_var("SEAT_ROWS");
        env::remove_var("SEAT_LAYOUT_SEED");
        env::remove_var("LOG_FORMAT");
        env::remove_var("SEAT_BOOKED_PROBABILITY");
    }

    #[test]
    fn seeded_inventory_from_config() {
        let mut config = Config::default();
        config.seats.seed = Some(9);
        assert!(config.seats.inventory().is_ok());

        config.seats.ladies_probability = -1.0;
        assert!(config.seats.inventory().is_err());
    }
}
