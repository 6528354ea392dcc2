//! payment.rs
//!
//! Имитация шага оплаты. Внешнего платежного шлюза нет: проверяем форму
//! карты (или выбранный банк, или UPI-адрес), после чего бронирование
//! подтверждается.
//!
//! Проверки формы карты выполняются в фиксированном порядке, пользователю
//! показывается первая ошибка:
//! 1. номер карты, ровно 16 цифр (пробелы не учитываются);
//! 2. имя держателя;
//! 3. срок действия в формате MM/YY;
//! 4. CVV из 3 цифр.

use chrono::Utc;
use serde::Deserialize;
use std::borrow::Cow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::error::{BookingError, BookingResult};
use crate::models::{BookingSummary, PaymentConfirmation, PaymentMethod};

pub const INVALID_CARD_NUMBER: &str = "Please enter a valid 16-digit card number";
pub const MISSING_CARD_NAME: &str = "Please enter the cardholder name";
pub const INVALID_EXPIRY: &str = "Please enter a valid expiry date (MM/YY)";
pub const INVALID_CVV: &str = "Please enter a valid CVV";
pub const MISSING_BANK: &str = "Please select your bank";
pub const INVALID_UPI_ID: &str = "Please enter a valid UPI ID";

/// Порядок, в котором показываем ошибки полей.
const FIELD_ORDER: [&str; 4] = ["card_number", "card_name", "expiry_date", "cvv"];

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentRequest {
    pub session_id: Uuid,
    pub method: PaymentMethod,
    pub card: Option<CardDetails>,
    pub bank: Option<String>,
    pub upi_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CardDetails {
    #[validate(custom(function = "validate_card_number"))]
    pub card_number: String,
    #[validate(length(min = 1, message = "Please enter the cardholder name"))]
    pub card_name: String,
    #[validate(custom(function = "validate_expiry"))]
    pub expiry_date: String,
    #[validate(custom(function = "validate_cvv"))]
    pub cvv: String,
}

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn validate_card_number(value: &str) -> Result<(), ValidationError> {
    let digits: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.len() == 16 && digits.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(field_error("card_number", INVALID_CARD_NUMBER))
    }
}

// MM/YY, месяц 01..12
fn validate_expiry(value: &str) -> Result<(), ValidationError> {
    let invalid = || field_error("expiry_date", INVALID_EXPIRY);
    let (month, year) = value.split_once('/').ok_or_else(invalid)?;

    let two_digits = |s: &str| s.len() == 2 && s.chars().all(|c| c.is_ascii_digit());
    if !two_digits(month) || !two_digits(year) {
        return Err(invalid());
    }

    match month.parse::<u8>() {
        Ok(1..=12) => Ok(()),
        _ => Err(invalid()),
    }
}

fn validate_cvv(value: &str) -> Result<(), ValidationError> {
    if value.len() == 3 && value.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(field_error("cvv", INVALID_CVV))
    }
}

fn first_card_error(card: &CardDetails) -> Option<String> {
    let errors = card.validate().err()?;
    let fields = errors.field_errors();

    FIELD_ORDER.iter().find_map(|name| {
        fields
            .get(*name)
            .and_then(|list| list.first())
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
    })
}

/// Проверяет форму оплаты, возвращает первую ошибку для пользователя.
pub fn validate_request(request: &PaymentRequest) -> BookingResult<()> {
    match request.method {
        PaymentMethod::Card => {
            let card = request
                .card
                .as_ref()
                .ok_or_else(|| BookingError::PaymentInvalid(INVALID_CARD_NUMBER.to_string()))?;
            match first_card_error(card) {
                Some(message) => Err(BookingError::PaymentInvalid(message)),
                None => Ok(()),
            }
        }
        PaymentMethod::Netbanking => {
            let has_bank = request
                .bank
                .as_deref()
                .map(|b| !b.trim().is_empty())
                .unwrap_or(false);
            if has_bank {
                Ok(())
            } else {
                Err(BookingError::PaymentInvalid(MISSING_BANK.to_string()))
            }
        }
        PaymentMethod::Upi => {
            // name@handle
            let valid = request
                .upi_id
                .as_deref()
                .map(str::trim)
                .and_then(|id| id.split_once('@'))
                .map(|(name, handle)| !name.is_empty() && !handle.is_empty())
                .unwrap_or(false);
            if valid {
                Ok(())
            } else {
                Err(BookingError::PaymentInvalid(INVALID_UPI_ID.to_string()))
            }
        }
    }
}

pub fn confirm(summary: BookingSummary, method: PaymentMethod) -> PaymentConfirmation {
    PaymentConfirmation {
        reference: Uuid::new_v4(),
        method,
        amount: summary.total,
        summary,
        confirmed_at: Utc::now(),
    }
}
