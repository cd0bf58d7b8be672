//! Typed encoders and decoders for every stored key.
//!
//! Decoders report failures as [`DecodeError`]; callers that load state
//! collapse the error into the field default so a damaged store never
//! blocks startup.

use crate::models::{Quote, TodoItem};
use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

pub const DAY_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";
pub const WATER_CEILING: u8 = 12;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid count {0:?}")]
    Count(String),
    #[error("invalid time of day {0:?}")]
    Time(String),
    #[error("invalid calendar day {0:?}")]
    Day(String),
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn decode_water(raw: &str) -> Result<u8, DecodeError> {
    raw.trim()
        .parse::<u32>()
        .map(|cups| cups.min(u32::from(WATER_CEILING)) as u8)
        .map_err(|_| DecodeError::Count(raw.to_string()))
}

pub fn encode_water(cups: u8) -> String {
    cups.to_string()
}

pub fn decode_flag(raw: &str) -> bool {
    raw == "true"
}

pub fn encode_flag(flag: bool) -> &'static str {
    if flag { "true" } else { "false" }
}

pub fn decode_time(raw: &str) -> Result<NaiveTime, DecodeError> {
    let raw_trimmed = raw.trim();
    NaiveTime::parse_from_str(raw_trimmed, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(raw_trimmed, "%H:%M:%S"))
        .map_err(|_| DecodeError::Time(raw.to_string()))
}

pub fn encode_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

pub fn decode_day(raw: &str) -> Result<NaiveDate, DecodeError> {
    NaiveDate::parse_from_str(raw.trim(), DAY_FORMAT).map_err(|_| DecodeError::Day(raw.to_string()))
}

pub fn encode_day(day: NaiveDate) -> String {
    day.format(DAY_FORMAT).to_string()
}

pub fn decode_todos(raw: &str) -> Result<Vec<TodoItem>, DecodeError> {
    Ok(serde_json::from_str(raw)?)
}

pub fn encode_todos(todos: &[TodoItem]) -> serde_json::Result<String> {
    serde_json::to_string(todos)
}

pub fn decode_quote(raw: &str) -> Result<Quote, DecodeError> {
    Ok(serde_json::from_str(raw)?)
}

pub fn encode_quote(quote: &Quote) -> serde_json::Result<String> {
    serde_json::to_string(quote)
}

/// Serde adapter for `"HH:MM"` times in request payloads.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::encode_time(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::decode_time(&raw).map_err(D::Error::custom)
    }
}
