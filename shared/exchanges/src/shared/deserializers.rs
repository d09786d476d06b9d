use chrono::NaiveDateTime;
use common::functions::parse_exchange_datetime;
use serde::{Deserialize, Deserializer};

/// Bittrex sends `null` for prices that have no value yet.
pub fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<f64> = Deserialize::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

pub fn parse_datetime_option<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Deserialize::deserialize(deserializer)?;
    match value.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => parse_exchange_datetime(s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid datetime value: {}", s))),
    }
}
