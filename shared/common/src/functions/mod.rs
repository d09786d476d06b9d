use chrono::{NaiveDateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha512;

use crate::constants::PRICE_DECIMALS;

/// Bittrex timestamps carry a variable number of fractional digits and no offset.
pub const EXCHANGE_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

#[inline]
pub fn current_timestamp() -> i64 {
    Utc::now().timestamp()
}

pub fn parse_exchange_datetime(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, EXCHANGE_DATETIME_FORMAT).ok()
}

pub fn round_nth_decimal(num: f64, n: i32) -> f64 {
    let multiplier = 10.0_f64.powi(n);
    (num * multiplier).round() / multiplier
}

/// Rounds up onto the `10^-n` grid; the result is never below `num`.
pub fn round_up_nth_decimal(num: f64, n: i32) -> f64 {
    let multiplier = 10.0_f64.powi(n);
    let steps = (num * multiplier).ceil();
    let rounded = steps / multiplier;
    if rounded < num {
        (steps + 1.0) / multiplier
    } else {
        rounded
    }
}

/// Rounds an order quantity up to the exchange increment, so the value
/// sent never drops below the computed minimum.
#[inline]
pub fn round_quantity(quantity: f64) -> f64 {
    round_up_nth_decimal(quantity, PRICE_DECIMALS)
}

/// Rounds to the exchange price increment.
#[inline]
pub fn round_price(price: f64) -> f64 {
    round_nth_decimal(price, PRICE_DECIMALS)
}

/// Fixed-point rendering used both on the wire and in the cycle table, so
/// values never fall back to exponent notation.
#[inline]
pub fn format_price(value: f64) -> String {
    format!("{:.*}", PRICE_DECIMALS as usize, value)
}

/// Lowercase hex HMAC-SHA512 of `message` keyed with `api_secret`.
pub fn calculate_hmac(api_secret: &str, message: &str) -> String {
    // HMAC accepts keys of any length, so new_from_slice cannot fail here
    let mut mac = match Hmac::<Sha512>::new_from_slice(api_secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => unreachable!("HMAC takes keys of any size"),
    };

    mac.update(message.as_bytes());

    mac.finalize()
        .into_bytes()
        .iter()
        .map(|byte| format!("{:02x}", byte))
        .collect::<String>()
}
