use crate::enums::side::Side;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A historical fill of the market, as reported by `getmarkethistory`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub id: i64,
    pub price: f64,
    pub quantity: f64,
    pub total: f64,
    pub side: Side,
    pub fill_type: Option<String>,
    pub timestamp: Option<NaiveDateTime>,
}

impl TradeRecord {
    pub fn new(price: f64, side: Side) -> Self {
        TradeRecord {
            id: 0,
            price,
            quantity: 0.0,
            total: 0.0,
            side,
            fill_type: None,
            timestamp: None,
        }
    }
}
