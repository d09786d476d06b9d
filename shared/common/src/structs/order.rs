use crate::enums::side::Side;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Snapshot of an order as last reported by the exchange. Never mutated
/// locally; every poll produces a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub uuid: String,
    pub market: String,
    pub side: Side,
    pub quantity: f64,
    pub quantity_remaining: f64,
    pub limit_price: f64,
    pub is_open: bool,
    pub opened_at: Option<NaiveDateTime>,
    pub closed_at: Option<NaiveDateTime>,
}

impl Order {
    pub fn new(
        uuid: String,
        market: String,
        side: Side,
        quantity: f64,
        quantity_remaining: f64,
        limit_price: f64,
        is_open: bool,
        opened_at: Option<NaiveDateTime>,
        closed_at: Option<NaiveDateTime>,
    ) -> Self {
        Order {
            uuid,
            market,
            side,
            quantity,
            quantity_remaining,
            limit_price,
            is_open,
            opened_at,
            closed_at,
        }
    }

    pub fn get_filled_quantity(&self) -> f64 {
        self.quantity - self.quantity_remaining
    }
}
