use super::{Market, PriceStatistics};
use crate::enums::side::Side;

/// What one trading cycle looked at and decided.
#[derive(Clone, Debug, PartialEq)]
pub struct CycleReport {
    pub side: Side,
    pub market: Market,
    pub statistics: PriceStatistics,
    /// Ticker bid for a BUY, ticker ask for a SELL.
    pub reference_price: f64,
    pub limit_price: f64,
    pub quantity: f64,
    pub order_uuid: String,
}
