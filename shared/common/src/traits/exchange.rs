use crate::{
    enums::side::Side,
    structs::{Market, Order, Ticker, TradeRecord},
};
use autotrader_error::AutotraderError;
use std::future::Future;

/// The slice of an exchange the trading loop depends on.
pub trait TraderExchange {
    fn fetch_market_history(
        &self,
        market: &Market,
    ) -> impl Future<Output = Result<Vec<TradeRecord>, AutotraderError>> + Send;

    fn fetch_ticker(
        &self,
        market: &Market,
    ) -> impl Future<Output = Result<Ticker, AutotraderError>> + Send;

    /// Places a limit order and returns the exchange-assigned uuid.
    fn open_limit_order(
        &self,
        market: &Market,
        side: Side,
        quantity: f64,
        rate: f64,
    ) -> impl Future<Output = Result<String, AutotraderError>> + Send;

    fn fetch_order(
        &self,
        uuid: &str,
    ) -> impl Future<Output = Result<Order, AutotraderError>> + Send;
}
