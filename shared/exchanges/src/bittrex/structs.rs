use crate::shared::{
    deserializers::{null_as_zero, parse_datetime_option},
    serializers::f64_as_fixed_string,
};

use super::enums::BittrexOrderType;
use autotrader_error::AutotraderError;
use chrono::NaiveDateTime;
use common::{
    enums::{order_book_type::OrderBookType, side::Side},
    structs::{Order, Ticker, TradeRecord},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct BittrexHttpResponseWrapper {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub result: Value,
}

// Request payloads. Field order is the order parameters appear in the
// query string, which is also the string that gets signed.

#[derive(Debug, Serialize)]
pub struct EmptyParams {}

#[derive(Debug, Serialize)]
pub struct MarketParams<'a> {
    pub market: &'a str,
}

#[derive(Debug, Serialize)]
pub struct CurrencyParams<'a> {
    pub currency: &'a str,
}

#[derive(Debug, Serialize)]
pub struct UuidParams<'a> {
    pub uuid: &'a str,
}

#[derive(Debug, Serialize)]
pub struct OrderBookParams<'a> {
    pub market: &'a str,
    #[serde(rename = "type")]
    pub book_type: OrderBookType,
}

#[derive(Debug, Serialize)]
pub struct LimitOrderParams<'a> {
    pub market: &'a str,
    #[serde(serialize_with = "f64_as_fixed_string")]
    pub quantity: f64,
    #[serde(serialize_with = "f64_as_fixed_string")]
    pub rate: f64,
}

#[derive(Debug, Serialize)]
pub struct WithdrawParams<'a> {
    pub currency: &'a str,
    #[serde(serialize_with = "f64_as_fixed_string")]
    pub quantity: f64,
    pub address: &'a str,
    #[serde(rename = "paymentid", skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<&'a str>,
}

// Response payloads

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MarketData {
    pub market_currency: String,
    pub base_currency: String,
    pub market_currency_long: Option<String>,
    pub base_currency_long: Option<String>,
    #[serde(deserialize_with = "null_as_zero", default)]
    pub min_trade_size: f64,
    pub market_name: String,
    pub is_active: bool,
    #[serde(deserialize_with = "parse_datetime_option", default)]
    pub created: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CurrencyData {
    pub currency: String,
    pub currency_long: Option<String>,
    pub min_confirmation: Option<i64>,
    #[serde(deserialize_with = "null_as_zero", default)]
    pub tx_fee: f64,
    pub is_active: bool,
    pub coin_type: Option<String>,
    pub base_address: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TickerData {
    #[serde(deserialize_with = "null_as_zero", default)]
    pub bid: f64,
    #[serde(deserialize_with = "null_as_zero", default)]
    pub ask: f64,
    #[serde(deserialize_with = "null_as_zero", default)]
    pub last: f64,
}

impl From<TickerData> for Ticker {
    fn from(value: TickerData) -> Self {
        Ticker::new(value.bid, value.ask, value.last)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MarketSummaryData {
    pub market_name: String,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub volume: Option<f64>,
    pub last: Option<f64>,
    pub base_volume: Option<f64>,
    #[serde(deserialize_with = "parse_datetime_option", default)]
    pub time_stamp: Option<NaiveDateTime>,
    pub bid: Option<f64>,
    pub ask: Option<f64>,
    pub open_buy_orders: Option<i64>,
    pub open_sell_orders: Option<i64>,
    pub prev_day: Option<f64>,
    #[serde(deserialize_with = "parse_datetime_option", default)]
    pub created: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MarketHistoryData {
    pub id: i64,
    #[serde(deserialize_with = "parse_datetime_option", default)]
    pub time_stamp: Option<NaiveDateTime>,
    #[serde(deserialize_with = "null_as_zero", default)]
    pub quantity: f64,
    pub price: f64,
    #[serde(deserialize_with = "null_as_zero", default)]
    pub total: f64,
    pub fill_type: Option<String>,
    pub order_type: Side,
}

impl From<MarketHistoryData> for TradeRecord {
    fn from(value: MarketHistoryData) -> Self {
        TradeRecord {
            id: value.id,
            price: value.price,
            quantity: value.quantity,
            total: value.total,
            side: value.order_type,
            fill_type: value.fill_type,
            timestamp: value.time_stamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OrderBookEntry {
    pub quantity: f64,
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct OrderBook {
    #[serde(default)]
    pub buy: Vec<OrderBookEntry>,
    #[serde(default)]
    pub sell: Vec<OrderBookEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UuidResponse {
    pub uuid: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OpenOrderData {
    pub uuid: Option<String>,
    pub order_uuid: String,
    pub exchange: String,
    pub order_type: BittrexOrderType,
    pub quantity: f64,
    #[serde(deserialize_with = "null_as_zero", default)]
    pub quantity_remaining: f64,
    #[serde(deserialize_with = "null_as_zero", default)]
    pub limit: f64,
    pub commission_paid: Option<f64>,
    pub price: Option<f64>,
    pub price_per_unit: Option<f64>,
    #[serde(deserialize_with = "parse_datetime_option", default)]
    pub opened: Option<NaiveDateTime>,
    #[serde(deserialize_with = "parse_datetime_option", default)]
    pub closed: Option<NaiveDateTime>,
    #[serde(default)]
    pub cancel_initiated: bool,
    #[serde(default)]
    pub immediate_or_cancel: bool,
    #[serde(default)]
    pub is_conditional: bool,
    pub condition: Option<String>,
    pub condition_target: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BalanceData {
    pub currency: String,
    #[serde(deserialize_with = "null_as_zero", default)]
    pub balance: f64,
    #[serde(deserialize_with = "null_as_zero", default)]
    pub available: f64,
    #[serde(deserialize_with = "null_as_zero", default)]
    pub pending: f64,
    pub crypto_address: Option<String>,
    pub requested: Option<bool>,
    pub uuid: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DepositAddressData {
    pub currency: String,
    pub address: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OrderData {
    pub account_id: Option<String>,
    pub order_uuid: String,
    pub exchange: String,
    #[serde(rename = "Type")]
    pub order_type: BittrexOrderType,
    pub quantity: f64,
    #[serde(deserialize_with = "null_as_zero", default)]
    pub quantity_remaining: f64,
    #[serde(deserialize_with = "null_as_zero", default)]
    pub limit: f64,
    pub reserved: Option<f64>,
    pub reserve_remaining: Option<f64>,
    pub commission_reserved: Option<f64>,
    pub commission_reserve_remaining: Option<f64>,
    pub commission_paid: Option<f64>,
    pub price: Option<f64>,
    pub price_per_unit: Option<f64>,
    #[serde(deserialize_with = "parse_datetime_option", default)]
    pub opened: Option<NaiveDateTime>,
    #[serde(deserialize_with = "parse_datetime_option", default)]
    pub closed: Option<NaiveDateTime>,
    pub is_open: bool,
    pub sentinel: Option<String>,
    #[serde(default)]
    pub cancel_initiated: bool,
    #[serde(default)]
    pub immediate_or_cancel: bool,
    #[serde(default)]
    pub is_conditional: bool,
    pub condition: Option<String>,
    pub condition_target: Option<f64>,
}

impl From<OrderData> for Order {
    fn from(value: OrderData) -> Self {
        Order::new(
            value.order_uuid,
            value.exchange,
            value.order_type.side(),
            value.quantity,
            value.quantity_remaining,
            value.limit,
            value.is_open,
            value.opened,
            value.closed,
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OrderHistoryData {
    pub order_uuid: String,
    pub exchange: String,
    #[serde(deserialize_with = "parse_datetime_option", default)]
    pub time_stamp: Option<NaiveDateTime>,
    pub order_type: BittrexOrderType,
    #[serde(deserialize_with = "null_as_zero", default)]
    pub limit: f64,
    pub quantity: f64,
    #[serde(deserialize_with = "null_as_zero", default)]
    pub quantity_remaining: f64,
    pub commission: Option<f64>,
    pub price: Option<f64>,
    pub price_per_unit: Option<f64>,
    #[serde(default)]
    pub is_conditional: bool,
    pub condition: Option<String>,
    pub condition_target: Option<f64>,
    #[serde(default)]
    pub immediate_or_cancel: bool,
}

/// One entry of the deposit or withdrawal history.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransferData {
    pub id: Option<i64>,
    pub payment_uuid: Option<String>,
    pub currency: String,
    pub amount: f64,
    pub address: Option<String>,
    #[serde(deserialize_with = "parse_datetime_option", default)]
    pub opened: Option<NaiveDateTime>,
    #[serde(deserialize_with = "parse_datetime_option", default)]
    pub last_updated: Option<NaiveDateTime>,
    pub confirmations: Option<i64>,
    pub authorized: Option<bool>,
    pub pending_payment: Option<bool>,
    pub tx_cost: Option<f64>,
    pub tx_id: Option<String>,
    pub canceled: Option<bool>,
    pub invalid_address: Option<bool>,
}

impl BittrexHttpResponseWrapper {
    /// Unwraps the envelope; `success: false` is reported as a remote
    /// rejection carrying the exchange's own message.
    pub fn into_result<T: serde::de::DeserializeOwned>(self) -> Result<T, AutotraderError> {
        if !self.success {
            return Err(AutotraderError::new_remote_rejection(self.message));
        }
        Ok(serde_json::from_value(self.result)?)
    }
}
