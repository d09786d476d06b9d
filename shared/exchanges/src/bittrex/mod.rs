pub mod enums;
pub mod functions;
pub mod structs;
#[cfg(test)]
mod tests;

use self::enums::BittrexEndpoint;
use self::functions::redact_api_key;
use self::structs::{
    BalanceData, BittrexHttpResponseWrapper, CurrencyData, CurrencyParams, DepositAddressData,
    EmptyParams, LimitOrderParams, MarketData, MarketHistoryData, MarketParams,
    MarketSummaryData, OpenOrderData, OrderBook, OrderBookEntry, OrderBookParams, OrderData,
    OrderHistoryData, TickerData, TransferData, UuidParams, UuidResponse, WithdrawParams,
};
use crate::{
    config::API_SIGN_HEADER,
    structs::{ApiCredentials, ApiEndpoints, ExchangeConfig},
};
use autotrader_error::{assert_or_error, AutotraderError};
use common::{
    enums::{order_book_type::OrderBookType, side::Side},
    functions::{calculate_hmac, current_timestamp},
    structs::{Market, Order, Ticker, TradeRecord},
    traits::exchange::TraderExchange,
};
use log::{debug, warn};
use reqwest::{
    header::{self, HeaderMap, HeaderValue},
    Client, Error, Response,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::from_str;
use serde_urlencoded::to_string as to_url_string;
use std::{
    sync::{
        atomic::{AtomicI64, Ordering},
        Arc,
    },
    time::Duration,
};
use tokio::time::sleep;

#[derive(Clone)]
pub struct BittrexExchange {
    credentials: ApiCredentials,
    endpoints: ApiEndpoints,
    http: Client,
    last_nonce: Arc<AtomicI64>,
    pub name: &'static str,
    retry_attempts: u32,
    retry_backoff: Duration,
}

impl BittrexExchange {
    pub fn new(config: ExchangeConfig) -> Result<Self, AutotraderError> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            credentials: config.credentials,
            endpoints: config.endpoints,
            http,
            last_nonce: Arc::new(AtomicI64::new(0)),
            name: "Bittrex",
            retry_attempts: config.retry_attempts,
            retry_backoff: config.retry_backoff,
        })
    }

    pub fn get_base_url(&self) -> &str {
        &self.endpoints.http
    }

    /// Unix seconds, bumped past the previous nonce when two signed calls
    /// land in the same second.
    pub fn next_nonce(&self) -> i64 {
        let now = current_timestamp();
        let previous = self
            .last_nonce
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        now.max(previous + 1)
    }

    /// Full request url: base + method path + `?` + query. For signed
    /// methods `apikey` and `nonce` are appended after the method params.
    /// The returned string is exactly what is both sent and signed.
    pub fn build_request_url<P: Serialize>(
        &self,
        endpoint: BittrexEndpoint,
        params: &P,
    ) -> Result<String, AutotraderError> {
        let mut query_string = to_url_string(params)?;

        if endpoint.is_signed() {
            let nonce = self.next_nonce().to_string();
            let auth_params = vec![
                ("apikey", self.credentials.key.as_str()),
                ("nonce", nonce.as_str()),
            ];
            let auth_query_string = to_url_string(&auth_params)?;
            if !query_string.is_empty() {
                query_string.push('&');
            }
            query_string.push_str(&auth_query_string);
        }

        Ok(format!(
            "{}{}?{}",
            self.endpoints.http,
            endpoint.path(),
            query_string
        ))
    }

    async fn try_parse_response(
        result: Result<Response, Error>,
    ) -> Result<BittrexHttpResponseWrapper, AutotraderError> {
        let response = result.map_err(AutotraderError::from)?;

        let status = response.status();
        if status.is_server_error() {
            let description = format!("try_parse_response -> server error {}", status);
            return Err(AutotraderError::new_network(description));
        }
        if !status.is_success() {
            let description = format!("try_parse_response -> unsuccessful response {}", status);
            return Err(AutotraderError::new_unsuccessful_response(description));
        }

        let response_text = response.text().await?;
        let parsed_response = from_str::<BittrexHttpResponseWrapper>(&response_text)?;
        Ok(parsed_response)
    }

    async fn send_once<P: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: BittrexEndpoint,
        params: &P,
    ) -> Result<T, AutotraderError> {
        let url = self.build_request_url(endpoint, params)?;
        debug!("GET {}", redact_api_key(&url));

        let mut request_builder = self.http.get(&url);
        if endpoint.is_signed() {
            let signature = calculate_hmac(&self.credentials.secret, &url);
            request_builder = request_builder.header(API_SIGN_HEADER, signature);
        }

        let result = request_builder.send().await;
        let wrapper = Self::try_parse_response(result).await?;
        wrapper.into_result()
    }

    /// Sends one request. Idempotent reads are repeated when no envelope
    /// came back; each attempt is rebuilt, so signed calls carry a fresh
    /// nonce. Order placement, cancel and withdraw are never repeated.
    async fn send_request<P: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: BittrexEndpoint,
        params: &P,
    ) -> Result<T, AutotraderError> {
        let mut attempt: u32 = 0;
        loop {
            match self.send_once(endpoint, params).await {
                Ok(result) => return Ok(result),
                Err(error)
                    if endpoint.is_idempotent()
                        && error.is_retryable()
                        && attempt < self.retry_attempts =>
                {
                    attempt += 1;
                    let backoff = self.retry_backoff * attempt;
                    warn!(
                        "{} {} failed ({}), retry {}/{} in {:?}",
                        self.name,
                        endpoint.path(),
                        error,
                        attempt,
                        self.retry_attempts,
                        backoff
                    );
                    sleep(backoff).await;
                }
                Err(error) => return Err(error),
            }
        }
    }

    // Public methods

    pub async fn get_markets(&self) -> Result<Vec<MarketData>, AutotraderError> {
        self.send_request(BittrexEndpoint::Markets, &EmptyParams {})
            .await
    }

    pub async fn get_currencies(&self) -> Result<Vec<CurrencyData>, AutotraderError> {
        self.send_request(BittrexEndpoint::Currencies, &EmptyParams {})
            .await
    }

    pub async fn get_ticker(&self, market: &Market) -> Result<TickerData, AutotraderError> {
        let market = market.name();
        let payload = MarketParams { market: &market };
        self.send_request(BittrexEndpoint::Ticker, &payload).await
    }

    pub async fn get_market_summaries(&self) -> Result<Vec<MarketSummaryData>, AutotraderError> {
        self.send_request(BittrexEndpoint::MarketSummaries, &EmptyParams {})
            .await
    }

    pub async fn get_market_summary(
        &self,
        market: &Market,
    ) -> Result<MarketSummaryData, AutotraderError> {
        let market = market.name();
        let payload = MarketParams { market: &market };
        let summaries: Vec<MarketSummaryData> = self
            .send_request(BittrexEndpoint::MarketSummary, &payload)
            .await?;
        summaries.into_iter().next().ok_or_else(|| {
            AutotraderError::new_unsuccessful_response(format!(
                "get_market_summary -> empty summary for {}",
                market
            ))
        })
    }

    pub async fn get_market_history(
        &self,
        market: &Market,
    ) -> Result<Vec<MarketHistoryData>, AutotraderError> {
        let market = market.name();
        let payload = MarketParams { market: &market };
        self.send_request(BittrexEndpoint::MarketHistory, &payload)
            .await
    }

    /// One-sided requests come back as a bare list; `both` as `{buy, sell}`.
    pub async fn get_order_book(
        &self,
        market: &Market,
        book_type: OrderBookType,
    ) -> Result<OrderBook, AutotraderError> {
        let market = market.name();
        let payload = OrderBookParams {
            market: &market,
            book_type,
        };
        match book_type {
            OrderBookType::Both => self.send_request(BittrexEndpoint::OrderBook, &payload).await,
            OrderBookType::Buy => {
                let buy: Vec<OrderBookEntry> = self
                    .send_request(BittrexEndpoint::OrderBook, &payload)
                    .await?;
                Ok(OrderBook {
                    buy,
                    sell: vec![],
                })
            }
            OrderBookType::Sell => {
                let sell: Vec<OrderBookEntry> = self
                    .send_request(BittrexEndpoint::OrderBook, &payload)
                    .await?;
                Ok(OrderBook {
                    buy: vec![],
                    sell,
                })
            }
        }
    }

    // Market methods

    pub async fn buy_limit(
        &self,
        market: &Market,
        quantity: f64,
        rate: f64,
    ) -> Result<UuidResponse, AutotraderError> {
        let market = market.name();
        let payload = LimitOrderParams {
            market: &market,
            quantity,
            rate,
        };
        self.send_request(BittrexEndpoint::BuyLimit, &payload).await
    }

    pub async fn sell_limit(
        &self,
        market: &Market,
        quantity: f64,
        rate: f64,
    ) -> Result<UuidResponse, AutotraderError> {
        let market = market.name();
        let payload = LimitOrderParams {
            market: &market,
            quantity,
            rate,
        };
        self.send_request(BittrexEndpoint::SellLimit, &payload)
            .await
    }

    pub async fn cancel(&self, uuid: &str) -> Result<(), AutotraderError> {
        let payload = UuidParams { uuid };
        self.send_request(BittrexEndpoint::Cancel, &payload).await
    }

    pub async fn get_open_orders(
        &self,
        market: &Market,
    ) -> Result<Vec<OpenOrderData>, AutotraderError> {
        let market = market.name();
        let payload = MarketParams { market: &market };
        self.send_request(BittrexEndpoint::OpenOrders, &payload)
            .await
    }

    // Account methods

    pub async fn get_balances(&self) -> Result<Vec<BalanceData>, AutotraderError> {
        self.send_request(BittrexEndpoint::Balances, &EmptyParams {})
            .await
    }

    pub async fn get_balance(&self, currency: &str) -> Result<BalanceData, AutotraderError> {
        let payload = CurrencyParams { currency };
        self.send_request(BittrexEndpoint::Balance, &payload).await
    }

    pub async fn get_deposit_address(
        &self,
        currency: &str,
    ) -> Result<DepositAddressData, AutotraderError> {
        let payload = CurrencyParams { currency };
        self.send_request(BittrexEndpoint::DepositAddress, &payload)
            .await
    }

    pub async fn withdraw(
        &self,
        currency: &str,
        quantity: f64,
        address: &str,
        payment_id: Option<&str>,
    ) -> Result<UuidResponse, AutotraderError> {
        assert_or_error!(quantity > 0.0);
        let payload = WithdrawParams {
            currency,
            quantity,
            address,
            payment_id,
        };
        self.send_request(BittrexEndpoint::Withdraw, &payload).await
    }

    pub async fn get_order(&self, uuid: &str) -> Result<OrderData, AutotraderError> {
        let payload = UuidParams { uuid };
        self.send_request(BittrexEndpoint::Order, &payload).await
    }

    pub async fn get_order_history(
        &self,
        market: &Market,
    ) -> Result<Vec<OrderHistoryData>, AutotraderError> {
        let market = market.name();
        let payload = MarketParams { market: &market };
        self.send_request(BittrexEndpoint::OrderHistory, &payload)
            .await
    }

    pub async fn get_deposit_history(
        &self,
        currency: &str,
    ) -> Result<Vec<TransferData>, AutotraderError> {
        let payload = CurrencyParams { currency };
        self.send_request(BittrexEndpoint::DepositHistory, &payload)
            .await
    }

    pub async fn get_withdrawal_history(
        &self,
        currency: &str,
    ) -> Result<Vec<TransferData>, AutotraderError> {
        let payload = CurrencyParams { currency };
        self.send_request(BittrexEndpoint::WithdrawalHistory, &payload)
            .await
    }
}

impl TraderExchange for BittrexExchange {
    async fn fetch_market_history(
        &self,
        market: &Market,
    ) -> Result<Vec<TradeRecord>, AutotraderError> {
        let history = self.get_market_history(market).await?;
        Ok(history.into_iter().map(TradeRecord::from).collect())
    }

    async fn fetch_ticker(&self, market: &Market) -> Result<Ticker, AutotraderError> {
        Ok(self.get_ticker(market).await?.into())
    }

    async fn open_limit_order(
        &self,
        market: &Market,
        side: Side,
        quantity: f64,
        rate: f64,
    ) -> Result<String, AutotraderError> {
        let response = match side {
            Side::Buy => self.buy_limit(market, quantity, rate).await?,
            Side::Sell => self.sell_limit(market, quantity, rate).await?,
        };
        Ok(response.uuid)
    }

    async fn fetch_order(&self, uuid: &str) -> Result<Order, AutotraderError> {
        Ok(self.get_order(uuid).await?.into())
    }
}
