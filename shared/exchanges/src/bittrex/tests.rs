use super::*;
use serde_json::json;
use std::time::Duration;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

fn exchange_for(server: &MockServer) -> BittrexExchange {
    let mut config = ExchangeConfig::new(
        ApiCredentials::new("test-key", "test-secret"),
        ApiEndpoints::new(&server.uri()).unwrap(),
    );
    config.retry_attempts = 2;
    config.retry_backoff = Duration::from_millis(1);
    BittrexExchange::new(config).unwrap()
}

fn market() -> Market {
    "BTC-LTC".parse().unwrap()
}

fn success(result: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "success": true,
        "message": "",
        "result": result
    }))
}

#[tokio::test]
async fn test_public_request_is_not_signed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/public/getticker"))
        .and(query_param("market", "BTC-LTC"))
        .respond_with(success(json!({"Bid": 0.05, "Ask": 0.051, "Last": 0.0505})))
        .expect(1)
        .mount(&server)
        .await;

    let exchange = exchange_for(&server);
    let ticker = exchange.fetch_ticker(&market()).await.unwrap();
    assert_eq!(ticker, Ticker::new(0.05, 0.051, 0.0505));

    let requests = server.received_requests().await.unwrap();
    let request = &requests[0];
    assert!(request.headers.get(API_SIGN_HEADER).is_none());
    assert!(!request.url.query().unwrap_or_default().contains("apikey"));
    assert!(!request.url.query().unwrap_or_default().contains("nonce"));
}

#[tokio::test]
async fn test_signed_request_carries_key_nonce_and_signature_over_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/account/getorder"))
        .and(query_param("uuid", "order-1"))
        .and(query_param("apikey", "test-key"))
        .respond_with(success(json!({
            "OrderUuid": "order-1",
            "Exchange": "BTC-LTC",
            "Type": "LIMIT_SELL",
            "Quantity": 10.0,
            "QuantityRemaining": 0.0,
            "Limit": 0.05202,
            "Opened": "2017-06-01T10:00:00.123",
            "Closed": "2017-06-01T10:05:00",
            "IsOpen": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let exchange = exchange_for(&server);
    let order = exchange.fetch_order("order-1").await.unwrap();
    assert_eq!(order.uuid, "order-1");
    assert_eq!(order.side, Side::Sell);
    assert!(!order.is_open);
    assert_eq!(order.get_filled_quantity(), 10.0);

    let requests = server.received_requests().await.unwrap();
    let request = &requests[0];
    let query = request.url.query().unwrap();
    assert!(query.starts_with("uuid=order-1&apikey=test-key&nonce="));

    let sent_url = format!("{}{}?{}", server.uri(), request.url.path(), query);
    let signature = request
        .headers
        .get(API_SIGN_HEADER)
        .unwrap()
        .to_str()
        .unwrap();
    assert_eq!(signature, calculate_hmac("test-secret", &sent_url));
}

#[tokio::test]
async fn test_limit_orders_hit_side_specific_methods() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/market/buylimit"))
        .and(query_param("quantity", "12.00000000"))
        .and(query_param("rate", "0.04950000"))
        .respond_with(success(json!({"uuid": "buy-uuid"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/market/selllimit"))
        .respond_with(success(json!({"uuid": "sell-uuid"})))
        .expect(1)
        .mount(&server)
        .await;

    let exchange = exchange_for(&server);
    let buy = exchange
        .open_limit_order(&market(), Side::Buy, 12.0, 0.0495)
        .await
        .unwrap();
    let sell = exchange
        .open_limit_order(&market(), Side::Sell, 12.0, 0.05202)
        .await
        .unwrap();
    assert_eq!(buy, "buy-uuid");
    assert_eq!(sell, "sell-uuid");
}

#[tokio::test]
async fn test_unsuccessful_envelope_is_a_remote_rejection_and_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/market/buylimit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "INSUFFICIENT_FUNDS",
            "result": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let exchange = exchange_for(&server);
    let error = exchange
        .open_limit_order(&market(), Side::Buy, 1.0, 0.05)
        .await
        .unwrap_err();
    assert!(error.is_remote_rejection());
    assert_eq!(error.description, "INSUFFICIENT_FUNDS");
}

#[tokio::test]
async fn test_server_errors_are_retried_then_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/public/getmarkethistory"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let exchange = exchange_for(&server);
    let error = exchange.fetch_market_history(&market()).await.unwrap_err();
    assert!(error.is_retryable());
}

#[tokio::test]
async fn test_order_book_both_sides() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/public/getorderbook"))
        .and(query_param("type", "both"))
        .respond_with(success(json!({
            "buy": [{"Quantity": 12.37, "Rate": 0.02525}],
            "sell": [{"Quantity": 32.55, "Rate": 0.02540}, {"Quantity": 1.0, "Rate": 0.0255}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/public/getorderbook"))
        .and(query_param("type", "sell"))
        .respond_with(success(json!([{"Quantity": 32.55, "Rate": 0.02540}])))
        .mount(&server)
        .await;

    let exchange = exchange_for(&server);
    let book = exchange
        .get_order_book(&market(), OrderBookType::Both)
        .await
        .unwrap();
    assert_eq!(book.buy.len(), 1);
    assert_eq!(book.sell.len(), 2);

    let book = exchange
        .get_order_book(&market(), OrderBookType::Sell)
        .await
        .unwrap();
    assert!(book.buy.is_empty());
    assert_eq!(book.sell[0].rate, 0.0254);
}

#[tokio::test]
async fn test_account_methods_parse_typed_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/account/getbalance"))
        .and(query_param("currency", "BTC"))
        .respond_with(success(json!({
            "Currency": "BTC",
            "Balance": 4.21549076,
            "Available": 4.21549076,
            "Pending": 0.0,
            "CryptoAddress": "1MacMr6715hjds342dXuLqXcju6fgwHA31",
            "Requested": false,
            "Uuid": null
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/market/cancel"))
        .and(query_param("uuid", "order-1"))
        .respond_with(success(serde_json::Value::Null))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/account/getwithdrawalhistory"))
        .respond_with(success(json!([{
            "PaymentUuid": "b52c7a5c-90c6-4c6e-835c-e16df12708b1",
            "Currency": "BTC",
            "Amount": 17.0,
            "Address": "1DeaaFBdbB5nrHj87x3NHS4onvw1GPNyAu",
            "Opened": "2014-07-09T04:24:47.217",
            "Authorized": true,
            "PendingPayment": false,
            "TxCost": 0.0002,
            "TxId": null,
            "Canceled": true,
            "InvalidAddress": false
        }])))
        .mount(&server)
        .await;

    let exchange = exchange_for(&server);
    let balance = exchange.get_balance("BTC").await.unwrap();
    assert_eq!(balance.available, 4.21549076);
    assert!(exchange.cancel("order-1").await.is_ok());
    let withdrawals = exchange.get_withdrawal_history("BTC").await.unwrap();
    assert_eq!(withdrawals[0].amount, 17.0);
    assert_eq!(withdrawals[0].canceled, Some(true));
}

#[test]
fn test_build_request_url_for_public_method_without_params() {
    let mut config = ExchangeConfig::new(
        ApiCredentials::new("key", "secret"),
        ApiEndpoints::new("https://bittrex.com/api/v1.1/").unwrap(),
    );
    config.retry_attempts = 0;
    let exchange = BittrexExchange::new(config).unwrap();
    let url = exchange
        .build_request_url(BittrexEndpoint::Markets, &EmptyParams {})
        .unwrap();
    assert_eq!(url, "https://bittrex.com/api/v1.1/public/getmarkets?");
}

#[test]
fn test_build_request_url_for_signed_method_without_params() {
    let config = ExchangeConfig::new(
        ApiCredentials::new("key", "secret"),
        ApiEndpoints::new("https://bittrex.com/api/v1.1/").unwrap(),
    );
    let exchange = BittrexExchange::new(config).unwrap();
    let url = exchange
        .build_request_url(BittrexEndpoint::Balances, &EmptyParams {})
        .unwrap();
    assert!(url.starts_with("https://bittrex.com/api/v1.1/account/getbalances?apikey=key&nonce="));
}

#[test]
fn test_nonces_strictly_increase() {
    let config = ExchangeConfig::new(
        ApiCredentials::new("key", "secret"),
        ApiEndpoints::new("https://bittrex.com/api/v1.1/").unwrap(),
    );
    let exchange = BittrexExchange::new(config).unwrap();
    let first = exchange.next_nonce();
    let second = exchange.next_nonce();
    let third = exchange.clone().next_nonce();
    assert!(first >= current_timestamp() - 1);
    assert!(second > first);
    assert!(third > second);
}

#[tokio::test]
async fn test_withdraw_rejects_non_positive_quantity_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/account/withdraw"))
        .respond_with(success(json!({"uuid": "withdrawal"})))
        .expect(0)
        .mount(&server)
        .await;

    let exchange = exchange_for(&server);
    let error = exchange
        .withdraw("BTC", 0.0, "1Addr", None)
        .await
        .unwrap_err();
    assert_eq!(error.kind, autotrader_error::ErrorKind::Assert);
}

#[tokio::test]
async fn test_timed_out_limit_order_is_sent_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/market/buylimit"))
        .respond_with(
            success(json!({"uuid": "late-uuid"})).set_delay(Duration::from_millis(400)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut config = ExchangeConfig::new(
        ApiCredentials::new("test-key", "test-secret"),
        ApiEndpoints::new(&server.uri()).unwrap(),
    );
    config.retry_attempts = 2;
    config.retry_backoff = Duration::from_millis(1);
    config.request_timeout = Duration::from_millis(100);
    let exchange = BittrexExchange::new(config).unwrap();

    let error = exchange
        .open_limit_order(&market(), Side::Buy, 1.0, 0.05)
        .await
        .unwrap_err();
    assert!(error.is_retryable());

    // let the delayed response land before wiremock verifies on drop
    sleep(Duration::from_millis(400)).await;
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn test_server_error_on_order_placement_and_cancel_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/market/selllimit"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/market/cancel"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let exchange = exchange_for(&server);
    let error = exchange
        .open_limit_order(&market(), Side::Sell, 1.0, 0.052)
        .await
        .unwrap_err();
    assert_eq!(error.kind, autotrader_error::ErrorKind::Network);
    assert!(exchange.cancel("order-1").await.is_err());
}

#[tokio::test]
async fn test_server_error_on_order_lookup_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/account/getorder"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let exchange = exchange_for(&server);
    assert!(exchange.fetch_order("order-1").await.is_err());
}
