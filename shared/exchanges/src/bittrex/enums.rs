use common::enums::side::Side;
use serde::{Deserialize, Serialize};

/// Every REST method the client knows about. Paths are relative to the
/// configured base endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BittrexEndpoint {
    Markets,
    Currencies,
    Ticker,
    MarketSummaries,
    MarketSummary,
    MarketHistory,
    OrderBook,
    BuyLimit,
    SellLimit,
    Cancel,
    OpenOrders,
    Balances,
    Balance,
    DepositAddress,
    Withdraw,
    Order,
    OrderHistory,
    DepositHistory,
    WithdrawalHistory,
}

impl BittrexEndpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Markets => "public/getmarkets",
            Self::Currencies => "public/getcurrencies",
            Self::Ticker => "public/getticker",
            Self::MarketSummaries => "public/getmarketsummaries",
            Self::MarketSummary => "public/getmarketsummary",
            Self::MarketHistory => "public/getmarkethistory",
            Self::OrderBook => "public/getorderbook",
            Self::BuyLimit => "market/buylimit",
            Self::SellLimit => "market/selllimit",
            Self::Cancel => "market/cancel",
            Self::OpenOrders => "market/getopenorders",
            Self::Balances => "account/getbalances",
            Self::Balance => "account/getbalance",
            Self::DepositAddress => "account/getdepositaddress",
            Self::Withdraw => "account/withdraw",
            Self::Order => "account/getorder",
            Self::OrderHistory => "account/getorderhistory",
            Self::DepositHistory => "account/getdeposithistory",
            Self::WithdrawalHistory => "account/getwithdrawalhistory",
        }
    }

    /// Market and account methods require `apikey`, `nonce` and `apisign`.
    pub fn is_signed(&self) -> bool {
        !matches!(
            self,
            Self::Markets
                | Self::Currencies
                | Self::Ticker
                | Self::MarketSummaries
                | Self::MarketSummary
                | Self::MarketHistory
                | Self::OrderBook
        )
    }

    /// Reads that can be repeated without side effects. Order placement,
    /// cancel and withdraw are sent at most once.
    pub fn is_idempotent(&self) -> bool {
        !matches!(
            self,
            Self::BuyLimit | Self::SellLimit | Self::Cancel | Self::Withdraw
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BittrexOrderType {
    LimitBuy,
    LimitSell,
    MarketBuy,
    MarketSell,
}

impl BittrexOrderType {
    pub fn side(&self) -> Side {
        match self {
            Self::LimitBuy | Self::MarketBuy => Side::Buy,
            Self::LimitSell | Self::MarketSell => Side::Sell,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_public_methods_are_unsigned() {
        assert!(!BittrexEndpoint::Ticker.is_signed());
        assert!(!BittrexEndpoint::OrderBook.is_signed());
        assert!(BittrexEndpoint::BuyLimit.is_signed());
        assert!(BittrexEndpoint::Order.is_signed());
        assert!(BittrexEndpoint::WithdrawalHistory.is_signed());
    }

    #[test]
    fn test_only_reads_are_idempotent() {
        for endpoint in [
            BittrexEndpoint::BuyLimit,
            BittrexEndpoint::SellLimit,
            BittrexEndpoint::Cancel,
            BittrexEndpoint::Withdraw,
        ] {
            assert!(!endpoint.is_idempotent(), "{:?}", endpoint);
        }
        for endpoint in [
            BittrexEndpoint::Ticker,
            BittrexEndpoint::MarketHistory,
            BittrexEndpoint::Order,
            BittrexEndpoint::OpenOrders,
            BittrexEndpoint::Balance,
            BittrexEndpoint::WithdrawalHistory,
        ] {
            assert!(endpoint.is_idempotent(), "{:?}", endpoint);
        }
    }

    #[test]
    fn test_order_type_maps_to_side() {
        let order_type: BittrexOrderType = serde_json::from_str("\"LIMIT_SELL\"").unwrap();
        assert_eq!(order_type, BittrexOrderType::LimitSell);
        assert_eq!(order_type.side(), Side::Sell);
        assert_eq!(BittrexOrderType::LimitBuy.side(), Side::Buy);
    }
}
