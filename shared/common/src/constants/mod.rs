/// Smallest order value the exchange accepts, in units of the quote currency
/// (50k satoshi when quoting in BTC).
pub const MINIMUM_ORDER_NOTIONAL: f64 = 0.0005;

/// Exchange price increment, 1e-8.
pub const PRICE_DECIMALS: i32 = 8;

pub const DEFAULT_POLL_INTERVAL_IN_SECS: u64 = 30;

pub const MARKET_SEPARATOR: char = '-';
pub const SPREAD_SEPARATOR: char = '/';
