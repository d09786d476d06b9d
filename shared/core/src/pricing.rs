use autotrader_error::AutotraderError;
use common::{
    constants::MINIMUM_ORDER_NOTIONAL,
    enums::side::Side,
    functions::{round_price, round_quantity},
    structs::{Spread, Ticker},
};

/// Units to trade: the configured share size, raised when needed so the
/// order value at `ticker.last` clears the exchange minimum. Rounded up to
/// the 8-decimal wire increment.
pub fn calculate_order_quantity(shares: f64, ticker: &Ticker) -> Result<f64, AutotraderError> {
    if !(ticker.last.is_finite() && ticker.last > 0.0) {
        let description = format!(
            "calculate_order_quantity -> last price must be positive, got {}",
            ticker.last
        );
        return Err(AutotraderError::new_invalid_ticker(description));
    }

    let minimum_units = MINIMUM_ORDER_NOTIONAL / ticker.last;
    Ok(round_quantity(minimum_units.max(shares)))
}

/// The top-of-book price an order of `side` is anchored to.
#[inline]
pub fn get_reference_price(side: Side, ticker: &Ticker) -> f64 {
    match side {
        Side::Buy => ticker.bid,
        Side::Sell => ticker.ask,
    }
}

/// BUY below the bid by `markdown`, SELL above the ask by `markup`.
pub fn calculate_limit_price(side: Side, ticker: &Ticker, spread: &Spread) -> f64 {
    let reference_price = get_reference_price(side, ticker);
    match side {
        Side::Buy => round_price(reference_price - reference_price * spread.markdown),
        Side::Sell => round_price(reference_price + reference_price * spread.markup),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autotrader_error::ErrorKind;
    use common::functions::format_price;

    fn spread() -> Spread {
        Spread::new(0.02, 0.01).unwrap()
    }

    #[test]
    fn test_limit_price_applies_spread_to_top_of_book() {
        let ticker = Ticker::new(0.05, 0.051, 0.0505);
        assert_eq!(calculate_limit_price(Side::Buy, &ticker, &spread()), 0.0495);
        assert_eq!(calculate_limit_price(Side::Sell, &ticker, &spread()), 0.05202);
    }

    #[test]
    fn test_limit_price_without_spread_is_top_of_book() {
        let ticker = Ticker::new(0.05, 0.051, 0.0505);
        let spread = Spread::new(0.0, 0.0).unwrap();
        assert_eq!(calculate_limit_price(Side::Buy, &ticker, &spread), 0.05);
        assert_eq!(calculate_limit_price(Side::Sell, &ticker, &spread), 0.051);
    }

    #[test]
    fn test_quantity_keeps_configured_shares_when_large_enough() {
        let ticker = Ticker::new(0.05, 0.051, 0.05);
        // 0.0005 / 0.05 = 0.01
        assert_eq!(calculate_order_quantity(10.0, &ticker).unwrap(), 10.0);
    }

    #[test]
    fn test_quantity_is_raised_to_minimum_notional() {
        let ticker = Ticker::new(0.00001, 0.00002, 0.00001);
        let quantity = calculate_order_quantity(1.0, &ticker).unwrap();
        assert!(quantity >= MINIMUM_ORDER_NOTIONAL / 0.00001);
        assert!(quantity < 50.0 + 2e-8);
        assert!(quantity * ticker.last >= MINIMUM_ORDER_NOTIONAL - 1e-12);
    }

    #[test]
    fn test_quantity_invariant_over_many_tickers() {
        for last in [0.00000001, 0.0001, 0.05, 1.0, 250.0] {
            for shares in [0.0, 0.5, 10.0, 1000.0] {
                let ticker = Ticker::new(last, last, last);
                let quantity = calculate_order_quantity(shares, &ticker).unwrap();
                assert!(quantity >= shares);
                assert!(quantity >= MINIMUM_ORDER_NOTIONAL / last);
            }
        }
    }

    #[test]
    fn test_wire_quantity_clears_minimum_notional() {
        for last in [0.06, 0.07, 0.03, 0.0123, 0.00033, 3.0] {
            let ticker = Ticker::new(last, last, last);
            let quantity = calculate_order_quantity(0.0, &ticker).unwrap();
            let sent: f64 = format_price(quantity).parse().unwrap();
            assert_eq!(sent, quantity);
            assert!(
                sent * last >= MINIMUM_ORDER_NOTIONAL,
                "{} x {} below minimum",
                sent,
                last
            );
        }
        let ticker = Ticker::new(0.06, 0.06, 0.06);
        assert_eq!(calculate_order_quantity(0.0, &ticker).unwrap(), 0.00833334);
    }

    #[test]
    fn test_quantity_rejects_unusable_last_price() {
        for last in [0.0, -1.0, f64::NAN] {
            let ticker = Ticker::new(0.05, 0.051, last);
            let error = calculate_order_quantity(1.0, &ticker).unwrap_err();
            assert_eq!(error.kind, ErrorKind::InvalidTicker);
        }
    }
}
