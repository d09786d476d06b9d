use super::{Market, Spread};
use crate::constants::DEFAULT_POLL_INTERVAL_IN_SECS;
use autotrader_error::AutotraderError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingSettings {
    pub market: Market,
    /// Minimum units per order; raised when it would fall below the
    /// exchange's minimum notional.
    pub shares: f64,
    pub spread: Spread,
    pub poll_interval_secs: u64,
}

impl TradingSettings {
    pub fn new(
        market: Market,
        shares: f64,
        spread: Spread,
        poll_interval_secs: Option<u64>,
    ) -> Result<Self, AutotraderError> {
        if !shares.is_finite() || shares < 0.0 {
            return Err(AutotraderError::new_config(format!(
                "shares must be a non-negative number, got {}",
                shares
            )));
        }
        let poll_interval_secs = poll_interval_secs.unwrap_or(DEFAULT_POLL_INTERVAL_IN_SECS);
        if poll_interval_secs == 0 {
            return Err(AutotraderError::new_config(String::from(
                "poll interval must be at least one second",
            )));
        }

        Ok(TradingSettings {
            market,
            shares,
            spread,
            poll_interval_secs,
        })
    }

    #[inline]
    pub fn get_poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}
