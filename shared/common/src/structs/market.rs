use crate::constants::MARKET_SEPARATOR;
use autotrader_error::AutotraderError;
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

/// Trading pair such as `BTC-LTC`: quote currency before the separator,
/// base currency after it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Market {
    pub quote: String,
    pub base: String,
}

impl Market {
    pub fn new(quote: &str, base: &str) -> Self {
        Self {
            quote: quote.to_string(),
            base: base.to_string(),
        }
    }

    pub fn name(&self) -> String {
        format!("{}{}{}", self.quote, MARKET_SEPARATOR, self.base)
    }
}

impl FromStr for Market {
    type Err = AutotraderError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        let mut parts = value.split(MARKET_SEPARATOR);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(quote), Some(base), None) if !quote.is_empty() && !base.is_empty() => {
                Ok(Self::new(&quote.to_uppercase(), &base.to_uppercase()))
            }
            _ => Err(AutotraderError::new_config(format!(
                "market `{}` must look like QUOTE{}BASE, e.g. BTC-LTC",
                value, MARKET_SEPARATOR
            ))),
        }
    }
}

impl TryFrom<String> for Market {
    type Error = AutotraderError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Market> for String {
    fn from(market: Market) -> Self {
        market.name()
    }
}

impl Display for Market {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.name())
    }
}
