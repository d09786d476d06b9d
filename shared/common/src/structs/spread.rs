use crate::constants::SPREAD_SEPARATOR;
use autotrader_error::AutotraderError;
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

/// Price offsets applied to the top of book: `markup` raises SELL prices
/// above the ask, `markdown` lowers BUY prices below the bid. Both in [0, 1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Spread {
    pub markup: f64,
    pub markdown: f64,
}

impl Spread {
    pub fn new(markup: f64, markdown: f64) -> Result<Self, AutotraderError> {
        for (label, value) in [("markup", markup), ("markdown", markdown)] {
            if !(0.0..1.0).contains(&value) {
                return Err(AutotraderError::new_config(format!(
                    "spread {} must be within [0, 1), got {}",
                    label, value
                )));
            }
        }
        Ok(Self { markup, markdown })
    }
}

impl FromStr for Spread {
    type Err = AutotraderError;

    /// Parses `markup/markdown`, e.g. `0.02/0.01`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (markup, markdown) = value.trim().split_once(SPREAD_SEPARATOR).ok_or_else(|| {
            AutotraderError::new_config(format!(
                "spread `{}` must look like markup{}markdown, e.g. 0.02/0.01",
                value, SPREAD_SEPARATOR
            ))
        })?;
        let parse_part = |label: &str, part: &str| {
            part.trim().parse::<f64>().map_err(|_| {
                AutotraderError::new_config(format!(
                    "spread {} `{}` is not a number",
                    label,
                    part.trim()
                ))
            })
        };
        Self::new(
            parse_part("markup", markup)?,
            parse_part("markdown", markdown)?,
        )
    }
}

impl TryFrom<String> for Spread {
    type Error = AutotraderError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Spread> for String {
    fn from(spread: Spread) -> Self {
        spread.to_string()
    }
}

impl Display for Spread {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}{}{}", self.markup, SPREAD_SEPARATOR, self.markdown)
    }
}
