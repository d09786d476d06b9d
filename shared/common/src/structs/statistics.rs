use std::fmt::{Display, Formatter, Result};

use crate::functions::format_price;

/// Mean and maximum of the recent fill prices for one side of the book,
/// both rounded to the exchange price increment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PriceStatistics {
    pub mean: f64,
    pub max: f64,
}

impl Display for PriceStatistics {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(
            f,
            "avg {} / max {}",
            format_price(self.mean),
            format_price(self.max)
        )
    }
}
