use serde::{Deserialize, Serialize};

/// Top of book for one market at the moment it was fetched.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Ticker {
    pub bid: f64,
    pub ask: f64,
    pub last: f64,
}

impl Ticker {
    pub fn new(bid: f64, ask: f64, last: f64) -> Self {
        Ticker { bid, ask, last }
    }
}
