use serde::{Deserialize, Serialize};

/// Which half of the book `getorderbook` should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderBookType {
    Buy,
    Sell,
    #[default]
    Both,
}
