use autotrader_error::AutotraderError;
use common::{
    enums::side::Side,
    functions::round_price,
    structs::{PriceStatistics, TradeRecord},
};

pub struct MarketStatistics;

impl MarketStatistics {
    /// Mean and max fill price over the records of `side`, rounded to the
    /// exchange price increment. An empty sample cannot price an order and
    /// is reported as insufficient data.
    pub fn compute(history: &[TradeRecord], side: Side) -> Result<PriceStatistics, AutotraderError> {
        let prices: Vec<f64> = history
            .iter()
            .filter(|record| record.side == side)
            .map(|record| record.price)
            .collect();

        if prices.is_empty() {
            let description = format!(
                "compute -> no {} fills among {} trade records",
                side,
                history.len()
            );
            return Err(AutotraderError::new_insufficient_data(description));
        }

        let mean = prices.iter().sum::<f64>() / prices.len() as f64;
        let max = prices.iter().copied().fold(f64::MIN, f64::max);

        Ok(PriceStatistics {
            mean: round_price(mean),
            max: round_price(max),
        })
    }
}
