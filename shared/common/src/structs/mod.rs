mod cycle_report;
pub use cycle_report::*;

mod market;
pub use market::*;

mod order;
pub use order::*;

mod spread;
pub use spread::*;

mod statistics;
pub use statistics::*;

mod ticker;
pub use ticker::*;

mod trade_record;
pub use trade_record::*;

mod trading_settings;
pub use trading_settings::*;
