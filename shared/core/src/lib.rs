pub mod config;
pub mod ledger;
pub mod pricing;
pub mod statistics;
pub mod trader;
