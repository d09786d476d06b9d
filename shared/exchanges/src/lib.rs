pub mod bittrex;
pub mod config;
mod shared;
pub mod structs;
