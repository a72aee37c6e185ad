pub mod brokers;
pub mod generate;
pub mod utils;
