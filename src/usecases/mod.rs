//! Use Cases Layer - Application Business Logic
//!
//! Orchestrates domain logic with port interfaces.
//!
//! Use cases:
//! - `MarketScanner`: Fetch every market, evaluate, collect reports

pub mod market_scanner;

pub use market_scanner::MarketScanner;
