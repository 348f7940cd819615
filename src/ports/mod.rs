//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the use cases require from the
//! outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `MarketSource`: Supplies current "no" prices per market
//! - `ReportSink`: Presents evaluated opportunities

pub mod market_source;
pub mod report_sink;
