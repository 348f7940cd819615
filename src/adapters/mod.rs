//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! external dependencies (HTTP client, file I/O, stdout).
//!
//! Adapter categories:
//! - `predictit`: PredictIt market data (live API or snapshot file)
//! - `report`: Text and JSON-lines presentation

pub mod predictit;
pub mod report;
