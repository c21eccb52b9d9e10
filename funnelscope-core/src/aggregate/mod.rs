//! Single-pass aggregation of access log records.
//!
//! The data processing architecture is:
//!
//! lines
//! parse_line
//! LogRecord
//! AggregationEngine::ingest
//! AggregateState
//! tables (read side)
//!
//! Accumulators are plain counters and sample vectors, so two states built
//! from consecutive slices of the input merge into the state of the whole.

mod constants;
mod counters;
mod engine;
mod histogram;
mod severity;
mod state;
mod tables;
#[cfg(test)]
mod tests;

pub use constants::*;
pub use counters::*;
pub use engine::*;
pub use histogram::*;
pub use severity::*;
pub use state::*;
pub use tables::*;
