pub mod fixtures;
pub mod tracing;

pub use fixtures::{Entry, LogDir};
pub use tracing::{CapturedEvent, capture_events};
