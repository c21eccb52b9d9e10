//! Feeds log files through [`parse_line`](crate::elb::parse_line) and the
//! [`AggregationEngine`](crate::aggregate::AggregationEngine).
//!
//! Files are read as bytes and decoded lossily, one line at a time, so a
//! stray invalid byte costs at most one record. With more than one job the
//! file list is cut into contiguous chunks, each chunk aggregated on its own
//! scoped thread, and the shard states merged back in chunk order.

mod date_range;
mod error;
mod scanner;
mod stats;

pub use date_range::{DateRange, date_range_of, file_stamp_date};
pub use error::ScanError;
pub use scanner::{ScanOptions, ScanOutcome, find_log_files, scan_file, scan_files, scan_lines};
pub use stats::ScanStats;
