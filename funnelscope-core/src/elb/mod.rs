//! Parsing of ELB-style access log lines.
//!
//! A line is sixteen fields separated by whitespace. Two of them, the request
//! line and the user agent, are wrapped in double quotes and may contain
//! spaces. Parsing is purely syntactic: a record without a backend status is
//! still a record, it is the aggregation step that decides it is not
//! analyzable.

mod parse;
mod record;

pub use parse::*;
pub use record::*;
