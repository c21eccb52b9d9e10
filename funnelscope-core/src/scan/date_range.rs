use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use std::path::Path;
use std::sync::LazyLock;

/// First and last day covered by a set of log files, judged by file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub first: NaiveDate,
    pub last: NaiveDate,
    /// Inclusive of both ends.
    pub days: i64,
}

impl DateRange {
    pub fn new(first: NaiveDate, last: NaiveDate) -> Self {
        Self {
            first,
            last,
            days: (last - first).num_days() + 1,
        }
    }
}

/// `None` when no file name carries a stamp.
pub fn date_range_of<P: AsRef<Path>>(files: &[P]) -> Option<DateRange> {
    let mut dates = files.iter().filter_map(|f| file_stamp_date(f.as_ref()));
    let first_seen = dates.next()?;

    let (first, last) = dates.fold((first_seen, first_seen), |(lo, hi), date| {
        (lo.min(date), hi.max(date))
    });
    Some(DateRange::new(first, last))
}

/// `_YYYYMMDDTHHMMZ_`, as written by ELB log delivery.
static FILE_STAMP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_([0-9]{8})T[0-9]{4}Z_").expect("invalid file stamp regex"));

/// Date of the first valid stamp in the file name
/// (`..._20240301T1005Z_...log`).
pub fn file_stamp_date(path: &Path) -> Option<NaiveDate> {
    let name = path.file_name()?.to_string_lossy();

    FILE_STAMP
        .captures_iter(&name)
        .find_map(|caps| NaiveDate::parse_from_str(&caps[1], "%Y%m%d").ok())
}
