use serde::Serialize;

/// Line bookkeeping of a scan. Every line is either parsed or unparseable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    pub files: usize,
    pub lines: u64,
    pub parsed: u64,
    pub unparseable: u64,
}

impl ScanStats {
    pub fn merge(a: ScanStats, b: ScanStats) -> ScanStats {
        ScanStats {
            files: a.files + b.files,
            lines: a.lines + b.lines,
            parsed: a.parsed + b.parsed,
            unparseable: a.unparseable + b.unparseable,
        }
    }
}
