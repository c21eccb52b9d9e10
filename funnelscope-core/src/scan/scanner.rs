use crate::aggregate::{AggregateState, AggregationEngine};
use crate::conf::discover;
use crate::elb::parse_line;
use crate::scan::error::ScanError;
use crate::scan::stats::ScanStats;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    pub jobs: usize,
    pub progress_every: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            jobs: 1,
            progress_every: 1000,
        }
    }
}

/// Finished state of a scan plus its line bookkeeping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanOutcome {
    pub state: AggregateState,
    pub stats: ScanStats,
}

impl ScanOutcome {
    /// `a` must cover the files before `b`.
    pub fn merge(a: ScanOutcome, b: ScanOutcome) -> ScanOutcome {
        ScanOutcome {
            state: AggregateState::merge(a.state, b.state),
            stats: ScanStats::merge(a.stats, b.stats),
        }
    }
}

/// Sorted log files under `dir` matching `pattern`; at least one.
pub fn find_log_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, ScanError> {
    if !dir.is_dir() {
        return Err(ScanError::MissingDirectory(dir.to_path_buf()));
    }

    let files = discover(dir, pattern)?;
    if files.is_empty() {
        return Err(ScanError::NoLogFiles {
            dir: dir.to_path_buf(),
            pattern: pattern.to_string(),
        });
    }

    tracing::info!(count = files.len(), dir = %dir.display(), "found log files");
    Ok(files)
}

/// Scans `files` in order, sharding across `options.jobs` threads.
///
/// The resulting state is the same for every job count.
pub fn scan_files(files: &[PathBuf], options: &ScanOptions) -> Result<ScanOutcome, ScanError> {
    let progress = Progress::new(files.len(), options.progress_every);
    let jobs = options.jobs.clamp(1, files.len().max(1));

    tracing::info!(files = files.len(), jobs, "scanning log files");

    let outcome = if jobs == 1 {
        scan_chunk(files, &progress)?
    } else {
        scan_sharded(files, jobs, &progress)?
    };

    tracing::info!(
        lines = outcome.stats.lines,
        parsed = outcome.stats.parsed,
        unparseable = outcome.stats.unparseable,
        "scan complete"
    );
    Ok(outcome)
}

fn scan_sharded(
    files: &[PathBuf],
    jobs: usize,
    progress: &Progress,
) -> Result<ScanOutcome, ScanError> {
    let chunk_size = files.len().div_ceil(jobs);

    thread::scope(|scope| {
        let handles: Vec<_> = files
            .chunks(chunk_size)
            .map(|chunk| scope.spawn(move || scan_chunk(chunk, progress)))
            .collect();

        // Joined in spawn order, so shards merge in file order.
        let mut outcome = ScanOutcome::default();
        for handle in handles {
            let shard = handle.join().map_err(|_| ScanError::WorkerPanicked)??;
            outcome = ScanOutcome::merge(outcome, shard);
        }
        Ok(outcome)
    })
}

fn scan_chunk(files: &[PathBuf], progress: &Progress) -> Result<ScanOutcome, ScanError> {
    let mut engine = AggregationEngine::new();
    let mut stats = ScanStats::default();

    for path in files {
        scan_file(path, &mut engine, &mut stats)?;
        progress.file_done();
    }

    Ok(ScanOutcome {
        state: engine.finish(),
        stats,
    })
}

/// Scans one file into `engine`, counting it in `stats`.
pub fn scan_file(
    path: &Path,
    engine: &mut AggregationEngine,
    stats: &mut ScanStats,
) -> Result<(), ScanError> {
    let _span = tracing::debug_span!("scan_file", path = %path.display()).entered();

    let read_error = |source| ScanError::Read {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(read_error)?;
    scan_lines(BufReader::new(file), engine, stats).map_err(read_error)?;
    stats.files += 1;
    Ok(())
}

/// Feeds every line of `reader` to `engine`. Invalid UTF-8 is replaced,
/// unparseable lines are counted and skipped.
pub fn scan_lines<R: BufRead>(
    mut reader: R,
    engine: &mut AggregationEngine,
    stats: &mut ScanStats,
) -> io::Result<()> {
    let mut buf = Vec::new();
    let mut line_no: u64 = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }
        line_no += 1;
        stats.lines += 1;

        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\n', '\r']);

        match parse_line(line) {
            Ok(record) => {
                stats.parsed += 1;
                engine.ingest(&record);
            }
            Err(e) => {
                stats.unparseable += 1;
                tracing::trace!(line_no, error = %e, "skipping unparseable line");
            }
        }
    }
}

/// Files finished across all shards.
struct Progress {
    total: usize,
    every: usize,
    done: AtomicUsize,
}

impl Progress {
    fn new(total: usize, every: usize) -> Self {
        Self {
            total,
            every: every.max(1),
            done: AtomicUsize::new(0),
        }
    }

    fn file_done(&self) {
        let done = self.done.fetch_add(1, Ordering::Relaxed) + 1;
        if done % self.every == 0 || done == self.total {
            tracing::info!(done, total = self.total, "progress");
        }
    }
}
