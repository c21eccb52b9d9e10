use serde::Serialize;

/// Upper bounds (inclusive) of the combined-latency buckets.
pub const LATENCY_BUCKETS_MS: &[u64] = &[50, 100, 250, 500, 1000, 2500, 5000, 10000];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistogramBucket {
    pub label: String,
    pub count: u64,
}

#[derive(Debug, Clone)]
pub struct Histogram {
    buckets: &'static [u64],
    counts: Vec<u64>,
}

impl Histogram {
    pub fn new(buckets: &'static [u64]) -> Self {
        Self {
            buckets,
            counts: vec![0; buckets.len() + 1], // +∞ bucket
        }
    }

    /// Histogram of latency samples given in seconds.
    pub fn from_seconds(samples: &[f64]) -> Self {
        let mut histogram = Self::new(LATENCY_BUCKETS_MS);
        for seconds in samples {
            histogram.record((seconds * 1000.0).round() as u64);
        }
        histogram
    }

    pub fn record(&mut self, value_ms: u64) {
        let index = self
            .buckets
            .iter()
            .position(|b| value_ms <= *b)
            .unwrap_or(self.buckets.len());
        self.counts[index] += 1;
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn snapshot(&self) -> Vec<HistogramBucket> {
        let last = self.buckets.last().copied().unwrap_or(0);

        self.counts
            .iter()
            .enumerate()
            .map(|(i, count)| {
                let label = if i == 0 {
                    format!("0–{}ms", self.buckets.first().copied().unwrap_or(0))
                } else if i < self.buckets.len() {
                    format!("{}–{}ms", self.buckets[i - 1] + 1, self.buckets[i])
                } else {
                    format!(">{last}ms")
                };
                HistogramBucket {
                    label,
                    count: *count,
                }
            })
            .collect()
    }

    pub fn numeric_buckets(&self) -> Vec<(u64, u64)> {
        self.counts
            .iter()
            .enumerate()
            .map(|(i, count)| {
                let upper = if i < self.buckets.len() {
                    self.buckets[i]
                } else {
                    u64::MAX // overflow bucket
                };
                (upper, *count)
            })
            .collect()
    }
}

/// Upper bound of the bucket holding the `pct` quantile.
pub fn percentile_from_histogram(buckets: &[(u64, u64)], total: u64, pct: f64) -> u64 {
    if total == 0 {
        return 0;
    }

    let target = (total as f64 * pct).ceil() as u64;
    let mut running = 0;

    for (upper, count) in buckets {
        running += *count;
        if running >= target {
            if *upper == u64::MAX {
                // "greater than last real bucket"
                return buckets
                    .iter()
                    .rev()
                    .find(|(u, _)| *u != u64::MAX)
                    .map(|(u, _)| u.saturating_add(1))
                    .unwrap_or(0);
            }
            return *upper;
        }
    }

    0
}
