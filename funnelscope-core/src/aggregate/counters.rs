use ahash::RandomState;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

pub type FastMap<K, V> = HashMap<K, V, RandomState>;
pub type FastSet<K> = HashSet<K, RandomState>;
pub type Tally<K> = FastMap<K, u64>;

/// Error rate in percent; zero when there were no requests.
pub fn error_rate(errors: u64, requests: u64) -> f64 {
    if requests == 0 {
        0.0
    } else {
        errors as f64 / requests as f64 * 100.0
    }
}

/// Counters of one day or one hour of traffic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TrafficCounts {
    /// Every request, checkout or not, analyzable or not.
    pub total: u64,
    pub checkout: u64,
    pub errors: u64,
}

impl TrafficCounts {
    pub fn error_rate(&self) -> f64 {
        error_rate(self.errors, self.checkout)
    }

    pub(crate) fn absorb(&mut self, other: &TrafficCounts) {
        self.total += other.total;
        self.checkout += other.checkout;
        self.errors += other.errors;
    }
}

/// Counters of one funnel stage or pattern category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageCounts {
    pub requests: u64,
    pub errors: u64,
    /// Error count per URL, query string removed.
    pub error_urls: Tally<String>,
}

impl StageCounts {
    pub fn error_rate(&self) -> f64 {
        error_rate(self.errors, self.requests)
    }

    pub(crate) fn absorb(&mut self, other: StageCounts) {
        self.requests += other.requests;
        self.errors += other.errors;
        absorb_tally(&mut self.error_urls, other.error_urls);
    }
}

/// Requests and errors of one traffic class (bot, human, mobile, desktop).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClassCounts {
    pub requests: u64,
    pub errors: u64,
}

impl ClassCounts {
    pub fn error_rate(&self) -> f64 {
        error_rate(self.errors, self.requests)
    }

    pub(crate) fn absorb(&mut self, other: &ClassCounts) {
        self.requests += other.requests;
        self.errors += other.errors;
    }
}

pub(crate) fn absorb_tally<K: Eq + std::hash::Hash>(into: &mut Tally<K>, from: Tally<K>) {
    for (key, count) in from {
        *into.entry(key).or_insert(0) += count;
    }
}

/// Sorts a tally by descending count, ties broken by ascending key, and
/// keeps the first `limit` entries.
pub fn top_n<K: Ord + Clone>(tally: &Tally<K>, limit: usize) -> Vec<(K, u64)> {
    let mut entries: Vec<(K, u64)> = tally.iter().map(|(k, c)| (k.clone(), *c)).collect();
    entries.sort_by(|(ka, ca), (kb, cb)| cb.cmp(ca).then_with(|| ka.cmp(kb)));
    entries.truncate(limit);
    entries
}
