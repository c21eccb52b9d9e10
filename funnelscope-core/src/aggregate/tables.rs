//! Read side of [`AggregateState`]: derived rates, sorted rows and top lists.
//!
//! Every table is computed on demand from the raw counters. Rates use
//! [`error_rate`] and are zero when the denominator is zero.

use crate::aggregate::constants::{
    BOT_USER_AGENT_SAMPLES, TOP_ERROR_URLS, TOP_ERROR_USER_AGENTS, TOP_URLS_PER_BUCKET,
};
use crate::aggregate::counters::{
    ClassCounts, FastMap, StageCounts, Tally, TrafficCounts, error_rate, top_n,
};
use crate::aggregate::histogram::{Histogram, HistogramBucket, percentile_from_histogram};
use crate::aggregate::severity::{HourlySeverity, Severity, Trend};
use crate::aggregate::state::{AggregateState, SlowRequests};
use crate::classify::{FunnelStage, PatternCategory, is_bot};
use serde::Serialize;
use std::hash::Hash;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRow {
    pub date: String,
    #[serde(flatten)]
    pub counts: TrafficCounts,
    pub error_rate: f64,
    /// Compared to the previous row; `None` on the first day.
    pub trend: Option<Trend>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyRow {
    pub hour: String,
    pub avg_total: f64,
    pub avg_checkout: f64,
    pub avg_errors: f64,
    pub error_rate: f64,
    pub severity: HourlySeverity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlCount {
    pub url: String,
    pub errors: u64,
}

/// One funnel stage or pattern category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownRow<L> {
    pub bucket: L,
    pub requests: u64,
    pub errors: u64,
    pub error_rate: f64,
    pub severity: Severity,
    pub top_urls: Vec<UrlCount>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: u16,
    pub errors: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageStatusRow {
    pub stage: FunnelStage,
    pub statuses: Vec<StatusCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserAgentCount {
    pub user_agent: String,
    pub errors: u64,
    pub is_bot: bool,
}

/// Sorted sample of distinct bot user agents that hit errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BotUserAgents {
    pub samples: Vec<String>,
    /// Distinct user agents left out of `samples`.
    pub more: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassRow {
    pub requests: u64,
    pub errors: u64,
    pub error_rate: f64,
    /// Share of all checkout errors, in percent.
    pub share_of_errors: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrafficSources {
    pub bot: ClassRow,
    pub human: ClassRow,
    pub mobile: ClassRow,
    pub desktop: ClassRow,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleStats {
    pub count: usize,
    pub mean_secs: f64,
    pub max_secs: f64,
    pub p95_ms: u64,
    pub p99_ms: u64,
    pub histogram: Vec<HistogramBucket>,
}

impl SampleStats {
    /// `None` for an empty sample.
    pub fn of(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let sum: f64 = samples.iter().sum();
        let max = samples.iter().copied().fold(f64::MIN, f64::max);

        let histogram = Histogram::from_seconds(samples);
        let buckets = histogram.numeric_buckets();
        let total = histogram.total();

        Some(Self {
            count: samples.len(),
            mean_secs: sum / samples.len() as f64,
            max_secs: max,
            p95_ms: percentile_from_histogram(&buckets, total, 0.95),
            p99_ms: percentile_from_histogram(&buckets, total, 0.99),
            histogram: histogram.snapshot(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatencySummary {
    pub success: Option<SampleStats>,
    pub error: Option<SampleStats>,
    /// Checkout requests that did not end in a server error.
    pub success_requests: u64,
    /// Error mean minus success mean; present only when both samples exist.
    pub error_slowdown_secs: Option<f64>,
    pub slow_requests: u64,
    pub slow_failed: u64,
    pub slow_failure_rate: f64,
}

impl AggregateState {
    pub fn total_requests(&self) -> u64 {
        self.total_requests
    }

    /// Records that carried a backend status.
    pub fn analyzable_requests(&self) -> u64 {
        self.analyzable_requests
    }

    pub fn checkout_requests(&self) -> u64 {
        self.checkout_requests
    }

    pub fn checkout_errors(&self) -> u64 {
        self.checkout_errors
    }

    pub fn checkout_error_rate(&self) -> f64 {
        error_rate(self.checkout_errors, self.checkout_requests)
    }

    /// Checkout requests as a share of all requests, in percent.
    pub fn checkout_share(&self) -> f64 {
        error_rate(self.checkout_requests, self.total_requests)
    }

    pub fn date_counts(&self) -> &FastMap<String, TrafficCounts> {
        &self.by_date
    }

    pub fn hour_counts(&self) -> &FastMap<String, TrafficCounts> {
        &self.by_hour
    }

    pub fn funnel_stage_counts(&self) -> &FastMap<FunnelStage, StageCounts> {
        &self.by_funnel_stage
    }

    pub fn pattern_category_counts(&self) -> &FastMap<PatternCategory, StageCounts> {
        &self.by_pattern_category
    }

    pub fn status_code_counts(&self) -> &Tally<u16> {
        &self.by_status_code
    }

    pub fn stage_status_counts(&self) -> &FastMap<FunnelStage, Tally<u16>> {
        &self.by_stage_and_status
    }

    pub fn bot(&self) -> ClassCounts {
        self.bot
    }

    pub fn human(&self) -> ClassCounts {
        self.human
    }

    pub fn mobile(&self) -> ClassCounts {
        self.mobile
    }

    pub fn desktop(&self) -> ClassCounts {
        self.desktop
    }

    pub fn slow_requests(&self) -> SlowRequests {
        self.slow
    }

    /// Combined latencies (seconds) of non-error checkout requests, in arrival order.
    pub fn success_latencies(&self) -> &[f64] {
        &self.success_latencies
    }

    pub fn error_latencies(&self) -> &[f64] {
        &self.error_latencies
    }

    /// Days in ascending order, each with its trend against the day before.
    pub fn daily_rows(&self) -> Vec<DailyRow> {
        let mut dates: Vec<(&String, &TrafficCounts)> = self.by_date.iter().collect();
        dates.sort_by(|(a, _), (b, _)| a.cmp(b));

        let mut previous: Option<f64> = None;
        dates
            .into_iter()
            .map(|(date, counts)| {
                let rate = counts.error_rate();
                let trend = previous.map(|prev| Trend::between(prev, rate));
                previous = Some(rate);
                DailyRow {
                    date: date.clone(),
                    counts: *counts,
                    error_rate: rate,
                    trend,
                }
            })
            .collect()
    }

    /// Hours in ascending order, counts averaged over the days observed.
    pub fn hourly_rows(&self) -> Vec<HourlyRow> {
        let days = self.by_date.len().max(1) as f64;

        let mut hours: Vec<(&String, &TrafficCounts)> = self.by_hour.iter().collect();
        hours.sort_by(|(a, _), (b, _)| a.cmp(b));

        hours
            .into_iter()
            .map(|(hour, counts)| {
                let rate = counts.error_rate();
                HourlyRow {
                    hour: hour.clone(),
                    avg_total: counts.total as f64 / days,
                    avg_checkout: counts.checkout as f64 / days,
                    avg_errors: counts.errors as f64 / days,
                    error_rate: rate,
                    severity: HourlySeverity::for_rate(rate),
                }
            })
            .collect()
    }

    pub fn pattern_category_rows(&self) -> Vec<BreakdownRow<PatternCategory>> {
        breakdown_rows(&self.by_pattern_category, Severity::for_pattern_category)
    }

    pub fn funnel_stage_rows(&self) -> Vec<BreakdownRow<FunnelStage>> {
        breakdown_rows(&self.by_funnel_stage, Severity::for_funnel_stage)
    }

    /// Error status codes in ascending order.
    pub fn status_code_rows(&self) -> Vec<StatusCount> {
        status_counts(&self.by_status_code)
    }

    /// Stages that saw errors, ordered by display label, codes ascending.
    pub fn stage_status_rows(&self) -> Vec<StageStatusRow> {
        let mut rows: Vec<StageStatusRow> = self
            .by_stage_and_status
            .iter()
            .map(|(stage, codes)| StageStatusRow {
                stage: *stage,
                statuses: status_counts(codes),
            })
            .collect();
        rows.sort_by_key(|row| row.stage.label());
        rows
    }

    pub fn top_error_urls(&self) -> Vec<UrlCount> {
        url_counts(&self.error_urls, TOP_ERROR_URLS)
    }

    pub fn top_error_user_agents(&self) -> Vec<UserAgentCount> {
        top_n(&self.error_user_agents, TOP_ERROR_USER_AGENTS)
            .into_iter()
            .map(|(user_agent, errors)| UserAgentCount {
                is_bot: is_bot(&user_agent),
                user_agent,
                errors,
            })
            .collect()
    }

    pub fn bot_error_user_agents(&self) -> BotUserAgents {
        let mut all: Vec<&String> = self.bot_error_user_agents.iter().collect();
        all.sort();

        let more = all.len().saturating_sub(BOT_USER_AGENT_SAMPLES);
        BotUserAgents {
            samples: all
                .into_iter()
                .take(BOT_USER_AGENT_SAMPLES)
                .cloned()
                .collect(),
            more,
        }
    }

    pub fn traffic_sources(&self) -> TrafficSources {
        let row = |counts: &ClassCounts| ClassRow {
            requests: counts.requests,
            errors: counts.errors,
            error_rate: counts.error_rate(),
            share_of_errors: error_rate(counts.errors, self.checkout_errors),
        };

        TrafficSources {
            bot: row(&self.bot),
            human: row(&self.human),
            mobile: row(&self.mobile),
            desktop: row(&self.desktop),
        }
    }

    pub fn latency_summary(&self) -> LatencySummary {
        let success = SampleStats::of(&self.success_latencies);
        let error = SampleStats::of(&self.error_latencies);

        let error_slowdown_secs = match (&success, &error) {
            (Some(s), Some(e)) => Some(e.mean_secs - s.mean_secs),
            _ => None,
        };

        LatencySummary {
            success_requests: self.checkout_requests - self.checkout_errors,
            success,
            error,
            error_slowdown_secs,
            slow_requests: self.slow.requests,
            slow_failed: self.slow.failed,
            slow_failure_rate: error_rate(self.slow.failed, self.slow.requests),
        }
    }
}

fn breakdown_rows<L>(
    buckets: &FastMap<L, StageCounts>,
    severity: fn(f64) -> Severity,
) -> Vec<BreakdownRow<L>>
where
    L: Copy + Ord + Hash,
{
    let mut rows: Vec<BreakdownRow<L>> = buckets
        .iter()
        .filter(|(_, counts)| counts.requests > 0)
        .map(|(bucket, counts)| {
            let rate = counts.error_rate();
            BreakdownRow {
                bucket: *bucket,
                requests: counts.requests,
                errors: counts.errors,
                error_rate: rate,
                severity: severity(rate),
                top_urls: url_counts(&counts.error_urls, TOP_URLS_PER_BUCKET),
            }
        })
        .collect();

    rows.sort_by(|a, b| b.errors.cmp(&a.errors).then_with(|| a.bucket.cmp(&b.bucket)));
    rows
}

fn url_counts(tally: &Tally<String>, limit: usize) -> Vec<UrlCount> {
    top_n(tally, limit)
        .into_iter()
        .map(|(url, errors)| UrlCount { url, errors })
        .collect()
}

fn status_counts(tally: &Tally<u16>) -> Vec<StatusCount> {
    let mut rows: Vec<StatusCount> = tally
        .iter()
        .map(|(status, errors)| StatusCount {
            status: *status,
            errors: *errors,
        })
        .collect();
    rows.sort_by_key(|row| row.status);
    rows
}
