use crate::aggregate::{
    AggregateState, BotUserAgents, BreakdownRow, DailyRow, HourlyRow, LatencySummary,
    StageStatusRow, TrafficSources, UrlCount, UserAgentCount,
};
use crate::classify::{FunnelStage, PatternCategory};
use crate::report::status::status_description;
use crate::scan::{DateRange, ScanStats};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// Where the data came from and how much of it was usable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportMeta {
    pub generated_at: DateTime<Utc>,
    pub log_dir: PathBuf,
    pub output_file: Option<PathBuf>,
    pub scan: ScanStats,
    pub date_range: Option<DateRange>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_requests: u64,
    pub analyzable_requests: u64,
    pub checkout_requests: u64,
    /// Checkout requests as a percentage of all requests.
    pub checkout_share: f64,
    pub checkout_errors: u64,
    pub checkout_error_rate: f64,
    pub top_error_urls: Vec<UrlCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrafficSection {
    #[serde(flatten)]
    pub sources: TrafficSources,
    pub top_error_user_agents: Vec<UserAgentCount>,
    pub bot_error_user_agents: BotUserAgents,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorStatusRow {
    pub status: u16,
    pub errors: u64,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorTypes {
    pub status_codes: Vec<ErrorStatusRow>,
    pub by_stage: Vec<StageStatusRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub meta: ReportMeta,
    pub summary: Summary,
    pub pattern_categories: Vec<BreakdownRow<PatternCategory>>,
    pub funnel_stages: Vec<BreakdownRow<FunnelStage>>,
    pub daily: Vec<DailyRow>,
    pub hourly: Vec<HourlyRow>,
    pub traffic: TrafficSection,
    pub error_types: ErrorTypes,
    pub latency: LatencySummary,
}

impl Report {
    pub fn assemble(state: &AggregateState, meta: ReportMeta) -> Self {
        let summary = Summary {
            total_requests: state.total_requests(),
            analyzable_requests: state.analyzable_requests(),
            checkout_requests: state.checkout_requests(),
            checkout_share: state.checkout_share(),
            checkout_errors: state.checkout_errors(),
            checkout_error_rate: state.checkout_error_rate(),
            top_error_urls: state.top_error_urls(),
        };

        let status_codes = state
            .status_code_rows()
            .into_iter()
            .map(|row| ErrorStatusRow {
                status: row.status,
                errors: row.errors,
                description: status_description(row.status),
            })
            .collect();

        Self {
            meta,
            summary,
            pattern_categories: state.pattern_category_rows(),
            funnel_stages: state.funnel_stage_rows(),
            daily: state.daily_rows(),
            hourly: state.hourly_rows(),
            traffic: TrafficSection {
                sources: state.traffic_sources(),
                top_error_user_agents: state.top_error_user_agents(),
                bot_error_user_agents: state.bot_error_user_agents(),
            },
            error_types: ErrorTypes {
                status_codes,
                by_stage: state.stage_status_rows(),
            },
            latency: state.latency_summary(),
        }
    }
}
