use crate::aggregate::counters::{
    ClassCounts, FastMap, FastSet, StageCounts, Tally, TrafficCounts, absorb_tally,
};
use crate::classify::{FunnelStage, PatternCategory};

/// Checkout requests that took longer than the slow threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlowRequests {
    pub requests: u64,
    /// Slow requests with a backend status of 400 or more.
    pub failed: u64,
}

/// Everything accumulated over one pass of the record stream.
///
/// Built empty, filled by [`AggregationEngine`](crate::aggregate::AggregationEngine),
/// read through the accessors in `tables` once the pass is over.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateState {
    pub(crate) total_requests: u64,
    pub(crate) analyzable_requests: u64,
    pub(crate) checkout_requests: u64,
    pub(crate) checkout_errors: u64,

    pub(crate) by_date: FastMap<String, TrafficCounts>,
    pub(crate) by_hour: FastMap<String, TrafficCounts>,
    pub(crate) by_funnel_stage: FastMap<FunnelStage, StageCounts>,
    pub(crate) by_pattern_category: FastMap<PatternCategory, StageCounts>,
    pub(crate) by_status_code: Tally<u16>,
    pub(crate) by_stage_and_status: FastMap<FunnelStage, Tally<u16>>,

    pub(crate) bot: ClassCounts,
    pub(crate) human: ClassCounts,
    pub(crate) mobile: ClassCounts,
    pub(crate) desktop: ClassCounts,

    pub(crate) error_urls: Tally<String>,
    pub(crate) error_user_agents: Tally<String>,
    pub(crate) bot_error_user_agents: FastSet<String>,

    pub(crate) slow: SlowRequests,

    pub(crate) success_latencies: Vec<f64>,
    pub(crate) error_latencies: Vec<f64>,
}

impl AggregateState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Combines two shard states. `a` must cover the input that came before
    /// `b` for the latency sequences to keep arrival order.
    pub fn merge(a: AggregateState, b: AggregateState) -> AggregateState {
        let mut merged = a;
        merged.absorb(b);
        merged
    }

    fn absorb(&mut self, other: AggregateState) {
        self.total_requests += other.total_requests;
        self.analyzable_requests += other.analyzable_requests;
        self.checkout_requests += other.checkout_requests;
        self.checkout_errors += other.checkout_errors;

        for (date, counts) in other.by_date {
            self.by_date.entry(date).or_default().absorb(&counts);
        }
        for (hour, counts) in other.by_hour {
            self.by_hour.entry(hour).or_default().absorb(&counts);
        }
        for (stage, counts) in other.by_funnel_stage {
            self.by_funnel_stage.entry(stage).or_default().absorb(counts);
        }
        for (category, counts) in other.by_pattern_category {
            self.by_pattern_category
                .entry(category)
                .or_default()
                .absorb(counts);
        }
        absorb_tally(&mut self.by_status_code, other.by_status_code);
        for (stage, codes) in other.by_stage_and_status {
            absorb_tally(self.by_stage_and_status.entry(stage).or_default(), codes);
        }

        self.bot.absorb(&other.bot);
        self.human.absorb(&other.human);
        self.mobile.absorb(&other.mobile);
        self.desktop.absorb(&other.desktop);

        absorb_tally(&mut self.error_urls, other.error_urls);
        absorb_tally(&mut self.error_user_agents, other.error_user_agents);
        self.bot_error_user_agents
            .extend(other.bot_error_user_agents);

        self.slow.requests += other.slow.requests;
        self.slow.failed += other.slow.failed;

        self.success_latencies.extend(other.success_latencies);
        self.error_latencies.extend(other.error_latencies);
    }
}
