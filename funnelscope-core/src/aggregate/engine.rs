use crate::aggregate::constants::{
    BOT_USER_AGENT_DISPLAY_CHARS, ERROR_STATUS_FLOOR, SLOW_FAILURE_STATUS_FLOOR,
    SLOW_REQUEST_SECS, USER_AGENT_DISPLAY_CHARS,
};
use crate::aggregate::counters::{FastMap, TrafficCounts};
use crate::aggregate::state::AggregateState;
use crate::classify::{ClassifiedRecord, classify};
use crate::elb::LogRecord;

/// Owns an [`AggregateState`] for the duration of one pass.
///
/// The state goes in at construction and comes back out of
/// [`finish`](Self::finish); nothing else can observe it in between.
#[derive(Debug, Default)]
pub struct AggregationEngine {
    state: AggregateState,
}

impl AggregationEngine {
    pub fn new() -> Self {
        Self::with_state(AggregateState::new())
    }

    pub fn with_state(state: AggregateState) -> Self {
        Self { state }
    }

    /// Feeds one parsed record, in arrival order.
    pub fn ingest(&mut self, record: &LogRecord) {
        let state = &mut self.state;

        // Global totals cover every parsed record, including those without a
        // backend status.
        state.total_requests += 1;
        bucket(&mut state.by_date, record.date()).total += 1;
        bucket(&mut state.by_hour, record.hour()).total += 1;

        let Some(status) = record.backend_status else {
            return;
        };
        state.analyzable_requests += 1;

        let Some(checkout) = classify(record) else {
            return;
        };

        record_checkout(state, &checkout);

        let latency = record.combined_latency();

        if latency.is_some_and(|s| s > SLOW_REQUEST_SECS) {
            state.slow.requests += 1;
            if status >= SLOW_FAILURE_STATUS_FLOOR {
                state.slow.failed += 1;
            }
        }

        let positive = latency.filter(|s| *s > 0.0);

        if status >= ERROR_STATUS_FLOOR {
            record_error(state, &checkout, status);
            if let Some(seconds) = positive {
                state.error_latencies.push(seconds);
            }
        } else if let Some(seconds) = positive {
            state.success_latencies.push(seconds);
        }
    }

    pub fn state(&self) -> &AggregateState {
        &self.state
    }

    pub fn finish(self) -> AggregateState {
        self.state
    }
}

fn bucket<'m>(map: &'m mut FastMap<String, TrafficCounts>, key: &str) -> &'m mut TrafficCounts {
    map.entry(key.to_owned()).or_default()
}

fn record_checkout(state: &mut AggregateState, checkout: &ClassifiedRecord<'_>) {
    let record = checkout.record;

    state.checkout_requests += 1;
    bucket(&mut state.by_date, record.date()).checkout += 1;
    bucket(&mut state.by_hour, record.hour()).checkout += 1;

    state
        .by_funnel_stage
        .entry(checkout.funnel_stage)
        .or_default()
        .requests += 1;
    state
        .by_pattern_category
        .entry(checkout.pattern_category)
        .or_default()
        .requests += 1;

    if checkout.is_bot {
        state.bot.requests += 1;
    } else {
        state.human.requests += 1;
    }
    if checkout.is_mobile {
        state.mobile.requests += 1;
    } else {
        state.desktop.requests += 1;
    }
}

fn record_error(state: &mut AggregateState, checkout: &ClassifiedRecord<'_>, status: u16) {
    let record = checkout.record;
    let clean_url = checkout.clean_url();

    state.checkout_errors += 1;
    bucket(&mut state.by_date, record.date()).errors += 1;
    bucket(&mut state.by_hour, record.hour()).errors += 1;

    let stage = state.by_funnel_stage.entry(checkout.funnel_stage).or_default();
    stage.errors += 1;
    *stage.error_urls.entry(clean_url.to_owned()).or_insert(0) += 1;

    let category = state
        .by_pattern_category
        .entry(checkout.pattern_category)
        .or_default();
    category.errors += 1;
    *category.error_urls.entry(clean_url.to_owned()).or_insert(0) += 1;

    *state.by_status_code.entry(status).or_insert(0) += 1;
    *state
        .by_stage_and_status
        .entry(checkout.funnel_stage)
        .or_default()
        .entry(status)
        .or_insert(0) += 1;

    if checkout.is_bot {
        state.bot.errors += 1;
        state.bot_error_user_agents.insert(ellipsize(
            &record.user_agent,
            BOT_USER_AGENT_DISPLAY_CHARS,
        ));
    } else {
        state.human.errors += 1;
    }
    if checkout.is_mobile {
        state.mobile.errors += 1;
    } else {
        state.desktop.errors += 1;
    }

    *state.error_urls.entry(clean_url.to_owned()).or_insert(0) += 1;
    *state
        .error_user_agents
        .entry(ellipsize(&record.user_agent, USER_AGENT_DISPLAY_CHARS))
        .or_insert(0) += 1;
}

/// Keeps the first `max_chars` characters and appends `...` when cut.
pub fn ellipsize(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
