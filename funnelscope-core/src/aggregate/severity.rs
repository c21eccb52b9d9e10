use serde::Serialize;

/// Day-over-day changes within this many percentage points are stable.
pub const TREND_DEADBAND_PP: f64 = 0.5;

/// Direction of the checkout error rate compared to the previous day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Worsening,
    Stable,
    Improving,
}

impl Trend {
    /// Rates are percentages.
    pub fn between(previous_rate: f64, current_rate: f64) -> Self {
        if current_rate > previous_rate + TREND_DEADBAND_PP {
            Trend::Worsening
        } else if current_rate < previous_rate - TREND_DEADBAND_PP {
            Trend::Improving
        } else {
            Trend::Stable
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Trend::Worsening => "WORSE",
            Trend::Stable => "STABLE",
            Trend::Improving => "BETTER",
        }
    }
}

/// Trend of every rate against the one before it; one shorter than `rates`.
pub fn trend_sequence(rates: &[f64]) -> Vec<Trend> {
    rates
        .windows(2)
        .map(|pair| Trend::between(pair[0], pair[1]))
        .collect()
}

/// Health of a funnel stage or pattern category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Good,
    Medium,
    High,
    Critical,
}

// (exclusive lower bound in percent, severity), highest first.
const PATTERN_CATEGORY_THRESHOLDS: [(f64, Severity); 3] = [
    (1.0, Severity::Critical),
    (0.6, Severity::High),
    (0.3, Severity::Medium),
];

const FUNNEL_STAGE_THRESHOLDS: [(f64, Severity); 3] = [
    (5.0, Severity::Critical),
    (2.0, Severity::High),
    (1.0, Severity::Medium),
];

impl Severity {
    /// Pattern-category view; tuned to typical e-commerce error rates.
    pub fn for_pattern_category(rate: f64) -> Self {
        classify_rate(rate, &PATTERN_CATEGORY_THRESHOLDS)
    }

    pub fn for_funnel_stage(rate: f64) -> Self {
        classify_rate(rate, &FUNNEL_STAGE_THRESHOLDS)
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::Good => "GOOD",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
            Severity::Critical => "CRITICAL",
        }
    }
}

fn classify_rate(rate: f64, thresholds: &[(f64, Severity)]) -> Severity {
    thresholds
        .iter()
        .find(|(floor, _)| rate > *floor)
        .map_or(Severity::Good, |(_, severity)| *severity)
}

/// Health of one hour of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HourlySeverity {
    Low,
    Medium,
    High,
}

impl HourlySeverity {
    pub fn for_rate(rate: f64) -> Self {
        if rate > 5.0 {
            HourlySeverity::High
        } else if rate > 2.0 {
            HourlySeverity::Medium
        } else {
            HourlySeverity::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HourlySeverity::Low => "LOW",
            HourlySeverity::Medium => "MEDIUM",
            HourlySeverity::High => "HIGH",
        }
    }
}
