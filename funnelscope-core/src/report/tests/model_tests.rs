use crate::aggregate::{AggregateState, AggregationEngine};
use crate::classify::FunnelStage;
use crate::elb::parse_line;
use crate::report::{ErrorStatusRow, Report, ReportMeta, status_description};
use crate::scan::ScanStats;
use crate::test_helpers::LineBuilder;
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use std::path::PathBuf;

pub(super) fn meta() -> ReportMeta {
    ReportMeta {
        generated_at: Utc.with_ymd_and_hms(2024, 3, 8, 9, 30, 0).unwrap(),
        log_dir: PathBuf::from("elb-logs"),
        output_file: None,
        scan: ScanStats {
            files: 1,
            lines: 3,
            parsed: 2,
            unparseable: 1,
        },
        date_range: None,
    }
}

pub(super) fn sample_state() -> AggregateState {
    let lines = [
        LineBuilder::new()
            .path("/checkout/payment")
            .status(502)
            .latencies("0.1", "0.3", "0.1")
            .build(),
        LineBuilder::new().path("/home").build(),
    ];
    let mut engine = AggregationEngine::new();
    for line in &lines {
        engine.ingest(&parse_line(line).unwrap());
    }
    engine.finish()
}

#[test]
fn report_collects_every_table() {
    // Arrange
    let state = sample_state();

    // Act
    let report = Report::assemble(&state, meta());

    // Assert
    assert_eq!(report.summary.total_requests, 2);
    assert_eq!(report.summary.checkout_requests, 1);
    assert_eq!(report.summary.checkout_errors, 1);
    assert_eq!(report.summary.checkout_error_rate, 100.0);
    assert_eq!(report.summary.checkout_share, 50.0);
    assert_eq!(report.funnel_stages[0].bucket, FunnelStage::PaymentProcessing);
    assert_eq!(
        report.error_types.status_codes,
        vec![ErrorStatusRow {
            status: 502,
            errors: 1,
            description: "Bad Gateway - Upstream server error",
        }]
    );
    assert_eq!(report.daily.len(), 1);
    assert_eq!(report.hourly.len(), 1);
    assert_eq!(report.latency.error.as_ref().map(|s| s.count), Some(1));
}

#[test]
fn report_of_empty_state_is_all_zero() {
    // Act
    let report = Report::assemble(&AggregateState::new(), meta());

    // Assert
    assert_eq!(report.summary.checkout_error_rate, 0.0);
    assert!(report.pattern_categories.is_empty());
    assert!(report.error_types.status_codes.is_empty());
    assert_eq!(report.latency.success, None);
}

#[test]
fn unknown_status_codes_get_a_generic_description() {
    assert_eq!(status_description(599), "Unknown error");
    assert_eq!(status_description(504), "Gateway Timeout - Upstream timeout");
}
