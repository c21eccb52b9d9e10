use funnelscope_core::classify::FunnelStage;
use funnelscope_core::cli::analyze::{AnalyzeArgs, analyze, run_analyze};
use funnelscope_core::conf::{AnalyzerConfig, ReportFormat};
use funnelscope_core::report::{TextReport, render};
use integration_tests::harness::{Entry, LogDir};
use pretty_assertions::assert_eq;
use std::fs;

fn config_for(logs: &LogDir) -> AnalyzerConfig {
    let mut config = AnalyzerConfig::default();
    config.input.dir = logs.path().to_path_buf();
    config
}

/// A failing payment and a home page hit: one checkout request, one error.
#[test]
fn payment_failure_is_reported() {
    // Arrange
    let logs = LogDir::new();
    logs.write(
        "shop_20240301T1000Z_a.log",
        &[
            Entry::get("/checkout/payment")
                .status(502)
                .latencies(0.1, 0.3, 0.1),
            Entry::get("/home"),
        ],
    );

    // Act
    let report = analyze(&config_for(&logs)).unwrap();

    // Assert
    assert_eq!(report.summary.total_requests, 2);
    assert_eq!(report.summary.checkout_requests, 1);
    assert_eq!(report.summary.checkout_errors, 1);
    assert_eq!(report.summary.checkout_error_rate, 100.0);
    assert_eq!(report.funnel_stages.len(), 1);
    assert_eq!(report.funnel_stages[0].bucket, FunnelStage::PaymentProcessing);
    assert_eq!(report.funnel_stages[0].errors, 1);
    assert_eq!(report.error_types.status_codes[0].status, 502);
    assert_eq!(report.error_types.status_codes[0].errors, 1);

    let error_latency = report.latency.error.as_ref().unwrap();
    assert!((error_latency.mean_secs - 0.5).abs() < 1e-9);
    assert!(report.latency.success.is_none());
}

#[test]
fn unanswered_requests_count_only_toward_totals() {
    // Arrange
    let logs = LogDir::new();
    logs.write(
        "a.log",
        &[
            Entry::get("/checkout/shipping").unanswered(),
            Entry::get("/checkout/shipping"),
        ],
    );

    // Act
    let report = analyze(&config_for(&logs)).unwrap();

    // Assert
    assert_eq!(report.summary.total_requests, 2);
    assert_eq!(report.summary.analyzable_requests, 1);
    assert_eq!(report.summary.checkout_requests, 1);
    assert_eq!(report.summary.checkout_errors, 0);
}

#[test]
fn garbage_lines_do_not_stop_the_scan() {
    // Arrange
    let logs = LogDir::new();
    let good = Entry::get("/cart/add").line();
    logs.write_raw(
        "mixed.log",
        &format!("{good}\n\"unterminated\n\n{good}\nhttps 2024 only-three\n"),
    );

    // Act
    let report = analyze(&config_for(&logs)).unwrap();

    // Assert
    assert_eq!(report.meta.scan.lines, 5);
    assert_eq!(report.meta.scan.parsed, 2);
    assert_eq!(report.meta.scan.unparseable, 3);
    assert_eq!(report.summary.checkout_requests, 2);
}

#[test]
fn daily_trend_follows_the_error_rate() {
    // Arrange
    let logs = LogDir::new();
    let day = |date: &str, errors: usize| -> Vec<Entry> {
        (0..10)
            .map(|i| {
                let entry = Entry::get("/checkout/review").at(&format!("{date}T12:00:00.000000Z"));
                if i < errors { entry.status(500) } else { entry }
            })
            .collect()
    };
    logs.write("shop_20240301T0000Z_a.log", &day("2024-03-01", 1));
    logs.write("shop_20240302T0000Z_a.log", &day("2024-03-02", 1));
    logs.write("shop_20240303T0000Z_a.log", &day("2024-03-03", 3));
    logs.write("shop_20240304T0000Z_a.log", &day("2024-03-04", 0));

    // Act
    let report = analyze(&config_for(&logs)).unwrap();

    // Assert
    let trends: Vec<&str> = report
        .daily
        .iter()
        .map(|row| row.trend.map_or("", |t| t.label()))
        .collect();
    assert_eq!(trends, vec!["", "STABLE", "WORSE", "BETTER"]);

    let range = report.meta.date_range.unwrap();
    assert_eq!(range.days, 4);
}

#[test]
fn text_and_json_renderings_agree() {
    // Arrange
    let logs = LogDir::new();
    logs.write(
        "a.log",
        &[
            Entry::get("/checkout/payment").status(503),
            Entry::get("/checkout/payment").user_agent("Googlebot/2.1"),
        ],
    );
    let report = analyze(&config_for(&logs)).unwrap();

    // Act
    let text = TextReport(&report).to_string();
    let json = render(&report, ReportFormat::Json).unwrap();

    // Assert
    assert!(text.contains("Checkout error rate: 50.00%"));
    assert!(text.contains("503: 1 errors - Service Unavailable - Server overloaded"));
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["summary"]["checkout_error_rate"], 50.0);
    assert_eq!(value["traffic"]["bot"]["requests"], 1);
}

#[test]
fn output_file_is_replaced_by_the_report() {
    // Arrange
    let logs = LogDir::new();
    logs.write("a.log", &[Entry::get("/order/confirmation")]);
    let out_dir = tempfile::tempdir().unwrap();
    let output = out_dir.path().join("report.json");
    fs::write(&output, "stale content that is much longer than nothing").unwrap();

    let args = AnalyzeArgs {
        log_dir: Some(logs.path().to_path_buf()),
        output: Some(output.clone()),
        format: Some(ReportFormat::Json),
        ..AnalyzeArgs::default()
    };

    // Act
    run_analyze(args).unwrap();

    // Assert
    let written = fs::read_to_string(&output).unwrap();
    assert!(!written.contains("stale"));
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value["summary"]["checkout_requests"], 1);
}

#[test]
fn config_file_is_applied_and_flags_win() {
    // Arrange
    let logs = LogDir::new();
    logs.write("a.txt", &[Entry::get("/cart/add")]);
    logs.write("b.log", &[Entry::get("/cart/add"), Entry::get("/cart/add")]);

    let conf_dir = tempfile::tempdir().unwrap();
    let conf = conf_dir.path().join("funnelscope.hcl");
    fs::write(
        &conf,
        format!(
            "input {{\n  dir = \"{}\"\n  pattern = \"*.txt\"\n}}\n\nscan {{\n  jobs = 2\n}}\n",
            logs.path().display()
        ),
    )
    .unwrap();
    let output = conf_dir.path().join("report.txt");

    let args = AnalyzeArgs {
        config: Some(conf),
        pattern: Some("*.log".to_string()),
        output: Some(output.clone()),
        ..AnalyzeArgs::default()
    };

    // Act
    run_analyze(args).unwrap();

    // Assert
    let written = fs::read_to_string(&output).unwrap();
    assert!(written.contains("Checkout-related requests: 2"));
}

#[test]
fn missing_log_directory_is_an_error() {
    // Arrange
    let logs = LogDir::new();
    let args = AnalyzeArgs {
        log_dir: Some(logs.path().join("nope")),
        ..AnalyzeArgs::default()
    };

    // Act
    let err = run_analyze(args).unwrap_err();

    // Assert
    assert!(err.to_string().contains("does not exist"));
}
