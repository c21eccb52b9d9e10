use crate::aggregate::{
    BreakdownRow, ClassRow, LATENCY_BUCKETS_MS, SLOW_REQUEST_SECS, SampleStats,
    TOP_ERROR_URLS, TOP_ERROR_USER_AGENTS,
};
use crate::classify::CHECKOUT_FRAGMENTS;
use crate::conf::ReportFormat;
use crate::report::model::Report;
use std::fmt::{self, Display};

const TITLE_RULE: usize = 60;
const SECTION_RULE: usize = 50;

/// Fragments listed under the pattern breakdown.
const SHOWN_FRAGMENTS: usize = 8;

pub fn render(report: &Report, format: ReportFormat) -> serde_json::Result<String> {
    match format {
        ReportFormat::Text => Ok(TextReport(report).to_string()),
        ReportFormat::Json => render_json(report),
    }
}

pub fn render_json(report: &Report) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

/// Plain text rendering of a [`Report`], one section after another.
pub struct TextReport<'a>(pub &'a Report);

impl Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;

        write_header(f, report)?;
        write_date_range(f, report)?;
        write_summary(f, report)?;
        write_pattern_breakdown(f, report)?;
        write_funnel_stages(f, report)?;
        write_daily(f, report)?;
        write_hourly(f, report)?;
        write_traffic(f, report)?;
        write_error_types(f, report)?;
        write_performance(f, report)?;

        writeln!(f, "Analysis complete!")
    }
}

fn section(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f, "{title}:")?;
    writeln!(f, "{}", "=".repeat(SECTION_RULE))
}

fn table_header(f: &mut fmt::Formatter<'_>, header: &str, width: usize) -> fmt::Result {
    writeln!(f, "{header}")?;
    writeln!(f, "{}", "-".repeat(width))
}

fn write_header(f: &mut fmt::Formatter<'_>, report: &Report) -> fmt::Result {
    let meta = &report.meta;

    writeln!(f, "E-Commerce Checkout & Cart Error Analysis")?;
    writeln!(f, "{}", "=".repeat(TITLE_RULE))?;
    writeln!(f, "Date: {}", meta.generated_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
    writeln!(f, "Log directory: {}", meta.log_dir.display())?;
    if let Some(output) = &meta.output_file {
        writeln!(f, "Output file: {}", output.display())?;
    }
    writeln!(
        f,
        "Processed {} log lines from {} files, parsed {} valid entries ({} unparseable)",
        thousands(meta.scan.lines),
        thousands(meta.scan.files as u64),
        thousands(meta.scan.parsed),
        thousands(meta.scan.unparseable),
    )?;
    writeln!(f)
}

fn write_date_range(f: &mut fmt::Formatter<'_>, report: &Report) -> fmt::Result {
    section(f, "DATA RANGE ANALYSIS")?;

    match &report.meta.date_range {
        Some(range) => {
            writeln!(f, "First day in data: {}", range.first.format("%Y-%m-%d"))?;
            writeln!(f, "Last day in data: {}", range.last.format("%Y-%m-%d"))?;
            writeln!(f, "Total days analyzed: {}", range.days)?;
        }
        None => writeln!(f, "Could not determine date range from filenames")?,
    }
    writeln!(f)
}

fn write_summary(f: &mut fmt::Formatter<'_>, report: &Report) -> fmt::Result {
    let summary = &report.summary;
    section(f, "CHECKOUT ERROR SUMMARY")?;

    writeln!(f, "Total requests: {}", thousands(summary.total_requests))?;
    writeln!(
        f,
        "Checkout-related requests: {} ({:.2}% of all traffic)",
        thousands(summary.checkout_requests),
        summary.checkout_share
    )?;
    writeln!(f, "Checkout errors (5xx): {}", thousands(summary.checkout_errors))?;
    writeln!(f, "Checkout error rate: {:.2}%", summary.checkout_error_rate)?;
    writeln!(f)?;

    if summary.checkout_errors > 0 {
        writeln!(f, "Error breakdown:")?;
        writeln!(
            f,
            "  5xx Server Errors: {} (100.0%)",
            thousands(summary.checkout_errors)
        )?;
        writeln!(f)?;
    }

    if !summary.top_error_urls.is_empty() {
        writeln!(f, "Top {TOP_ERROR_URLS} problematic checkout URLs:")?;
        for url in &summary.top_error_urls {
            writeln!(f, "  {:>4} {}", url.errors, url.url)?;
        }
        writeln!(f)?;
    }
    Ok(())
}

fn write_pattern_breakdown(f: &mut fmt::Formatter<'_>, report: &Report) -> fmt::Result {
    section(f, "CHECKOUT PATTERN BREAKDOWN")?;
    table_header(
        f,
        &format!(
            "{:<20} {:<12} {:<8} {:<12} Status",
            "Checkout Stage", "Requests", "Errors", "Error Rate"
        ),
        70,
    )?;

    if report.pattern_categories.is_empty() {
        writeln!(f, "No checkout-related requests found")?;
    }
    for row in &report.pattern_categories {
        write_breakdown_row(f, row, 20, 12)?;
        for url in &row.top_urls {
            writeln!(f, "    {:>4} {}", url.errors, url.url)?;
        }
        writeln!(f)?;
    }

    let shown = &CHECKOUT_FRAGMENTS[..SHOWN_FRAGMENTS.min(CHECKOUT_FRAGMENTS.len())];
    writeln!(f, "Checkout patterns used: {}...", shown.join(", "))?;
    writeln!(f)
}

fn write_funnel_stages(f: &mut fmt::Formatter<'_>, report: &Report) -> fmt::Result {
    section(f, "CHECKOUT FUNNEL ERROR BREAKDOWN")?;
    table_header(
        f,
        &format!(
            "{:<25} {:<10} {:<8} {:<10} Status",
            "Funnel Stage", "Requests", "Errors", "Error Rate"
        ),
        65,
    )?;

    for row in &report.funnel_stages {
        write_breakdown_row(f, row, 25, 10)?;
    }
    writeln!(f)
}

fn write_breakdown_row<L: Display>(
    f: &mut fmt::Formatter<'_>,
    row: &BreakdownRow<L>,
    label_width: usize,
    requests_width: usize,
) -> fmt::Result {
    writeln!(
        f,
        "{:<label_width$} {:<requests_width$} {:<8} {:>6.2}%     {}",
        row.bucket,
        thousands(row.requests),
        row.errors,
        row.error_rate,
        row.severity.label(),
    )
}

fn write_daily(f: &mut fmt::Formatter<'_>, report: &Report) -> fmt::Result {
    section(f, "DAILY CHECKOUT ERROR TRENDS")?;
    table_header(
        f,
        &format!(
            "{:<12} {:<10} {:<10} {:<8} {:<10} Trend",
            "Date", "Total Req", "Checkout", "Errors", "Error Rate"
        ),
        65,
    )?;

    for row in &report.daily {
        writeln!(
            f,
            "{:<12} {:<10} {:<10} {:<8} {:>6.2}%    {}",
            row.date,
            thousands(row.counts.total),
            thousands(row.counts.checkout),
            row.counts.errors,
            row.error_rate,
            row.trend.map_or("", |t| t.label()),
        )?;
    }
    writeln!(f)
}

fn write_hourly(f: &mut fmt::Formatter<'_>, report: &Report) -> fmt::Result {
    section(f, "HOURLY CHECKOUT ERROR PATTERNS")?;
    table_header(
        f,
        &format!(
            "{:<6} {:<12} {:<12} {:<11} {:<10} Status",
            "Hour", "Avg Req/Hr", "Avg Checkout", "Avg Errors", "Error Rate"
        ),
        70,
    )?;

    for row in &report.hourly {
        writeln!(
            f,
            "{}:00 {:<12.1} {:<12.1} {:<11.1} {:>7.2}%   {}",
            row.hour,
            row.avg_total,
            row.avg_checkout,
            row.avg_errors,
            row.error_rate,
            row.severity.label(),
        )?;
    }
    writeln!(f)
}

fn write_traffic(f: &mut fmt::Formatter<'_>, report: &Report) -> fmt::Result {
    let traffic = &report.traffic;
    section(f, "USER AGENT & TRAFFIC SOURCE ANALYSIS")?;

    writeln!(f, "Bots are identified by user agent strings containing keywords like:")?;
    writeln!(
        f,
        "bot, crawler, spider, scraper, googlebot, bingbot, curl, wget, python, etc."
    )?;
    writeln!(f)?;

    let bots = &traffic.bot_error_user_agents;
    if !bots.samples.is_empty() {
        writeln!(f, "Bot user agents found in checkout errors:")?;
        for ua in &bots.samples {
            writeln!(f, "  - {ua}")?;
        }
        if bots.more > 0 {
            writeln!(f, "  ... and {} more bot types", bots.more)?;
        }
        writeln!(f)?;
    }

    writeln!(f, "Bot vs Human Traffic Analysis:")?;
    write_class(f, "Bot", &traffic.sources.bot, true)?;
    write_class(f, "Human", &traffic.sources.human, true)?;
    writeln!(f)?;

    writeln!(f, "Mobile vs Desktop Analysis:")?;
    write_class(f, "Mobile", &traffic.sources.mobile, false)?;
    write_class(f, "Desktop", &traffic.sources.desktop, false)?;
    writeln!(f)?;

    if !traffic.top_error_user_agents.is_empty() {
        writeln!(f, "Top {TOP_ERROR_USER_AGENTS} User Agents Causing Checkout Errors:")?;
        for ua in &traffic.top_error_user_agents {
            let kind = if ua.is_bot { "[bot]  " } else { "[human]" };
            writeln!(f, "  {:>3} {kind} {}", ua.errors, ua.user_agent)?;
        }
        writeln!(f)?;
    }
    Ok(())
}

fn write_class(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    row: &ClassRow,
    with_share: bool,
) -> fmt::Result {
    if row.requests == 0 {
        return writeln!(f, "  {name} Traffic: 0 requests");
    }

    write!(
        f,
        "  {name} Traffic: {} requests, {} errors ({:.2}% error rate",
        thousands(row.requests),
        thousands(row.errors),
        row.error_rate
    )?;
    if with_share {
        write!(f, ", {:.1}% of all errors", row.share_of_errors)?;
    }
    writeln!(f, ")")
}

fn write_error_types(f: &mut fmt::Formatter<'_>, report: &Report) -> fmt::Result {
    let errors = &report.error_types;
    section(f, "CHECKOUT ERROR TYPE ANALYSIS")?;

    if !errors.status_codes.is_empty() {
        writeln!(f, "5xx Server Errors (backend/infrastructure issues):")?;
        for row in &errors.status_codes {
            writeln!(
                f,
                "  {}: {} errors - {}",
                row.status,
                thousands(row.errors),
                row.description
            )?;
        }
        writeln!(f)?;
    }

    if !errors.by_stage.is_empty() {
        writeln!(f, "Error codes by checkout funnel stage:")?;
        for row in &errors.by_stage {
            writeln!(f, "  {}:", row.stage)?;
            for code in &row.statuses {
                writeln!(f, "    {}: {} errors", code.status, thousands(code.errors))?;
            }
        }
        writeln!(f)?;
    }
    Ok(())
}

fn write_performance(f: &mut fmt::Formatter<'_>, report: &Report) -> fmt::Result {
    let latency = &report.latency;
    section(f, "CHECKOUT PERFORMANCE CORRELATION")?;

    if report.summary.checkout_requests == 0 {
        writeln!(f, "No checkout requests to analyze")?;
        return writeln!(f);
    }

    if latency.success_requests > 0 {
        match &latency.success {
            Some(stats) => {
                writeln!(f, "Successful checkout requests:")?;
                write_sample_stats(f, stats)?;
                writeln!(
                    f,
                    "  Total successful requests: {}",
                    thousands(latency.success_requests)
                )?;
            }
            None => writeln!(f, "No valid response times found for successful requests")?,
        }
    }

    if report.summary.checkout_errors > 0 {
        match &latency.error {
            Some(stats) => {
                writeln!(f, "Checkout error requests:")?;
                write_sample_stats(f, stats)?;
                writeln!(
                    f,
                    "  Total error requests: {}",
                    thousands(report.summary.checkout_errors)
                )?;
                match latency.error_slowdown_secs {
                    Some(diff) if diff > 0.0 => writeln!(
                        f,
                        "  Error requests are {diff:.3} seconds slower on average"
                    )?,
                    Some(_) => writeln!(f, "  Error requests are not significantly slower")?,
                    None => {}
                }
            }
            None => writeln!(f, "No valid response times found for error requests")?,
        }
    }

    write_latency_histogram(f, latency.success.as_ref(), latency.error.as_ref())?;

    if latency.slow_requests > 0 {
        writeln!(
            f,
            "Slow checkout requests (>{SLOW_REQUEST_SECS} seconds): {}",
            thousands(latency.slow_requests)
        )?;
        if latency.slow_failed > 0 {
            writeln!(
                f,
                "  Slow requests with errors: {} ({:.1}%)",
                thousands(latency.slow_failed),
                latency.slow_failure_rate
            )?;
        }
    }
    writeln!(f)
}

fn write_sample_stats(f: &mut fmt::Formatter<'_>, stats: &SampleStats) -> fmt::Result {
    writeln!(f, "  Average response time: {:.3} seconds", stats.mean_secs)?;
    writeln!(f, "  Maximum response time: {:.3} seconds", stats.max_secs)?;
    writeln!(
        f,
        "  p95 / p99: {} / {}",
        latency_bound(stats.p95_ms),
        latency_bound(stats.p99_ms)
    )
}

fn write_latency_histogram(
    f: &mut fmt::Formatter<'_>,
    success: Option<&SampleStats>,
    error: Option<&SampleStats>,
) -> fmt::Result {
    let Some(buckets) = success.or(error).map(|s| &s.histogram) else {
        return Ok(());
    };

    let count = |stats: Option<&SampleStats>, i: usize| {
        stats
            .and_then(|s| s.histogram.get(i))
            .map_or(0, |bucket| bucket.count)
    };

    writeln!(f, "Latency distribution:")?;
    writeln!(f, "  {:<14} {:>10} {:>10}", "Bucket", "Success", "Error")?;
    for (i, bucket) in buckets.iter().enumerate() {
        writeln!(
            f,
            "  {:<14} {:>10} {:>10}",
            bucket.label,
            count(success, i),
            count(error, i)
        )?;
    }
    Ok(())
}

/// Histogram percentiles are bucket bounds, not exact values.
fn latency_bound(ms: u64) -> String {
    let last = LATENCY_BUCKETS_MS.last().copied().unwrap_or(0);
    if ms > last {
        format!(">{last}ms")
    } else {
        format!("<={ms}ms")
    }
}

/// `1234567` as `1,234,567`.
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

