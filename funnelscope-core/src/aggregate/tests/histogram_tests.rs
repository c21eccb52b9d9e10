use crate::aggregate::{Histogram, LATENCY_BUCKETS_MS, percentile_from_histogram};
use pretty_assertions::assert_eq;

#[test]
fn samples_land_in_inclusive_buckets() {
    // Arrange
    let mut histogram = Histogram::new(LATENCY_BUCKETS_MS);

    // Act
    histogram.record(50);
    histogram.record(51);
    histogram.record(10_001);

    // Assert
    let snapshot = histogram.snapshot();
    assert_eq!(snapshot.len(), LATENCY_BUCKETS_MS.len() + 1);
    assert_eq!(snapshot[0].label, "0–50ms");
    assert_eq!(snapshot[0].count, 1);
    assert_eq!(snapshot[1].label, "51–100ms");
    assert_eq!(snapshot[1].count, 1);
    assert_eq!(snapshot[8].label, ">10000ms");
    assert_eq!(snapshot[8].count, 1);
    assert_eq!(histogram.total(), 3);
}

#[test]
fn seconds_are_rounded_to_milliseconds() {
    // Act
    let histogram = Histogram::from_seconds(&[0.0504, 0.0506]);

    // Assert
    let counts: Vec<u64> = histogram.numeric_buckets().iter().map(|(_, c)| *c).collect();
    assert_eq!(counts[0], 1);
    assert_eq!(counts[1], 1);
}

#[test]
fn percentile_is_bucket_upper_bound() {
    // Arrange
    let mut histogram = Histogram::new(LATENCY_BUCKETS_MS);
    for _ in 0..95 {
        histogram.record(20);
    }
    for _ in 0..5 {
        histogram.record(700);
    }
    let buckets = histogram.numeric_buckets();

    // Act / Assert
    assert_eq!(percentile_from_histogram(&buckets, 100, 0.95), 50);
    assert_eq!(percentile_from_histogram(&buckets, 100, 0.99), 1000);
}

#[test]
fn percentile_in_overflow_bucket_is_past_the_last_bound() {
    // Arrange
    let mut histogram = Histogram::new(LATENCY_BUCKETS_MS);
    histogram.record(60_000);

    // Act
    let p99 = percentile_from_histogram(&histogram.numeric_buckets(), 1, 0.99);

    // Assert
    assert_eq!(p99, 10_001);
}

#[test]
fn percentile_of_empty_histogram_is_zero() {
    let histogram = Histogram::new(LATENCY_BUCKETS_MS);
    assert_eq!(percentile_from_histogram(&histogram.numeric_buckets(), 0, 0.95), 0);
}
