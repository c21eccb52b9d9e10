use crate::classify::{FunnelStage, PatternCategory, classify};
use crate::elb::parse_line;
use crate::test_helpers::LineBuilder;

#[test]
fn checkout_record_is_classified() {
    // Arrange
    let line = LineBuilder::new()
        .path("/checkout/payment?attempt=2")
        .user_agent("Mozilla/5.0 (iPhone)")
        .build();
    let record = parse_line(&line).unwrap();

    // Act
    let classified = classify(&record).unwrap();

    // Assert
    assert_eq!(classified.url, "/checkout/payment?attempt=2");
    assert_eq!(classified.clean_url(), "/checkout/payment");
    assert_eq!(classified.funnel_stage, FunnelStage::PaymentProcessing);
    assert_eq!(classified.pattern_category, PatternCategory::CheckoutProcess);
    assert!(!classified.is_bot);
    assert!(classified.is_mobile);
}

#[test]
fn non_checkout_record_is_not_classified() {
    // Arrange
    let record = parse_line(&LineBuilder::new().path("/home").build()).unwrap();

    // Act / Assert
    assert!(classify(&record).is_none());
}

#[test]
fn host_names_do_not_make_a_url_relevant() {
    // Arrange
    let line = LineBuilder::new()
        .target("https://paypal-shop.example:443/home")
        .build();
    let record = parse_line(&line).unwrap();

    // Act / Assert
    assert!(classify(&record).is_none());
}

#[test]
fn classification_exists_iff_url_is_relevant() {
    let paths = [
        "/cart/",
        "/checkout/",
        "/products/1",
        "/pay/now",
        "/about",
        "/orders/7",
    ];

    for path in paths {
        let record = parse_line(&LineBuilder::new().path(path).build()).unwrap();
        let url = record.url().unwrap();
        assert_eq!(
            classify(&record).is_some(),
            crate::classify::is_checkout_related(&url),
            "{path}"
        );
    }
}
