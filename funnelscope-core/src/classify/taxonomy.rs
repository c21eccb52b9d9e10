/// URL fragments that mark a request as part of the checkout flow.
pub const CHECKOUT_FRAGMENTS: &[&str] = &[
    // Shopping cart operations
    "/cart/",
    "/shopping-cart/",
    "/basket/",
    "/bag/",
    "checkout/cart",
    "cart/add",
    "cart/update",
    "cart/remove",
    // Checkout process
    "/checkout/",
    "checkout/",
    "onepage",
    "guest-checkout",
    "checkout/onepage",
    "checkout/success",
    "checkout/complete",
    "checkout/review",
    "checkout/billing",
    "checkout/shipping",
    "checkout/payment",
    // Payment gateways
    "/payment/",
    "/pay/",
    "paypal",
    "stripe",
    "amazon-pay",
    "amazonpay",
    "apple-pay",
    "applepay",
    "google-pay",
    "googlepay",
    "klarna",
    "afterpay",
    "affirm",
    "/billing/",
    "credit-card",
    "creditcard",
    // Order completion and confirmation
    "/order/",
    "/orders/",
    "order/success",
    "order/complete",
    "order/confirmation",
    "order-confirmation",
    "checkout/success",
    "thank-you",
    "thankyou",
    "receipt",
    "order-receipt",
];

/// Crawlers, monitoring tools and generic HTTP clients.
///
/// Plain substring matching: `java` also hits any user agent that merely
/// contains it inside a longer token, and unlisted bots pass as humans.
pub const BOT_KEYWORDS: &[&str] = &[
    "bot",
    "crawler",
    "spider",
    "scraper",
    "curl",
    "wget",
    "python",
    "java",
    "http_request",
    "postman",
    "insomnia",
    "user-agent",
    "test",
    "monitor",
    "uptime",
    "pingdom",
    "datadog",
    "newrelic",
    "googlebot",
    "bingbot",
    "facebookexternalhit",
    "twitterbot",
    "linkedinbot",
    "whatsapp",
    "telegram",
];

/// Device and platform tokens.
pub const MOBILE_KEYWORDS: &[&str] = &["mobile", "android", "iphone", "ipad", "tablet", "phone"];

/// True if `url` contains any checkout fragment, ignoring case.
pub fn is_checkout_related(url: &str) -> bool {
    contains_any(&url.to_lowercase(), CHECKOUT_FRAGMENTS)
}

/// `haystack` must already be lowercase.
pub(crate) fn contains_any(haystack: &str, fragments: &[&str]) -> bool {
    fragments.iter().any(|fragment| haystack.contains(fragment))
}

/// Walks an ordered `(label, fragments)` chain and returns the first label
/// with a fragment contained in `haystack` (already lowercase).
pub(crate) fn first_match<L: Copy>(haystack: &str, chain: &[(L, &[&str])]) -> Option<L> {
    chain
        .iter()
        .find(|(_, fragments)| contains_any(haystack, fragments))
        .map(|(label, _)| *label)
}
