use crate::classify::taxonomy::first_match;
use serde::Serialize;
use std::fmt;

/// Finest-grained checkout phase of a URL.
///
/// Variant order is the evaluation order of [`FUNNEL_STAGE_CHAIN`] and also
/// the tie-break order of report tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FunnelStage {
    CartOperations,
    CheckoutInitiation,
    ShippingAddress,
    PaymentProcessing,
    OrderCompletion,
    AccountAuthentication,
    GeneralCheckout,
    OtherEcommerce,
}

/// First match wins. Do not reorder.
pub const FUNNEL_STAGE_CHAIN: &[(FunnelStage, &[&str])] = &[
    (
        FunnelStage::CartOperations,
        &["cart", "basket", "bag", "shopping-cart"],
    ),
    (
        FunnelStage::CheckoutInitiation,
        &["checkout/start", "checkout/begin", "checkout/init"],
    ),
    (
        FunnelStage::ShippingAddress,
        &["shipping", "delivery", "address"],
    ),
    (
        FunnelStage::PaymentProcessing,
        &["payment", "pay", "billing", "paypal", "stripe", "credit"],
    ),
    (
        FunnelStage::OrderCompletion,
        &["success", "complete", "confirmation", "receipt", "thank"],
    ),
    (
        FunnelStage::AccountAuthentication,
        &["login", "register", "account", "signup"],
    ),
    (FunnelStage::GeneralCheckout, &["checkout"]),
];

impl FunnelStage {
    pub const ALL: [FunnelStage; 8] = [
        FunnelStage::CartOperations,
        FunnelStage::CheckoutInitiation,
        FunnelStage::ShippingAddress,
        FunnelStage::PaymentProcessing,
        FunnelStage::OrderCompletion,
        FunnelStage::AccountAuthentication,
        FunnelStage::GeneralCheckout,
        FunnelStage::OtherEcommerce,
    ];

    pub fn of(url: &str) -> Self {
        first_match(&url.to_lowercase(), FUNNEL_STAGE_CHAIN).unwrap_or(FunnelStage::OtherEcommerce)
    }

    pub fn label(self) -> &'static str {
        match self {
            FunnelStage::CartOperations => "Cart Operations",
            FunnelStage::CheckoutInitiation => "Checkout Initiation",
            FunnelStage::ShippingAddress => "Shipping/Address",
            FunnelStage::PaymentProcessing => "Payment Processing",
            FunnelStage::OrderCompletion => "Order Completion",
            FunnelStage::AccountAuthentication => "Account/Authentication",
            FunnelStage::GeneralCheckout => "General Checkout",
            FunnelStage::OtherEcommerce => "Other E-commerce",
        }
    }
}

impl fmt::Display for FunnelStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Coarser grouping used by the pattern breakdown. Its boundaries differ
/// from [`FunnelStage`]: fragments here are mostly slash-delimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternCategory {
    ShoppingCart,
    PaymentProcessing,
    OrderCompletion,
    CheckoutProcess,
    OtherCheckout,
}

/// First match wins. Do not reorder.
pub const PATTERN_CATEGORY_CHAIN: &[(PatternCategory, &[&str])] = &[
    (
        PatternCategory::ShoppingCart,
        &[
            "/cart/",
            "cart/add",
            "cart/update",
            "cart/remove",
            "/basket/",
            "/bag/",
        ],
    ),
    (
        PatternCategory::PaymentProcessing,
        &[
            "paypal",
            "stripe",
            "amazon-pay",
            "apple-pay",
            "google-pay",
            "klarna",
            "afterpay",
            "affirm",
            "/payment/",
            "/pay/",
            "/billing/",
            "credit-card",
        ],
    ),
    (
        PatternCategory::OrderCompletion,
        &[
            "/order/",
            "/orders/",
            "order/success",
            "order/complete",
            "checkout/success",
            "thank-you",
            "thankyou",
            "receipt",
            "confirmation",
        ],
    ),
    (
        PatternCategory::CheckoutProcess,
        &["/checkout/", "checkout/", "onepage", "guest-checkout"],
    ),
];

impl PatternCategory {
    pub const ALL: [PatternCategory; 5] = [
        PatternCategory::ShoppingCart,
        PatternCategory::PaymentProcessing,
        PatternCategory::OrderCompletion,
        PatternCategory::CheckoutProcess,
        PatternCategory::OtherCheckout,
    ];

    pub fn of(url: &str) -> Self {
        first_match(&url.to_lowercase(), PATTERN_CATEGORY_CHAIN)
            .unwrap_or(PatternCategory::OtherCheckout)
    }

    pub fn label(self) -> &'static str {
        match self {
            PatternCategory::ShoppingCart => "Shopping Cart",
            PatternCategory::PaymentProcessing => "Payment Processing",
            PatternCategory::OrderCompletion => "Order Completion",
            PatternCategory::CheckoutProcess => "Checkout Process",
            PatternCategory::OtherCheckout => "Other Checkout",
        }
    }
}

impl fmt::Display for PatternCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}
