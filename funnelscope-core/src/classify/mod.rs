//! Checkout taxonomy: which URLs belong to the checkout flow, which funnel
//! stage and pattern category they fall in, and what kind of client sent
//! them.
//!
//! Every decision here is a case-insensitive substring test against a fixed
//! fragment list. Stage and category are resolved by ordered chains where
//! the first matching row wins, so `/cart/payment-retry` is a cart operation
//! and not a payment one.

mod record;
mod stage;
mod taxonomy;
#[cfg(test)]
mod tests;
mod traffic;

pub use record::*;
pub use stage::*;
pub use taxonomy::{
    BOT_KEYWORDS, CHECKOUT_FRAGMENTS, MOBILE_KEYWORDS, is_checkout_related,
};
pub use traffic::*;
