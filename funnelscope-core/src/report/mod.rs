//! Turns a finished [`AggregateState`](crate::aggregate::AggregateState)
//! into a [`Report`] and renders it as text or JSON.

mod model;
mod render;
mod status;
#[cfg(test)]
mod tests;

pub use model::*;
pub use render::*;
pub use status::status_description;
