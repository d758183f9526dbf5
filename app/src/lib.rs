//! User directory library modules.
//!
//! A client-side user directory: an in-memory data layer with simulated
//! latency, a user store with cached fetch and optimistic create, and a
//! two-route navigation layer whose views drive the store.

pub mod bootstrap;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod settings;
#[cfg(test)]
pub(crate) mod test_support;

pub use bootstrap::{AppContext, AppError};
pub use settings::AppSettings;
