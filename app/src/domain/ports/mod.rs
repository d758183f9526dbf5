//! Domain ports and supporting types for the hexagonal boundary.

mod latency;
mod users_api;

pub use latency::{ImmediateSleeper, LatencySleeper, TokioSleeper};
#[cfg(test)]
pub use users_api::MockUsersApi;
pub use users_api::{FixtureUsersApi, UsersApi, UsersApiError, seed_users};
