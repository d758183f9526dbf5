//! Outbound adapters implementing domain ports.

mod simulated_users_api;

pub use simulated_users_api::{
    DEFAULT_CREATE_DELAY, DEFAULT_LIST_DELAY, SimulatedLatency, SimulatedUsersApi,
};
