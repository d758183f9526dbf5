//! Application configuration loaded via OrthoConfig.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::FetchPolicy;
use crate::outbound::SimulatedLatency;

/// Tunables for the simulated data layer and the user store.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USER_DIRECTORY")]
pub struct AppSettings {
    /// Milliseconds a list call takes to answer.
    #[ortho_config(default = 800)]
    pub list_delay_ms: u64,
    /// Milliseconds a create call takes to answer.
    #[ortho_config(default = 500)]
    pub create_delay_ms: u64,
    /// Share one in-flight fetch between overlapping callers. Unset means
    /// off.
    pub single_flight_fetch: Option<bool>,
}

impl AppSettings {
    /// Delays for the simulated data layer.
    #[must_use]
    pub const fn latency(&self) -> SimulatedLatency {
        SimulatedLatency {
            list: Duration::from_millis(self.list_delay_ms),
            create: Duration::from_millis(self.create_delay_ms),
        }
    }

    /// Overlapping-fetch policy for the user store.
    #[must_use]
    pub const fn fetch_policy(&self) -> FetchPolicy {
        match self.single_flight_fetch {
            Some(true) => FetchPolicy::SingleFlight,
            Some(false) | None => FetchPolicy::Permissive,
        }
    }
}
