//! Port for simulated network latency.

use std::time::Duration;

use async_trait::async_trait;

/// Async sleep used to simulate round-trip delays.
#[async_trait]
pub trait LatencySleeper: Send + Sync {
    /// Suspend the caller for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Tokio-based sleeper used in production wiring.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl LatencySleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Sleeper that returns immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateSleeper;

#[async_trait]
impl LatencySleeper for ImmediateSleeper {
    async fn sleep(&self, _duration: Duration) {}
}
