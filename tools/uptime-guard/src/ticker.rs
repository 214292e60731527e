//! The countdown's only suspension point

use std::time::Duration;

use async_trait::async_trait;

/// Time between two countdown notifications
pub const TICK: Duration = Duration::from_secs(60);

/// Waits out one countdown period. Swapped for a recording fake in tests so
/// a countdown finishes instantly.
#[async_trait]
pub trait Ticker: Send + Sync {
    async fn wait(&self, period: Duration);
}

/// Wall-clock ticker
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTicker;

#[async_trait]
impl Ticker for TokioTicker {
    async fn wait(&self, period: Duration) {
        tokio::time::sleep(period).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_tokio_ticker_waits_full_period() {
        let start = tokio::time::Instant::now();
        TokioTicker.wait(TICK).await;
        assert!(start.elapsed() >= TICK);
    }
}
