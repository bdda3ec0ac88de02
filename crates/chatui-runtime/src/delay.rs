//! Tokio-backed delay

use std::time::Duration;

use async_trait::async_trait;
use chatui_core::Delay;

/// Sleeps on the tokio timer
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioDelay;

#[async_trait(?Send)]
impl Delay for TokioDelay {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_sleep_advances_clock() {
        let start = tokio::time::Instant::now();
        TokioDelay.sleep(Duration::from_millis(750)).await;
        assert!(start.elapsed() >= Duration::from_millis(750));
    }
}
