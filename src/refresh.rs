//! Auto-refresh scheduling.
//!
//! Surfaces that auto-refresh re-issue a fetch after the current refresh
//! interval elapses. The timer is one-shot: scheduling replaces any armed
//! timer, a zero interval disables refresh entirely, and cancellation is
//! immediate.

use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// One-shot refresh timer.
///
/// # Example
///
/// ```ignore
/// let mut timer = RefreshTimer::new();
/// timer.schedule(surface.refresh_interval_ms(), move || reload());
/// ```
#[derive(Default)]
pub struct RefreshTimer {
    armed: Option<CancellationToken>,
}

impl RefreshTimer {
    /// Creates an idle timer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the timer to run `on_fire` after `interval_ms` milliseconds.
    ///
    /// Replaces any previously armed timer. An interval of zero means
    /// auto-refresh is disabled and leaves the timer idle.
    pub fn schedule<F>(&mut self, interval_ms: u64, on_fire: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();

        if interval_ms == 0 {
            debug!("auto-refresh disabled, not scheduling");
            return;
        }

        debug!(interval_ms, "scheduling refresh");
        let token = CancellationToken::new();
        let armed = token.clone();
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = armed.cancelled() => {}
                _ = tokio::time::sleep(Duration::from_millis(interval_ms)) => on_fire(),
            }
        });
        self.armed = Some(token);
    }

    /// Cancels the armed timer, if any.
    pub fn cancel(&mut self) {
        if let Some(token) = self.armed.take() {
            token.cancel();
        }
    }
}

impl Drop for RefreshTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
