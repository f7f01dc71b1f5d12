//! Background health polling.
//!
//! Probes once immediately, then on a fixed interval. The task lives as
//! long as its [`HealthMonitor`] handle; dropping the handle aborts it so
//! a torn-down view never leaves a recurring timer behind.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::client::{ChatBackend, ConnectionStatus};
use crate::core::config::DEFAULT_HEALTH_INTERVAL_SECS;

pub struct HealthMonitor {
    handle: JoinHandle<()>,
}

impl HealthMonitor {
    /// Starts polling `backend`, reporting every probe result to `on_status`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<F>(backend: Arc<dyn ChatBackend>, interval: Duration, on_status: F) -> Self
    where
        F: Fn(ConnectionStatus) + Send + 'static,
    {
        let period = if interval.is_zero() {
            Duration::from_secs(DEFAULT_HEALTH_INTERVAL_SECS)
        } else {
            interval
        };
        info!("Starting health monitor (every {:?})", period);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                // First tick completes immediately
                ticker.tick().await;
                let status = backend.check_health().await;
                debug!("Health probe: {:?}", status);
                on_status(status);
            }
        });

        Self { handle }
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for HealthMonitor {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
