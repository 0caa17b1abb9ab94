//! Refresh countdown
//!
//! Publishes the minutes remaining until the next scheduled report refresh.
//! A background task recomputes the value on a fixed tick and sends it over
//! a watch channel. The task stops when the countdown is cancelled or
//! dropped, so nothing outlives its owner.

use chrono::{DateTime, Duration, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Whole minutes until `last_update + interval`, rounded up, never negative
pub fn minutes_until_refresh(last_update: DateTime<Utc>, interval: Duration, now: DateTime<Utc>) -> i64 {
    let remaining = (last_update + interval) - now;
    let seconds = remaining.num_seconds();
    if seconds <= 0 {
        0
    } else {
        (seconds + 59) / 60
    }
}

/// Periodically updated "minutes until next refresh" value
pub struct RefreshCountdown {
    receiver: watch::Receiver<i64>,
    handle: JoinHandle<()>,
}

impl RefreshCountdown {
    /// Start counting down from `last_update`. Must be called inside a
    /// tokio runtime.
    pub fn start(last_update: DateTime<Utc>, interval: Duration, tick: std::time::Duration) -> Self {
        let initial = minutes_until_refresh(last_update, interval, Utc::now());
        let (sender, receiver) = watch::channel(initial);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(tick);
            // the first tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let minutes = minutes_until_refresh(last_update, interval, Utc::now());
                if sender.send(minutes).is_err() {
                    break;
                }
            }
        });

        tracing::debug!(initial, "refresh countdown started");
        Self { receiver, handle }
    }

    /// Latest published value
    pub fn minutes(&self) -> i64 {
        *self.receiver.borrow()
    }

    /// Receiver that is notified on every recomputation
    pub fn subscribe(&self) -> watch::Receiver<i64> {
        self.receiver.clone()
    }

    /// Stop the background task; the last value stays readable
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for RefreshCountdown {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
