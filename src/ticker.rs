//! Tokio-backed countdown ticker.

use std::time::Duration;

use brushy_core::{Generation, TickScheduler};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, instrument};

/// Sends the scheduled generation over a channel once per period.
///
/// Each schedule runs in its own task, aborted on [`TickScheduler::cancel`]
/// or when the ticker is dropped. Must be used inside a tokio runtime.
#[derive(Debug)]
pub struct TokioTicker {
    tx: mpsc::UnboundedSender<Generation>,
    task: Option<JoinHandle<()>>,
}

impl TokioTicker {
    /// Creates a ticker delivering into `tx`.
    pub fn new(tx: mpsc::UnboundedSender<Generation>) -> Self {
        Self { tx, task: None }
    }

    /// Creates a ticker together with the receiving end of its channel.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Generation>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    /// Whether a countdown task is live.
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl TickScheduler for TokioTicker {
    #[instrument(skip(self))]
    fn schedule(&mut self, generation: Generation, period: Duration) {
        self.cancel();
        let tx = self.tx.clone();
        self.task = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(generation).is_err() {
                    debug!(%generation, "Tick receiver gone, stopping countdown");
                    break;
                }
            }
        }));
        debug!(%generation, "Countdown scheduled");
    }

    #[instrument(skip(self))]
    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("Countdown cancelled");
        }
    }
}

impl Drop for TokioTicker {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_ticks_carry_generation() {
        let (mut ticker, mut rx) = TokioTicker::channel();
        let generation = Generation::default().next();
        ticker.schedule(generation, Duration::from_secs(1));

        assert_eq!(rx.recv().await, Some(generation));
        assert_eq!(rx.recv().await, Some(generation));
        assert!(ticker.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_ticks() {
        let (mut ticker, mut rx) = TokioTicker::channel();
        ticker.schedule(Generation::default(), Duration::from_secs(1));
        assert!(rx.recv().await.is_some());

        ticker.cancel();
        let next = tokio::time::timeout(Duration::from_secs(5), rx.recv()).await;
        assert!(next.is_err(), "no tick after cancel");
        assert!(!ticker.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_replaces_old_generation() {
        let (mut ticker, mut rx) = TokioTicker::channel();
        let first = Generation::default();
        let second = first.next();
        ticker.schedule(first, Duration::from_secs(1));
        ticker.schedule(second, Duration::from_secs(1));

        assert_eq!(rx.recv().await, Some(second));
    }
}
