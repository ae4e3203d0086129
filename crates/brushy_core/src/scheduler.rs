//! Countdown scheduling seam.
//!
//! The controller never sleeps. It asks a [`TickScheduler`] to deliver
//! `tick(generation)` once per period and cancels it when the session
//! leaves the running state. Ticks carrying an old generation are dropped,
//! so a tick already in flight when a session ends cannot touch the next.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Identifies one scheduled countdown.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("gen#{_0}")]
pub struct Generation(u64);

impl Generation {
    /// The generation after this one.
    pub fn next(self) -> Self {
        Generation(self.0.wrapping_add(1))
    }

    /// Raw counter value.
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Delivers recurring ticks back to the session owner.
pub trait TickScheduler {
    /// Starts delivering ticks for `generation` every `period`.
    ///
    /// Replaces any previous schedule.
    fn schedule(&mut self, generation: Generation, period: Duration);

    /// Stops delivering ticks. Idempotent.
    fn cancel(&mut self);
}

/// Scheduler that only records what was requested.
///
/// Used by tests and headless drivers that call `tick` themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualScheduler {
    active: Option<(Generation, Duration)>,
    cancellations: u32,
}

impl ManualScheduler {
    /// Creates an idle scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// The generation currently scheduled, if any.
    pub fn active(&self) -> Option<Generation> {
        self.active.map(|(generation, _)| generation)
    }

    /// The period currently scheduled, if any.
    pub fn period(&self) -> Option<Duration> {
        self.active.map(|(_, period)| period)
    }

    /// How many times a live schedule was cancelled.
    pub fn cancellations(&self) -> u32 {
        self.cancellations
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule(&mut self, generation: Generation, period: Duration) {
        self.active = Some((generation, period));
    }

    fn cancel(&mut self) {
        if self.active.take().is_some() {
            self.cancellations += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_advances() {
        let g = Generation::default();
        assert_eq!(g.next().value(), 1);
        assert_ne!(g, g.next());
        assert_eq!(g.next().to_string(), "gen#1");
    }

    #[test]
    fn test_manual_cancel_is_idempotent() {
        let mut scheduler = ManualScheduler::new();
        scheduler.schedule(Generation::default(), Duration::from_secs(1));
        assert_eq!(scheduler.period(), Some(Duration::from_secs(1)));
        scheduler.cancel();
        scheduler.cancel();
        assert_eq!(scheduler.active(), None);
        assert_eq!(scheduler.cancellations(), 1);
    }
}
