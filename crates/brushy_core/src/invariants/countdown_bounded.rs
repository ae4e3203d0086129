//! Countdown bound invariant.

use super::Invariant;
use crate::events::EventSink;
use crate::scheduler::TickScheduler;
use crate::session::SessionController;

/// Invariant: `0 <= seconds_remaining <= session_duration_seconds`.
pub struct CountdownBoundedInvariant;

impl<S, E> Invariant<SessionController<S, E>> for CountdownBoundedInvariant
where
    S: TickScheduler,
    E: EventSink,
{
    fn holds(session: &SessionController<S, E>) -> bool {
        session.seconds_remaining() <= *session.config().session_duration_seconds()
    }

    fn description() -> &'static str {
        "Countdown stays within the configured session length"
    }
}
