use std::time::Duration;

/// How long a correct answer stays on screen before moving on.
pub const CORRECT_DISPLAY_DELAY: Duration = Duration::from_millis(1000);

/// How long the shake animation runs before the input is re-armed.
pub const SHAKE_DELAY: Duration = Duration::from_millis(400);

/// Delayed transition the engine asks its driver to schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Move to the next question after a correct answer.
    AutoAdvance,
    /// Drop the retained wrong input after the first miss.
    ClearWrongInput,
}

/// Handle for one scheduled delay.
///
/// The engine keeps only the most recently issued ticket live. Delivering any
/// other ticket to [`SessionEngine::tick`](super::SessionEngine::tick) is a
/// no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerTicket {
    kind: TimerKind,
    serial: u64,
}

impl TimerTicket {
    pub(crate) fn new(kind: TimerKind, serial: u64) -> Self {
        Self { kind, serial }
    }

    #[must_use]
    pub fn kind(&self) -> TimerKind {
        self.kind
    }
}

/// A ticket together with the delay after which it should be delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTimer {
    pub ticket: TimerTicket,
    pub delay: Duration,
}

impl ScheduledTimer {
    pub(crate) fn new(kind: TimerKind, serial: u64) -> Self {
        let delay = match kind {
            TimerKind::AutoAdvance => CORRECT_DISPLAY_DELAY,
            TimerKind::ClearWrongInput => SHAKE_DELAY,
        };
        Self {
            ticket: TimerTicket::new(kind, serial),
            delay,
        }
    }
}
