mod engine;
mod plan;
mod progress;
mod timer;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use engine::{
    Advance, AttemptStatus, Rejection, SessionEngine, SessionSummary, SubmitOutcome, TickOutcome,
};
pub use plan::{DEFAULT_SESSION_LENGTH, QuestionGenerator, generate_questions, shuffle};
pub use progress::SessionProgress;
pub use timer::{CORRECT_DISPLAY_DELAY, SHAKE_DELAY, ScheduledTimer, TimerKind, TimerTicket};
pub use view::{RevealCard, SessionSnapshot};
pub use workflow::{DrillLoopService, DrillRequest, DrillSource};
