#![forbid(unsafe_code)]

pub mod error;
pub mod sessions;

pub use drill_core::Clock;
pub use sessions as session;

pub use error::SessionError;

pub use sessions::{
    Advance, AttemptStatus, DrillLoopService, DrillRequest, DrillSource, QuestionGenerator,
    Rejection, SessionEngine, SessionProgress, SessionSnapshot, SessionSummary, SubmitOutcome,
    TickOutcome,
};
