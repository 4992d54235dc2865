mod lifecycle;
mod plan;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::LifecycleRejection;
pub use lifecycle::{DisplayPhase, LoadTicket, QuizLifecycle};
pub use plan::{QuestionSampler, sample_without_replacement};
pub use workflow::QuizLoopService;
