#![forbid(unsafe_code)]

pub mod model;
pub mod results;
pub mod session;
pub mod time;

pub use results::{MissedQuestion, QuizResults};
pub use session::{
    AdvanceOutcome, AdvanceTicket, QuizSession, SessionProgress, SessionRejection, SessionState,
};
pub use time::Clock;
