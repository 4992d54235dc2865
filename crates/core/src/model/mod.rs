mod answer;
mod ids;
mod question;

pub use answer::Answer;
pub use ids::{ParseIdError, SessionId};
pub use question::{OptionLabel, ParseLabelError, Question, QuestionError};
