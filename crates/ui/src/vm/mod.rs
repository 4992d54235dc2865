mod quiz_vm;
mod time_fmt;

pub use quiz_vm::{
    MissedVm, OptionState, OptionVm, QuestionVm, QuizIntent, ResultsVm, key_intent, map_question,
    map_results,
};
pub use time_fmt::format_elapsed;
