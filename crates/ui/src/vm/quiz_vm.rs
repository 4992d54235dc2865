use dioxus::prelude::Key;
use quiz_core::model::{Answer, OptionLabel, Question};
use quiz_core::{MissedQuestion, QuizResults, QuizSession};
use services::DisplayPhase;

use super::time_fmt::format_elapsed;

/// Everything the quiz screen can ask the lifecycle to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Start,
    Select(OptionLabel),
    Next,
    Retry,
    Restart,
    Reset,
    Export,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionState {
    /// Selectable, nothing revealed yet.
    Open,
    Correct,
    WrongSelection,
    /// Revealed, neither the right answer nor the user's pick.
    Dimmed,
}

impl OptionState {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Open => "option",
            Self::Correct => "option option--correct",
            Self::WrongSelection => "option option--wrong",
            Self::Dimmed => "option option--dimmed",
        }
    }

    fn revealed(label: OptionLabel, answer: &Answer) -> Self {
        if label == answer.correct() {
            Self::Correct
        } else if label == answer.selected() {
            Self::WrongSelection
        } else {
            Self::Dimmed
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub label: OptionLabel,
    pub text: String,
    pub state: OptionState,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub prompt: String,
    /// One-based, for display.
    pub number: usize,
    pub total: usize,
    pub correct_so_far: usize,
    pub options: Vec<OptionVm>,
    pub revealed: bool,
    pub last_answer_correct: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissedVm {
    pub number: usize,
    pub prompt: String,
    pub options: Vec<OptionVm>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsVm {
    pub correct: usize,
    pub answered: usize,
    pub total: usize,
    pub elapsed: Option<String>,
    pub missed: Vec<MissedVm>,
}

impl ResultsVm {
    #[must_use]
    pub fn score_label(&self) -> String {
        format!("{} / {}", self.correct, self.answered)
    }

    #[must_use]
    pub fn has_missed(&self) -> bool {
        !self.missed.is_empty()
    }
}

fn map_options(question: &Question, answer: Option<&Answer>) -> Vec<OptionVm> {
    question
        .options()
        .map(|(label, text)| OptionVm {
            label,
            text: text.to_owned(),
            state: answer.map_or(OptionState::Open, |answer| OptionState::revealed(label, answer)),
        })
        .collect()
}

/// Map the active question of `session`, or `None` when there is none.
#[must_use]
pub fn map_question(session: &QuizSession) -> Option<QuestionVm> {
    let question = session.current_question()?;
    let answer = session.current_answer();
    let progress = session.progress();
    let correct_so_far = session.answers().iter().filter(|answer| answer.is_correct()).count();

    Some(QuestionVm {
        prompt: question.prompt().to_owned(),
        number: progress.position + 1,
        total: progress.total,
        correct_so_far,
        options: map_options(question, answer),
        revealed: session.is_revealed(),
        last_answer_correct: answer.map(Answer::is_correct),
    })
}

fn map_missed(number: usize, missed: &MissedQuestion) -> MissedVm {
    MissedVm {
        number,
        prompt: missed.question.prompt().to_owned(),
        options: map_options(&missed.question, Some(&missed.answer)),
    }
}

#[must_use]
pub fn map_results(results: &QuizResults) -> ResultsVm {
    ResultsVm {
        correct: results.correct_count(),
        answered: results.answered(),
        total: results.total(),
        elapsed: results.elapsed().map(format_elapsed),
        missed: results
            .missed()
            .iter()
            .enumerate()
            .map(|(index, missed)| map_missed(index + 1, missed))
            .collect(),
    }
}

/// Keyboard shortcuts: `Enter` starts, `A`-`D` or `1`-`4` pick an option.
#[must_use]
pub fn key_intent(key: &Key, phase: &DisplayPhase) -> Option<QuizIntent> {
    match (phase, key) {
        (DisplayPhase::Start, Key::Enter) => Some(QuizIntent::Start),
        (DisplayPhase::Question, Key::Character(value)) => {
            let label = match value.as_str() {
                "1" => OptionLabel::A,
                "2" => OptionLabel::B,
                "3" => OptionLabel::C,
                "4" => OptionLabel::D,
                other => OptionLabel::parse(other)?,
            };
            Some(QuizIntent::Select(label))
        }
        _ => None,
    }
}
