use serde::{Deserialize, Serialize};

use crate::model::{OptionLabel, Question};

/// The user's recorded choice for one question of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    position: usize,
    selected: OptionLabel,
    correct: OptionLabel,
}

impl Answer {
    #[must_use]
    pub fn new(position: usize, selected: OptionLabel, correct: OptionLabel) -> Self {
        Self {
            position,
            selected,
            correct,
        }
    }

    /// Record `selected` against `question`, which sits at `position` in the session.
    #[must_use]
    pub fn for_question(position: usize, question: &Question, selected: OptionLabel) -> Self {
        Self::new(position, selected, question.correct())
    }

    /// Position of the answered question within its session.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn selected(&self) -> OptionLabel {
        self.selected
    }

    #[must_use]
    pub fn correct(&self) -> OptionLabel {
        self.correct
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.selected == self.correct
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correctness_is_derived() {
        let question = Question::new("Q", ["a", "b", "c", "d"], OptionLabel::C).unwrap();
        let right = Answer::for_question(3, &question, OptionLabel::C);
        let wrong = Answer::for_question(3, &question, OptionLabel::A);

        assert!(right.is_correct());
        assert!(!wrong.is_correct());
        assert_eq!(wrong.position(), 3);
        assert_eq!(wrong.correct(), OptionLabel::C);
        assert_eq!(wrong.selected(), OptionLabel::A);
    }
}
