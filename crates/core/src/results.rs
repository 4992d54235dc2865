use chrono::{DateTime, Duration, Utc};

use crate::model::{Answer, OptionLabel, Question};
use crate::session::QuizSession;

/// An incorrectly answered question together with the user's choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissedQuestion {
    pub answer: Answer,
    pub question: Question,
}

impl MissedQuestion {
    #[must_use]
    pub fn selected(&self) -> OptionLabel {
        self.answer.selected()
    }

    #[must_use]
    pub fn correct(&self) -> OptionLabel {
        self.answer.correct()
    }
}

/// Read-only tally of a session, handed to the results view and the exporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResults {
    total: usize,
    answered: usize,
    correct: usize,
    missed: Vec<MissedQuestion>,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizResults {
    #[must_use]
    pub fn from_session(session: &QuizSession) -> Self {
        Self::from_parts(
            session.questions(),
            session.answers(),
            session.started_at(),
            session.completed_at(),
        )
    }

    /// Build results from the original question list and the recorded answers.
    ///
    /// Answers whose position has no matching question are ignored.
    #[must_use]
    pub fn from_parts(
        questions: &[Question],
        answers: &[Answer],
        started_at: Option<DateTime<Utc>>,
        completed_at: Option<DateTime<Utc>>,
    ) -> Self {
        let correct = answers.iter().filter(|answer| answer.is_correct()).count();
        let missed = answers
            .iter()
            .filter(|answer| !answer.is_correct())
            .filter_map(|answer| {
                questions.get(answer.position()).map(|question| MissedQuestion {
                    answer: *answer,
                    question: question.clone(),
                })
            })
            .collect();

        Self {
            total: questions.len(),
            answered: answers.len(),
            correct,
            missed,
            started_at,
            completed_at,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn answered(&self) -> usize {
        self.answered
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.correct
    }

    #[must_use]
    pub fn missed(&self) -> &[MissedQuestion] {
        &self.missed
    }

    #[must_use]
    pub fn all_correct(&self) -> bool {
        self.missed.is_empty() && self.correct == self.answered
    }

    /// Wall time between start and completion, when both are known.
    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        match (self.started_at, self.completed_at) {
            (Some(start), Some(end)) if end >= start => Some(end - start),
            _ => None,
        }
    }
}
