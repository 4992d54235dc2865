use chrono::{DateTime, Utc};
use std::fmt;
use thiserror::Error;

use crate::model::{Answer, OptionLabel, Question, SessionId};
use crate::results::QuizResults;

//
// ─── REJECTIONS ────────────────────────────────────────────────────────────────
//

/// Why the session refused an operation. A rejected call never changes state.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionRejection {
    #[error("a session needs at least one question")]
    NoQuestions,

    #[error("session has not been started")]
    NotStarted,

    #[error("session is already running")]
    AlreadyStarted,

    #[error("an answer was already submitted for this question")]
    AwaitingAdvance,

    #[error("no answer is waiting to advance")]
    NotAwaitingAdvance,

    #[error("session already completed")]
    Completed,

    #[error("advance ticket belongs to a superseded question or session")]
    StaleTicket,
}

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Questions are loaded; the user has not confirmed start.
    NotStarted,
    /// The current question is waiting for an answer.
    InProgress,
    /// The current question was answered and its feedback is showing.
    AwaitingAdvance,
    Completed,
}

/// Permission to move past one specific answered question.
///
/// Issued by `QuizSession::submit_answer`. Only the ticket naming the live
/// session and the question currently revealed is honored, which makes a
/// delayed auto-advance and a manual "next" the same idempotent operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdvanceTicket {
    session_id: SessionId,
    position: usize,
}

impl AdvanceTicket {
    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Moved on to the question at `position`.
    Next { position: usize },
    /// The last question was answered; the session is complete.
    Completed,
}

/// Aggregated view of session progress, useful for UI counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub position: usize,
    pub remaining: usize,
    pub is_complete: bool,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One run through a fixed, ordered set of questions.
///
/// Steps through the questions sequentially: each question takes exactly one
/// answer, then waits for an advance before the next one is shown.
#[derive(Clone)]
pub struct QuizSession {
    id: SessionId,
    questions: Vec<Question>,
    position: usize,
    answers: Vec<Answer>,
    state: SessionState,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Create a session in `NotStarted` over `questions`.
    ///
    /// # Errors
    ///
    /// Returns `SessionRejection::NoQuestions` if `questions` is empty.
    pub fn new(questions: Vec<Question>) -> Result<Self, SessionRejection> {
        if questions.is_empty() {
            return Err(SessionRejection::NoQuestions);
        }

        Ok(Self {
            id: SessionId::random(),
            questions,
            position: 0,
            answers: Vec::new(),
            state: SessionState::NotStarted,
            started_at: None,
            completed_at: None,
        })
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.state != SessionState::NotStarted
    }

    /// True while the feedback for the last answer should be visible.
    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.state == SessionState::AwaitingAdvance
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state == SessionState::Completed
    }

    /// The question at the current position, `None` once completed.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.position)
    }

    /// The answer recorded for the current question, if it has one yet.
    #[must_use]
    pub fn current_answer(&self) -> Option<&Answer> {
        self.answers
            .last()
            .filter(|answer| answer.position() == self.position)
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            total: self.questions.len(),
            answered: self.answers.len(),
            position: self.position,
            remaining: self.questions.len().saturating_sub(self.answers.len()),
            is_complete: self.is_complete(),
        }
    }

    /// Ticket for the currently revealed answer, if one is waiting.
    #[must_use]
    pub fn pending_advance(&self) -> Option<AdvanceTicket> {
        self.is_revealed().then_some(AdvanceTicket {
            session_id: self.id,
            position: self.position,
        })
    }

    /// Confirm start: `NotStarted -> InProgress` at position 0.
    ///
    /// # Errors
    ///
    /// Returns `SessionRejection::AlreadyStarted` when the session already runs
    /// or has completed.
    pub fn start(&mut self, now: DateTime<Utc>) -> Result<(), SessionRejection> {
        if self.state != SessionState::NotStarted {
            return Err(SessionRejection::AlreadyStarted);
        }

        self.position = 0;
        self.answers.clear();
        self.started_at = Some(now);
        self.completed_at = None;
        self.state = SessionState::InProgress;
        Ok(())
    }

    /// Record `label` for the current question and reveal the feedback.
    ///
    /// The returned ticket must be handed to `advance` (after the reveal delay
    /// or on a manual "next") to move on.
    ///
    /// # Errors
    ///
    /// Returns `SessionRejection::AwaitingAdvance` if this question was already
    /// answered, `NotStarted` before start and `Completed` after the end.
    pub fn submit_answer(&mut self, label: OptionLabel) -> Result<AdvanceTicket, SessionRejection> {
        match self.state {
            SessionState::NotStarted => return Err(SessionRejection::NotStarted),
            SessionState::AwaitingAdvance => return Err(SessionRejection::AwaitingAdvance),
            SessionState::Completed => return Err(SessionRejection::Completed),
            SessionState::InProgress => {}
        }

        let question = self
            .questions
            .get(self.position)
            .ok_or(SessionRejection::Completed)?;
        self.answers
            .push(Answer::for_question(self.position, question, label));
        self.state = SessionState::AwaitingAdvance;

        Ok(AdvanceTicket {
            session_id: self.id,
            position: self.position,
        })
    }

    /// Leave the revealed state and move to the next question, or complete.
    ///
    /// # Errors
    ///
    /// Returns `SessionRejection::StaleTicket` for a ticket from another session
    /// or another question, and `NotAwaitingAdvance`, `NotStarted` or
    /// `Completed` when nothing is waiting to advance.
    pub fn advance(
        &mut self,
        ticket: AdvanceTicket,
        now: DateTime<Utc>,
    ) -> Result<AdvanceOutcome, SessionRejection> {
        if ticket.session_id != self.id {
            return Err(SessionRejection::StaleTicket);
        }
        match self.state {
            SessionState::NotStarted => return Err(SessionRejection::NotStarted),
            SessionState::InProgress => return Err(SessionRejection::NotAwaitingAdvance),
            SessionState::Completed => return Err(SessionRejection::Completed),
            SessionState::AwaitingAdvance => {}
        }
        if ticket.position != self.position {
            return Err(SessionRejection::StaleTicket);
        }

        if self.position + 1 < self.questions.len() {
            self.position += 1;
            self.state = SessionState::InProgress;
            Ok(AdvanceOutcome::Next {
                position: self.position,
            })
        } else {
            self.position = self.questions.len();
            self.completed_at = Some(now);
            self.state = SessionState::Completed;
            Ok(AdvanceOutcome::Completed)
        }
    }

    /// Back to `NotStarted` with the same questions.
    ///
    /// The session id changes, so tickets issued before the reset go stale.
    pub fn reset(&mut self) {
        self.id = SessionId::random();
        self.position = 0;
        self.answers.clear();
        self.started_at = None;
        self.completed_at = None;
        self.state = SessionState::NotStarted;
    }

    #[must_use]
    pub fn results(&self) -> QuizResults {
        QuizResults::from_session(self)
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("id", &self.id)
            .field("questions_len", &self.questions.len())
            .field("position", &self.position)
            .field("answers_len", &self.answers.len())
            .field("state", &self.state)
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
