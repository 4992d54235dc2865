use std::sync::Arc;

use tracing::{debug, info};

use quiz_core::model::OptionLabel;
use quiz_core::{AdvanceOutcome, AdvanceTicket, Clock, QuizResults, QuizSession, SessionRejection};

use crate::error::{LifecycleRejection, LoadError};

/// Tags one invocation of the question source.
///
/// Only the most recently issued ticket may deliver its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(u64);

/// What the display layer should show, in priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayPhase {
    /// The source is being fetched.
    Loading,
    /// The last load failed; carries the message shown next to the retry button.
    Error(String),
    Results,
    /// Questions are ready (or absent) and the user has not started.
    Start,
    Question,
}

/// Controller state for one quiz screen: load status plus the live session.
///
/// Sync on purpose: the caller performs the fetch between `begin_load` and
/// `finish_load`, so no borrow of this value is held across an await.
#[derive(Debug)]
pub struct QuizLifecycle {
    clock: Clock,
    generation: u64,
    loading: Option<LoadTicket>,
    error: Option<Arc<LoadError>>,
    session: Option<QuizSession>,
}

impl QuizLifecycle {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            generation: 0,
            loading: None,
            error: None,
            session: None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> DisplayPhase {
        if self.loading.is_some() {
            return DisplayPhase::Loading;
        }
        if let Some(error) = &self.error {
            return DisplayPhase::Error(error.to_string());
        }
        match &self.session {
            Some(session) if session.is_complete() => DisplayPhase::Results,
            Some(session) if session.is_started() => DisplayPhase::Question,
            _ => DisplayPhase::Start,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    #[must_use]
    pub fn error(&self) -> Option<&LoadError> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    /// Number of questions waiting on the start screen.
    #[must_use]
    pub fn question_count(&self) -> usize {
        self.session.as_ref().map_or(0, QuizSession::total_questions)
    }

    #[must_use]
    pub fn results(&self) -> Option<QuizResults> {
        self.session
            .as_ref()
            .filter(|session| session.is_complete())
            .map(QuizSession::results)
    }

    /// Enter `Loading`, discarding the current session and error.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        let ticket = LoadTicket(self.generation);
        self.loading = Some(ticket);
        self.error = None;
        self.session = None;
        debug!(generation = self.generation, "question load started");
        ticket
    }

    /// Deliver the outcome of the load tagged `ticket`.
    ///
    /// Returns `false` (and changes nothing) when a newer load superseded it.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<QuizSession, LoadError>,
    ) -> bool {
        if self.loading != Some(ticket) {
            debug!(?ticket, "discarding superseded question load");
            return false;
        }

        self.loading = None;
        match result {
            Ok(session) => {
                self.error = None;
                self.session = Some(session);
            }
            Err(error) => {
                info!(%error, "question load failed");
                self.error = Some(Arc::new(error));
            }
        }
        true
    }

    /// Throw the session away and load a new selection.
    ///
    /// The caller re-invokes the source and reports back with the ticket.
    pub fn restart(&mut self) -> LoadTicket {
        info!("restarting quiz with a fresh load");
        self.begin_load()
    }

    /// Re-attempt a failed load. Same as `restart`.
    pub fn retry(&mut self) -> LoadTicket {
        self.begin_load()
    }

    /// # Errors
    ///
    /// Returns `LifecycleRejection` when nothing is loaded or the session
    /// already runs.
    pub fn start(&mut self) -> Result<(), LifecycleRejection> {
        let now = self.clock.now();
        let session = self.session_mut()?;
        session.start(now)?;
        info!(session = %session.id(), questions = session.total_questions(), "quiz started");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `LifecycleRejection::Session` wrapping the state machine's reason.
    pub fn submit_answer(
        &mut self,
        label: OptionLabel,
    ) -> Result<AdvanceTicket, LifecycleRejection> {
        let session = self.session_mut()?;
        session.submit_answer(label).map_err(|rejection| {
            debug!(%rejection, %label, "answer rejected");
            LifecycleRejection::from(rejection)
        })
    }

    /// Advance with a ticket from `submit_answer`; used by the reveal timer.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleRejection::NoSession` after a restart discarded the
    /// session and `LifecycleRejection::Session` for stale or redundant tickets.
    pub fn advance(&mut self, ticket: AdvanceTicket) -> Result<AdvanceOutcome, LifecycleRejection> {
        let now = self.clock.now();
        let session = self.session_mut()?;
        let outcome = session.advance(ticket, now).map_err(|rejection| {
            debug!(%rejection, ?ticket, "advance rejected");
            LifecycleRejection::from(rejection)
        })?;
        if outcome == AdvanceOutcome::Completed {
            info!(session = %session.id(), "quiz completed");
        }
        Ok(outcome)
    }

    /// Manual "next": advance past the currently revealed answer.
    ///
    /// # Errors
    ///
    /// Returns `SessionRejection::NotAwaitingAdvance` when nothing is revealed.
    pub fn advance_pending(&mut self) -> Result<AdvanceOutcome, LifecycleRejection> {
        let ticket = self
            .session()
            .ok_or(LifecycleRejection::NoSession)?
            .pending_advance()
            .ok_or(SessionRejection::NotAwaitingAdvance)?;
        self.advance(ticket)
    }

    /// Run the same questions again from the start screen.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleRejection::NoSession` when nothing is loaded.
    pub fn reset(&mut self) -> Result<(), LifecycleRejection> {
        self.session_mut()?.reset();
        Ok(())
    }

    fn session_mut(&mut self) -> Result<&mut QuizSession, LifecycleRejection> {
        if self.loading.is_some() {
            return Err(LifecycleRejection::Loading);
        }
        self.session.as_mut().ok_or(LifecycleRejection::NoSession)
    }
}

impl Default for QuizLifecycle {
    fn default() -> Self {
        Self::new(Clock::system())
    }
}
