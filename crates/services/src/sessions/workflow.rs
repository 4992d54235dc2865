use std::sync::Arc;

use tracing::info;

use quiz_core::{Clock, QuizSession};

use super::plan::QuestionSampler;
use crate::config::QuizConfig;
use crate::error::LoadError;
use crate::source::{HttpQuestionSource, QuestionSource};

/// Bridges the question source and the session state machine.
///
/// Each `load_session` re-invokes the source and draws a fresh selection.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    source: Arc<dyn QuestionSource>,
    sampler: QuestionSampler,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(clock: Clock, source: Arc<dyn QuestionSource>, sampler: QuestionSampler) -> Self {
        Self {
            clock,
            source,
            sampler,
        }
    }

    /// Service reading from the configured URL over HTTP.
    #[must_use]
    pub fn from_config(clock: Clock, config: &QuizConfig) -> Self {
        let source = Arc::new(HttpQuestionSource::new(config.source_url.clone()));
        Self::with_source(clock, config, source)
    }

    /// Service using `source` with the selection settings from `config`.
    #[must_use]
    pub fn with_source(clock: Clock, config: &QuizConfig, source: Arc<dyn QuestionSource>) -> Self {
        let sampler = QuestionSampler::new(config.max_questions).with_seed(config.seed);
        Self::new(clock, source, sampler)
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn sampler(&self) -> QuestionSampler {
        self.sampler
    }

    #[must_use]
    pub fn source_description(&self) -> String {
        self.source.describe()
    }

    /// Load the source and build a session over a random selection.
    ///
    /// The session is returned `NotStarted`; the caller confirms start.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` when fetching fails or no question is valid.
    pub async fn load_session(&self) -> Result<QuizSession, LoadError> {
        let pool = self.source.load().await?;
        let pool_len = pool.len();
        let selected = self.sampler.select(pool);
        let session = QuizSession::new(selected).map_err(|_| LoadError::NoValidQuestions)?;
        info!(
            session = %session.id(),
            pool = pool_len,
            selected = session.total_questions(),
            "quiz session ready"
        );
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::InMemoryQuestionSource;
    use quiz_core::SessionState;
    use quiz_core::time::fixed_clock;

    fn csv_with_rows(rows: usize) -> String {
        let mut text = String::from("pregunta,a,b,c,d,correcta\n");
        for n in 0..rows {
            text.push_str(&format!("Q{n},a{n},b{n},c{n},d{n},A\n"));
        }
        text
    }

    #[tokio::test]
    async fn load_session_caps_selection() {
        let source = Arc::new(InMemoryQuestionSource::new(csv_with_rows(14)));
        let service = QuizLoopService::new(fixed_clock(), source, QuestionSampler::new(10));

        let session = service.load_session().await.unwrap();

        assert_eq!(session.total_questions(), 10);
        assert_eq!(session.state(), SessionState::NotStarted);
    }

    #[tokio::test]
    async fn each_load_builds_a_new_session() {
        let source = Arc::new(InMemoryQuestionSource::new(csv_with_rows(3)));
        let service = QuizLoopService::with_source(fixed_clock(), &QuizConfig::default(), source);

        let first = service.load_session().await.unwrap();
        let second = service.load_session().await.unwrap();

        assert_eq!(first.total_questions(), 3);
        assert_ne!(first.id(), second.id());
    }

    #[tokio::test]
    async fn empty_source_is_reported() {
        let source = Arc::new(InMemoryQuestionSource::new("pregunta,a,b,c,d\n,,,,\n"));
        let service = QuizLoopService::new(fixed_clock(), source, QuestionSampler::new(10));

        let err = service.load_session().await.unwrap_err();

        assert!(matches!(err, LoadError::NoValidQuestions));
    }
}
