//! Question Source Adapter: turns published CSV text into `Question`s.

mod file;
mod http;
mod parse;

use async_trait::async_trait;
use tracing::info;

use quiz_core::model::Question;

use crate::error::{FetchError, LoadError};

pub use file::FileQuestionSource;
pub use http::HttpQuestionSource;
pub use parse::parse_questions;

/// Where questions come from.
///
/// Implementors only fetch raw text; parsing and the empty-set check are shared.
/// Every `load` goes back to the source, nothing is cached.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Human-readable location, for logs and the about page.
    fn describe(&self) -> String;

    /// Retrieve the raw CSV text.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` when the source cannot be read.
    async fn fetch_text(&self) -> Result<String, FetchError>;

    /// Fetch and parse, dropping malformed rows.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::FetchFailed` when fetching fails and
    /// `LoadError::NoValidQuestions` when no row survives validation.
    async fn load(&self) -> Result<Vec<Question>, LoadError> {
        let text = self.fetch_text().await?;
        let questions = parse_questions(&text);
        if questions.is_empty() {
            return Err(LoadError::NoValidQuestions);
        }
        info!(source = %self.describe(), count = questions.len(), "loaded questions");
        Ok(questions)
    }
}

/// Source backed by a CSV string held in memory.
#[derive(Debug, Clone)]
pub struct InMemoryQuestionSource {
    text: String,
}

impl InMemoryQuestionSource {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl QuestionSource for InMemoryQuestionSource {
    fn describe(&self) -> String {
        "in-memory".to_string()
    }

    async fn fetch_text(&self) -> Result<String, FetchError> {
        Ok(self.text.clone())
    }
}
