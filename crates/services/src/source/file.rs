use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::QuestionSource;
use crate::error::FetchError;

/// Reads the same CSV layout from a local file.
#[derive(Clone, Debug)]
pub struct FileQuestionSource {
    path: PathBuf,
}

impl FileQuestionSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl QuestionSource for FileQuestionSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch_text(&self) -> Result<String, FetchError> {
        debug!(path = %self.path.display(), "reading question file");
        Ok(tokio::fs::read_to_string(&self.path).await?)
    }
}
