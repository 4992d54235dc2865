//! Export of missed questions as a paginated document.
//!
//! `layout` decides what goes where (pure, unit-tested); `pdf` only draws it.

mod layout;
mod pdf;

use std::path::{Path, PathBuf};

use tracing::info;

use quiz_core::QuizResults;

use crate::error::ExportError;

pub use layout::{LineStyle, MissedReport, ReportLine, ReportPage, wrap_text};
pub use pdf::render_pdf;

/// Fixed name of the exported document.
pub const EXPORT_FILE_NAME: &str = "respostes_incorrectes.pdf";

const DOCUMENT_TITLE: &str = "Incorrect answers";

/// Where an export landed and how many questions it lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedReport {
    pub path: PathBuf,
    pub entries: usize,
}

/// Writes missed-question reports into a fixed directory.
#[derive(Debug, Clone)]
pub struct MissedQuestionExporter {
    dir: PathBuf,
}

impl MissedQuestionExporter {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn target_path(&self) -> PathBuf {
        self.dir.join(EXPORT_FILE_NAME)
    }

    /// Render the missed questions of `results` and write them to disk,
    /// replacing any earlier export.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Pdf` when rendering fails and `ExportError::Io`
    /// when the file cannot be written.
    pub async fn export(&self, results: &QuizResults) -> Result<ExportedReport, ExportError> {
        let report = MissedReport::layout(results);
        let bytes = render_pdf(&report, DOCUMENT_TITLE)?;

        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.target_path();
        tokio::fs::write(&path, bytes).await?;

        info!(
            path = %path.display(),
            entries = report.entries(),
            pages = report.pages().len(),
            "exported missed questions"
        );
        Ok(ExportedReport {
            path,
            entries: report.entries(),
        })
    }
}
