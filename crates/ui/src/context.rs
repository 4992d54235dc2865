use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use services::{MissedQuestionExporter, QuizConfig, QuizLoopService};

pub trait UiApp: Send + Sync {
    fn config(&self) -> QuizConfig;

    fn quiz_loop(&self) -> Arc<QuizLoopService>;
    fn exporter(&self) -> Arc<MissedQuestionExporter>;
}

#[derive(Clone)]
pub struct AppContext {
    source_label: String,
    max_questions: usize,
    reveal_delay: Duration,
    export_dir: PathBuf,

    quiz_loop: Arc<QuizLoopService>,
    exporter: Arc<MissedQuestionExporter>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        let config = app.config();
        let quiz_loop = app.quiz_loop();
        let exporter = app.exporter();

        Self {
            source_label: quiz_loop.source_description(),
            max_questions: config.max_questions,
            reveal_delay: config.reveal_delay,
            export_dir: config.export_dir,
            quiz_loop,
            exporter,
        }
    }

    /// Human-readable origin of the question bank.
    #[must_use]
    pub fn source_label(&self) -> &str {
        &self.source_label
    }

    #[must_use]
    pub fn max_questions(&self) -> usize {
        self.max_questions
    }

    /// Pause between revealing an answer and moving on.
    #[must_use]
    pub fn reveal_delay(&self) -> Duration {
        self.reveal_delay
    }

    #[must_use]
    pub fn export_dir(&self) -> &PathBuf {
        &self.export_dir
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    #[must_use]
    pub fn exporter(&self) -> Arc<MissedQuestionExporter> {
        Arc::clone(&self.exporter)
    }
}

// Provided by the composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
