#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod export;
pub mod sessions;
pub mod source;

pub use quiz_core::Clock;
pub use sessions as session;

pub use config::QuizConfig;
pub use error::{ConfigError, ExportError, FetchError, LifecycleRejection, LoadError};
pub use export::{EXPORT_FILE_NAME, ExportedReport, MissedQuestionExporter, MissedReport};
pub use source::{
    FileQuestionSource, HttpQuestionSource, InMemoryQuestionSource, QuestionSource, parse_questions,
};

pub use sessions::{
    DisplayPhase, LoadTicket, QuestionSampler, QuizLifecycle, QuizLoopService,
    sample_without_replacement,
};
