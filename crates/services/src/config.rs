use std::env;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

/// Published spreadsheet export the quiz reads by default.
pub const DEFAULT_SOURCE_URL: &str =
    "https://docs.google.com/spreadsheets/d/1f2CO2iYCD6g3Uhte6MvhkJCBv7n_rrBuE1iotB_jX9U/export?format=csv";

/// Questions drawn per session.
pub const DEFAULT_MAX_QUESTIONS: usize = 10;

/// How long answer feedback stays visible before the quiz moves on.
pub const DEFAULT_REVEAL_DELAY: Duration = Duration::from_millis(1000);

pub const ENV_SOURCE_URL: &str = "QUIZ_SOURCE_URL";
pub const ENV_MAX_QUESTIONS: &str = "QUIZ_MAX_QUESTIONS";
pub const ENV_REVEAL_DELAY_MS: &str = "QUIZ_REVEAL_DELAY_MS";
pub const ENV_EXPORT_DIR: &str = "QUIZ_EXPORT_DIR";
pub const ENV_SEED: &str = "QUIZ_SEED";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizConfig {
    pub source_url: Url,
    pub max_questions: usize,
    pub reveal_delay: Duration,
    pub export_dir: PathBuf,
    pub seed: Option<u64>,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            source_url: default_source_url(),
            max_questions: DEFAULT_MAX_QUESTIONS,
            reveal_delay: DEFAULT_REVEAL_DELAY,
            export_dir: PathBuf::from("."),
            seed: None,
        }
    }
}

impl QuizConfig {
    /// Read overrides from `QUIZ_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    ///
    /// Blank values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a value is set but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(raw) = get(ENV_SOURCE_URL) {
            config = config.with_source_url(&raw)?;
        }
        if let Some(raw) = get(ENV_MAX_QUESTIONS) {
            config = config.with_max_questions(parse_number(ENV_MAX_QUESTIONS, &raw)?)?;
        }
        if let Some(raw) = get(ENV_REVEAL_DELAY_MS) {
            let millis = parse_number(ENV_REVEAL_DELAY_MS, &raw)?;
            config.reveal_delay = Duration::from_millis(millis);
        }
        if let Some(raw) = get(ENV_EXPORT_DIR) {
            config.export_dir = PathBuf::from(raw.trim());
        }
        if let Some(raw) = get(ENV_SEED) {
            config.seed = Some(parse_number(ENV_SEED, &raw)?);
        }

        Ok(config)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidSourceUrl` if `raw` is not an absolute URL.
    pub fn with_source_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.source_url = Url::parse(raw.trim()).map_err(|err| ConfigError::InvalidSourceUrl {
            raw: raw.to_string(),
            reason: err.to_string(),
        })?;
        Ok(self)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::ZeroMaxQuestions` for zero.
    pub fn with_max_questions(mut self, max_questions: usize) -> Result<Self, ConfigError> {
        if max_questions == 0 {
            return Err(ConfigError::ZeroMaxQuestions);
        }
        self.max_questions = max_questions;
        Ok(self)
    }

    #[must_use]
    pub fn with_reveal_delay(mut self, reveal_delay: Duration) -> Self {
        self.reveal_delay = reveal_delay;
        self
    }

    #[must_use]
    pub fn with_export_dir(mut self, export_dir: impl Into<PathBuf>) -> Self {
        self.export_dir = export_dir.into();
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}

fn default_source_url() -> Url {
    Url::parse(DEFAULT_SOURCE_URL).expect("default source url should be valid")
}

fn parse_number<T: std::str::FromStr>(name: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        name,
        raw: raw.to_string(),
    })
}
