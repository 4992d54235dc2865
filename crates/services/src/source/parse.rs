use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use quiz_core::model::{OptionLabel, Question};

const PROMPT_HEADERS: [&str; 3] = ["pregunta", "question", "prompt"];
const CORRECT_HEADERS: [&str; 3] = ["correcta", "correct", "answer"];

/// Parse CSV text with a header row into questions.
///
/// Header names are matched case-insensitively and every cell is trimmed.
/// Rows lacking a prompt or any of the four options are dropped; an absent or
/// unrecognized correct label falls back to `A`.
#[must_use]
pub fn parse_questions(text: &str) -> Vec<Question> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let columns = match reader.headers() {
        Ok(headers) => ColumnMap::from_headers(headers),
        Err(err) => {
            debug!(error = %err, "unreadable header row");
            return Vec::new();
        }
    };

    let mut questions = Vec::new();
    let mut dropped = 0_usize;
    for record in reader.records() {
        match record.ok().and_then(|record| columns.question_from(&record)) {
            Some(question) => questions.push(question),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        debug!(dropped, kept = questions.len(), "dropped malformed question rows");
    }
    questions
}

/// Column positions of the recognized fields.
#[derive(Debug, Default)]
struct ColumnMap {
    prompt: Option<usize>,
    options: [Option<usize>; 4],
    correct: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Self {
        let mut map = Self::default();
        for (index, raw) in headers.iter().enumerate() {
            let name = normalize_header(raw);
            if map.prompt.is_none() && PROMPT_HEADERS.contains(&name.as_str()) {
                map.prompt = Some(index);
            } else if map.correct.is_none() && CORRECT_HEADERS.contains(&name.as_str()) {
                map.correct = Some(index);
            } else if let Some(label) = OptionLabel::parse(&name) {
                map.options[label.index()].get_or_insert(index);
            }
        }
        map
    }

    fn question_from(&self, record: &StringRecord) -> Option<Question> {
        let cell = |column: Option<usize>| {
            column
                .and_then(|index| record.get(index))
                .map_or("", str::trim)
        };

        let correct = self
            .correct
            .and_then(|index| record.get(index))
            .and_then(OptionLabel::parse)
            .unwrap_or(OptionLabel::A);

        Question::new(cell(self.prompt), self.options.map(cell), correct).ok()
    }
}

fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_lowercase()
}
