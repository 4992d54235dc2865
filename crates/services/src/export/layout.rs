use quiz_core::model::OptionLabel;
use quiz_core::{MissedQuestion, QuizResults};

// ─── Page geometry (millimetres, measured from the top-left corner) ─────────

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const FONT_SIZE_PT: f32 = 12.0;

const TOP_MARGIN_MM: f32 = 10.0;
const BOTTOM_LIMIT_MM: f32 = PAGE_HEIGHT_MM - TOP_MARGIN_MM;
const USABLE_HEIGHT_MM: f32 = BOTTOM_LIMIT_MM - TOP_MARGIN_MM;
const PAGE_BREAK_AFTER_MM: f32 = 270.0;
const PROMPT_X_MM: f32 = 10.0;
const OPTION_X_MM: f32 = 12.0;
const PROMPT_STEP_MM: f32 = 7.0;
const OPTION_STEP_MM: f32 = 6.0;
const ENTRY_GAP_MM: f32 = 4.0;
const WRAP_COLUMNS: usize = 90;

/// Visual treatment of one line of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Prompt,
    Correct,
    WrongSelection,
    Plain,
}

impl LineStyle {
    #[must_use]
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Prompt | Self::Plain => (0, 0, 0),
            Self::Correct => (0, 128, 0),
            Self::WrongSelection => (200, 0, 0),
        }
    }

    #[must_use]
    pub fn is_bold(self) -> bool {
        !matches!(self, Self::Plain)
    }

    fn for_option(label: OptionLabel, missed: &MissedQuestion) -> Self {
        if label == missed.correct() {
            Self::Correct
        } else if label == missed.selected() {
            Self::WrongSelection
        } else {
            Self::Plain
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportLine {
    pub text: String,
    pub x_mm: f32,
    pub y_mm: f32,
    pub style: LineStyle,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportPage {
    pub lines: Vec<ReportLine>,
}

/// Positioned text for every missed question, split into A4 pages.
#[derive(Debug, Clone, PartialEq)]
pub struct MissedReport {
    entries: usize,
    pages: Vec<ReportPage>,
}

impl MissedReport {
    /// Lay out the incorrectly answered questions of `results`.
    ///
    /// Always yields at least one page so the rendered document is valid.
    #[must_use]
    pub fn layout(results: &QuizResults) -> Self {
        let mut pages = vec![ReportPage::default()];
        let mut y = TOP_MARGIN_MM;

        for (index, missed) in results.missed().iter().enumerate() {
            let block = entry_lines(index + 1, missed);
            let height: f32 = block.iter().map(|(_, _, step)| step).sum::<f32>() + ENTRY_GAP_MM;

            // Entries that fit on a page never straddle the bottom edge.
            if height <= USABLE_HEIGHT_MM && y > TOP_MARGIN_MM && y + height > BOTTOM_LIMIT_MM {
                pages.push(ReportPage::default());
                y = TOP_MARGIN_MM;
            }

            // Taller entries flow line by line onto following pages.
            for (text, style, step) in block {
                if y > BOTTOM_LIMIT_MM {
                    pages.push(ReportPage::default());
                    y = TOP_MARGIN_MM;
                }
                let x_mm = if style == LineStyle::Prompt { PROMPT_X_MM } else { OPTION_X_MM };
                if let Some(page) = pages.last_mut() {
                    page.lines.push(ReportLine { text, x_mm, y_mm: y, style });
                }
                y += step;
            }
            y += ENTRY_GAP_MM;

            if y > PAGE_BREAK_AFTER_MM {
                pages.push(ReportPage::default());
                y = TOP_MARGIN_MM;
            }
        }

        // A break after the final entry leaves a trailing blank page.
        if pages.len() > 1 && pages.last().is_some_and(|page| page.lines.is_empty()) {
            pages.pop();
        }

        Self {
            entries: results.missed().len(),
            pages,
        }
    }

    #[must_use]
    pub fn entries(&self) -> usize {
        self.entries
    }

    #[must_use]
    pub fn pages(&self) -> &[ReportPage] {
        &self.pages
    }

    pub fn lines(&self) -> impl Iterator<Item = &ReportLine> {
        self.pages.iter().flat_map(|page| page.lines.iter())
    }
}

fn entry_lines(number: usize, missed: &MissedQuestion) -> Vec<(String, LineStyle, f32)> {
    let mut lines: Vec<(String, LineStyle, f32)> =
        wrap_text(&format!("{number}. {}", missed.question.prompt()), WRAP_COLUMNS)
            .into_iter()
            .map(|text| (text, LineStyle::Prompt, PROMPT_STEP_MM))
            .collect();

    for (label, text) in missed.question.options() {
        let style = LineStyle::for_option(label, missed);
        lines.extend(
            wrap_text(&format!("{label}. {text}"), WRAP_COLUMNS)
                .into_iter()
                .map(|text| (text, style, OPTION_STEP_MM)),
        );
    }
    lines
}

/// Greedy word wrap on whitespace. Words longer than `columns` are split.
#[must_use]
pub fn wrap_text(text: &str, columns: usize) -> Vec<String> {
    let columns = columns.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut chars: Vec<char> = word.chars().collect();
        while chars.len() > columns {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = chars.split_off(columns);
            lines.push(chars.into_iter().collect());
            chars = rest;
        }

        let word_len = chars.len();
        if current_len > 0 && current_len + 1 + word_len > columns {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(chars);
        current_len += word_len;
    }

    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}
