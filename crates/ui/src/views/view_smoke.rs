use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use quiz_core::model::OptionLabel;
use services::{DisplayPhase, FetchError, QuestionSource};

use super::test_harness::{
    SHEET, ViewHarness, ViewKind, setup_view_harness, setup_view_harness_with_source,
};
use crate::vm::QuizIntent;

/// Fails the first fetch, then serves the sheet.
struct FlakySource {
    hits: AtomicUsize,
}

#[async_trait::async_trait]
impl QuestionSource for FlakySource {
    fn describe(&self) -> String {
        "flaky test source".to_string()
    }

    async fn fetch_text(&self) -> Result<String, FetchError> {
        if self.hits.fetch_add(1, Ordering::SeqCst) == 0 {
            Err(FetchError::Io(std::io::Error::other("connection reset")))
        } else {
            Ok(SHEET.to_string())
        }
    }
}

fn correct_label(harness: &ViewHarness) -> OptionLabel {
    harness.with_lifecycle(|lifecycle| {
        lifecycle
            .session()
            .and_then(|session| session.current_question())
            .map(|question| question.correct())
            .expect("question on screen")
    })
}

fn wrong_label(harness: &ViewHarness) -> OptionLabel {
    let correct = correct_label(harness);
    OptionLabel::from_index((correct.index() + 1) % 4).expect("label in range")
}

fn miss_every_question(harness: &mut ViewHarness) {
    harness.dispatch(QuizIntent::Start);
    for _ in 0..3 {
        let wrong = wrong_label(harness);
        harness.dispatch(QuizIntent::Select(wrong));
        harness.dispatch(QuizIntent::Next);
    }
    assert_eq!(harness.phase(), DisplayPhase::Results);
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_loads_into_start_screen() {
    let mut harness = setup_view_harness(ViewKind::Quiz);
    harness.rebuild();

    assert!(harness.drive_until(&DisplayPhase::Start).await);
    let html = harness.render();
    assert!(html.contains("3 questions loaded"), "missing count in {html}");
    assert!(html.contains("Start"), "missing start button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_retries_after_failed_load() {
    let source = Arc::new(FlakySource {
        hits: AtomicUsize::new(0),
    });
    let dir = tempfile::tempdir().unwrap();
    let mut harness = setup_view_harness_with_source(
        ViewKind::Quiz,
        source.clone(),
        Duration::from_secs(60),
        dir.path(),
    );
    harness.rebuild();
    for _ in 0..20 {
        if matches!(harness.phase(), DisplayPhase::Error(_)) {
            break;
        }
        harness.drive_async().await;
    }

    let html = harness.render();
    assert!(html.contains("Could not load the questions"), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");

    harness.dispatch(QuizIntent::Retry);
    assert!(harness.drive_until(&DisplayPhase::Start).await);
    assert_eq!(source.hits.load(Ordering::SeqCst), 2);
}

#[tokio::test(flavor = "current_thread")]
async fn answering_reveals_and_next_moves_on() {
    let mut harness = setup_view_harness(ViewKind::Quiz);
    harness.rebuild();
    assert!(harness.drive_until(&DisplayPhase::Start).await);

    harness.dispatch(QuizIntent::Start);
    let html = harness.render();
    assert!(html.contains("Question 1 of 3"), "missing progress in {html}");

    let wrong = wrong_label(&harness);
    harness.dispatch(QuizIntent::Select(wrong));
    let html = harness.render();
    assert!(html.contains("option--correct"), "missing correct highlight in {html}");
    assert!(html.contains("option--wrong"), "missing wrong highlight in {html}");
    assert!(html.contains("Not quite."), "missing feedback in {html}");

    // A second pick while revealed changes nothing.
    harness.dispatch(QuizIntent::Select(correct_label(&harness)));
    assert_eq!(harness.with_lifecycle(|l| l.session().map(|s| s.answers().len())), Some(1));

    harness.dispatch(QuizIntent::Next);
    let html = harness.render();
    assert!(html.contains("Question 2 of 3"), "missing next question in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn reveal_timer_advances_automatically() {
    let dir = tempfile::tempdir().unwrap();
    let source = Arc::new(services::InMemoryQuestionSource::new(SHEET));
    let mut harness = setup_view_harness_with_source(
        ViewKind::Quiz,
        source,
        Duration::from_millis(5),
        dir.path(),
    );
    harness.rebuild();
    assert!(harness.drive_until(&DisplayPhase::Start).await);
    harness.dispatch(QuizIntent::Start);

    harness.dispatch(QuizIntent::Select(correct_label(&harness)));
    for _ in 0..20 {
        if harness.with_lifecycle(|l| l.session().map(|s| s.position())) == Some(1) {
            break;
        }
        harness.drive_async().await;
    }

    assert_eq!(harness.with_lifecycle(|l| l.session().map(|s| s.position())), Some(1));
    assert!(harness.render().contains("Question 2 of 3"));
}

#[tokio::test(flavor = "current_thread")]
async fn finished_quiz_shows_results_and_exports() {
    let dir = tempfile::tempdir().unwrap();
    let source = Arc::new(services::InMemoryQuestionSource::new(SHEET));
    let mut harness = setup_view_harness_with_source(
        ViewKind::Quiz,
        source,
        Duration::from_secs(60),
        dir.path(),
    );
    harness.rebuild();
    assert!(harness.drive_until(&DisplayPhase::Start).await);
    harness.dispatch(QuizIntent::Start);

    for round in 0..3 {
        let label = if round == 0 { wrong_label(&harness) } else { correct_label(&harness) };
        harness.dispatch(QuizIntent::Select(label));
        harness.dispatch(QuizIntent::Next);
    }

    assert_eq!(harness.phase(), DisplayPhase::Results);
    let html = harness.render();
    assert!(html.contains("Correct answers: 2 / 3"), "missing score in {html}");
    assert!(html.contains("Review"), "missing review list in {html}");
    assert!(html.contains("Export mistakes to PDF"), "missing export in {html}");

    harness.dispatch(QuizIntent::Export);
    let target = dir.path().join(services::EXPORT_FILE_NAME);
    for _ in 0..20 {
        if harness.render().contains("Saved to") {
            break;
        }
        harness.drive_async().await;
    }
    assert!(target.exists(), "export not written to {}", target.display());

    harness.dispatch(QuizIntent::Reset);
    assert_eq!(harness.phase(), DisplayPhase::Start);
    assert!(!harness.render().contains("Saved to"));
}

#[tokio::test(flavor = "current_thread")]
async fn reset_discards_pending_export() {
    let dir = tempfile::tempdir().unwrap();
    let source = Arc::new(services::InMemoryQuestionSource::new(SHEET));
    let mut harness = setup_view_harness_with_source(
        ViewKind::Quiz,
        source,
        Duration::from_secs(60),
        dir.path(),
    );
    harness.rebuild();
    assert!(harness.drive_until(&DisplayPhase::Start).await);

    miss_every_question(&mut harness);
    harness.dispatch(QuizIntent::Export);
    harness.dispatch(QuizIntent::Reset);
    miss_every_question(&mut harness);

    for _ in 0..20 {
        harness.drive_async().await;
    }
    let html = harness.render();
    assert!(!html.contains("Saved to"), "stale export shown in {html}");
    assert!(!html.contains("Exporting"), "stale export spinner in {html}");
    assert!(html.contains("Export mistakes to PDF"), "missing export in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn perfect_run_still_offers_export() {
    let dir = tempfile::tempdir().unwrap();
    let source = Arc::new(services::InMemoryQuestionSource::new(SHEET));
    let mut harness = setup_view_harness_with_source(
        ViewKind::Quiz,
        source,
        Duration::from_secs(60),
        dir.path(),
    );
    harness.rebuild();
    assert!(harness.drive_until(&DisplayPhase::Start).await);
    harness.dispatch(QuizIntent::Start);
    for _ in 0..3 {
        harness.dispatch(QuizIntent::Select(correct_label(&harness)));
        harness.dispatch(QuizIntent::Next);
    }

    let html = harness.render();
    assert!(html.contains("Correct answers: 3 / 3"), "missing score in {html}");
    assert!(html.contains("Export mistakes to PDF"), "missing export in {html}");

    harness.dispatch(QuizIntent::Export);
    let target = dir.path().join(services::EXPORT_FILE_NAME);
    for _ in 0..20 {
        if harness.render().contains("Saved to") {
            break;
        }
        harness.drive_async().await;
    }
    assert!(target.exists(), "export not written to {}", target.display());
}

#[tokio::test(flavor = "current_thread")]
async fn about_view_lists_settings() {
    let mut harness = setup_view_harness(ViewKind::About);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("in-memory"), "missing source label in {html}");
    assert!(html.contains("60000 ms"), "missing reveal delay in {html}");
}
