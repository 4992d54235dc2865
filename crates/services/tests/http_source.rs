use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use tokio::net::TcpListener;

use quiz_core::time::fixed_clock;
use services::{
    DisplayPhase, FetchError, HttpQuestionSource, LoadError, QuestionSource, QuizConfig,
    QuizLifecycle, QuizLoopService,
};

const SHEET: &str = "\
pregunta,a,b,c,d,correcta
What is 2 + 2?,3,4,5,6,b
Capital of France?,Rome,Paris,Madrid,Berlin,B
,missing,prompt,row,here,a
Largest ocean?,Atlantic,Indian,Pacific,Arctic,c
Short row,only,two
";

async fn sheet() -> impl IntoResponse {
    (StatusCode::OK, [(header::CONTENT_TYPE, "text/csv")], SHEET)
}

async fn broken() -> impl IntoResponse {
    StatusCode::INTERNAL_SERVER_ERROR
}

/// Fails the first request, then serves the sheet.
async fn flaky(State(hits): State<Arc<AtomicUsize>>) -> impl IntoResponse {
    if hits.fetch_add(1, Ordering::SeqCst) == 0 {
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    } else {
        (StatusCode::OK, SHEET).into_response()
    }
}

async fn start_server() -> (SocketAddr, Arc<AtomicUsize>, tokio::task::JoinHandle<()>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/sheet.csv", get(sheet))
        .route("/broken.csv", get(broken))
        .route("/flaky.csv", get(flaky))
        .with_state(hits.clone());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, hits, handle)
}

fn source_at(addr: SocketAddr, path: &str) -> HttpQuestionSource {
    HttpQuestionSource::new(format!("http://{addr}{path}").parse().unwrap())
}

#[tokio::test]
async fn loads_valid_rows_and_drops_malformed_ones() {
    let (addr, _, server) = start_server().await;

    let questions = source_at(addr, "/sheet.csv").load().await.unwrap();

    assert_eq!(questions.len(), 3);
    assert_eq!(questions[0].prompt(), "What is 2 + 2?");
    server.abort();
}

#[tokio::test]
async fn server_error_is_a_fetch_failure() {
    let (addr, _, server) = start_server().await;

    let err = source_at(addr, "/broken.csv").load().await.unwrap_err();

    assert!(matches!(
        err,
        LoadError::FetchFailed(FetchError::HttpStatus(status)) if status.as_u16() == 500
    ));
    server.abort();
}

#[tokio::test]
async fn unreachable_host_is_a_fetch_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = source_at(addr, "/sheet.csv").load().await.unwrap_err();

    assert!(err.is_fetch_failure());
}

#[tokio::test]
async fn retry_recovers_after_failed_load() {
    let (addr, hits, server) = start_server().await;
    let config = QuizConfig::default().with_seed(Some(3));
    let quiz = QuizLoopService::with_source(
        fixed_clock(),
        &config,
        Arc::new(source_at(addr, "/flaky.csv")),
    );
    let mut lifecycle = QuizLifecycle::new(fixed_clock());

    let ticket = lifecycle.begin_load();
    assert!(lifecycle.finish_load(ticket, quiz.load_session().await));
    assert!(matches!(lifecycle.phase(), DisplayPhase::Error(_)));

    let ticket = lifecycle.retry();
    assert_eq!(lifecycle.phase(), DisplayPhase::Loading);
    assert!(lifecycle.finish_load(ticket, quiz.load_session().await));

    assert_eq!(lifecycle.phase(), DisplayPhase::Start);
    assert_eq!(lifecycle.question_count(), 3);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
    server.abort();
}
