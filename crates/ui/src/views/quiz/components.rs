use dioxus::prelude::*;

use crate::views::ViewState;
use crate::vm::{OptionVm, QuestionVm, QuizIntent, ResultsVm};

#[component]
pub(super) fn LoadingPanel() -> Element {
    rsx! {
        div { class: "quiz-panel quiz-loading",
            p { "Loading questions..." }
        }
    }
}

#[component]
pub(super) fn ErrorPanel(message: String, on_intent: EventHandler<QuizIntent>) -> Element {
    rsx! {
        div { class: "quiz-panel quiz-error", role: "alert",
            h2 { "Could not load the questions" }
            p { class: "quiz-error__detail", "{message}" }
            button {
                class: "btn btn-primary",
                id: "quiz-retry",
                r#type: "button",
                onclick: move |_| on_intent.call(QuizIntent::Retry),
                "Retry"
            }
        }
    }
}

#[component]
pub(super) fn StartScreen(question_count: usize, on_intent: EventHandler<QuizIntent>) -> Element {
    rsx! {
        div { class: "quiz-panel quiz-start",
            h2 { "Ready?" }
            p { "{question_count} questions loaded. Pick A to D, or press 1 to 4." }
            button {
                class: "btn btn-primary",
                id: "quiz-start",
                r#type: "button",
                onclick: move |_| on_intent.call(QuizIntent::Start),
                "Start"
            }
        }
    }
}

#[component]
pub(super) fn QuestionCard(question: QuestionVm, on_intent: EventHandler<QuizIntent>) -> Element {
    let revealed = question.revealed;
    let feedback = match question.last_answer_correct {
        Some(true) => Some(("quiz-feedback quiz-feedback--correct", "Correct!")),
        Some(false) => Some(("quiz-feedback quiz-feedback--wrong", "Not quite.")),
        None => None,
    };

    rsx! {
        div { class: "quiz-panel quiz-question",
            div { class: "quiz-progress",
                span { "Question {question.number} of {question.total}" }
                span { class: "quiz-progress__score", "Correct: {question.correct_so_far}" }
            }
            h2 { class: "quiz-question__prompt", "{question.prompt}" }
            ul { class: "quiz-options",
                for option in question.options.iter().cloned() {
                    OptionButton {
                        key: "{option.label}",
                        option,
                        disabled: revealed,
                        on_intent,
                    }
                }
            }
            if let Some((class, text)) = feedback {
                div { class: "quiz-footer",
                    p { class, "{text}" }
                    button {
                        class: "btn btn-secondary",
                        id: "quiz-next",
                        r#type: "button",
                        onclick: move |_| on_intent.call(QuizIntent::Next),
                        "Next"
                    }
                }
            }
        }
    }
}

#[component]
fn OptionButton(option: OptionVm, disabled: bool, on_intent: EventHandler<QuizIntent>) -> Element {
    let label = option.label;
    rsx! {
        li {
            button {
                class: option.state.class(),
                r#type: "button",
                disabled,
                onclick: move |_| on_intent.call(QuizIntent::Select(label)),
                span { class: "option__label", "{label}" }
                span { class: "option__text", "{option.text}" }
            }
        }
    }
}

#[component]
pub(super) fn ResultsPanel(
    results: ResultsVm,
    export: ViewState<String>,
    on_intent: EventHandler<QuizIntent>,
) -> Element {
    let score = results.score_label();
    let exporting = export.is_loading();

    rsx! {
        div { class: "quiz-panel quiz-results",
            h2 { "Results" }
            p { class: "quiz-results__score", "Correct answers: {score}" }
            if let Some(elapsed) = results.elapsed.as_ref() {
                p { class: "quiz-results__time", "Time: {elapsed}" }
            }
            div { class: "quiz-results__actions",
                button {
                    class: "btn btn-primary",
                    id: "quiz-restart",
                    r#type: "button",
                    onclick: move |_| on_intent.call(QuizIntent::Restart),
                    "New questions"
                }
                button {
                    class: "btn btn-secondary",
                    id: "quiz-reset",
                    r#type: "button",
                    onclick: move |_| on_intent.call(QuizIntent::Reset),
                    "Same questions again"
                }
                button {
                    class: "btn btn-secondary",
                    id: "quiz-export",
                    r#type: "button",
                    disabled: exporting,
                    onclick: move |_| on_intent.call(QuizIntent::Export),
                    "Export mistakes to PDF"
                }
            }
            match export {
                ViewState::Idle => rsx! {},
                ViewState::Loading => rsx! {
                    p { class: "quiz-export", "Exporting..." }
                },
                ViewState::Ready(path) => rsx! {
                    p { class: "quiz-export", "Saved to {path}" }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "quiz-export quiz-export--error", "{err.message()}" }
                },
            }
            if results.has_missed() {
                h3 { "Review" }
                ol { class: "quiz-missed",
                    for missed in results.missed.iter().cloned() {
                        li { key: "{missed.number}", class: "quiz-missed__item",
                            p { class: "quiz-missed__prompt", "{missed.prompt}" }
                            ul {
                                for option in missed.options {
                                    li { key: "{option.label}", class: option.state.class(),
                                        "{option.label}. {option.text}"
                                    }
                                }
                            }
                        }
                    }
                }
            } else {
                p { class: "quiz-results__perfect", "No mistakes. Well done!" }
            }
        }
    }
}
