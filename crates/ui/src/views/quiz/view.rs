use dioxus::prelude::*;
use tracing::{debug, warn};

use quiz_core::{AdvanceTicket, QuizSession};
use services::{DisplayPhase, LoadTicket, QuizLifecycle};

use super::components::{ErrorPanel, LoadingPanel, QuestionCard, ResultsPanel, StartScreen};
use crate::context::AppContext;
use crate::views::{ViewError, ViewState};
use crate::vm::{QuizIntent, key_intent, map_question, map_results};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let quiz_loop = ctx.quiz_loop();
    let exporter = ctx.exporter();
    let reveal_delay = ctx.reveal_delay();
    let clock = quiz_loop.clock();

    let mut first_load = None;
    let lifecycle = use_signal(|| {
        let mut lifecycle = QuizLifecycle::new(clock);
        first_load = Some(lifecycle.begin_load());
        lifecycle
    });
    let reveal_task = use_signal(|| None::<Task>);
    let export_state = use_signal(|| ViewState::<String>::Idle);
    let export_task = use_signal(|| None::<Task>);

    let load = use_callback(move |ticket: LoadTicket| {
        let quiz_loop = quiz_loop.clone();
        let mut lifecycle = lifecycle;
        spawn(async move {
            let result = quiz_loop.load_session().await;
            lifecycle.write().finish_load(ticket, result);
        });
    });

    use_hook(move || {
        if let Some(ticket) = first_load {
            load.call(ticket);
        }
    });

    let cancel_reveal = use_callback(move |()| {
        let mut reveal_task = reveal_task;
        if let Some(task) = reveal_task.write().take() {
            task.cancel();
        }
    });

    // An export belongs to the run it was started from.
    let discard_export = use_callback(move |()| {
        let mut export_task = export_task;
        let mut export_state = export_state;
        if let Some(task) = export_task.write().take() {
            task.cancel();
        }
        export_state.set(ViewState::Idle);
    });

    let schedule_advance = use_callback(move |ticket: AdvanceTicket| {
        let mut reveal_task = reveal_task;
        let mut lifecycle = lifecycle;
        cancel_reveal.call(());
        let task = spawn(async move {
            tokio::time::sleep(reveal_delay).await;
            reveal_task.set(None);
            if let Err(rejection) = lifecycle.write().advance(ticket) {
                debug!(%rejection, "reveal timer fired for a stale answer");
            }
        });
        reveal_task.set(Some(task));
    });

    let dispatch = use_callback(move |intent: QuizIntent| {
        let mut lifecycle = lifecycle;
        let mut export_state = export_state;

        match intent {
            QuizIntent::Start => {
                if let Err(rejection) = lifecycle.write().start() {
                    debug!(%rejection, "start ignored");
                }
            }
            QuizIntent::Select(label) => {
                let submitted = lifecycle.write().submit_answer(label);
                match submitted {
                    Ok(ticket) => schedule_advance.call(ticket),
                    Err(rejection) => debug!(%rejection, %label, "selection ignored"),
                }
            }
            QuizIntent::Next => {
                cancel_reveal.call(());
                if let Err(rejection) = lifecycle.write().advance_pending() {
                    debug!(%rejection, "next ignored");
                }
            }
            QuizIntent::Retry | QuizIntent::Restart => {
                cancel_reveal.call(());
                discard_export.call(());
                let ticket = if intent == QuizIntent::Retry {
                    lifecycle.write().retry()
                } else {
                    lifecycle.write().restart()
                };
                load.call(ticket);
            }
            QuizIntent::Reset => {
                cancel_reveal.call(());
                discard_export.call(());
                if let Err(rejection) = lifecycle.write().reset() {
                    debug!(%rejection, "reset ignored");
                }
            }
            QuizIntent::Export => {
                let (Some(session_id), Some(results)) = {
                    let guard = lifecycle.read();
                    (guard.session().map(QuizSession::id), guard.results())
                } else {
                    return;
                };
                if export_state.read().is_loading() {
                    return;
                }
                export_state.set(ViewState::Loading);
                let exporter = exporter.clone();
                let mut export_task = export_task;
                let task = spawn(async move {
                    let outcome = exporter.export(&results).await;
                    export_task.set(None);
                    let current = lifecycle.read().session().map(QuizSession::id);
                    if current != Some(session_id) {
                        debug!(%session_id, "dropping export result for a finished run");
                        return;
                    }
                    match outcome {
                        Ok(report) => {
                            export_state.set(ViewState::Ready(report.path.display().to_string()));
                        }
                        Err(err) => {
                            warn!(%err, "missed-question export failed");
                            export_state.set(ViewState::Error(ViewError::ExportFailed));
                        }
                    }
                });
                export_task.set(Some(task));
            }
        }
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch, lifecycle);
            }
        }
    }

    let on_key = use_callback(move |evt: KeyboardEvent| {
        let phase = lifecycle.read().phase();
        if let Some(intent) = key_intent(&evt.data.key(), &phase) {
            evt.prevent_default();
            dispatch.call(intent);
        }
    });

    let guard = lifecycle.read();
    let body = match guard.phase() {
        DisplayPhase::Loading => rsx! { LoadingPanel {} },
        DisplayPhase::Error(message) => rsx! {
            ErrorPanel { message, on_intent: dispatch }
        },
        DisplayPhase::Start => rsx! {
            StartScreen { question_count: guard.question_count(), on_intent: dispatch }
        },
        DisplayPhase::Question => match guard.session().and_then(map_question) {
            Some(question) => rsx! { QuestionCard { question, on_intent: dispatch } },
            None => rsx! { LoadingPanel {} },
        },
        DisplayPhase::Results => match guard.results() {
            Some(results) => rsx! {
                ResultsPanel {
                    results: map_results(&results),
                    export: export_state(),
                    on_intent: dispatch,
                }
            },
            None => rsx! { LoadingPanel {} },
        },
    };
    drop(guard);

    rsx! {
        div { class: "page quiz-page", id: "quiz-root", tabindex: "0", onkeydown: on_key,
            {body}
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
    lifecycle: Rc<RefCell<Option<Signal<QuizLifecycle>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(
        &self,
        dispatch: Callback<QuizIntent>,
        lifecycle: Signal<QuizLifecycle>,
    ) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.lifecycle.borrow_mut() = Some(lifecycle);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }

    pub(crate) fn lifecycle(&self) -> Signal<QuizLifecycle> {
        (*self.lifecycle.borrow()).expect("quiz lifecycle registered")
    }
}
