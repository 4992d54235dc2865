use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use quiz_core::time::fixed_clock;
use services::{
    DisplayPhase, InMemoryQuestionSource, MissedQuestionExporter, QuestionSource, QuizConfig,
    QuizLifecycle, QuizLoopService,
};

use crate::context::{UiApp, build_app_context};
use crate::views::quiz::QuizTestHandles;
use crate::views::{AboutView, QuizView};
use crate::vm::QuizIntent;

pub const SHEET: &str = "\
pregunta,a,b,c,d,correcta
Capital of Italy?,Rome,Paris,Madrid,Berlin,A
2 + 2?,3,4,5,6,B
Largest ocean?,Atlantic,Indian,Pacific,Arctic,C
";

struct TestApp {
    config: QuizConfig,
    quiz_loop: Arc<QuizLoopService>,
    exporter: Arc<MissedQuestionExporter>,
}

impl UiApp for TestApp {
    fn config(&self) -> QuizConfig {
        self.config.clone()
    }

    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    fn exporter(&self) -> Arc<MissedQuestionExporter> {
        Arc::clone(&self.exporter)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Quiz,
    About,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    handles: QuizTestHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    use_context_provider(|| props.handles.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Quiz => rsx! { QuizView {} },
        ViewKind::About => rsx! { AboutView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub handles: QuizTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(Duration::from_millis(50), self.dom.wait_for_work()).await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Drive until the lifecycle reports `phase`, giving up after a few rounds.
    pub async fn drive_until(&mut self, phase: &DisplayPhase) -> bool {
        for _ in 0..20 {
            if self.phase() == *phase {
                return true;
            }
            self.drive_async().await;
        }
        self.phase() == *phase
    }

    pub fn dispatch(&mut self, intent: QuizIntent) {
        let dispatch = self.handles.dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
        drive_dom(&mut self.dom);
    }

    pub fn phase(&self) -> DisplayPhase {
        let lifecycle = self.handles.lifecycle();
        self.dom.in_runtime(|| lifecycle.read().phase())
    }

    pub fn with_lifecycle<T>(&self, f: impl FnOnce(&QuizLifecycle) -> T) -> T {
        let lifecycle = self.handles.lifecycle();
        self.dom.in_runtime(|| f(&lifecycle.read()))
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind) -> ViewHarness {
    setup_view_harness_with_source(
        view,
        Arc::new(InMemoryQuestionSource::new(SHEET)),
        Duration::from_secs(60),
        Path::new("target/quiz-ui-tests"),
    )
}

pub fn setup_view_harness_with_source(
    view: ViewKind,
    source: Arc<dyn QuestionSource>,
    reveal_delay: Duration,
    export_dir: &Path,
) -> ViewHarness {
    let config = QuizConfig::default()
        .with_seed(Some(5))
        .with_reveal_delay(reveal_delay)
        .with_export_dir(export_dir);
    let quiz_loop = Arc::new(QuizLoopService::with_source(fixed_clock(), &config, source));
    let exporter = Arc::new(MissedQuestionExporter::new(config.export_dir.clone()));
    let app = Arc::new(TestApp {
        config,
        quiz_loop,
        exporter,
    });
    let handles = QuizTestHandles::default();

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            handles: handles.clone(),
        },
    );

    ViewHarness { dom, handles }
}
