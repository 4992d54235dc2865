use dioxus::prelude::*;

use crate::context::AppContext;

#[component]
pub fn AboutView() -> Element {
    let ctx = use_context::<AppContext>();
    let source = ctx.source_label().to_owned();
    let max_questions = ctx.max_questions();
    let delay_ms = ctx.reveal_delay().as_millis();
    let export_dir = ctx.export_dir().display().to_string();

    rsx! {
        div { class: "page about-page",
            h2 { "About" }
            p { "Each round draws up to {max_questions} random questions from the question bank." }
            dl { class: "about-settings",
                dt { "Question bank" }
                dd { "{source}" }
                dt { "Answer shown for" }
                dd { "{delay_ms} ms" }
                dt { "PDF export folder" }
                dd { "{export_dir}" }
            }
        }
    }
}
