use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{AboutView, QuizView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", QuizView)] Quiz {},
        #[route("/about", AboutView)] About {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            header { class: "topbar",
                h1 { "Quiz" }
                nav {
                    Link { to: Route::Quiz {}, "Play" }
                    Link { to: Route::About {}, "About" }
                }
            }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}
