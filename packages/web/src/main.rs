use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

use store::{ListQuery, LibraryConfig};
use ui::{LibraryProvider, LIBRARY_CSS};
use views::{Login, NotFound, PromptDetail, PromptNew, Prompts, Protected};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Protected)]
        #[route("/?:..query")]
        Prompts { query: ListQuery },
        #[route("/new")]
        PromptNew {},
        #[route("/:id")]
        PromptDetail { id: String },
    #[end_layout]
    #[route("/login")]
    Login {},
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

const CONFIG_TOML: &str = include_str!("../library.toml");

fn main() {
    if let Err(e) = dioxus::logger::init(Level::INFO) {
        eprintln!("Failed to initialize logger: {e}");
    }
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let config = use_hook(|| LibraryConfig::from_toml_or_default(CONFIG_TOML));

    rsx! {
        document::Link { rel: "stylesheet", href: LIBRARY_CSS }

        LibraryProvider {
            config,
            Router::<Route> {}
        }
    }
}
