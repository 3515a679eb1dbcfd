use dioxus::prelude::*;

use editor::EditorConfig;
use ui::{EditModeScript, LandingPage};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Landing {},
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");
const EDIT_MODE_TOML: &str = include_str!("../edit-mode.toml");

fn main() {
    dioxus::launch(App);
}

/// Edit-mode settings bundled with the build. A broken file is logged and
/// the defaults are used.
fn edit_mode_config() -> EditorConfig {
    EditorConfig::from_toml(EDIT_MODE_TOML).unwrap_or_else(|e| {
        e.report();
        EditorConfig::default()
    })
}

#[component]
fn App() -> Element {
    let config = use_hook(edit_mode_config);

    rsx! {
        document::Title { "Gestão Móveis" }
        document::Meta {
            name: "description",
            content: "CRM, projetos e finanças para lojas de móveis planejados.",
        }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        // The edit-mode script keys its activation flag off `#root`.
        div {
            id: config.selectors.root_id.clone(),
            Router::<Route> {}
        }
        EditModeScript { config: config.clone() }
    }
}

#[component]
fn Landing() -> Element {
    rsx! { LandingPage {} }
}

/// Unknown paths fall back to the landing page.
#[component]
fn NotFound(segments: Vec<String>) -> Element {
    let nav = use_navigator();
    tracing::debug!(path = %segments.join("/"), "unknown route, redirecting");
    nav.replace(Route::Landing {});
    rsx! {}
}
