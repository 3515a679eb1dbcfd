//! Mounts the visual edit-mode script into the page.

use dioxus::prelude::*;
use editor::EditorConfig;

/// Installs the edit-mode controller for as long as it is mounted.
///
/// Renders nothing. Outside a wasm `web` build it is inert, so the same
/// tree renders on the server.
#[component]
pub fn EditModeScript(#[props(default)] config: EditorConfig) -> Element {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        let _handle = use_hook(move || match editor::install(config) {
            Ok(handle) => {
                tracing::debug!("edit-mode script installed");
                Some(std::rc::Rc::new(handle))
            }
            Err(e) => {
                e.report();
                None
            }
        });
    }

    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    let _ = config;

    rsx! {}
}
