//! # Editor crate — in-page visual edit mode
//!
//! This crate implements the edit-mode script that an external, chat-driven
//! authoring tool injects into a rendered page. The authoring tool lives in a
//! parent frame; the page lives in an iframe. When edit mode is enabled the
//! controller intercepts clicks on elements tagged with `data-edit-id`, tells
//! the parent what the user clicked, and forwards the saved text to the
//! `/api/apply-edit` endpoint that patches the page's source.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`config`] | — | [`EditorConfig`]: allow-listed origins, endpoint, DOM selectors, translations |
//! | [`controller`] | — | [`EditModeController`], the Disabled/Enabled state machine |
//! | [`dom`] | — | The [`Dom`] trait the controller drives, plus pure hit testing |
//! | [`error`] | — | [`EditorError`] and its logging policy |
//! | [`escape`] | — | Entity-escaping of text before it is spliced into source code |
//! | [`http`] | — | [`HttpApplyEdit`], the `reqwest` client for the apply-edit endpoint |
//! | [`memory`] | — | In-memory DOM, parent frame and endpoint used by tests and previews |
//! | [`messages`] | — | Cross-frame message and HTTP payload types |
//! | [`origin`] | — | Parent-origin resolution from ancestor origins / referrer |
//! | [`tooltip`] | — | Viewport-clamped tooltip placement |
//! | [`translations`] | — | [`Translations`] shown in the disabled-element tooltip |
//! | [`transport`] | — | [`ParentFrame`] and [`ApplyEditClient`] traits |
//! | `browser` | `web` (wasm32) | `web-sys` implementations and [`install`] |

pub mod config;
pub mod controller;
pub mod dom;
pub mod error;
pub mod escape;
pub mod http;
pub mod memory;
pub mod messages;
pub mod origin;
pub mod tooltip;
pub mod translations;
pub mod transport;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod browser;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use browser::{install, BrowserDom, BrowserFrame, EditModeHandle};

pub use config::{EditorConfig, Selectors};
pub use controller::{EditMode, EditModeController, EditSession, Interception, SaveJob};
pub use dom::{find_ancestor_or_overlap, Dom, DomEvent, EventKind, Point, Rect, Size, Viewport};
pub use error::EditorError;
pub use escape::escape_source_text;
pub use http::HttpApplyEdit;
pub use messages::{
    AppliedPayload, ApplyEditRequest, ApplyEditResponse, EnterPayload, InboundMessage,
    OutboundMessage, SavePayload,
};
pub use translations::{TranslationOverrides, Translations};
pub use transport::{ApplyEditClient, ParentFrame};
