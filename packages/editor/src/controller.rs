//! # Edit-mode controller — the Disabled/Enabled state machine
//!
//! [`EditModeController`] owns every piece of edit-mode state: the current
//! mode, whether the stylesheet was injected, the attached listener set, the
//! active [`EditSession`], the hovered disabled element and the tooltip
//! strings. Each page runs one instance; nothing is global.
//!
//! ## Transitions
//!
//! | Input | Effect |
//! |-------|--------|
//! | `enable-edit-mode` | flag the root, inject styles once, merge translations, attach listeners once |
//! | `disable-edit-mode` | unflag the root, hide the tooltip, detach listeners, forget the hover |
//! | pointer/mouse down, click | suppress the event; on click open a session and send `editEnter` / `imageEditEnter` |
//! | mouse move | show or hide the tooltip over `data-edit-disabled` elements |
//! | `edit-save` | build a [`SaveJob`] carrying the escaped text and the session's edit id |
//!
//! ## Saving
//!
//! Saving is the only asynchronous step. [`EditModeController::receive`]
//! hands back a [`SaveJob`] that owns everything the request needs, so the
//! caller can release the controller before awaiting [`SaveJob::run`]. The
//! edit id and the session generation are captured when the job is built;
//! a session opened while the request is in flight does not change them.
//! Once the job finishes the caller reports back through
//! [`EditModeController::finish_save`], which only closes the session the
//! job was built from. Every click opens a new generation, so a second click
//! on the same element outlives the first save.

use crate::config::EditorConfig;
use crate::dom::{find_ancestor_or_overlap, is_image, Dom, DomEvent, EventKind, Selector};
use crate::error::EditorError;
use crate::escape::escape_source_text;
use crate::messages::{AppliedPayload, ApplyEditRequest, InboundMessage, OutboundMessage};
use crate::tooltip::place_tooltip;
use crate::translations::{TranslationOverrides, Translations};
use crate::transport::{post_to_allowed_parent, ApplyEditClient, ParentFrame};

const POPUP_STYLES: &str = include_str!("../assets/popup.css");

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditMode {
    #[default]
    Disabled,
    Enabled,
}

/// What the caller must do with the native event after the controller saw it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interception {
    /// Let the page handle the event.
    PassThrough,
    /// Prevent the default action and stop propagation.
    Suppress,
}

/// The element currently being edited by the parent frame.
#[derive(Clone, Debug, PartialEq)]
pub struct EditSession<N> {
    pub edit_id: String,
    pub target: N,
    /// Increases with every opened session.
    pub generation: u64,
}

pub struct EditModeController<D: Dom, F> {
    config: EditorConfig,
    dom: D,
    frame: F,
    mode: EditMode,
    translations: Translations,
    styles_injected: bool,
    listeners: Option<D::Listeners>,
    session: Option<EditSession<D::Node>>,
    generations: u64,
    hovered: Option<D::Node>,
}

impl<D: Dom, F: ParentFrame + Clone> EditModeController<D, F> {
    pub fn new(config: EditorConfig, dom: D, frame: F) -> Self {
        let translations = config.translations.clone();
        Self {
            config,
            dom,
            frame,
            mode: EditMode::Disabled,
            translations,
            styles_injected: false,
            listeners: None,
            session: None,
            generations: 0,
            hovered: None,
        }
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn frame(&self) -> &F {
        &self.frame
    }

    pub fn translations(&self) -> &Translations {
        &self.translations
    }

    pub fn session(&self) -> Option<&EditSession<D::Node>> {
        self.session.as_ref()
    }

    /// The disabled element the tooltip is currently shown for.
    pub fn hovered(&self) -> Option<&D::Node> {
        self.hovered.as_ref()
    }

    /// Handle raw message data from `sender_origin`.
    ///
    /// Data that is not one of the three edit-mode messages is ignored: the
    /// page receives plenty of unrelated `postMessage` traffic.
    pub fn receive_json(&mut self, sender_origin: &str, data: serde_json::Value) -> Option<SaveJob<F>> {
        match serde_json::from_value::<InboundMessage>(data) {
            Ok(message) => self.receive(sender_origin, message),
            Err(e) => {
                tracing::debug!("ignoring message from {sender_origin}: {e}");
                None
            }
        }
    }

    /// Handle a message from the parent frame.
    ///
    /// Returns the save to run for `edit-save`. Errors are reported here.
    pub fn receive(&mut self, sender_origin: &str, message: InboundMessage) -> Option<SaveJob<F>> {
        if self.config.verify_inbound_origin && !self.config.is_allowed_origin(sender_origin) {
            EditorError::UntrustedSender(sender_origin.to_string()).report();
            return None;
        }

        match message {
            InboundMessage::EnableEditMode { translations } => {
                self.enable(translations.as_ref());
                None
            }
            InboundMessage::DisableEditMode => {
                self.disable();
                None
            }
            InboundMessage::EditSave { payload } => match self.begin_save(&payload.new_text) {
                Ok(job) => Some(job),
                Err(e) => {
                    e.report();
                    None
                }
            },
        }
    }

    /// Enter edit mode. Safe to call repeatedly.
    pub fn enable(&mut self, overrides: Option<&TranslationOverrides>) {
        let selectors = &self.config.selectors;
        self.dom
            .set_root_attribute(&selectors.root_id, &selectors.enabled_attribute, Some("true"));

        if !self.styles_injected {
            self.dom.inject_style(&selectors.style_id, POPUP_STYLES);
            self.styles_injected = true;
        }

        if let Some(overrides) = overrides {
            self.translations.merge(overrides);
        }

        if self.listeners.is_none() {
            self.listeners = Some(self.dom.attach_listeners());
        }

        self.mode = EditMode::Enabled;
        tracing::debug!("edit mode enabled");
    }

    /// Leave edit mode, undoing everything [`enable`](Self::enable) attached.
    pub fn disable(&mut self) {
        let selectors = &self.config.selectors;
        self.dom
            .set_root_attribute(&selectors.root_id, &selectors.enabled_attribute, None);
        self.dom.hide_tooltip(&selectors.tooltip_id);

        if let Some(listeners) = self.listeners.take() {
            self.dom.detach_listeners(listeners);
        }

        self.hovered = None;
        self.mode = EditMode::Disabled;
        tracing::debug!("edit mode disabled");
    }

    /// Handle a captured document event.
    pub fn handle_event(&mut self, event: &DomEvent<D::Node>) -> Interception {
        if self.mode != EditMode::Enabled {
            return Interception::PassThrough;
        }

        match event.kind {
            EventKind::MouseMove => {
                self.handle_hover(event);
                Interception::PassThrough
            }
            EventKind::PointerDown | EventKind::MouseDown | EventKind::Click => {
                self.handle_pointer(event)
            }
        }
    }

    fn handle_pointer(&mut self, event: &DomEvent<D::Node>) -> Interception {
        let selectors = &self.config.selectors;
        let flagged = self
            .dom
            .root_attribute(&selectors.root_id, &selectors.enabled_attribute)
            .is_some_and(|v| !v.is_empty());
        if !flagged {
            return Interception::PassThrough;
        }

        if self
            .dom
            .closest(&event.target, Selector::Id(&selectors.popup_id))
            .is_some()
        {
            return Interception::PassThrough;
        }

        let editable = find_ancestor_or_overlap(
            &self.dom,
            &event.target,
            event.point,
            &selectors.edit_id_attribute,
        );

        if let (Some(element), EventKind::Click) = (editable, event.kind) {
            if let Err(e) = self.open_session(element) {
                e.report();
            }
        }

        // Everything is swallowed while editing, editable or not.
        Interception::Suppress
    }

    fn open_session(&mut self, element: D::Node) -> Result<(), EditorError> {
        let edit_id = self
            .dom
            .attribute(&element, &self.config.selectors.edit_id_attribute)
            .filter(|id| !id.is_empty())
            .ok_or(EditorError::MissingEditId)?;

        let image = is_image(&self.dom, &element);
        let content = if image {
            self.dom.attribute(&element, "src")
        } else {
            self.dom.text_content(&element)
        }
        .unwrap_or_default();

        tracing::debug!("opening edit session for {edit_id}");
        self.generations += 1;
        self.session = Some(EditSession {
            edit_id,
            target: element,
            generation: self.generations,
        });

        let message = OutboundMessage::enter(content, image);
        post_to_allowed_parent(&self.frame, &self.config.allowed_origins, &message)?;
        Ok(())
    }

    fn handle_hover(&mut self, event: &DomEvent<D::Node>) {
        let found = find_ancestor_or_overlap(
            &self.dom,
            &event.target,
            event.point,
            &self.config.selectors.disabled_attribute,
        );

        match found {
            Some(disabled) => {
                if self.hovered.as_ref() != Some(&disabled) {
                    self.show_tooltip(&disabled);
                    self.hovered = Some(disabled);
                }
            }
            None => {
                if self.hovered.take().is_some() {
                    self.dom.hide_tooltip(&self.config.selectors.tooltip_id);
                }
            }
        }
    }

    fn show_tooltip(&self, anchor: &D::Node) {
        let id = &self.config.selectors.tooltip_id;
        let text = self.translations.tooltip_text(is_image(&self.dom, anchor));
        let size = self.dom.show_tooltip(id, text);
        let position = place_tooltip(
            self.dom.bounding_rect(anchor),
            size,
            self.dom.viewport(),
            self.config.tooltip_margin,
        );
        self.dom.move_tooltip(id, position);
    }

    /// Prepare the save of `new_text` for the active session.
    pub fn begin_save(&self, new_text: &str) -> Result<SaveJob<F>, EditorError> {
        let session = self.session.as_ref().ok_or(EditorError::NoActiveSession)?;
        Ok(SaveJob {
            request: ApplyEditRequest {
                edit_id: session.edit_id.clone(),
                new_full_text: escape_source_text(new_text),
            },
            generation: session.generation,
            frame: self.frame.clone(),
            allowed_origins: self.config.allowed_origins.clone(),
        })
    }

    /// Close the session a finished save belonged to. A session opened in
    /// the meantime is kept, even for the same element.
    pub fn finish_save(&mut self, generation: u64) {
        if self.session.as_ref().is_some_and(|s| s.generation == generation) {
            self.session = None;
        }
    }
}

/// A save captured at request time, detached from the controller.
#[derive(Clone, Debug)]
pub struct SaveJob<F> {
    request: ApplyEditRequest,
    generation: u64,
    frame: F,
    allowed_origins: Vec<String>,
}

impl<F: ParentFrame> SaveJob<F> {
    pub fn request(&self) -> &ApplyEditRequest {
        &self.request
    }

    pub fn edit_id(&self) -> &str {
        &self.request.edit_id
    }

    /// Generation of the session the job was built from.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Send the edit and relay the result to the parent frame.
    ///
    /// There is no retry: a rejected save, a transport failure or an
    /// unauthorized parent all end here as an error.
    pub async fn run<C: ApplyEditClient>(self, client: &C) -> Result<AppliedPayload, EditorError> {
        let response = client.apply_edit(&self.request).await?;
        if !response.success {
            return Err(EditorError::SaveRejected(
                response.error.unwrap_or_else(|| "no error message".to_string()),
            ));
        }

        let payload = AppliedPayload {
            edit_id: self.request.edit_id,
            file_content: response.new_file_content,
            before_code: response.before_code,
            after_code: response.after_code,
        };
        post_to_allowed_parent(
            &self.frame,
            &self.allowed_origins,
            &OutboundMessage::EditApplied(payload.clone()),
        )?;
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Point, Rect};
    use crate::memory::{NodeId, RecordingFrame, StubApplyEdit, VirtualDom};

    const PARENT: &str = "https://horizons.hostinger.com";

    fn controller(frame: RecordingFrame) -> (EditModeController<VirtualDom, RecordingFrame>, VirtualDom) {
        let dom = VirtualDom::new();
        let controller = EditModeController::new(EditorConfig::default(), dom.clone(), frame);
        (controller, dom)
    }

    fn click(target: NodeId) -> DomEvent<NodeId> {
        DomEvent {
            kind: EventKind::Click,
            target,
            point: Point::default(),
        }
    }

    fn hover(target: NodeId, point: Point) -> DomEvent<NodeId> {
        DomEvent {
            kind: EventKind::MouseMove,
            target,
            point,
        }
    }

    #[test]
    fn test_starts_disabled() {
        let (mut controller, dom) = controller(RecordingFrame::detached());
        let title = dom.append(dom.root(), "h1");
        dom.set_attribute(title, "data-edit-id", "hero-title");

        assert_eq!(controller.mode(), EditMode::Disabled);
        assert_eq!(controller.handle_event(&click(title)), Interception::PassThrough);
        assert!(controller.session().is_none());
    }

    #[test]
    fn test_enable_is_idempotent() {
        let (mut controller, dom) = controller(RecordingFrame::detached());

        controller.enable(None);
        controller.enable(None);
        assert_eq!(dom.attached_listener_sets(), 1);
        assert_eq!(dom.listener_sets_created(), 1);
        assert_eq!(dom.styles().len(), 1);
        assert_eq!(dom.styles()[0].0, "inline-editor-styles");
        assert_eq!(
            dom.root_attribute("root", "data-edit-mode-enabled").as_deref(),
            Some("true")
        );

        controller.disable();
        assert_eq!(dom.attached_listener_sets(), 0);
        assert_eq!(dom.root_attribute("root", "data-edit-mode-enabled"), None);
        assert_eq!(controller.mode(), EditMode::Disabled);
    }

    #[test]
    fn test_reenable_reattaches_but_keeps_styles() {
        let (mut controller, dom) = controller(RecordingFrame::detached());

        controller.enable(None);
        controller.disable();
        controller.enable(None);
        assert_eq!(dom.attached_listener_sets(), 1);
        assert_eq!(dom.listener_sets_created(), 2);
        assert_eq!(dom.styles().len(), 1);
    }

    #[test]
    fn test_disable_when_disabled() {
        let (mut controller, dom) = controller(RecordingFrame::detached());
        controller.disable();
        assert_eq!(dom.attached_listener_sets(), 0);
        assert_eq!(controller.mode(), EditMode::Disabled);
    }

    #[test]
    fn test_translations_are_merged() {
        let (mut controller, _dom) = controller(RecordingFrame::detached());
        controller.enable(Some(&TranslationOverrides {
            disabled_tooltip_text: Some("Altere pelo chat.".into()),
            disabled_tooltip_text_image: None,
        }));
        controller.enable(Some(&TranslationOverrides {
            disabled_tooltip_text: None,
            disabled_tooltip_text_image: Some("Imagem só pelo chat.".into()),
        }));

        assert_eq!(controller.translations().disabled_tooltip_text, "Altere pelo chat.");
        assert_eq!(
            controller.translations().disabled_tooltip_text_image,
            "Imagem só pelo chat."
        );
    }

    #[test]
    fn test_pointer_down_is_suppressed_without_session() {
        let (mut controller, dom) = controller(RecordingFrame::with_referrer(PARENT));
        let title = dom.append(dom.root(), "h1");
        dom.set_attribute(title, "data-edit-id", "hero-title");
        controller.enable(None);

        for kind in [EventKind::PointerDown, EventKind::MouseDown] {
            let event = DomEvent {
                kind,
                target: title,
                point: Point::default(),
            };
            assert_eq!(controller.handle_event(&event), Interception::Suppress);
        }
        assert!(controller.session().is_none());
        assert!(controller.frame().sent().is_empty());
    }

    #[test]
    fn test_click_on_image_sends_src() {
        let (mut controller, dom) = controller(RecordingFrame::with_ancestor_origin(PARENT));
        let image = dom.append(dom.root(), "img");
        dom.set_attribute(image, "data-edit-id", "hero-image");
        dom.set_attribute(image, "src", "https://images.unsplash.com/photo-1704030964199");
        controller.enable(None);

        assert_eq!(controller.handle_event(&click(image)), Interception::Suppress);
        assert_eq!(
            controller.frame().sent(),
            vec![(
                OutboundMessage::enter("https://images.unsplash.com/photo-1704030964199".into(), true),
                PARENT.to_string()
            )]
        );
        assert_eq!(controller.session().unwrap().target, image);
    }

    #[test]
    fn test_click_on_image_without_src() {
        let (mut controller, dom) = controller(RecordingFrame::with_ancestor_origin(PARENT));
        let image = dom.append(dom.root(), "img");
        dom.set_attribute(image, "data-edit-id", "logo");
        controller.enable(None);

        controller.handle_event(&click(image));
        assert_eq!(
            controller.frame().sent()[0].0,
            OutboundMessage::enter(String::new(), true)
        );
    }

    #[test]
    fn test_empty_edit_id_is_dropped() {
        let (mut controller, dom) = controller(RecordingFrame::with_referrer(PARENT));
        let title = dom.append(dom.root(), "h1");
        dom.set_attribute(title, "data-edit-id", "");
        controller.enable(None);

        assert_eq!(controller.handle_event(&click(title)), Interception::Suppress);
        assert!(controller.session().is_none());
        assert!(controller.frame().sent().is_empty());
    }

    #[test]
    fn test_unauthorized_parent_still_opens_session() {
        let (mut controller, dom) =
            controller(RecordingFrame::with_referrer("https://evil.example/frame"));
        let title = dom.append(dom.root(), "h1");
        dom.set_attribute(title, "data-edit-id", "hero-title");
        controller.enable(None);

        assert_eq!(controller.handle_event(&click(title)), Interception::Suppress);
        assert_eq!(controller.session().unwrap().edit_id, "hero-title");
        assert!(controller.frame().sent().is_empty());
    }

    #[test]
    fn test_new_click_replaces_session() {
        let (mut controller, dom) = controller(RecordingFrame::with_referrer(PARENT));
        let title = dom.append(dom.root(), "h1");
        dom.set_attribute(title, "data-edit-id", "hero-title");
        let subtitle = dom.append(dom.root(), "p");
        dom.set_attribute(subtitle, "data-edit-id", "hero-subtitle");
        controller.enable(None);

        controller.handle_event(&click(title));
        controller.handle_event(&click(subtitle));
        assert_eq!(controller.session().unwrap().edit_id, "hero-subtitle");
        assert_eq!(controller.frame().sent().len(), 2);
    }

    #[test]
    fn test_popup_events_pass_through() {
        let (mut controller, dom) = controller(RecordingFrame::with_referrer(PARENT));
        let popup = dom.append(dom.root(), "div");
        dom.set_attribute(popup, "id", "inline-editor-popup");
        let input = dom.append(popup, "textarea");
        controller.enable(None);

        assert_eq!(controller.handle_event(&click(input)), Interception::PassThrough);
    }

    #[test]
    fn test_missing_root_flag_passes_through() {
        let (mut controller, dom) = controller(RecordingFrame::with_referrer(PARENT));
        let title = dom.append(dom.root(), "h1");
        dom.set_attribute(title, "data-edit-id", "hero-title");
        controller.enable(None);
        // The app re-rendered its root and dropped the flag.
        dom.remove_attribute(dom.root(), "data-edit-mode-enabled");

        assert_eq!(controller.handle_event(&click(title)), Interception::PassThrough);
        assert!(controller.frame().sent().is_empty());
    }

    #[test]
    fn test_hover_tooltip_lifecycle() {
        let (mut controller, dom) = controller(RecordingFrame::detached());
        let footer = dom.append(dom.root(), "p");
        dom.set_attribute(footer, "data-edit-disabled", "true");
        dom.set_rect(footer, Rect::new(300.0, 100.0, 100.0, 20.0));
        let logo = dom.append(dom.root(), "img");
        dom.set_attribute(logo, "data-edit-disabled", "true");
        dom.set_rect(logo, Rect::new(0.0, 300.0, 40.0, 40.0));
        controller.enable(None);

        let over_footer = Point { x: 310.0, y: 110.0 };
        assert_eq!(
            controller.handle_event(&hover(footer, over_footer)),
            Interception::PassThrough
        );
        let tooltip = dom.tooltip().unwrap();
        assert!(tooltip.visible);
        assert_eq!(tooltip.id, "inline-editor-disabled-tooltip");
        assert_eq!(tooltip.text, "This text can be changed only through chat.");
        assert_eq!(tooltip.position, Some(Point { x: 250.0, y: 125.0 }));
        assert_eq!(controller.hovered(), Some(&footer));

        controller.handle_event(&hover(logo, Point { x: 10.0, y: 310.0 }));
        let tooltip = dom.tooltip().unwrap();
        assert_eq!(tooltip.text, "This image can only be changed through chat.");
        assert_eq!(tooltip.position, Some(Point { x: 5.0, y: 345.0 }));

        controller.handle_event(&hover(dom.root(), Point { x: 900.0, y: 700.0 }));
        assert!(!dom.tooltip().unwrap().visible);
        assert_eq!(controller.hovered(), None);
    }

    #[test]
    fn test_hover_same_element_does_not_rerender() {
        let (mut controller, dom) = controller(RecordingFrame::detached());
        let footer = dom.append(dom.root(), "p");
        dom.set_attribute(footer, "data-edit-disabled", "true");
        dom.set_rect(footer, Rect::new(300.0, 100.0, 100.0, 20.0));
        controller.enable(None);

        controller.handle_event(&hover(footer, Point { x: 310.0, y: 110.0 }));
        // Resize the tooltip; a repeated hover over the same element must
        // not move it.
        dom.set_tooltip_size(crate::dom::Size {
            width: 50.0,
            height: 10.0,
        });
        controller.handle_event(&hover(footer, Point { x: 390.0, y: 115.0 }));
        assert_eq!(dom.tooltip().unwrap().position, Some(Point { x: 250.0, y: 125.0 }));
    }

    #[test]
    fn test_disable_hides_tooltip_and_forgets_hover() {
        let (mut controller, dom) = controller(RecordingFrame::detached());
        let footer = dom.append(dom.root(), "p");
        dom.set_attribute(footer, "data-edit-disabled", "true");
        dom.set_rect(footer, Rect::new(300.0, 100.0, 100.0, 20.0));
        controller.enable(None);
        controller.handle_event(&hover(footer, Point { x: 310.0, y: 110.0 }));

        controller.disable();
        assert!(!dom.tooltip().unwrap().visible);
        assert_eq!(controller.hovered(), None);
    }

    #[test]
    fn test_inbound_origin_is_checked() {
        let (mut controller, dom) = controller(RecordingFrame::detached());

        let job = controller.receive(
            "https://evil.example",
            InboundMessage::EnableEditMode { translations: None },
        );
        assert!(job.is_none());
        assert_eq!(controller.mode(), EditMode::Disabled);
        assert_eq!(dom.attached_listener_sets(), 0);

        controller.receive(PARENT, InboundMessage::EnableEditMode { translations: None });
        assert_eq!(controller.mode(), EditMode::Enabled);
    }

    #[test]
    fn test_inbound_origin_check_can_be_disabled() {
        let dom = VirtualDom::new();
        let config = EditorConfig::default().with_inbound_origin_check(false);
        let mut controller = EditModeController::new(config, dom, RecordingFrame::detached());

        controller.receive("null", InboundMessage::EnableEditMode { translations: None });
        assert_eq!(controller.mode(), EditMode::Enabled);
    }

    #[test]
    fn test_unrelated_messages_are_ignored() {
        let (mut controller, _dom) = controller(RecordingFrame::detached());
        let data = serde_json::json!({ "source": "react-devtools-bridge", "payload": {} });
        assert!(controller.receive_json(PARENT, data).is_none());
        assert_eq!(controller.mode(), EditMode::Disabled);
    }

    #[test]
    fn test_save_without_session() {
        let (controller, _dom) = controller(RecordingFrame::detached());
        assert_eq!(
            controller.begin_save("Hi").unwrap_err(),
            EditorError::NoActiveSession
        );
    }

    #[tokio::test]
    async fn test_save_captures_edit_id_at_request_time() {
        let (mut controller, dom) = controller(RecordingFrame::with_referrer(PARENT));
        let title = dom.append(dom.root(), "h1");
        dom.set_attribute(title, "data-edit-id", "hero-title");
        let subtitle = dom.append(dom.root(), "p");
        dom.set_attribute(subtitle, "data-edit-id", "hero-subtitle");
        controller.enable(None);
        controller.handle_event(&click(title));

        let job = controller.begin_save("Olá {nome}").unwrap();
        // The user clicks elsewhere while the request is in flight.
        controller.handle_event(&click(subtitle));

        let client = StubApplyEdit::accepting("<h1>Olá</h1>", "Welcome");
        let generation = job.generation();
        let applied = job.run(&client).await.unwrap();
        controller.finish_save(generation);

        assert_eq!(client.requests()[0].edit_id, "hero-title");
        assert_eq!(client.requests()[0].new_full_text, "Olá &#123;nome&#125;");
        assert_eq!(applied.edit_id, "hero-title");
        assert_eq!(controller.session().unwrap().edit_id, "hero-subtitle");
    }

    #[tokio::test]
    async fn test_finished_save_closes_session() {
        let (mut controller, dom) = controller(RecordingFrame::with_referrer(PARENT));
        let title = dom.append(dom.root(), "h1");
        dom.set_attribute(title, "data-edit-id", "hero-title");
        controller.enable(None);
        controller.handle_event(&click(title));

        let job = controller.begin_save("Hi").unwrap();
        let generation = job.generation();
        job.run(&StubApplyEdit::accepting("<h1>Hi</h1>", "Welcome"))
            .await
            .unwrap();
        controller.finish_save(generation);
        assert!(controller.session().is_none());
    }

    #[tokio::test]
    async fn test_reclick_during_save_keeps_new_session() {
        let (mut controller, dom) = controller(RecordingFrame::with_referrer(PARENT));
        let title = dom.append(dom.root(), "h1");
        dom.set_attribute(title, "data-edit-id", "hero-title");
        controller.enable(None);
        controller.handle_event(&click(title));

        let first = controller.begin_save("first").unwrap();
        // Same element clicked again while the first save is in flight.
        controller.handle_event(&click(title));
        let reopened = controller.session().unwrap().generation;
        assert!(reopened > first.generation());

        let client = StubApplyEdit::accepting("<h1>first</h1>", "Welcome");
        let generation = first.generation();
        first.run(&client).await.unwrap();
        controller.finish_save(generation);

        let session = controller.session().unwrap();
        assert_eq!(session.edit_id, "hero-title");
        assert_eq!(session.generation, reopened);

        let second = controller.begin_save("second").unwrap();
        assert_eq!(second.generation(), reopened);
        second.run(&client).await.unwrap();
        assert_eq!(client.requests()[1].new_full_text, "second");
    }

    #[tokio::test]
    async fn test_rejected_save_is_not_relayed() {
        let (mut controller, dom) = controller(RecordingFrame::with_referrer(PARENT));
        let title = dom.append(dom.root(), "h1");
        dom.set_attribute(title, "data-edit-id", "hero-title");
        controller.enable(None);
        controller.handle_event(&click(title));
        let before = controller.frame().sent().len();

        let job = controller.begin_save("Hi").unwrap();
        let err = job
            .run(&StubApplyEdit::rejecting("edit id not found"))
            .await
            .unwrap_err();
        assert_eq!(err, EditorError::SaveRejected("edit id not found".into()));
        assert_eq!(controller.frame().sent().len(), before);
    }

    #[tokio::test]
    async fn test_transport_failure_is_not_relayed() {
        let (mut controller, dom) = controller(RecordingFrame::with_referrer(PARENT));
        let title = dom.append(dom.root(), "h1");
        dom.set_attribute(title, "data-edit-id", "hero-title");
        controller.enable(None);
        controller.handle_event(&click(title));
        let before = controller.frame().sent().len();

        let failure = EditorError::Transport {
            edit_id: "hero-title".into(),
            reason: "Failed to fetch".into(),
        };
        let job = controller.begin_save("Hi").unwrap();
        let err = job
            .run(&StubApplyEdit::replying(Err(failure.clone())))
            .await
            .unwrap_err();
        assert_eq!(err, failure);
        assert_eq!(controller.frame().sent().len(), before);
    }

    #[tokio::test]
    async fn test_applied_edit_to_unauthorized_parent_is_dropped() {
        let (mut controller, dom) = controller(RecordingFrame::detached());
        let title = dom.append(dom.root(), "h1");
        dom.set_attribute(title, "data-edit-id", "hero-title");
        controller.enable(None);
        controller.handle_event(&click(title));

        let client = StubApplyEdit::accepting("<h1>Hi</h1>", "Welcome");
        let err = controller
            .begin_save("Hi")
            .unwrap()
            .run(&client)
            .await
            .unwrap_err();
        assert_eq!(err, EditorError::UnauthorizedOrigin(None));
        assert_eq!(client.requests().len(), 1);
        assert!(controller.frame().sent().is_empty());
    }
}
