//! # Browser backend — `web-sys` implementations and installation
//!
//! This module is the [`Dom`] / [`ParentFrame`] pair used on the **web
//! platform**, plus [`install`], the entry point a page calls to become
//! editable.
//!
//! ## Wiring
//!
//! ```text
//! window "message" ──► EditModeController::receive_json ──► SaveJob ──► spawn_local(run)
//! document capture listeners ──► EditModeController::handle_event ──► preventDefault / stopPropagation
//! ```
//!
//! The controller is shared as `Rc<RefCell<_>>`. Listener closures only
//! hold a `Weak`, so dropping the [`EditModeHandle`] tears everything down.
//! Borrows never span an `await`: the save future owns its [`SaveJob`].
//!
//! ## Error handling
//!
//! DOM calls that can throw are treated as "element missing" and ignored;
//! a misbehaving page must not take edit mode down with it.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, DomStringList, Element, Event, HtmlElement, MessageEvent, MouseEvent, Window};

use crate::config::EditorConfig;
use crate::controller::{EditModeController, Interception};
use crate::dom::{Dom, DomEvent, EventKind, Point, Rect, Selector, Size, Viewport};
use crate::error::EditorError;
use crate::http::HttpApplyEdit;
use crate::messages::OutboundMessage;
use crate::transport::ParentFrame;

type BrowserController = EditModeController<BrowserDom, BrowserFrame>;
type Dispatcher = Rc<dyn Fn(Event)>;

/// `web_sys` document driven by the controller.
pub struct BrowserDom {
    window: Window,
    document: Document,
    dispatch: Dispatcher,
}

/// Capture-phase closures attached to the document.
pub struct BrowserListeners {
    closures: Vec<(EventKind, Closure<dyn FnMut(Event)>)>,
}

impl BrowserDom {
    fn new(window: Window, document: Document, dispatch: Dispatcher) -> Self {
        Self {
            window,
            document,
            dispatch,
        }
    }

    fn tooltip_element(&self, id: &str) -> Option<HtmlElement> {
        self.document
            .get_element_by_id(id)?
            .dyn_into::<HtmlElement>()
            .ok()
    }

    fn create_tooltip(&self, id: &str) -> Option<HtmlElement> {
        let element = self.document.create_element("div").ok()?;
        element.set_id(id);
        self.document.body()?.append_child(&element).ok()?;
        element.dyn_into::<HtmlElement>().ok()
    }
}

impl Dom for BrowserDom {
    type Node = Element;
    type Listeners = BrowserListeners;

    fn closest(&self, node: &Element, selector: Selector<'_>) -> Option<Element> {
        node.closest(&selector.to_css()).ok().flatten()
    }

    fn elements_from_point(&self, point: Point) -> Vec<Element> {
        self.document
            .elements_from_point(point.x as f32, point.y as f32)
            .iter()
            .filter_map(|value| value.dyn_into::<Element>().ok())
            .collect()
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn has_attribute(&self, node: &Element, name: &str) -> bool {
        node.has_attribute(name)
    }

    fn tag_name(&self, node: &Element) -> String {
        node.tag_name()
    }

    fn text_content(&self, node: &Element) -> Option<String> {
        node.text_content()
    }

    fn bounding_rect(&self, node: &Element) -> Rect {
        let rect = node.get_bounding_client_rect();
        Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
    }

    fn viewport(&self) -> Viewport {
        let dimension = |value: Result<JsValue, JsValue>| {
            value.ok().and_then(|v| v.as_f64()).unwrap_or_default()
        };
        Viewport {
            width: dimension(self.window.inner_width()),
            height: dimension(self.window.inner_height()),
            scroll_x: self.window.scroll_x().unwrap_or_default(),
            scroll_y: self.window.scroll_y().unwrap_or_default(),
        }
    }

    fn root_attribute(&self, root_id: &str, name: &str) -> Option<String> {
        self.document.get_element_by_id(root_id)?.get_attribute(name)
    }

    fn set_root_attribute(&self, root_id: &str, name: &str, value: Option<&str>) {
        let Some(root) = self.document.get_element_by_id(root_id) else {
            return;
        };
        let _ = match value {
            Some(value) => root.set_attribute(name, value),
            None => root.remove_attribute(name),
        };
    }

    fn inject_style(&self, id: &str, css: &str) {
        let Ok(style) = self.document.create_element("style") else {
            return;
        };
        style.set_id(id);
        style.set_text_content(Some(css));
        if let Some(head) = self.document.head() {
            let _ = head.append_child(&style);
        }
    }

    fn show_tooltip(&self, id: &str, text: &str) -> Size {
        let Some(tooltip) = self
            .tooltip_element(id)
            .or_else(|| self.create_tooltip(id))
        else {
            return Size::default();
        };

        tooltip.set_text_content(Some(text));
        if !tooltip.is_connected() {
            if let Some(body) = self.document.body() {
                let _ = body.append_child(&tooltip);
            }
        }
        let _ = tooltip.class_list().add_1("tooltip-active");

        Size {
            width: f64::from(tooltip.offset_width()),
            height: f64::from(tooltip.offset_height()),
        }
    }

    fn move_tooltip(&self, id: &str, position: Point) {
        let Some(tooltip) = self.tooltip_element(id) else {
            return;
        };
        let style = tooltip.style();
        let _ = style.set_property("left", &format!("{}px", position.x));
        let _ = style.set_property("top", &format!("{}px", position.y));
    }

    fn hide_tooltip(&self, id: &str) {
        if let Some(tooltip) = self.tooltip_element(id) {
            let _ = tooltip.class_list().remove_1("tooltip-active");
        }
    }

    fn attach_listeners(&self) -> BrowserListeners {
        let closures = EventKind::ALL
            .into_iter()
            .map(|kind| {
                let dispatch = Rc::clone(&self.dispatch);
                let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| dispatch(event));
                let _ = self.document.add_event_listener_with_callback_and_bool(
                    kind.as_str(),
                    closure.as_ref().unchecked_ref(),
                    true,
                );
                (kind, closure)
            })
            .collect();
        BrowserListeners { closures }
    }

    fn detach_listeners(&self, listeners: BrowserListeners) {
        for (kind, closure) in listeners.closures {
            let _ = self.document.remove_event_listener_with_callback_and_bool(
                kind.as_str(),
                closure.as_ref().unchecked_ref(),
                true,
            );
        }
    }
}

/// The window's parent, as seen from inside the iframe.
#[derive(Clone)]
pub struct BrowserFrame {
    window: Window,
    document: Document,
}

impl BrowserFrame {
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }
}

impl ParentFrame for BrowserFrame {
    fn ancestor_origin(&self) -> Option<String> {
        // `ancestorOrigins` is missing outside Chromium; read it reflectively
        // instead of through the typed getter.
        let location: JsValue = self.window.location().into();
        let origins = js_sys::Reflect::get(&location, &JsValue::from_str("ancestorOrigins")).ok()?;
        if origins.is_undefined() || origins.is_null() {
            return None;
        }
        origins.dyn_into::<DomStringList>().ok()?.item(0)
    }

    fn referrer(&self) -> Option<String> {
        Some(self.document.referrer()).filter(|r| !r.is_empty())
    }

    fn post_message(&self, message: &OutboundMessage, target_origin: &str) -> Result<(), EditorError> {
        let parent = self
            .window
            .parent()
            .ok()
            .flatten()
            .ok_or_else(|| EditorError::UnauthorizedOrigin(None))?;
        let value = serde_wasm_bindgen::to_value(message)
            .map_err(|e| EditorError::InvalidMessage(e.to_string()))?;
        parent
            .post_message(&value, target_origin)
            .map_err(|e| EditorError::InvalidMessage(format!("{e:?}")))
    }
}

/// Keeps edit mode installed on the page. Dropping it disables edit mode
/// and removes the message listener.
pub struct EditModeHandle {
    window: Window,
    controller: Rc<RefCell<BrowserController>>,
    on_message: Closure<dyn FnMut(MessageEvent)>,
}

impl EditModeHandle {
    /// Current controller state, for diagnostics.
    pub fn controller(&self) -> Rc<RefCell<BrowserController>> {
        Rc::clone(&self.controller)
    }
}

impl Drop for EditModeHandle {
    fn drop(&mut self) {
        let _ = self.window.remove_event_listener_with_callback(
            "message",
            self.on_message.as_ref().unchecked_ref(),
        );
        if let Ok(mut controller) = self.controller.try_borrow_mut() {
            controller.disable();
        }
    }
}

/// Make the current page controllable by the parent frame.
///
/// Edit mode starts disabled; the parent turns it on with
/// `enable-edit-mode`.
pub fn install(config: EditorConfig) -> Result<EditModeHandle, EditorError> {
    let window = web_sys::window().ok_or_else(|| EditorError::Config("no window".to_string()))?;
    let document = window
        .document()
        .ok_or_else(|| EditorError::Config("no document".to_string()))?;
    let page_url = window
        .location()
        .href()
        .map_err(|e| EditorError::Config(format!("{e:?}")))?;
    let client = Rc::new(HttpApplyEdit::for_page(&page_url, &config.apply_edit_url)?);

    let frame = BrowserFrame::new(window.clone(), document.clone());
    let controller = Rc::new_cyclic(|weak: &Weak<RefCell<BrowserController>>| {
        let dom = BrowserDom::new(window.clone(), document.clone(), dispatcher(weak.clone()));
        RefCell::new(EditModeController::new(config, dom, frame))
    });

    let weak = Rc::downgrade(&controller);
    let on_message = Closure::<dyn FnMut(MessageEvent)>::new(move |event: MessageEvent| {
        let Some(controller) = weak.upgrade() else {
            return;
        };
        let Ok(data) = serde_wasm_bindgen::from_value::<serde_json::Value>(event.data()) else {
            return;
        };
        let Some(job) = controller.borrow_mut().receive_json(&event.origin(), data) else {
            return;
        };

        let client = Rc::clone(&client);
        let weak = Rc::downgrade(&controller);
        wasm_bindgen_futures::spawn_local(async move {
            let edit_id = job.edit_id().to_string();
            let generation = job.generation();
            match job.run(client.as_ref()).await {
                Ok(_) => tracing::debug!("edit {edit_id} applied"),
                Err(e) => e.report(),
            }
            if let Some(controller) = weak.upgrade() {
                controller.borrow_mut().finish_save(generation);
            }
        });
    });
    window
        .add_event_listener_with_callback("message", on_message.as_ref().unchecked_ref())
        .map_err(|e| EditorError::Config(format!("{e:?}")))?;

    Ok(EditModeHandle {
        window,
        controller,
        on_message,
    })
}

/// Route a captured native event into the controller.
fn dispatcher(controller: Weak<RefCell<BrowserController>>) -> Dispatcher {
    Rc::new(move |event: Event| {
        let Some(controller) = controller.upgrade() else {
            return;
        };
        let Some(kind) = EventKind::from_name(&event.type_()) else {
            return;
        };
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        let point = event
            .dyn_ref::<MouseEvent>()
            .map(|e| Point {
                x: f64::from(e.client_x()),
                y: f64::from(e.client_y()),
            })
            .unwrap_or_default();

        // A listener can fire while the controller is mid-transition.
        let Ok(mut controller) = controller.try_borrow_mut() else {
            return;
        };
        if controller.handle_event(&DomEvent { kind, target, point }) == Interception::Suppress {
            event.prevent_default();
            event.stop_propagation();
            event.stop_immediate_propagation();
        }
    })
}
