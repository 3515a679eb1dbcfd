//! In-memory doubles for the page, the parent frame and the apply-edit
//! endpoint, for testing and for running the controller outside a browser.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::dom::{Dom, Point, Rect, Selector, Size, Viewport};
use crate::error::EditorError;
use crate::messages::{ApplyEditRequest, ApplyEditResponse, OutboundMessage};
use crate::transport::{ApplyEditClient, ParentFrame};

/// Handle to a node of a [`VirtualDom`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Clone, Debug)]
struct VirtualNode {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attributes: BTreeMap<String, String>,
    text: String,
    rect: Rect,
}

/// The tooltip element as last rendered.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VirtualTooltip {
    pub id: String,
    pub text: String,
    pub visible: bool,
    pub position: Option<Point>,
}

#[derive(Debug)]
struct VirtualDomState {
    nodes: Vec<VirtualNode>,
    viewport: Viewport,
    styles: Vec<(String, String)>,
    tooltip: Option<VirtualTooltip>,
    tooltip_size: Size,
    attached: Vec<usize>,
    next_listener_set: usize,
}

/// A tiny DOM: a tree of elements with attributes, text and a fixed layout.
///
/// Later nodes paint over earlier ones, so `elements_from_point` lists them
/// in reverse creation order. Clones share the same document.
#[derive(Clone, Debug)]
pub struct VirtualDom {
    state: Arc<Mutex<VirtualDomState>>,
}

/// Token for a listener set attached to a [`VirtualDom`].
#[derive(Debug, PartialEq, Eq)]
pub struct VirtualListeners(usize);

impl Default for VirtualDom {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualDom {
    /// A document with a single `<div id="root">` covering a 1024×768
    /// viewport.
    pub fn new() -> Self {
        let viewport = Viewport {
            width: 1024.0,
            height: 768.0,
            scroll_x: 0.0,
            scroll_y: 0.0,
        };
        let root = VirtualNode {
            tag: "div".to_string(),
            parent: None,
            children: Vec::new(),
            attributes: BTreeMap::from([("id".to_string(), "root".to_string())]),
            text: String::new(),
            rect: Rect::new(0.0, 0.0, viewport.width, viewport.height),
        };
        Self {
            state: Arc::new(Mutex::new(VirtualDomState {
                nodes: vec![root],
                viewport,
                styles: Vec::new(),
                tooltip: None,
                tooltip_size: Size {
                    width: 200.0,
                    height: 30.0,
                },
                attached: Vec::new(),
                next_listener_set: 0,
            })),
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a new `tag` element to `parent`.
    pub fn append(&self, parent: NodeId, tag: &str) -> NodeId {
        let mut state = self.state.lock().unwrap();
        let id = NodeId(state.nodes.len());
        state.nodes.push(VirtualNode {
            tag: tag.to_string(),
            parent: Some(parent),
            children: Vec::new(),
            attributes: BTreeMap::new(),
            text: String::new(),
            rect: Rect::default(),
        });
        state.nodes[parent.0].children.push(id);
        id
    }

    pub fn set_attribute(&self, node: NodeId, name: &str, value: &str) {
        self.state.lock().unwrap().nodes[node.0]
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    pub fn remove_attribute(&self, node: NodeId, name: &str) {
        self.state.lock().unwrap().nodes[node.0].attributes.remove(name);
    }

    /// Set the node's own text. Descendant text is appended after it by
    /// `text_content`.
    pub fn set_text(&self, node: NodeId, text: &str) {
        self.state.lock().unwrap().nodes[node.0].text = text.to_string();
    }

    pub fn set_rect(&self, node: NodeId, rect: Rect) {
        self.state.lock().unwrap().nodes[node.0].rect = rect;
    }

    pub fn set_viewport(&self, viewport: Viewport) {
        self.state.lock().unwrap().viewport = viewport;
    }

    /// Size the tooltip reports when shown.
    pub fn set_tooltip_size(&self, size: Size) {
        self.state.lock().unwrap().tooltip_size = size;
    }

    /// Injected stylesheets as `(id, css)`, in order.
    pub fn styles(&self) -> Vec<(String, String)> {
        self.state.lock().unwrap().styles.clone()
    }

    pub fn tooltip(&self) -> Option<VirtualTooltip> {
        self.state.lock().unwrap().tooltip.clone()
    }

    /// Number of listener sets currently attached.
    pub fn attached_listener_sets(&self) -> usize {
        self.state.lock().unwrap().attached.len()
    }

    /// Total listener sets ever attached.
    pub fn listener_sets_created(&self) -> usize {
        self.state.lock().unwrap().next_listener_set
    }

    fn node_attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.state.lock().unwrap().nodes[node.0].attributes.get(name).cloned()
    }

    fn find_by_id(&self, id: &str) -> Option<NodeId> {
        let state = self.state.lock().unwrap();
        state
            .nodes
            .iter()
            .position(|n| n.attributes.get("id").is_some_and(|v| v == id))
            .map(NodeId)
    }

    fn collect_text(state: &VirtualDomState, node: NodeId, out: &mut String) {
        let node = &state.nodes[node.0];
        out.push_str(&node.text);
        for child in &node.children {
            Self::collect_text(state, *child, out);
        }
    }
}

impl Dom for VirtualDom {
    type Node = NodeId;
    type Listeners = VirtualListeners;

    fn closest(&self, node: &NodeId, selector: Selector<'_>) -> Option<NodeId> {
        let state = self.state.lock().unwrap();
        let mut current = Some(*node);
        while let Some(id) = current {
            let n = &state.nodes[id.0];
            let matches = match selector {
                Selector::Attribute(name) => n.attributes.contains_key(name),
                Selector::Id(wanted) => n.attributes.get("id").is_some_and(|v| v == wanted),
            };
            if matches {
                return Some(id);
            }
            current = n.parent;
        }
        None
    }

    fn elements_from_point(&self, point: Point) -> Vec<NodeId> {
        let state = self.state.lock().unwrap();
        state
            .nodes
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, n)| n.rect.contains(point))
            .map(|(i, _)| NodeId(i))
            .collect()
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.node_attribute(*node, name)
    }

    fn tag_name(&self, node: &NodeId) -> String {
        self.state.lock().unwrap().nodes[node.0].tag.to_uppercase()
    }

    fn text_content(&self, node: &NodeId) -> Option<String> {
        let state = self.state.lock().unwrap();
        let mut text = String::new();
        Self::collect_text(&state, *node, &mut text);
        Some(text)
    }

    fn bounding_rect(&self, node: &NodeId) -> Rect {
        self.state.lock().unwrap().nodes[node.0].rect
    }

    fn viewport(&self) -> Viewport {
        self.state.lock().unwrap().viewport
    }

    fn root_attribute(&self, root_id: &str, name: &str) -> Option<String> {
        let root = self.find_by_id(root_id)?;
        self.node_attribute(root, name)
    }

    fn set_root_attribute(&self, root_id: &str, name: &str, value: Option<&str>) {
        let Some(root) = self.find_by_id(root_id) else {
            return;
        };
        match value {
            Some(value) => self.set_attribute(root, name, value),
            None => self.remove_attribute(root, name),
        }
    }

    fn inject_style(&self, id: &str, css: &str) {
        self.state
            .lock()
            .unwrap()
            .styles
            .push((id.to_string(), css.to_string()));
    }

    fn show_tooltip(&self, id: &str, text: &str) -> Size {
        let mut state = self.state.lock().unwrap();
        let size = state.tooltip_size;
        let tooltip = state.tooltip.get_or_insert_with(VirtualTooltip::default);
        tooltip.id = id.to_string();
        tooltip.text = text.to_string();
        tooltip.visible = true;
        size
    }

    fn move_tooltip(&self, _id: &str, position: Point) {
        if let Some(tooltip) = self.state.lock().unwrap().tooltip.as_mut() {
            tooltip.position = Some(position);
        }
    }

    fn hide_tooltip(&self, _id: &str) {
        if let Some(tooltip) = self.state.lock().unwrap().tooltip.as_mut() {
            tooltip.visible = false;
        }
    }

    fn attach_listeners(&self) -> VirtualListeners {
        let mut state = self.state.lock().unwrap();
        let set = state.next_listener_set;
        state.next_listener_set += 1;
        state.attached.push(set);
        VirtualListeners(set)
    }

    fn detach_listeners(&self, listeners: VirtualListeners) {
        self.state
            .lock()
            .unwrap()
            .attached
            .retain(|set| *set != listeners.0);
    }
}

/// A parent frame that records what it is sent.
#[derive(Clone, Debug, Default)]
pub struct RecordingFrame {
    ancestor_origin: Option<String>,
    referrer: Option<String>,
    sent: Arc<Mutex<Vec<(OutboundMessage, String)>>>,
}

impl RecordingFrame {
    /// A page loaded with `referrer` and no ancestor origins (Firefox).
    pub fn with_referrer(referrer: &str) -> Self {
        Self {
            referrer: Some(referrer.to_string()),
            ..Self::default()
        }
    }

    /// A page whose first ancestor origin is `origin` (Chromium).
    pub fn with_ancestor_origin(origin: &str) -> Self {
        Self {
            ancestor_origin: Some(origin.to_string()),
            ..Self::default()
        }
    }

    /// A top-level page with no parent information.
    pub fn detached() -> Self {
        Self::default()
    }

    /// Messages posted so far with their target origin.
    pub fn sent(&self) -> Vec<(OutboundMessage, String)> {
        self.sent.lock().unwrap().clone()
    }
}

impl ParentFrame for RecordingFrame {
    fn ancestor_origin(&self) -> Option<String> {
        self.ancestor_origin.clone()
    }

    fn referrer(&self) -> Option<String> {
        self.referrer.clone()
    }

    fn post_message(&self, message: &OutboundMessage, target_origin: &str) -> Result<(), EditorError> {
        self.sent
            .lock()
            .unwrap()
            .push((message.clone(), target_origin.to_string()));
        Ok(())
    }
}

/// An apply-edit endpoint that answers every request with a fixed result.
#[derive(Clone, Debug)]
pub struct StubApplyEdit {
    reply: Result<ApplyEditResponse, EditorError>,
    requests: Arc<Mutex<Vec<ApplyEditRequest>>>,
}

impl StubApplyEdit {
    /// Accept every edit, echoing the new text as `afterCode`.
    pub fn accepting(file_content: &str, before_code: &str) -> Self {
        Self::replying(Ok(ApplyEditResponse {
            success: true,
            new_file_content: Some(file_content.to_string()),
            before_code: Some(before_code.to_string()),
            after_code: None,
            error: None,
        }))
    }

    /// Reject every edit with `success: false`.
    pub fn rejecting(error: &str) -> Self {
        Self::replying(Ok(ApplyEditResponse {
            success: false,
            error: Some(error.to_string()),
            ..ApplyEditResponse::default()
        }))
    }

    pub fn replying(reply: Result<ApplyEditResponse, EditorError>) -> Self {
        Self {
            reply,
            requests: Arc::default(),
        }
    }

    pub fn requests(&self) -> Vec<ApplyEditRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl ApplyEditClient for StubApplyEdit {
    async fn apply_edit(&self, request: &ApplyEditRequest) -> Result<ApplyEditResponse, EditorError> {
        self.requests.lock().unwrap().push(request.clone());
        let mut reply = self.reply.clone()?;
        if reply.success && reply.after_code.is_none() {
            reply.after_code = Some(request.new_full_text.clone());
        }
        Ok(reply)
    }
}
