//! # DOM abstraction and hit testing
//!
//! The controller never touches `web_sys` directly. It drives a [`Dom`], an
//! interface with the handful of page operations edit mode needs: attribute
//! lookups, `closest`, `elementsFromPoint`, geometry, the root flag, the
//! injected stylesheet, the tooltip element and the capture-phase listener
//! set. Implementations live in sibling modules ([`crate::memory`] and the
//! `web`-gated browser module).
//!
//! [`find_ancestor_or_overlap`] is the hit test shared by clicks and hovers.

use std::fmt::Debug;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A rectangle in viewport coordinates, as returned by
/// `getBoundingClientRect`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left && point.x < self.right() && point.y >= self.top && point.y < self.bottom()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Window size and scroll offset.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub scroll_x: f64,
    pub scroll_y: f64,
}

/// The document events edit mode listens to in the capture phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerDown,
    MouseDown,
    Click,
    MouseMove,
}

impl EventKind {
    pub const ALL: [EventKind; 4] = [
        EventKind::PointerDown,
        EventKind::MouseDown,
        EventKind::Click,
        EventKind::MouseMove,
    ];

    /// DOM event type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::PointerDown => "pointerdown",
            EventKind::MouseDown => "mousedown",
            EventKind::Click => "click",
            EventKind::MouseMove => "mousemove",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

/// A pointer event as seen by the controller.
#[derive(Clone, Debug, PartialEq)]
pub struct DomEvent<N> {
    pub kind: EventKind,
    pub target: N,
    /// Client coordinates of the pointer.
    pub point: Point,
}

/// What `closest` looks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selector<'a> {
    Attribute(&'a str),
    Id(&'a str),
}

impl Selector<'_> {
    /// The equivalent CSS selector.
    pub fn to_css(&self) -> String {
        match self {
            Selector::Attribute(name) => format!("[{name}]"),
            Selector::Id(id) => format!("#{id}"),
        }
    }
}

/// The page operations edit mode depends on.
pub trait Dom {
    type Node: Clone + PartialEq + Debug;
    /// Handle to an attached capture-phase listener set.
    type Listeners;

    /// `node` or its nearest ancestor matching `selector`.
    fn closest(&self, node: &Self::Node, selector: Selector<'_>) -> Option<Self::Node>;

    /// Every element under `point`, topmost first.
    fn elements_from_point(&self, point: Point) -> Vec<Self::Node>;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn has_attribute(&self, node: &Self::Node, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    fn tag_name(&self, node: &Self::Node) -> String;

    fn text_content(&self, node: &Self::Node) -> Option<String>;

    fn bounding_rect(&self, node: &Self::Node) -> Rect;

    fn viewport(&self) -> Viewport;

    /// Attribute of the element with id `root_id`, if both exist.
    fn root_attribute(&self, root_id: &str, name: &str) -> Option<String>;

    /// Set (`Some`) or remove (`None`) an attribute on the root element.
    /// Does nothing when the root is missing.
    fn set_root_attribute(&self, root_id: &str, name: &str, value: Option<&str>);

    /// Append a `<style id=id>` with `css` to the document head.
    fn inject_style(&self, id: &str, css: &str);

    /// Create the tooltip element if needed, set its text, make it visible
    /// and return its rendered size.
    fn show_tooltip(&self, id: &str, text: &str) -> Size;

    /// Move the tooltip to `position` in page coordinates.
    fn move_tooltip(&self, id: &str, position: Point);

    fn hide_tooltip(&self, id: &str);

    /// Attach capture-phase listeners for every [`EventKind`] on the
    /// document.
    fn attach_listeners(&self) -> Self::Listeners;

    fn detach_listeners(&self, listeners: Self::Listeners);
}

/// Whether `node` is an `<img>`.
pub fn is_image<D: Dom>(dom: &D, node: &D::Node) -> bool {
    dom.tag_name(node).eq_ignore_ascii_case("img")
}

/// Find the element carrying `attribute` that the pointer is over.
///
/// The target and its ancestors are checked first. When none carries the
/// marker, the elements stacked under `point` are searched topmost first,
/// skipping the target itself; this catches markers on elements covered by
/// an overlay that swallows the event.
pub fn find_ancestor_or_overlap<D: Dom>(
    dom: &D,
    target: &D::Node,
    point: Point,
    attribute: &str,
) -> Option<D::Node> {
    if let Some(found) = dom.closest(target, Selector::Attribute(attribute)) {
        return Some(found);
    }

    dom.elements_from_point(point)
        .into_iter()
        .find(|el| el != target && dom.has_attribute(el, attribute))
}
