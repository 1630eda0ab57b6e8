//! Read-only model of the host's UI element tree.
//!
//! The host rebuilds this tree every frame. Nothing in the crate keeps a
//! reference into it between calls; elements are addressed by [`ElementPath`]
//! and re-validated on every use.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A point in screen units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle stored as edges.
///
/// Element rectangles are relative to the parent's origin; resolved target
/// rectangles are absolute.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Edge-inclusive containment test.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left && point.x <= self.right && point.y >= self.top && point.y <= self.bottom
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.left, self.top, self.right, self.bottom
        )
    }
}

/// One node of the host UI tree.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UiElement {
    pub name: String,
    /// Parent-relative bounds.
    pub rect: Rect,
    #[serde(default)]
    pub children: Vec<UiElement>,
    /// Opaque host metadata, carried through untouched.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub properties: serde_json::Value,
}

impl UiElement {
    pub fn new(name: impl Into<String>, rect: Rect) -> Self {
        Self {
            name: name.into(),
            rect,
            children: Vec::new(),
            properties: serde_json::Value::Null,
        }
    }

    pub fn with_child(mut self, child: UiElement) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = UiElement>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn with_properties(mut self, properties: serde_json::Value) -> Self {
        self.properties = properties;
        self
    }

    /// Follow `path` from this element. `None` if any index is out of range.
    pub fn get(&self, path: &ElementPath) -> Option<&UiElement> {
        path.indices()
            .iter()
            .try_fold(self, |node, &index| node.children.get(index))
    }
}

/// Logical address of an element: child indices from the root.
///
/// The empty path addresses the root itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ElementPath(Vec<usize>);

impl ElementPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn push(&mut self, index: usize) {
        self.0.push(index);
    }

    pub(crate) fn pop(&mut self) {
        self.0.pop();
    }
}

impl From<Vec<usize>> for ElementPath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

/// Indented listing of the tree, one line per distinct `name, rect, metadata`.
///
/// Identical lines (same indent, name, rect and metadata) are printed once.
pub fn outline(root: &UiElement) -> String {
    let mut seen = HashSet::new();
    let mut out = String::new();
    outline_into(root, 0, &mut seen, &mut out);
    out
}

fn outline_into(element: &UiElement, depth: usize, seen: &mut HashSet<String>, out: &mut String) {
    let indent = " ".repeat(depth * 4);
    let line = format!("{indent}{}, {}, {}", element.name, element.rect, element.properties);
    if seen.insert(line.clone()) {
        out.push_str(&line);
        out.push('\n');
    }
    for child in &element.children {
        outline_into(child, depth + 1, seen, out);
    }
}
