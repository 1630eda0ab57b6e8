//! Absolute bounds for elements whose rectangles are parent-relative.
//!
//! The absolute origin of an element is the sum of the relative origins of
//! every element on its root-to-element path, root and element included. The
//! far corner adds the element's own width and height.

use crate::ui_tree::{ElementPath, Rect, UiElement, Vec2};
use std::ptr;
use tracing::trace;

/// Why a target could not be resolved against the current tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Miss {
    /// No element (or no parent chain) for the target in this tree.
    NotFound,
    /// The path leads somewhere, but not to the element that was located.
    Stale,
}

/// A located element with its absolute bounds. Owns no tree references.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTarget {
    pub name: String,
    pub path: ElementPath,
    pub rect: Rect,
}

/// Root-to-`target` path found in a single depth-first pass.
///
/// `target` is matched by identity, so an element taken from a previous
/// tree is not found in the current one.
pub fn path_to(root: &UiElement, target: &UiElement) -> Option<ElementPath> {
    let mut path = ElementPath::root();
    if walk_to(root, target, &mut path) {
        Some(path)
    } else {
        None
    }
}

fn walk_to(current: &UiElement, target: &UiElement, path: &mut ElementPath) -> bool {
    if ptr::eq(current, target) {
        return true;
    }
    for (index, child) in current.children.iter().enumerate() {
        path.push(index);
        if walk_to(child, target, path) {
            return true;
        }
        path.pop();
    }
    false
}

/// Absolute rectangle of the element at `path`.
pub fn absolute_rect(root: &UiElement, path: &ElementPath) -> Result<Rect, Miss> {
    let mut origin = root.rect.origin();
    let mut node = root;
    for &index in path.indices() {
        node = node.children.get(index).ok_or(Miss::NotFound)?;
        origin.x += node.rect.left;
        origin.y += node.rect.top;
    }
    Ok(extend(origin, &node.rect))
}

/// Absolute rectangle of `target`, which must belong to the tree under `root`.
pub fn absolute_rect_of(root: &UiElement, target: &UiElement) -> Result<Rect, Miss> {
    let path = path_to(root, target).ok_or(Miss::NotFound)?;
    absolute_rect(root, &path)
}

fn extend(origin: Vec2, own: &Rect) -> Rect {
    Rect::from_xywh(origin.x, origin.y, own.width(), own.height())
}

/// Re-validate `path` against the current tree and compute its bounds.
///
/// The element at `path` must still carry `expected_name`; anything else means
/// the host rebuilt the tree underneath us.
pub fn resolve(
    root: &UiElement,
    path: &ElementPath,
    expected_name: &str,
) -> Result<ResolvedTarget, Miss> {
    let element = root.get(path).ok_or(Miss::NotFound)?;
    if element.name != expected_name {
        trace!(expected = expected_name, found = %element.name, "target path is stale");
        return Err(Miss::Stale);
    }
    let rect = absolute_rect(root, path)?;
    Ok(ResolvedTarget {
        name: expected_name.to_string(),
        path: path.clone(),
        rect,
    })
}
