//! Quit-control lookup by exact name.
//!
//! Resource packs label the quit control inconsistently, so the lookup walks a
//! fixed alias list in priority order. Each alias is searched across the whole
//! tree before the next one is tried.

use crate::ui_tree::{ElementPath, UiElement};

/// Built-in quit-control names, highest priority first.
pub const QUIT_BUTTON_ALIASES: [&str; 7] = [
    "quit_button",
    "exit_button",
    "exit",
    "disconnect_button",
    "disconnect",
    "leave_button",
    "leave",
];

/// A named element found in the current tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    pub name: String,
    pub path: ElementPath,
}

/// Depth-first, pre-order search for the first element named `name`.
pub fn find_by_name(root: &UiElement, name: &str) -> Option<ElementPath> {
    let mut path = ElementPath::root();
    if search(root, name, &mut path) {
        Some(path)
    } else {
        None
    }
}

fn search(element: &UiElement, name: &str, path: &mut ElementPath) -> bool {
    if element.name == name {
        return true;
    }
    for (index, child) in element.children.iter().enumerate() {
        path.push(index);
        if search(child, name, path) {
            return true;
        }
        path.pop();
    }
    false
}

/// First match for the highest-priority candidate present anywhere in the tree.
pub fn locate<'a, I>(root: Option<&UiElement>, candidates: I) -> Option<Located>
where
    I: IntoIterator<Item = &'a str>,
{
    let root = root?;
    candidates.into_iter().find_map(|name| {
        find_by_name(root, name).map(|path| Located {
            name: name.to_string(),
            path,
        })
    })
}

/// [`locate`] over the built-in aliases only.
pub fn locate_quit_button(root: Option<&UiElement>) -> Option<Located> {
    locate(root, QUIT_BUTTON_ALIASES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui_tree::Rect;

    fn node(name: &str) -> UiElement {
        UiElement::new(name, Rect::from_xywh(0.0, 0.0, 10.0, 10.0))
    }

    #[test]
    fn quit_button_beats_exit_button_found_earlier() {
        let root = node("root")
            .with_child(node("menu").with_child(node("exit_button")))
            .with_child(node("footer").with_child(node("stack").with_child(node("quit_button"))));
        let found = locate_quit_button(Some(&root)).unwrap();
        assert_eq!(found.name, "quit_button");
        assert_eq!(found.path, ElementPath::from(vec![1, 0, 0]));
    }

    #[test]
    fn falls_back_through_aliases_in_order() {
        let root = node("root")
            .with_child(node("leave"))
            .with_child(node("disconnect"));
        let found = locate_quit_button(Some(&root)).unwrap();
        assert_eq!(found.name, "disconnect");
        assert_eq!(found.path, ElementPath::from(vec![1]));
    }

    #[test]
    fn first_depth_first_match_wins_for_duplicates() {
        let root = node("root")
            .with_child(node("a").with_child(node("exit")))
            .with_child(node("exit"));
        let found = locate_quit_button(Some(&root)).unwrap();
        assert_eq!(found.path, ElementPath::from(vec![0, 0]));
    }

    #[test]
    fn root_itself_can_match() {
        let root = node("leave_button").with_child(node("child"));
        let found = locate_quit_button(Some(&root)).unwrap();
        assert!(found.path.is_root());
    }

    #[test]
    fn no_candidate_or_no_root_is_not_found() {
        let root = node("root")
            .with_child(node("quit"))
            .with_child(node("Quit_Button"))
            .with_child(node("exit_btn"));
        assert!(locate_quit_button(Some(&root)).is_none());
        assert!(locate_quit_button(None).is_none());
    }

    #[test]
    fn custom_candidates_are_honoured() {
        let root = node("root").with_child(node("btn_leave_world"));
        let found = locate(Some(&root), ["quit_button", "btn_leave_world"]).unwrap();
        assert_eq!(found.name, "btn_leave_world");
    }
}
