//! Page Abstraction
//!
//! The handful of element operations the page handlers need, so the same
//! handler code drives the live document and the in-memory test tree.

pub mod web;

/// Kinds of DOM events the handlers listen for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    Click,
    Change,
    Input,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [EventKind::Click, EventKind::Change, EventKind::Input];

    /// DOM event type name
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::Change => "change",
            EventKind::Input => "input",
        }
    }
}

/// A delegated event: what happened and on which element
#[derive(Clone, Debug)]
pub struct PageEvent<N> {
    pub kind: EventKind,
    pub target: N,
}

impl<N> PageEvent<N> {
    pub fn new(kind: EventKind, target: N) -> Self {
        Self { kind, target }
    }

    pub fn click(target: N) -> Self {
        Self::new(EventKind::Click, target)
    }

    pub fn change(target: N) -> Self {
        Self::new(EventKind::Change, target)
    }

    pub fn input(target: N) -> Self {
        Self::new(EventKind::Input, target)
    }
}

/// Element operations over a rendered page.
///
/// Every lookup returns `Option`/empty `Vec` instead of failing, so a handler
/// whose elements are absent simply does nothing.
pub trait Dom: Clone + 'static {
    type Node: Clone + PartialEq + 'static;

    /// The document root (`<html>`)
    fn root(&self) -> Option<Self::Node>;

    fn query(&self, selector: &str) -> Option<Self::Node>;
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;
    /// First descendant of `scope` matching `selector`
    fn query_in(&self, scope: &Self::Node, selector: &str) -> Option<Self::Node>;

    fn matches(&self, node: &Self::Node, selector: &str) -> bool;
    /// Nearest inclusive ancestor matching `selector`
    fn closest(&self, node: &Self::Node, selector: &str) -> Option<Self::Node>;
    /// True when `node` is `ancestor` or lies inside it
    fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool;

    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;
    /// Moves `child` to the end of `parent`
    fn append_child(&self, parent: &Self::Node, child: &Self::Node);

    fn attr(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attr(&self, node: &Self::Node, name: &str, value: &str);
    fn remove_attr(&self, node: &Self::Node, name: &str);

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    fn add_class(&self, node: &Self::Node, class: &str);
    fn remove_class(&self, node: &Self::Node, class: &str);

    /// Flip `class` on `node`, returning whether it is now present
    fn toggle_class(&self, node: &Self::Node, class: &str) -> bool {
        if self.has_class(node, class) {
            self.remove_class(node, class);
            false
        } else {
            self.add_class(node, class);
            true
        }
    }

    fn is_checked(&self, node: &Self::Node) -> bool;
    fn set_checked(&self, node: &Self::Node, checked: bool);

    fn is_disabled(&self, node: &Self::Node) -> bool {
        self.attr(node, "disabled").is_some()
    }

    fn set_disabled(&self, node: &Self::Node, disabled: bool) {
        if disabled {
            self.set_attr(node, "disabled", "");
        } else {
            self.remove_attr(node, "disabled");
        }
    }

    fn is_hidden(&self, node: &Self::Node) -> bool {
        self.attr(node, "hidden").is_some()
    }

    fn set_hidden(&self, node: &Self::Node, hidden: bool) {
        if hidden {
            self.set_attr(node, "hidden", "");
        } else {
            self.remove_attr(node, "hidden");
        }
    }

    fn text(&self, node: &Self::Node) -> String;
    fn set_text(&self, node: &Self::Node, text: &str);

    /// Current value of a form control
    fn value(&self, node: &Self::Node) -> String;
    fn set_value(&self, node: &Self::Node, value: &str);

    /// Blocking user-visible notification
    fn alert(&self, message: &str);
}
