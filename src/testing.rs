//! Test Doubles
//!
//! In-memory page tree, virtual-time timer and scripted counter API.

use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::iter::Peekable;
use std::rc::Rc;
use std::str::Chars;
use std::time::Duration;

use async_trait::async_trait;
use futures::executor::LocalSpawner;
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;

use crate::api::{AvisoApi, TaskSpawner};
use crate::dom::Dom;
use crate::error::{UiError, UiResult};
use crate::models::AvisoAction;
use crate::timer::Timer;

pub type NodeId = usize;

#[derive(Default)]
struct FakeNode {
    tag: String,
    attrs: BTreeMap<String, String>,
    checked: bool,
    text: String,
    value: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Default)]
struct Tree {
    nodes: Vec<FakeNode>,
    alerts: Vec<String>,
}

/// Element tree rooted at an `<html>` node (id 0)
#[derive(Clone)]
pub struct FakeDom {
    tree: Rc<RefCell<Tree>>,
}

impl FakeDom {
    pub fn new() -> Self {
        let mut tree = Tree::default();
        tree.nodes.push(FakeNode {
            tag: "html".to_string(),
            ..Default::default()
        });
        Self {
            tree: Rc::new(RefCell::new(tree)),
        }
    }

    pub fn html(&self) -> NodeId {
        0
    }

    /// Append a `<tag attrs...>` element under `parent`
    pub fn add(&self, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let mut tree = self.tree.borrow_mut();
        let id = tree.nodes.len();
        tree.nodes.push(FakeNode {
            tag: tag.to_string(),
            attrs: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            checked: attrs.iter().any(|(k, _)| *k == "checked"),
            parent: Some(parent),
            ..Default::default()
        });
        tree.nodes[parent].children.push(id);
        id
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.tree.borrow().nodes[node].children.clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.tree.borrow().alerts.clone()
    }

    /// Browser default action of clicking a radio: check it, uncheck its named siblings
    pub fn press_radio(&self, node: NodeId) {
        if let Some(name) = self.attr(&node, "name") {
            for other in self.query_all("input") {
                if self.attr(&other, "name").as_deref() == Some(name.as_str()) {
                    self.set_checked(&other, false);
                }
            }
        }
        self.set_checked(&node, true);
    }

    fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let tree = self.tree.borrow();
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = tree.nodes[scope].children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(tree.nodes[id].children.iter().rev().copied());
        }
        out
    }
}

impl Default for FakeDom {
    fn default() -> Self {
        Self::new()
    }
}

/// One part of a compound selector
#[derive(Debug, PartialEq)]
enum Part {
    Tag(String),
    Class(String),
    Id(String),
    Attr(String, Option<String>),
}

fn is_ident(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn take_ident(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut ident = String::new();
    while let Some(&c) = chars.peek() {
        if !is_ident(c) {
            break;
        }
        ident.push(c);
        chars.next();
    }
    ident
}

/// Parses `tag.class#id[attr][attr="v"]`; combinators are not supported
fn parse_selector(selector: &str) -> Vec<Part> {
    let mut parts = Vec::new();
    let mut chars = selector.trim().chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            '.' => {
                chars.next();
                parts.push(Part::Class(take_ident(&mut chars)));
            }
            '#' => {
                chars.next();
                parts.push(Part::Id(take_ident(&mut chars)));
            }
            '[' => {
                chars.next();
                let inner: String = chars.by_ref().take_while(|&c| c != ']').collect();
                match inner.split_once('=') {
                    Some((name, value)) => parts.push(Part::Attr(
                        name.trim().to_string(),
                        Some(value.trim().trim_matches('"').trim_matches('\'').to_string()),
                    )),
                    None => parts.push(Part::Attr(inner.trim().to_string(), None)),
                }
            }
            c if is_ident(c) => parts.push(Part::Tag(take_ident(&mut chars))),
            _ => panic!("unsupported selector: {}", selector),
        }
    }
    parts
}

impl FakeDom {
    fn node_matches(&self, id: NodeId, parts: &[Part]) -> bool {
        let tree = self.tree.borrow();
        let node = &tree.nodes[id];
        parts.iter().all(|part| match part {
            Part::Tag(tag) => node.tag.eq_ignore_ascii_case(tag),
            Part::Class(class) => node
                .attrs
                .get("class")
                .map_or(false, |c| c.split_whitespace().any(|c| c == class)),
            Part::Id(want) => node.attrs.get("id") == Some(want),
            Part::Attr(name, None) => node.attrs.contains_key(name),
            Part::Attr(name, Some(value)) => node.attrs.get(name) == Some(value),
        })
    }
}

impl Dom for FakeDom {
    type Node = NodeId;

    fn root(&self) -> Option<NodeId> {
        Some(0)
    }

    fn query(&self, selector: &str) -> Option<NodeId> {
        self.query_all(selector).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        let parts = parse_selector(selector);
        std::iter::once(0)
            .chain(self.descendants(0))
            .filter(|&id| self.node_matches(id, &parts))
            .collect()
    }

    fn query_in(&self, scope: &NodeId, selector: &str) -> Option<NodeId> {
        let parts = parse_selector(selector);
        self.descendants(*scope)
            .into_iter()
            .find(|&id| self.node_matches(id, &parts))
    }

    fn matches(&self, node: &NodeId, selector: &str) -> bool {
        self.node_matches(*node, &parse_selector(selector))
    }

    fn closest(&self, node: &NodeId, selector: &str) -> Option<NodeId> {
        let parts = parse_selector(selector);
        let mut current = Some(*node);
        while let Some(id) = current {
            if self.node_matches(id, &parts) {
                return Some(id);
            }
            current = self.parent(&id);
        }
        None
    }

    fn contains(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        let mut current = Some(*node);
        while let Some(id) = current {
            if id == *ancestor {
                return true;
            }
            current = self.parent(&id);
        }
        false
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.tree.borrow().nodes[*node].parent
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) {
        let mut tree = self.tree.borrow_mut();
        if let Some(old) = tree.nodes[*child].parent {
            tree.nodes[old].children.retain(|c| c != child);
        }
        tree.nodes[*parent].children.push(*child);
        tree.nodes[*child].parent = Some(*parent);
    }

    fn attr(&self, node: &NodeId, name: &str) -> Option<String> {
        self.tree.borrow().nodes[*node].attrs.get(name).cloned()
    }

    fn set_attr(&self, node: &NodeId, name: &str, value: &str) {
        self.tree.borrow_mut().nodes[*node]
            .attrs
            .insert(name.to_string(), value.to_string());
    }

    fn remove_attr(&self, node: &NodeId, name: &str) {
        self.tree.borrow_mut().nodes[*node].attrs.remove(name);
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.attr(node, "class")
            .map_or(false, |c| c.split_whitespace().any(|c| c == class))
    }

    fn add_class(&self, node: &NodeId, class: &str) {
        if self.has_class(node, class) {
            return;
        }
        let classes = match self.attr(node, "class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {}", existing.trim(), class),
            _ => class.to_string(),
        };
        self.set_attr(node, "class", &classes);
    }

    fn remove_class(&self, node: &NodeId, class: &str) {
        if let Some(existing) = self.attr(node, "class") {
            let kept: Vec<&str> = existing.split_whitespace().filter(|c| *c != class).collect();
            self.set_attr(node, "class", &kept.join(" "));
        }
    }

    fn is_checked(&self, node: &NodeId) -> bool {
        self.tree.borrow().nodes[*node].checked
    }

    fn set_checked(&self, node: &NodeId, checked: bool) {
        self.tree.borrow_mut().nodes[*node].checked = checked;
    }

    fn text(&self, node: &NodeId) -> String {
        self.tree.borrow().nodes[*node].text.clone()
    }

    fn set_text(&self, node: &NodeId, text: &str) {
        self.tree.borrow_mut().nodes[*node].text = text.to_string();
    }

    fn value(&self, node: &NodeId) -> String {
        self.tree.borrow().nodes[*node].value.clone()
    }

    fn set_value(&self, node: &NodeId, value: &str) {
        self.tree.borrow_mut().nodes[*node].value = value.to_string();
    }

    fn alert(&self, message: &str) {
        self.tree.borrow_mut().alerts.push(message.to_string());
    }
}

struct ClockState {
    now: Duration,
    pending: Option<(Duration, Box<dyn FnOnce()>)>,
}

/// Virtual-time timer; clones share one clock
#[derive(Clone)]
pub struct ManualTimer {
    state: Rc<RefCell<ClockState>>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(ClockState {
                now: Duration::ZERO,
                pending: None,
            })),
        }
    }

    /// Move the clock forward, firing the pending callback if it came due
    pub fn advance(&self, by: Duration) {
        let due = {
            let mut state = self.state.borrow_mut();
            state.now += by;
            let now = state.now;
            match state.pending.take() {
                Some((deadline, callback)) if deadline <= now => Some(callback),
                other => {
                    state.pending = other;
                    None
                }
            }
        };
        if let Some(callback) = due {
            callback();
        }
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }
}

impl Timer for ManualTimer {
    fn schedule(&mut self, delay: Duration, callback: Box<dyn FnOnce()>) {
        let mut state = self.state.borrow_mut();
        let deadline = state.now + delay;
        state.pending = Some((deadline, callback));
    }

    fn cancel(&mut self) {
        self.state.borrow_mut().pending = None;
    }

    fn is_pending(&self) -> bool {
        self.state.borrow().pending.is_some()
    }
}

/// Counter API answering from a queue of canned results
#[derive(Default)]
pub struct ScriptedApi {
    responses: RefCell<VecDeque<UiResult<()>>>,
    calls: RefCell<Vec<(String, AvisoAction)>>,
}

impl ScriptedApi {
    pub fn ok() -> Self {
        Self::with(vec![Ok(())])
    }

    pub fn failing(status: u16) -> Self {
        Self::with(vec![Err(UiError::Status {
            status,
            body: "forbidden".to_string(),
        })])
    }

    pub fn with(responses: Vec<UiResult<()>>) -> Self {
        Self {
            responses: RefCell::new(responses.into()),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, AvisoAction)> {
        self.calls.borrow().clone()
    }
}

#[async_trait(?Send)]
impl AvisoApi for ScriptedApi {
    async fn post_action(&self, id: &str, action: AvisoAction) -> UiResult<()> {
        self.calls.borrow_mut().push((id.to_string(), action));
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(UiError::Network("no scripted response".to_string())))
    }
}

impl TaskSpawner for LocalSpawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        self.spawn_local(task).expect("local pool is running");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_parsing() {
        assert_eq!(
            parse_selector("input.toggle-radio[name=\"estado\"]"),
            vec![
                Part::Tag("input".to_string()),
                Part::Class("toggle-radio".to_string()),
                Part::Attr("name".to_string(), Some("estado".to_string())),
            ]
        );
        assert_eq!(parse_selector("#q"), vec![Part::Id("q".to_string())]);
        assert_eq!(parse_selector("[data-exp-id]"), vec![Part::Attr("data-exp-id".to_string(), None)]);
    }

    #[test]
    fn test_query_closest_contains() {
        let dom = FakeDom::new();
        let body = dom.add(dom.html(), "body", &[]);
        let menu = dom.add(body, "div", &[("class", "action-menu")]);
        let button = dom.add(menu, "button", &[("data-menu-trigger", "")]);

        assert_eq!(dom.query(".action-menu"), Some(menu));
        assert_eq!(dom.closest(&button, ".action-menu"), Some(menu));
        assert!(dom.contains(&menu, &button));
        assert!(!dom.contains(&button, &menu));
        assert_eq!(dom.query_in(&body, "button"), Some(button));
    }

    #[test]
    fn test_manual_timer_replaces_pending() {
        let hits = Rc::new(RefCell::new(Vec::new()));
        let mut timer = ManualTimer::new();
        let clock = timer.clone();

        let h = hits.clone();
        timer.schedule(Duration::from_millis(100), Box::new(move || h.borrow_mut().push("first")));
        clock.advance_ms(50);
        let h = hits.clone();
        timer.schedule(Duration::from_millis(100), Box::new(move || h.borrow_mut().push("second")));
        clock.advance_ms(99);
        assert!(hits.borrow().is_empty());
        clock.advance_ms(1);
        assert_eq!(*hits.borrow(), vec!["second"]);
        assert!(!timer.is_pending());
    }
}
