//! Browser DOM Binding
//!
//! `Dom` over web-sys plus the delegated document listeners that feed
//! events into the handler registry.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlInputElement, NodeList};

use super::{Dom, EventKind, PageEvent};
use crate::api::{BrowserSpawner, HttpAvisoApi};
use crate::config::PageConfig;
use crate::handlers::{dispatch_shared, Environment, Registry};
use crate::store::{KeyValueStore, LocalStorage, MemoryStore};
use crate::timer::BrowserTimer;

/// Live document handle
#[derive(Clone)]
pub struct WebDom {
    document: Document,
}

impl WebDom {
    pub fn from_window() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self { document })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

fn collect_elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

impl Dom for WebDom {
    type Node = Element;

    fn root(&self) -> Option<Element> {
        self.document.document_element()
    }

    fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        self.document
            .query_selector_all(selector)
            .map(collect_elements)
            .unwrap_or_default()
    }

    fn query_in(&self, scope: &Element, selector: &str) -> Option<Element> {
        scope.query_selector(selector).ok().flatten()
    }

    fn matches(&self, node: &Element, selector: &str) -> bool {
        node.matches(selector).unwrap_or(false)
    }

    fn closest(&self, node: &Element, selector: &str) -> Option<Element> {
        node.closest(selector).ok().flatten()
    }

    fn contains(&self, ancestor: &Element, node: &Element) -> bool {
        ancestor.contains(Some(node.as_ref()))
    }

    fn parent(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn append_child(&self, parent: &Element, child: &Element) {
        if let Err(e) = parent.append_child(child) {
            log::warn!("[Dom] append_child failed: {:?}", e);
        }
    }

    fn attr(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attr(&self, node: &Element, name: &str, value: &str) {
        let _ = node.set_attribute(name, value);
    }

    fn remove_attr(&self, node: &Element, name: &str) {
        let _ = node.remove_attribute(name);
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn add_class(&self, node: &Element, class: &str) {
        let _ = node.class_list().add_1(class);
    }

    fn remove_class(&self, node: &Element, class: &str) {
        let _ = node.class_list().remove_1(class);
    }

    fn is_checked(&self, node: &Element) -> bool {
        node.dyn_ref::<HtmlInputElement>()
            .map(|input| input.checked())
            .unwrap_or(false)
    }

    fn set_checked(&self, node: &Element, checked: bool) {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.set_checked(checked);
        }
    }

    fn text(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn set_text(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn value(&self, node: &Element) -> String {
        node.dyn_ref::<HtmlInputElement>()
            .map(|input| input.value())
            .unwrap_or_default()
    }

    fn set_value(&self, node: &Element, value: &str) {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        }
    }

    fn alert(&self, message: &str) {
        if let Some(win) = web_sys::window() {
            let _ = win.alert_with_message(message);
        }
    }
}

/// Collect the browser-side collaborators the handlers need
pub fn browser_environment(config: &PageConfig) -> Environment {
    let window = web_sys::window();

    let store: Box<dyn KeyValueStore> = match LocalStorage::open() {
        Some(storage) => Box::new(storage),
        None => {
            log::warn!("[Boot] localStorage unavailable, theme will not persist");
            Box::new(MemoryStore::default())
        }
    };

    let os_prefers_dark = window
        .as_ref()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok())
        .flatten()
        .map_or(false, |mq| mq.matches());

    let search = window
        .as_ref()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default();

    Environment {
        store,
        os_prefers_dark,
        search,
        timer: Box::new(BrowserTimer::new()),
        api: Rc::new(HttpAvisoApi::new(&config.counter.endpoint_base)),
        spawner: Rc::new(BrowserSpawner),
    }
}

/// Run `f` once the document has been parsed
pub fn on_ready<F>(dom: &WebDom, f: F) -> Result<(), JsValue>
where
    F: FnOnce() + 'static,
{
    if dom.document().ready_state() != "loading" {
        f();
        return Ok(());
    }

    let once = Closure::once(f);
    dom.document()
        .add_event_listener_with_callback("DOMContentLoaded", once.as_ref().unchecked_ref())?;
    once.forget();
    Ok(())
}

/// Attach one delegated listener per event kind on the document.
/// Registered once at boot, so the closures are leaked on purpose.
pub fn bind(dom: WebDom, registry: Registry<WebDom>) -> Result<(), JsValue> {
    let registry = Rc::new(RefCell::new(registry));

    for kind in EventKind::ALL {
        let listen_dom = dom.clone();
        let registry = registry.clone();
        let listener = Closure::<dyn FnMut(Event)>::new(move |ev: Event| {
            let Some(target) = ev.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            dispatch_shared(&registry, &listen_dom, &PageEvent::new(kind, target));
        });

        dom.document()
            .add_event_listener_with_callback(kind.as_str(), listener.as_ref().unchecked_ref())?;
        listener.forget();
    }

    Ok(())
}
