//! Page Handlers
//!
//! One handler per page behavior. Each is attached once at load, then sees
//! every delegated event and decides for itself whether it applies.

mod action_menu;
mod aviso_counter;
mod bulk_select;
mod live_filter;
mod radio_toggle;
mod sorter;
mod theme;

use std::cell::RefCell;
use std::rc::Rc;

use crate::api::{AvisoApi, TaskSpawner};
use crate::config::PageConfig;
use crate::dom::{Dom, PageEvent};
use crate::store::KeyValueStore;
use crate::timer::Timer;

pub use action_menu::ActionMenu;
pub use aviso_counter::AvisoCounter;
pub use bulk_select::BulkSelect;
pub use live_filter::LiveFilter;
pub use radio_toggle::RadioToggle;
pub use sorter::Sorter;
pub use theme::ThemeController;

/// An event-bound page behavior
pub trait Handler<D: Dom> {
    fn name(&self) -> &'static str;

    /// Whether this event is addressed to the handler
    fn matches(&self, dom: &D, event: &PageEvent<D::Node>) -> bool;

    /// React to a matching event. Missing elements mean "do nothing".
    fn handle(&mut self, dom: &D, event: &PageEvent<D::Node>);
}

/// Ordered set of handlers sharing one event source
pub struct Registry<D: Dom> {
    handlers: Vec<Box<dyn Handler<D>>>,
}

impl<D: Dom> Registry<D> {
    pub fn new() -> Self {
        Self { handlers: Vec::new() }
    }

    pub fn register<H: Handler<D> + 'static>(&mut self, handler: H) {
        log::debug!("[Registry] {} attached", handler.name());
        self.handlers.push(Box::new(handler));
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    /// Run every matching handler in registration order, returning how many ran
    pub fn dispatch(&mut self, dom: &D, event: &PageEvent<D::Node>) -> usize {
        let mut ran = 0;
        for handler in self.handlers.iter_mut() {
            if handler.matches(dom, event) {
                handler.handle(dom, event);
                ran += 1;
            }
        }
        ran
    }
}

impl<D: Dom> Default for Registry<D> {
    fn default() -> Self {
        Self::new()
    }
}

/// Dispatch through a registry shared with the event listeners. A dispatch
/// started while another is still running is skipped; returns handlers run.
pub fn dispatch_shared<D: Dom>(registry: &RefCell<Registry<D>>, dom: &D, event: &PageEvent<D::Node>) -> usize {
    match registry.try_borrow_mut() {
        Ok(mut registry) => registry.dispatch(dom, event),
        Err(_) => {
            log::warn!("[Bind] nested {} dispatch skipped", event.kind.as_str());
            0
        }
    }
}

/// Collaborators outside the DOM the handlers depend on
pub struct Environment {
    pub store: Box<dyn KeyValueStore>,
    pub os_prefers_dark: bool,
    /// `location.search`
    pub search: String,
    /// Debounce timer for the live filter
    pub timer: Box<dyn Timer>,
    pub api: Rc<dyn AvisoApi>,
    pub spawner: Rc<dyn TaskSpawner>,
}

/// Run every load-time setup step and register the handlers
pub fn install<D: Dom>(dom: &D, config: &PageConfig, env: Environment) -> Registry<D> {
    let mut registry = Registry::new();

    registry.register(RadioToggle::attach(dom, &config.radio));
    registry.register(ThemeController::attach(dom, &config.theme, env.store, env.os_prefers_dark));
    registry.register(BulkSelect::new(&config.bulk));

    match LiveFilter::attach(dom, &config.filter, &env.search, env.timer) {
        Some(filter) => registry.register(filter),
        None => log::debug!("[Registry] no search input, live filter skipped"),
    }

    registry.register(Sorter::attach(dom, &config.sort, &env.search));
    registry.register(AvisoCounter::new(&config.counter, env.api, env.spawner));
    registry.register(ActionMenu::new(&config.menu));

    registry
}
