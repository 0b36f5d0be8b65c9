//! Action Menu
//!
//! Row dropdowns. A click on a trigger toggles its menu; any click closes
//! every other open menu that does not contain the click target.

use super::Handler;
use crate::config::MenuConfig;
use crate::dom::{Dom, EventKind, PageEvent};

pub struct ActionMenu {
    trigger_selector: String,
    menu_selector: String,
    open_class: String,
}

impl ActionMenu {
    pub fn new(config: &MenuConfig) -> Self {
        Self {
            trigger_selector: config.trigger_selector.clone(),
            menu_selector: config.menu_selector.clone(),
            open_class: config.open_class.clone(),
        }
    }
}

impl<D: Dom> Handler<D> for ActionMenu {
    fn name(&self) -> &'static str {
        "action-menu"
    }

    /// Every click is relevant, for the outside-click sweep
    fn matches(&self, _dom: &D, event: &PageEvent<D::Node>) -> bool {
        event.kind == EventKind::Click
    }

    fn handle(&mut self, dom: &D, event: &PageEvent<D::Node>) {
        let target = &event.target;

        for menu in dom.query_all(&self.menu_selector) {
            if dom.has_class(&menu, &self.open_class) && !dom.contains(&menu, target) {
                dom.remove_class(&menu, &self.open_class);
                if let Some(trigger) = dom.query_in(&menu, &self.trigger_selector) {
                    dom.set_attr(&trigger, "aria-expanded", "false");
                }
            }
        }

        let Some(trigger) = dom.closest(target, &self.trigger_selector) else {
            return;
        };
        let Some(menu) = dom.closest(&trigger, &self.menu_selector) else {
            return;
        };
        let open = dom.toggle_class(&menu, &self.open_class);
        dom.set_attr(&trigger, "aria-expanded", if open { "true" } else { "false" });
    }
}
