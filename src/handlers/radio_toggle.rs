//! Radio Toggle
//!
//! Lets a checked radio be cleared by clicking it again, turning a radio
//! group into "one of these, or none".

use super::Handler;
use crate::config::RadioConfig;
use crate::dom::{Dom, EventKind, PageEvent};

const TRUE: &str = "true";
const FALSE: &str = "false";

pub struct RadioToggle {
    selector: String,
    flag_attr: String,
}

impl RadioToggle {
    /// Seed every radio's flag from its rendered checked state
    pub fn attach<D: Dom>(dom: &D, config: &RadioConfig) -> Self {
        let toggle = Self {
            selector: config.selector.clone(),
            flag_attr: config.flag_attr.clone(),
        };
        for radio in dom.query_all(&toggle.selector) {
            toggle.set_flag(dom, &radio, dom.is_checked(&radio));
        }
        toggle
    }

    fn set_flag<D: Dom>(&self, dom: &D, radio: &D::Node, checked: bool) {
        dom.set_attr(radio, &self.flag_attr, if checked { TRUE } else { FALSE });
    }

    fn group<D: Dom>(&self, dom: &D, radio: &D::Node) -> Vec<D::Node> {
        match dom.attr(radio, "name").filter(|n| !n.is_empty()) {
            Some(name) => dom
                .query_all(&self.selector)
                .into_iter()
                .filter(|member| dom.attr(member, "name").as_deref() == Some(name.as_str()))
                .collect(),
            None => vec![radio.clone()],
        }
    }
}

impl<D: Dom> Handler<D> for RadioToggle {
    fn name(&self) -> &'static str {
        "radio-toggle"
    }

    fn matches(&self, dom: &D, event: &PageEvent<D::Node>) -> bool {
        event.kind == EventKind::Click && dom.matches(&event.target, &self.selector)
    }

    fn handle(&mut self, dom: &D, event: &PageEvent<D::Node>) {
        let radio = &event.target;

        // The browser has already checked it; a set flag means it was checked before
        if dom.attr(radio, &self.flag_attr).as_deref() == Some(TRUE) {
            dom.set_checked(radio, false);
        }

        for member in self.group(dom, radio) {
            self.set_flag(dom, &member, false);
        }
        self.set_flag(dom, radio, dom.is_checked(radio));
    }
}
