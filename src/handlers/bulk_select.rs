//! Bulk Select
//!
//! A "select all" checkbox pushes its state onto every member checkbox.
//! One-directional: unchecking a member does not update the master, and
//! there is no indeterminate state.

use super::Handler;
use crate::config::BulkSelectConfig;
use crate::dom::{Dom, EventKind, PageEvent};

pub struct BulkSelect {
    master_selector: String,
    member_selector: String,
}

impl BulkSelect {
    pub fn new(config: &BulkSelectConfig) -> Self {
        Self {
            master_selector: config.master_selector.clone(),
            member_selector: config.member_selector.clone(),
        }
    }
}

impl<D: Dom> Handler<D> for BulkSelect {
    fn name(&self) -> &'static str {
        "bulk-select"
    }

    fn matches(&self, dom: &D, event: &PageEvent<D::Node>) -> bool {
        event.kind == EventKind::Change && dom.matches(&event.target, &self.master_selector)
    }

    fn handle(&mut self, dom: &D, event: &PageEvent<D::Node>) {
        let checked = dom.is_checked(&event.target);
        for member in dom.query_all(&self.member_selector) {
            if member != event.target {
                dom.set_checked(&member, checked);
            }
        }
    }
}
