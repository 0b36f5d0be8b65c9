//! Row Sorter
//!
//! Presentation-only reorder of the table rows by (year, month, number).
//! Direction comes from `?sort=` and can be flipped from a toggle control.
//! Visibility set by the live filter is left alone.

use std::cmp::Ordering;

use super::Handler;
use crate::config::SortConfig;
use crate::dom::{Dom, EventKind, PageEvent};
use crate::models::{SortDirection, SortKey};
use crate::query::query_param;

/// Indices of `keys` in display order. Equal keys keep their original
/// relative order in both directions.
pub fn sort_order(keys: &[SortKey], direction: SortDirection) -> Vec<usize> {
    let mut order: Vec<usize> = (0..keys.len()).collect();
    order.sort_by(|&a, &b| {
        let by_key = match direction {
            SortDirection::Asc => keys[a].cmp(&keys[b]),
            SortDirection::Desc => keys[b].cmp(&keys[a]),
        };
        match by_key {
            Ordering::Equal => a.cmp(&b),
            other => other,
        }
    });
    order
}

pub struct Sorter<D: Dom> {
    rows: Vec<D::Node>,
    keys: Vec<SortKey>,
    direction: SortDirection,
    toggle_selector: String,
    direction_attr: String,
}

impl<D: Dom> Sorter<D> {
    /// Snapshot the rows, read their keys and apply the URL direction
    pub fn attach(dom: &D, config: &SortConfig, search: &str) -> Self {
        let rows = dom.query_all(&config.row_selector);
        let keys = rows
            .iter()
            .map(|row| {
                SortKey::from_attrs(
                    dom.attr(row, &config.year_attr).as_deref(),
                    dom.attr(row, &config.month_attr).as_deref(),
                    dom.attr(row, &config.num_attr).as_deref(),
                )
            })
            .collect();
        let direction = SortDirection::parse(query_param(search, &config.param).as_deref());

        let sorter = Self {
            rows,
            keys,
            direction,
            toggle_selector: config.toggle_selector.clone(),
            direction_attr: config.direction_attr.clone(),
        };
        sorter.apply(dom);
        if let Some(toggle) = dom.query(&sorter.toggle_selector) {
            dom.set_attr(&toggle, &sorter.direction_attr, direction.as_str());
        }
        sorter
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Move each row to the end of its container in sorted order
    pub fn apply(&self, dom: &D) {
        for index in sort_order(&self.keys, self.direction) {
            let row = &self.rows[index];
            if let Some(parent) = dom.parent(row) {
                dom.append_child(&parent, row);
            }
        }
    }
}

impl<D: Dom> Handler<D> for Sorter<D> {
    fn name(&self) -> &'static str {
        "sorter"
    }

    fn matches(&self, dom: &D, event: &PageEvent<D::Node>) -> bool {
        event.kind == EventKind::Click && dom.closest(&event.target, &self.toggle_selector).is_some()
    }

    fn handle(&mut self, dom: &D, event: &PageEvent<D::Node>) {
        self.direction = self.direction.toggled();
        self.apply(dom);
        if let Some(toggle) = dom.closest(&event.target, &self.toggle_selector) {
            dom.set_attr(&toggle, &self.direction_attr, self.direction.as_str());
        }
        log::debug!("[Sort] {} rows {}", self.rows.len(), self.direction.as_str());
    }
}
