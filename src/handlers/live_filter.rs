//! Live Filter
//!
//! Hides table rows whose precomputed search text does not contain the
//! query. Rows are captured once at load; rows added later are not seen.

use std::rc::Rc;
use std::time::Duration;

use super::Handler;
use crate::config::FilterConfig;
use crate::dom::{Dom, EventKind, PageEvent};
use crate::query::query_param;
use crate::timer::Timer;

/// Trimmed, lowercased form of a raw query
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Row snapshot plus the label showing how many rows are visible
struct RowSet<D: Dom> {
    rows: Vec<D::Node>,
    search_attr: String,
    count_label: Option<D::Node>,
}

impl<D: Dom> RowSet<D> {
    /// Show matching rows, hide the rest, return the visible count
    fn apply(&self, dom: &D, raw_query: &str) -> usize {
        let query = normalize_query(raw_query);
        let mut visible = 0;

        for row in &self.rows {
            let haystack = dom.attr(row, &self.search_attr).unwrap_or_default();
            let show = query.is_empty() || haystack.contains(&query);
            dom.set_hidden(row, !show);
            if show {
                visible += 1;
            }
        }

        if let Some(label) = &self.count_label {
            dom.set_text(label, &visible.to_string());
        }
        log::debug!("[Filter] {:?} -> {} of {} rows", query, visible, self.rows.len());
        visible
    }
}

pub struct LiveFilter<D: Dom> {
    input: D::Node,
    rows: Rc<RowSet<D>>,
    timer: Box<dyn Timer>,
    delay: Duration,
}

impl<D: Dom> LiveFilter<D> {
    /// Capture the rows and run the first pass immediately. Returns None
    /// when the page has no search input.
    pub fn attach(dom: &D, config: &FilterConfig, search: &str, timer: Box<dyn Timer>) -> Option<Self> {
        let input = dom.query(&config.input_selector)?;

        if dom.value(&input).trim().is_empty() {
            if let Some(q) = query_param(search, &config.query_param).filter(|q| !q.trim().is_empty()) {
                dom.set_value(&input, &q);
            }
        }

        let rows = Rc::new(RowSet {
            rows: dom.query_all(&config.row_selector),
            search_attr: config.search_attr.clone(),
            count_label: dom.query(&config.count_selector),
        });
        rows.apply(dom, &dom.value(&input));

        Some(Self {
            input,
            rows,
            timer,
            delay: Duration::from_millis(u64::from(config.debounce_ms)),
        })
    }

    /// Filter right now with whatever the input holds
    pub fn refresh(&self, dom: &D) -> usize {
        self.rows.apply(dom, &dom.value(&self.input))
    }

    pub fn row_count(&self) -> usize {
        self.rows.rows.len()
    }
}

impl<D: Dom> Handler<D> for LiveFilter<D> {
    fn name(&self) -> &'static str {
        "live-filter"
    }

    fn matches(&self, _dom: &D, event: &PageEvent<D::Node>) -> bool {
        event.kind == EventKind::Input && event.target == self.input
    }

    fn handle(&mut self, dom: &D, _event: &PageEvent<D::Node>) {
        let dom = dom.clone();
        let rows = self.rows.clone();
        let input = self.input.clone();
        // Read the value when the timer fires so only the latest input counts
        self.timer.schedule(
            self.delay,
            Box::new(move || {
                rows.apply(&dom, &dom.value(&input));
            }),
        );
    }
}
