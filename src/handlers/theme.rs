//! Theme Controller
//!
//! Applies the saved light/dark theme at load and flips it from the toggle
//! button.

use super::Handler;
use crate::config::ThemeConfig;
use crate::dom::{Dom, EventKind, PageEvent};
use crate::models::Theme;
use crate::store::{KeyValueStore, ThemeSettings};

pub struct ThemeController {
    settings: ThemeSettings<Box<dyn KeyValueStore>>,
    current: Theme,
    toggle_selector: String,
}

impl ThemeController {
    /// Resolve and apply the initial theme. Nothing is written to storage
    /// until the user toggles.
    pub fn attach<D: Dom>(
        dom: &D,
        config: &ThemeConfig,
        store: Box<dyn KeyValueStore>,
        os_prefers_dark: bool,
    ) -> Self {
        let settings = ThemeSettings::new(store, &config.storage_key, &config.root_attr);
        let current = settings.load(os_prefers_dark);
        settings.apply(dom, current);
        log::debug!("[Theme] initial theme {}", current.as_str());

        Self {
            settings,
            current,
            toggle_selector: config.toggle_selector.clone(),
        }
    }

    pub fn current(&self) -> Theme {
        self.current
    }
}

impl<D: Dom> Handler<D> for ThemeController {
    fn name(&self) -> &'static str {
        "theme"
    }

    fn matches(&self, dom: &D, event: &PageEvent<D::Node>) -> bool {
        event.kind == EventKind::Click && dom.closest(&event.target, &self.toggle_selector).is_some()
    }

    fn handle(&mut self, dom: &D, _event: &PageEvent<D::Node>) {
        self.current = self.current.toggled();
        self.settings.apply(dom, self.current);
        self.settings.persist(self.current);
    }
}
