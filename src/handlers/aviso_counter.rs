//! Aviso Counter
//!
//! +/- buttons next to an expediente's aviso badge. The click posts to the
//! server; once it succeeds the badge is bumped locally from the number it
//! was already showing. The server's own post-action count is not read
//! back, so concurrent edits from another client are not reflected.

use std::marker::PhantomData;
use std::rc::Rc;

use super::Handler;
use crate::api::{AvisoApi, TaskSpawner};
use crate::config::CounterConfig;
use crate::dom::{Dom, EventKind, PageEvent};
use crate::error::UiResult;
use crate::models::{parse_count, AvisoAction, BadgeLevel};

pub struct AvisoCounter<D: Dom> {
    config: Rc<CounterConfig>,
    api: Rc<dyn AvisoApi>,
    spawner: Rc<dyn TaskSpawner>,
    _dom: PhantomData<D>,
}

impl<D: Dom> AvisoCounter<D> {
    pub fn new(config: &CounterConfig, api: Rc<dyn AvisoApi>, spawner: Rc<dyn TaskSpawner>) -> Self {
        Self {
            config: Rc::new(config.clone()),
            api,
            spawner,
            _dom: PhantomData,
        }
    }
}

fn badge_class(config: &CounterConfig, level: BadgeLevel) -> &str {
    match level {
        BadgeLevel::Ok => &config.ok_class,
        BadgeLevel::Warn => &config.warn_class,
        BadgeLevel::Bad => &config.bad_class,
    }
}

/// Write `count` into the badge and leave exactly one severity class on it
pub fn render_badge<D: Dom>(dom: &D, badge: &D::Node, count: u32, config: &CounterConfig) {
    dom.set_text(badge, &count.to_string());
    for level in BadgeLevel::ALL {
        dom.remove_class(badge, badge_class(config, level));
    }
    dom.add_class(badge, badge_class(config, BadgeLevel::for_count(count)));
}

/// Apply the outcome of a round trip, then re-enable the button
fn finish<D: Dom>(
    dom: &D,
    region: &D::Node,
    button: &D::Node,
    id: &str,
    action: AvisoAction,
    result: UiResult<()>,
    config: &CounterConfig,
) {
    match result {
        Ok(()) => match dom.query_in(region, &config.badge_selector) {
            Some(badge) => {
                let next = action.apply(parse_count(&dom.text(&badge)));
                render_badge(dom, &badge, next, config);
            }
            None => log::warn!("[Avisos] expediente {} has no badge", id),
        },
        Err(e) => {
            log::error!("[Avisos] {} {} failed: {}", id, action.as_str(), e);
            dom.alert(&config.failure_message);
        }
    }
    dom.set_disabled(button, false);
}

impl<D: Dom> Handler<D> for AvisoCounter<D> {
    fn name(&self) -> &'static str {
        "aviso-counter"
    }

    fn matches(&self, dom: &D, event: &PageEvent<D::Node>) -> bool {
        event.kind == EventKind::Click && dom.closest(&event.target, &self.config.button_selector).is_some()
    }

    fn handle(&mut self, dom: &D, event: &PageEvent<D::Node>) {
        let config = &self.config;
        let Some(button) = dom.closest(&event.target, &config.button_selector) else {
            return;
        };
        // Already in flight
        if dom.is_disabled(&button) {
            return;
        }
        let Some(action) = dom.attr(&button, &config.action_attr).and_then(|a| AvisoAction::parse(&a)) else {
            return;
        };
        let Some(region) = dom.closest(&button, &config.region_selector) else {
            return;
        };
        let Some(id) = dom.attr(&region, &config.id_attr).filter(|id| !id.trim().is_empty()) else {
            return;
        };

        dom.set_disabled(&button, true);

        let dom = dom.clone();
        let api = self.api.clone();
        let config = self.config.clone();
        self.spawner.spawn(Box::pin(async move {
            let result = api.post_action(&id, action).await;
            finish(&dom, &region, &button, &id, action, result, &config);
        }));
    }
}
