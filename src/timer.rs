//! Cancellable Timer
//!
//! Single-shot timer used for debouncing. Scheduling replaces whatever was
//! pending, so only the latest callback inside the window ever runs.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use gloo_timers::callback::Timeout;

pub trait Timer {
    /// Run `callback` after `delay`, cancelling any pending callback
    fn schedule(&mut self, delay: Duration, callback: Box<dyn FnOnce()>);
    fn cancel(&mut self);
    fn is_pending(&self) -> bool;
}

/// `setTimeout`-backed timer
#[derive(Default)]
pub struct BrowserTimer {
    pending: Option<Timeout>,
    fired: Rc<Cell<bool>>,
}

impl BrowserTimer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Timer for BrowserTimer {
    fn schedule(&mut self, delay: Duration, callback: Box<dyn FnOnce()>) {
        self.cancel();

        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        self.pending = Some(Timeout::new(millis, move || {
            flag.set(true);
            callback();
        }));
        self.fired = fired;
    }

    fn cancel(&mut self) {
        // Dropping a gloo Timeout clears it
        drop(self.pending.take());
    }

    fn is_pending(&self) -> bool {
        self.pending.is_some() && !self.fired.get()
    }
}
