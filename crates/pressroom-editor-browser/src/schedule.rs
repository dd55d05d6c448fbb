//! Delayed, cancellable callbacks.
//!
//! Holds at most one pending timeout. Scheduling again cancels whatever was
//! pending, and dropping the scheduler cancels it too, so nothing fires into
//! a torn-down editor.

use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;

/// Delay before overlays are re-attached after the content was replaced.
pub const REATTACH_DELAY_MS: u32 = 100;

#[derive(Debug, Default)]
pub struct Scheduler {
    pending: Option<Timeout>,
    fired: Rc<Cell<bool>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` after `millis`, replacing any pending callback.
    pub fn schedule(&mut self, millis: u32, f: impl FnOnce() + 'static) {
        if self.cancel() {
            tracing::trace!("pending callback superseded");
        }
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        self.fired = fired;
        self.pending = Some(Timeout::new(millis, move || {
            flag.set(true);
            f();
        }));
    }

    /// Cancel the pending callback. Returns true if one was still waiting.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(timeout) if !self.fired.get() => {
                timeout.cancel();
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some() && !self.fired.get()
    }
}
