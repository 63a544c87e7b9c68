//! Buffered queue of `SessionEvent`s between the controllers and the UI.
//!
//! Controllers push as their state changes; the app drains the queue once
//! per frame. Single-threaded, so a `RefCell` is enough.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use bellbot_types::event::SessionEvent;

/// Shared event bus, clone-cheap via Rc.
#[derive(Clone)]
pub struct EventBus {
    inner: Rc<RefCell<VecDeque<SessionEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    pub fn emit(&self, event: SessionEvent) {
        self.inner.borrow_mut().push_back(event);
    }

    /// Take every pending event, oldest first.
    pub fn drain(&self) -> Vec<SessionEvent> {
        Vec::from(std::mem::take(&mut *self.inner.borrow_mut()))
    }

    pub fn has_pending(&self) -> bool {
        !self.inner.borrow().is_empty()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
