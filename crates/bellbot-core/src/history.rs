//! Message history, the single append-only record of the thread.

use std::cell::RefCell;
use std::rc::Rc;

use bellbot_types::{event::SessionEvent, message::Message};

use crate::event_bus::EventBus;

/// Shared by the conversation and reservation controllers; clones point at
/// the same log.
#[derive(Clone)]
pub struct MessageHistory {
    messages: Rc<RefCell<Vec<Message>>>,
    event_bus: EventBus,
}

impl MessageHistory {
    pub fn new(event_bus: EventBus) -> Self {
        Self {
            messages: Rc::new(RefCell::new(Vec::new())),
            event_bus,
        }
    }

    pub fn append(&self, message: Message) {
        self.messages.borrow_mut().push(message.clone());
        self.event_bus.emit(SessionEvent::MessageAppended { message });
    }

    /// Snapshot in display order.
    pub fn all(&self) -> Vec<Message> {
        self.messages.borrow().clone()
    }

    pub fn last(&self) -> Option<Message> {
        self.messages.borrow().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.messages.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.borrow().is_empty()
    }
}
