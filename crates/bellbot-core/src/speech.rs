//! Speech capture controller.
//!
//! Two states, five named transitions:
//! - Idle -> Listening (Start, user toggled the mic on)
//! - Listening -> Idle (Stop, user toggled the mic off)
//! - Listening -> Idle (Transcript / Error / End, engine terminated)
//!
//! Terminal transitions are idempotent: applied to Idle they leave Idle.
//! The engine may fire several of them for one session (a result followed
//! by an end, or an end after the user already stopped), so they must all
//! merge into Idle without error.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use bellbot_types::event::SessionEvent;

use crate::event_bus::EventBus;
use crate::ports::{SpeechPort, SpeechSignal};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptureState {
    Idle,
    Listening,
}

impl fmt::Display for CaptureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureState::Idle => write!(f, "Idle"),
            CaptureState::Listening => write!(f, "Listening"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureTransition {
    Start,
    Stop,
    Transcript,
    Error,
    End,
}

impl CaptureState {
    /// The merge rule: `Start` only moves Idle to Listening; every other
    /// transition lands on Idle whatever the current state.
    pub fn apply(self, transition: CaptureTransition) -> CaptureState {
        match transition {
            CaptureTransition::Start => CaptureState::Listening,
            CaptureTransition::Stop
            | CaptureTransition::Transcript
            | CaptureTransition::Error
            | CaptureTransition::End => CaptureState::Idle,
        }
    }
}

impl From<&SpeechSignal> for CaptureTransition {
    fn from(signal: &SpeechSignal) -> Self {
        match signal {
            SpeechSignal::Transcript(_) => CaptureTransition::Transcript,
            SpeechSignal::Error(_) => CaptureTransition::Error,
            SpeechSignal::End => CaptureTransition::End,
        }
    }
}

pub struct SpeechCapture {
    engine: Option<Rc<dyn SpeechPort>>,
    state: Cell<CaptureState>,
    event_bus: EventBus,
}

impl SpeechCapture {
    /// `engine` is `None` when the platform has no recognizer.
    pub fn new(engine: Option<Rc<dyn SpeechPort>>, event_bus: EventBus) -> Self {
        Self {
            engine,
            state: Cell::new(CaptureState::Idle),
            event_bus,
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state.get()
    }

    pub fn is_listening(&self) -> bool {
        self.state.get() == CaptureState::Listening
    }

    pub fn is_available(&self) -> bool {
        self.engine.as_ref().is_some_and(|e| e.is_available())
    }

    /// Start or stop listening. A no-op when no engine is available; stays
    /// Idle if the engine refuses to start.
    pub fn toggle(&self) -> CaptureState {
        let engine = match self.engine.as_ref() {
            Some(e) if e.is_available() => e,
            _ => {
                log::debug!("Speech engine unavailable, ignoring mic toggle");
                return self.state.get();
            }
        };

        match self.state.get() {
            CaptureState::Idle => match engine.start() {
                Ok(()) => self.transition(CaptureTransition::Start),
                Err(e) => log::warn!("Speech engine failed to start: {}", e),
            },
            CaptureState::Listening => {
                if let Err(e) = engine.stop() {
                    log::warn!("Speech engine failed to stop: {}", e);
                }
                self.transition(CaptureTransition::Stop);
            }
        }
        self.state.get()
    }

    /// Feed an engine-originated signal. Returns the recognized text, if any,
    /// for the caller to place in its input field.
    pub fn on_signal(&self, signal: SpeechSignal) -> Option<String> {
        self.transition(CaptureTransition::from(&signal));
        match signal {
            SpeechSignal::Transcript(text) => {
                self.event_bus.emit(SessionEvent::TranscriptReady { text: text.clone() });
                Some(text)
            }
            SpeechSignal::Error(reason) => {
                log::debug!("Speech engine error: {}", reason);
                None
            }
            SpeechSignal::End => None,
        }
    }

    fn transition(&self, transition: CaptureTransition) {
        let prev = self.state.get();
        let next = prev.apply(transition);
        if prev != next {
            log::debug!("Speech capture: {} -> {} ({:?})", prev, next, transition);
            self.state.set(next);
            self.event_bus.emit(SessionEvent::ListeningChanged {
                listening: next == CaptureState::Listening,
            });
        }
    }
}
