//! Web Speech API adapter.
//!
//! Looks up `SpeechRecognition` (or the `webkit` prefixed constructor) at
//! runtime through `js_sys::Reflect`, configures a single-shot session and
//! forwards `result`, `error` and `end` to an unbounded channel that the app
//! drains every frame.

use futures::channel::mpsc::UnboundedSender;
use js_sys::{Array, Function, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use bellbot_core::ports::{SpeechPort, SpeechSignal};
use bellbot_types::{config::SpeechConfig, BellbotError, Result};

const CONSTRUCTORS: [&str; 2] = ["SpeechRecognition", "webkitSpeechRecognition"];

pub struct WebSpeechAdapter {
    recognition: JsValue,
    // Held so the JS callbacks stay valid for the adapter's lifetime
    _on_result: Closure<dyn FnMut(JsValue)>,
    _on_error: Closure<dyn FnMut(JsValue)>,
    _on_end: Closure<dyn FnMut(JsValue)>,
}

impl WebSpeechAdapter {
    /// Build a recognizer, or `Unavailable` when the browser has none.
    pub fn new(config: &SpeechConfig, signals: UnboundedSender<SpeechSignal>) -> Result<Self> {
        let window = gloo_utils::window();
        let ctor = CONSTRUCTORS
            .iter()
            .filter_map(|name| Reflect::get(&window, &JsValue::from_str(name)).ok())
            .find(|value| value.is_function())
            .ok_or_else(|| BellbotError::Unavailable("Web Speech API not supported".to_string()))?;

        let ctor: Function = ctor.unchecked_into();
        let recognition = Reflect::construct(&ctor, &Array::new()).map_err(js_error)?;
        set(&recognition, "continuous", &JsValue::FALSE)?;
        set(&recognition, "interimResults", &JsValue::FALSE)?;
        set(&recognition, "lang", &JsValue::from_str(&config.lang))?;

        let tx = signals.clone();
        let on_result = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
            match transcript(&event) {
                Some(text) => {
                    let _ = tx.unbounded_send(SpeechSignal::Transcript(text));
                }
                None => log::warn!("Speech result without a transcript"),
            }
        });

        let tx = signals.clone();
        let on_error = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
            let code = Reflect::get(&event, &JsValue::from_str("error"))
                .ok()
                .and_then(|v| v.as_string())
                .unwrap_or_else(|| "unknown".to_string());
            let _ = tx.unbounded_send(SpeechSignal::Error(code));
        });

        let tx = signals;
        let on_end = Closure::<dyn FnMut(JsValue)>::new(move |_event: JsValue| {
            let _ = tx.unbounded_send(SpeechSignal::End);
        });

        set(&recognition, "onresult", on_result.as_ref().unchecked_ref())?;
        set(&recognition, "onerror", on_error.as_ref().unchecked_ref())?;
        set(&recognition, "onend", on_end.as_ref().unchecked_ref())?;

        log::info!("Speech recognition ready ({})", config.lang);
        Ok(Self {
            recognition,
            _on_result: on_result,
            _on_error: on_error,
            _on_end: on_end,
        })
    }

    fn call(&self, method: &str) -> Result<()> {
        let func: Function = Reflect::get(&self.recognition, &JsValue::from_str(method))
            .map_err(js_error)?
            .dyn_into()
            .map_err(|_| BellbotError::Speech(format!("{} is not a function", method)))?;
        func.call0(&self.recognition).map_err(js_error)?;
        Ok(())
    }
}

impl SpeechPort for WebSpeechAdapter {
    fn is_available(&self) -> bool {
        true
    }

    fn start(&self) -> Result<()> {
        self.call("start")
    }

    fn stop(&self) -> Result<()> {
        self.call("stop")
    }
}

/// `event.results[0][0].transcript`
fn transcript(event: &JsValue) -> Option<String> {
    let results = Reflect::get(event, &JsValue::from_str("results")).ok()?;
    let first = Reflect::get_u32(&results, 0).ok()?;
    let alternative = Reflect::get_u32(&first, 0).ok()?;
    Reflect::get(&alternative, &JsValue::from_str("transcript"))
        .ok()?
        .as_string()
}

fn set(target: &JsValue, key: &str, value: &JsValue) -> Result<()> {
    Reflect::set(target, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(js_error)
}

fn js_error(value: JsValue) -> BellbotError {
    BellbotError::Speech(
        value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value)),
    )
}
