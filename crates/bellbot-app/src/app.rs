//! Main egui application. Composes the panels and drives the session.

use std::cell::RefCell;
use std::rc::Rc;

use egui::{self, CentralPanel, RichText, TopBottomPanel};
use futures::channel::mpsc::{self, UnboundedReceiver};
use futures::future::LocalBoxFuture;

use bellbot_core::event_bus::EventBus;
use bellbot_core::ports::{AssistantPort, SpeechPort, SpeechSignal};
use bellbot_core::session::{Session, SessionPorts};
use bellbot_platform::api::{HttpAssistant, HttpReservations};
use bellbot_platform::speech::WebSpeechAdapter;
use bellbot_types::config::AppConfig;
use bellbot_types::event::{FlowState, SessionEvent};
use bellbot_ui::panels::chat::{self, ChatAction};
use bellbot_ui::panels::quick_actions;
use bellbot_ui::panels::reservation::{self, FormAction};
use bellbot_ui::state::{BackendStatus, UiState};
use bellbot_ui::theme;

pub struct BellbotApp {
    ui_state: UiState,
    config: AppConfig,
    session: Session,
    speech_signals: UnboundedReceiver<SpeechSignal>,
    /// Filled by the startup health probe
    backend_slot: Rc<RefCell<Option<BackendStatus>>>,
    first_frame: bool,
}

impl BellbotApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let assistant = Rc::new(HttpAssistant::new(config.api.clone()));
        let reservations = Rc::new(HttpReservations::new(config.api.clone()));

        let (tx, speech_signals) = mpsc::unbounded();
        let speech: Option<Rc<dyn SpeechPort>> = match WebSpeechAdapter::new(&config.speech, tx) {
            Ok(adapter) => Some(Rc::new(adapter)),
            Err(e) => {
                log::warn!("Speech input disabled: {}", e);
                None
            }
        };

        let session = Session::new(
            SessionPorts {
                assistant: assistant.clone(),
                reservations,
                speech,
            },
            EventBus::new(),
        );

        let mut ui_state = UiState::new();
        ui_state.speech_available = session.speech().is_available();

        let backend_slot = Rc::new(RefCell::new(None));
        Self::probe_backend(assistant, backend_slot.clone(), cc.egui_ctx.clone());

        Self {
            ui_state,
            config,
            session,
            speech_signals,
            backend_slot,
            first_frame: true,
        }
    }

    /// Check the backend once; the result only feeds the header label.
    fn probe_backend(
        assistant: Rc<HttpAssistant>,
        slot: Rc<RefCell<Option<BackendStatus>>>,
        ctx: egui::Context,
    ) {
        wasm_bindgen_futures::spawn_local(async move {
            let status = match assistant.health().await {
                Ok(()) => BackendStatus::Online,
                Err(e) => {
                    log::warn!("Backend health check failed: {}", e);
                    BackendStatus::Offline(e.to_string())
                }
            };
            *slot.borrow_mut() = Some(status);
            ctx.request_repaint();
        });
    }

    /// Drive a controller future on the browser event loop.
    fn spawn<T: 'static>(future: LocalBoxFuture<'static, T>, ctx: &egui::Context) {
        let ctx = ctx.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let _ = future.await;
            ctx.request_repaint();
        });
    }

    fn pump_speech(&mut self) {
        while let Ok(Some(signal)) = self.speech_signals.try_next() {
            log::debug!("Speech signal: {:?}", signal);
            self.session
                .handle_speech_signal(signal, &mut self.ui_state.input_text);
        }
    }

    fn pump_events(&mut self, ctx: &egui::Context) {
        let events = self.session.event_bus().drain();
        if events.is_empty() {
            return;
        }
        let closed = events.iter().any(|e| {
            matches!(
                e,
                SessionEvent::ReservationStateChanged {
                    state: FlowState::Closed
                }
            )
        });
        self.ui_state.process_events(events);
        if closed {
            self.ui_state.form.load(&self.session.reservation().draft());
        }
        ctx.request_repaint();
    }

    fn handle_chat(&mut self, action: ChatAction, ctx: &egui::Context) {
        match action {
            ChatAction::Send => {
                if let Some(pending) = self.session.send_input(&mut self.ui_state.input_text) {
                    Self::spawn(pending, ctx);
                }
            }
            ChatAction::ToggleMic => {
                let state = self.session.toggle_mic();
                log::debug!("Mic toggled: {}", state);
            }
            ChatAction::ToggleReservation => {
                self.session.toggle_reservation();
            }
        }
    }

    fn handle_form(&mut self, action: FormAction, ctx: &egui::Context) {
        match action {
            FormAction::Edit(field) => {
                let reprice = field.affects_price();
                self.session.update_field(field);
                if reprice {
                    if let Some(pending) = self.session.request_quote() {
                        Self::spawn(pending, ctx);
                    }
                }
            }
            FormAction::Submit => match self.session.submit_reservation(today()) {
                Ok(pending) => Self::spawn(pending, ctx),
                Err(rejected) => log::info!("Reservation not sent: {}", rejected),
            },
            FormAction::Cancel => {
                self.session.close_reservation();
            }
        }
    }
}

/// The browser's local date
fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

impl eframe::App for BellbotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            theme::apply_theme(ctx);
            self.first_frame = false;
        }

        if let Some(status) = self.backend_slot.borrow_mut().take() {
            self.ui_state.backend = status;
        }

        self.pump_speech();
        self.pump_events(ctx);

        if self.ui_state.is_busy() || self.ui_state.listening {
            ctx.request_repaint();
        }

        // ── Header ───────────────────────────────────────────
        TopBottomPanel::top("header")
            .frame(egui::Frame::default().fill(theme::HEADER_BG).inner_margin(12.0))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(
                            RichText::new("Gran Hotel Bell Ville")
                                .strong()
                                .color(theme::TEXT_ON_ACCENT)
                                .size(22.0),
                        );
                        ui.label(
                            RichText::new("Bell Ville, Córdoba, Argentina 🇦🇷")
                                .color(theme::HEADER_SUBTLE),
                        );
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let (dot, hover) = match &self.ui_state.backend {
                            BackendStatus::Unknown => (theme::WARNING, "Conectando...".to_string()),
                            BackendStatus::Online => (theme::SUCCESS, self.config.api.base_url.clone()),
                            BackendStatus::Offline(reason) => (theme::ERROR, reason.clone()),
                        };
                        ui.label(RichText::new("●").color(dot)).on_hover_text(hover);
                        ui.label(
                            RichText::new(&self.ui_state.status_text)
                                .color(theme::HEADER_SUBTLE)
                                .small(),
                        );
                    });
                });
            });

        // ── Input bar ────────────────────────────────────────
        let mut chat_action = None;
        TopBottomPanel::bottom("input_bar")
            .frame(egui::Frame::default().fill(theme::BG_SECONDARY).inner_margin(12.0))
            .show(ctx, |ui| {
                chat_action = chat::input_bar(ui, &mut self.ui_state);
            });

        // ── Quick actions or reservation form ────────────────
        let mut quick_action = None;
        let mut form_actions = Vec::new();
        TopBottomPanel::bottom("actions")
            .frame(egui::Frame::default().fill(theme::BG_PRIMARY).inner_margin(8.0))
            .show(ctx, |ui| {
                if self.ui_state.quick_actions_visible() {
                    quick_action = quick_actions::quick_actions_panel(ui);
                } else {
                    form_actions = reservation::reservation_panel(ui, &mut self.ui_state, today());
                }
            });

        // ── Thread ───────────────────────────────────────────
        CentralPanel::default().show(ctx, |ui| {
            chat::thread_panel(ui, &self.ui_state);
        });

        if let Some(action) = chat_action {
            self.handle_chat(action, ctx);
        }
        if let Some(action) = quick_action {
            if let Some(pending) = self.session.quick_action(action) {
                Self::spawn(pending, ctx);
            }
        }
        for action in form_actions {
            self.handle_form(action, ctx);
        }
    }
}
