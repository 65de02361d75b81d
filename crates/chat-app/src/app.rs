//! Main egui application: composes the chat panel and drives the controller.

use std::rc::Rc;

use egui::{self, CentralPanel};

use chat_core::controller::ChatController;
use chat_core::event_bus::EventBus;
use chat_core::ports::ChatBackendPort;
use chat_core::session::SessionManager;
use chat_platform::backend::HttpChatBackend;
use chat_platform::storage::detect_storage;
use chat_platform::store::connect_store;
use chat_types::config::ChatConfig;
use chat_ui::panels::{chat, confirm};
use chat_ui::state::UiState;
use chat_ui::theme;

/// The main application state
pub struct ChatApp {
    ui_state: UiState,
    controller: Rc<ChatController>,
    first_frame: bool,
}

impl ChatApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config = ChatConfig::from_build_env();
        if let Err(e) = config.validate() {
            log::warn!("{}", e);
        }
        if config.backend.base_url.is_empty() {
            log::info!("No chat backend URL set; using same-origin /chat");
        }

        let storage = detect_storage();
        let store = connect_store(&config.store);
        let backend: Rc<dyn ChatBackendPort> = Rc::new(HttpChatBackend::new(&config.backend));

        let controller = ChatController::new(
            SessionManager::new(storage),
            store,
            backend,
            EventBus::new(),
        )
        .with_persistence(config.persist_messages);

        Self {
            ui_state: UiState::new(),
            controller: Rc::new(controller),
            first_frame: true,
        }
    }

    /// Resolve the session and load history (async, once per mount)
    fn initialize(&self, ctx: &egui::Context) {
        let controller = self.controller.clone();
        let ctx = ctx.clone();
        wasm_bindgen_futures::spawn_local(async move {
            controller.initialize().await;
            ctx.request_repaint();
        });
    }

    /// Append the user message now and fetch the reply in the background
    fn dispatch_message(&self, text: String, ctx: &egui::Context) {
        let Some(pending) = self.controller.begin_send(&text) else {
            return;
        };
        let controller = self.controller.clone();
        let ctx = ctx.clone();
        ctx.request_repaint();

        wasm_bindgen_futures::spawn_local(async move {
            let outcome = controller.complete_send(pending).await;
            log::debug!("Send finished: {:?}", outcome);
            ctx.request_repaint();
        });
    }

    fn dispatch_clear(&self, ctx: &egui::Context) {
        let controller = self.controller.clone();
        let ctx = ctx.clone();
        wasm_bindgen_futures::spawn_local(async move {
            controller.clear().await;
            ctx.request_repaint();
        });
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            theme::apply_theme(ctx);
            self.initialize(ctx);
            self.first_frame = false;
        }

        // Drain events from the controller
        let events = self.controller.event_bus().drain();
        if !events.is_empty() {
            self.ui_state.process_events(events);
            ctx.request_repaint();
        }

        if self.ui_state.is_busy() {
            ctx.request_repaint();
        }

        if confirm::confirm_clear_dialog(ctx, &mut self.ui_state) {
            self.dispatch_clear(ctx);
        }

        CentralPanel::default().show(ctx, |ui| {
            if let Some(text) = chat::chat_panel(ui, &mut self.ui_state) {
                self.dispatch_message(text, ctx);
            }
        });
    }
}
