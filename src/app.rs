use crate::assistant::engine::AssistantEngine;
use crate::assistant::responses::connect_confirmation;
use crate::assistant::service::ServiceId;
use crate::event::AppEvent;
use crate::session::{ChatSession, Role};
use crate::theme::Theme;
use eframe::egui::{self, RichText, ScrollArea};
use std::collections::BTreeSet;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::{SystemTime, UNIX_EPOCH};

struct Capability {
    icon: &'static str,
    title: &'static str,
    description: &'static str,
    prompt: &'static str,
}

const CAPABILITIES: [Capability; 6] = [
    Capability {
        icon: "📧",
        title: "Email Management",
        description: "Read, compose, and manage emails with natural language",
        prompt: "Check my latest unread emails",
    },
    Capability {
        icon: "📁",
        title: "File Operations",
        description: "Search, organize, and manage your Drive files",
        prompt: "Show me my recent documents",
    },
    Capability {
        icon: "📅",
        title: "Calendar & Scheduling",
        description: "Create events, check availability, manage meetings",
        prompt: "What's on my calendar today?",
    },
    Capability {
        icon: "⚡",
        title: "Code & GitHub",
        description: "Manage repositories, review PRs, commit code",
        prompt: "List my GitHub repositories",
    },
    Capability {
        icon: "𝕏",
        title: "Social Media",
        description: "Post tweets, read timeline, engage with content",
        prompt: "Show my Twitter timeline",
    },
    Capability {
        icon: "🗺",
        title: "Maps & Location",
        description: "Find places, get directions, explore locations",
        prompt: "Find coffee shops near me",
    },
];

pub struct CelestaApp {
    rx: Receiver<AppEvent>,
    engine: AssistantEngine,
    theme: Theme,
    session: ChatSession,
    /// UI mirror of the registry, updated from ServiceConnected events.
    connected: BTreeSet<ServiceId>,
    input_buffer: String,
    is_thinking: bool,
    diagnostics_log: Vec<String>,
    scroll_to_bottom: bool,
}

impl CelestaApp {
    pub fn new(
        rx: Receiver<AppEvent>,
        engine: AssistantEngine,
        connected: BTreeSet<ServiceId>,
        startup_warnings: Vec<String>,
        theme: Theme,
    ) -> Self {
        let mut app = Self {
            rx,
            engine,
            theme,
            session: ChatSession::new(),
            connected,
            input_buffer: String::new(),
            is_thinking: false,
            diagnostics_log: Vec::new(),
            scroll_to_bottom: false,
        };

        for warning in startup_warnings {
            app.log_diagnostic(warning);
        }

        app
    }

    fn timestamp() -> String {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(duration) => duration.as_secs().to_string(),
            Err(_) => "0".to_string(),
        }
    }

    fn log_diagnostic(&mut self, message: impl Into<String>) {
        self.diagnostics_log
            .push(format!("[{}] {}", Self::timestamp(), message.into()));
    }

    /// Empty and whitespace-only input is dropped here; nothing is
    /// appended and the engine is never invoked. While a reply is
    /// pending the busy flag blocks further submissions.
    fn submit_prompt(&mut self, ctx: &egui::Context) {
        let prompt = self.input_buffer.trim().to_string();
        if prompt.is_empty() || self.is_thinking {
            return;
        }

        self.session.append(Role::User, prompt.clone());
        self.is_thinking = true;
        self.engine.send(prompt);
        self.input_buffer.clear();
        self.scroll_to_bottom = true;
        ctx.request_repaint();
    }

    fn start_new_chat(&mut self) {
        let session_id = self.session.start_new().to_string();
        self.input_buffer.clear();
        self.scroll_to_bottom = false;
        self.log_diagnostic(format!("started session {session_id}"));
    }

    fn drain_events(&mut self, ctx: &egui::Context) {
        loop {
            match self.rx.try_recv() {
                Ok(event) => self.apply_event(event, ctx),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.log_diagnostic("event channel disconnected");
                    break;
                }
            }
        }
    }

    fn apply_event(&mut self, event: AppEvent, ctx: &egui::Context) {
        match event {
            AppEvent::ReplyReady(reply) => {
                self.session.append(Role::Assistant, reply);
                self.is_thinking = false;
                self.scroll_to_bottom = true;
                ctx.request_repaint();
            }
            AppEvent::ServiceConnected(service) => {
                self.connected.insert(service);
                self.log_diagnostic(format!("service connected: {service}"));
                self.session
                    .append(Role::Assistant, connect_confirmation(service));
                self.scroll_to_bottom = true;
                ctx.request_repaint();
            }
            AppEvent::EngineWarning(message) => {
                self.log_diagnostic(format!("engine warning: {message}"));
            }
        }
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.strong("Celesta");
                ui.separator();
                ui.label(
                    RichText::new("Your intelligent agentic AI assistant")
                        .color(self.theme.text_muted),
                );
            });
        });
    }

    fn render_services_panel(&mut self, ctx: &egui::Context) {
        let theme = self.theme.clone();
        egui::SidePanel::left("services_panel")
            .resizable(true)
            .show(ctx, |ui| {
                ui.heading("Services");
                ui.add_space(theme.spacing_8);

                let mut clicked_service: Option<ServiceId> = None;
                for service in ServiceId::ALL {
                    let connected = self.connected.contains(&service);
                    let dot_color = if connected {
                        theme.success
                    } else {
                        theme.danger
                    };

                    ui.horizontal(|ui| {
                        ui.label(RichText::new("●").color(dot_color));
                        ui.label(service.display_name());
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if connected {
                                ui.label(RichText::new("Connected").color(theme.success));
                            } else if ui.button("Connect").clicked() {
                                clicked_service = Some(service);
                            }
                        });
                    });
                }

                if let Some(service) = clicked_service {
                    // Simulated connection only; no OAuth happens.
                    self.engine.connect(service);
                }

                ui.add_space(theme.spacing_16);
                ui.separator();
                if ui.button("New Chat").clicked() {
                    self.start_new_chat();
                }
            });
    }

    fn render_welcome(&mut self, ui: &mut egui::Ui) -> Option<&'static str> {
        let theme = &self.theme;
        let mut try_prompt = None;

        ui.add_space(theme.spacing_24);
        ui.vertical_centered(|ui| {
            ui.heading("Celesta");
            ui.label(
                RichText::new("Your intelligent agentic AI assistant").color(theme.text_muted),
            );
        });
        ui.add_space(theme.spacing_16);

        for capability in &CAPABILITIES {
            theme.card_frame().show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(capability.icon).size(20.0));
                    ui.vertical(|ui| {
                        ui.label(RichText::new(capability.title).strong());
                        ui.add_space(theme.spacing_4);
                        ui.label(
                            RichText::new(capability.description).color(theme.text_muted),
                        );
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Try it").clicked() {
                            try_prompt = Some(capability.prompt);
                        }
                    });
                });
            });
            ui.add_space(theme.spacing_8);
        }

        try_prompt
    }

    fn render_chat_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let transcript_height = (ui.available_height() - 170.0).max(120.0);
            let mut try_prompt: Option<&'static str> = None;

            ScrollArea::vertical()
                .id_salt("chat_transcript")
                .max_height(transcript_height)
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    if self.session.history().is_empty() && !self.is_thinking {
                        try_prompt = self.render_welcome(ui);
                    } else {
                        let theme = self.theme.clone();
                        for message in self.session.history() {
                            let (speaker, color) = match message.role {
                                Role::User => ("You", theme.accent_primary),
                                Role::Assistant => ("Celesta", theme.success),
                            };
                            theme.card_frame().show(ui, |ui| {
                                ui.label(RichText::new(speaker).color(color).small());
                                ui.label(&message.content);
                            });
                            ui.add_space(theme.spacing_8);
                        }

                        if self.is_thinking {
                            ui.label(
                                RichText::new("Celesta is thinking…")
                                    .color(theme.text_muted)
                                    .italics(),
                            );
                        }
                    }

                    if self.scroll_to_bottom {
                        ui.scroll_to_cursor(Some(egui::Align::BOTTOM));
                    }
                });
            self.scroll_to_bottom = false;

            if let Some(prompt) = try_prompt {
                self.input_buffer = prompt.to_string();
                self.submit_prompt(ctx);
            }

            ui.separator();
            egui::CollapsingHeader::new("Diagnostics")
                .default_open(false)
                .show(ui, |ui| {
                    ScrollArea::vertical()
                        .id_salt("diagnostics_log")
                        .max_height(90.0)
                        .stick_to_bottom(true)
                        .show(ui, |ui| {
                            for entry in &self.diagnostics_log {
                                ui.label(entry);
                            }
                        });
                });

            ui.separator();
            let input_enabled = !self.is_thinking;
            let hint = if self.is_thinking {
                "Waiting for reply..."
            } else {
                "Message Celesta..."
            };

            let mut send_now = false;
            let composer = self.theme.composer_frame();
            composer.show(ui, |ui| {
                ui.horizontal(|ui| {
                    let response = ui.add_enabled(
                        input_enabled,
                        egui::TextEdit::singleline(&mut self.input_buffer)
                            .desired_width(f32::INFINITY)
                            .hint_text(hint),
                    );
                    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        send_now = true;
                    }

                    let theme = &self.theme;
                    let send_button = egui::Button::new(
                        RichText::new("Send").color(theme.text_on_accent),
                    )
                    .fill(theme.accent_primary)
                    .corner_radius(egui::CornerRadius::same(theme.radius_8))
                    .min_size(egui::vec2(0.0, theme.button_height));
                    let clicked = ui
                        .add_enabled(
                            input_enabled && !self.input_buffer.trim().is_empty(),
                            send_button,
                        )
                        .clicked();
                    send_now |= clicked;
                });
            });

            if send_now && input_enabled {
                self.submit_prompt(ctx);
            }

            if self.is_thinking {
                // Keep repainting so the pending reply is picked up
                // without waiting for the next input event.
                ctx.request_repaint_after(std::time::Duration::from_millis(100));
            }
        });
    }
}

impl eframe::App for CelestaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events(ctx);
        self.render_top_bar(ctx);
        self.render_services_panel(ctx);
        self.render_chat_panel(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::{CelestaApp, CAPABILITIES};
    use crate::assistant::engine::AssistantEngine;
    use crate::assistant::intent::{classify, IntentTopic};
    use crate::assistant::registry::ServiceRegistry;
    use crate::theme::Theme;
    use eframe::egui;
    use std::collections::BTreeSet;
    use std::sync::mpsc;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    fn scratch_app(prefix: &str) -> (CelestaApp, tokio::runtime::Runtime) {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .expect("runtime should build");
        let (tx, rx) = mpsc::channel();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time should be monotonic")
            .as_nanos();
        let slot = std::env::temp_dir().join(format!(
            "celesta_app_{prefix}_{}_{}.json",
            std::process::id(),
            nanos
        ));
        let engine = AssistantEngine::new(
            ServiceRegistry::new(slot),
            tx,
            runtime.handle().clone(),
            Duration::ZERO,
        );
        let app = CelestaApp::new(rx, engine, BTreeSet::new(), Vec::new(), Theme::default());
        (app, runtime)
    }

    #[test]
    fn every_try_prompt_reaches_a_real_topic() {
        for capability in &CAPABILITIES {
            let classification = classify(capability.prompt);
            assert_ne!(
                classification.topic,
                IntentTopic::None,
                "try-prompt {:?} should classify",
                capability.prompt
            );
        }
    }

    #[test]
    fn whitespace_only_input_is_silently_dropped() {
        let (mut app, _runtime) = scratch_app("whitespace");
        let ctx = egui::Context::default();

        app.input_buffer = "   ".to_string();
        app.submit_prompt(&ctx);

        assert!(app.session.history().is_empty());
        assert!(!app.is_thinking);
        // Nothing was dispatched, so no reply ever arrives.
        std::thread::sleep(Duration::from_millis(100));
        assert!(app.rx.try_recv().is_err());
    }

    #[test]
    fn submission_is_blocked_while_a_reply_is_pending() {
        let (mut app, _runtime) = scratch_app("busy");
        let ctx = egui::Context::default();

        app.is_thinking = true;
        app.input_buffer = "check my email".to_string();
        app.submit_prompt(&ctx);

        assert!(app.session.history().is_empty());
        // The composer keeps the text; the prompt was not dispatched.
        assert_eq!(app.input_buffer, "check my email");
    }
}
