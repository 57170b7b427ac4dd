mod app;
mod assistant;
mod event;
mod session;
mod theme;

use app::CelestaApp;
use assistant::engine::AssistantEngine;
use assistant::registry::ServiceRegistry;
use eframe::egui;
use std::sync::mpsc;
use std::time::Duration;
use theme::Theme;
use tracing_subscriber::EnvFilter;

const THINKING_DELAY: Duration = Duration::from_millis(1000);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let (tx, rx) = mpsc::channel();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("celesta-runtime")
        .build()?;

    let (registry, warnings) = ServiceRegistry::load_default();
    for warning in &warnings {
        tracing::warn!("{warning}");
    }
    let connected = registry.connected().clone();

    let engine = AssistantEngine::new(registry, tx, runtime.handle().clone(), THINKING_DELAY);
    let theme = Theme::default();
    let app = CelestaApp::new(rx, engine, connected, warnings, theme.clone());
    let _runtime = runtime;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([1024.0, 640.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Celesta",
        native_options,
        Box::new(move |creation_context| {
            theme.apply_visuals(&creation_context.egui_ctx);
            Ok(Box::new(app))
        }),
    )?;

    Ok(())
}
