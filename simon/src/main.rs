use engine::app::{AppConfig, run_game};
use winit::dpi::PhysicalSize;

use simon::app::SimonApp;
use simon::board::COLOR_BACKGROUND;
use simon::logging::init_logging;
use simon::settings::SettingsStore;
use simon::sound::ToneEngine;

const DEFAULT_WINDOW_SIZE: PhysicalSize<u32> = PhysicalSize::new(640, 760);

fn env_u32(name: &str) -> Option<u32> {
    std::env::var(name).ok()?.trim().parse().ok()
}

fn env_u64(name: &str) -> Option<u64> {
    std::env::var(name).ok()?.trim().parse().ok()
}

fn env_bool(name: &str) -> Option<bool> {
    std::env::var(name)
        .ok()
        .and_then(|v| match v.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(env_bool("SIMON_VERBOSE").unwrap_or(false));

    let store = SettingsStore::from_env();
    let settings = store.load();
    if !store.path().exists() {
        if let Err(err) = store.save(&settings) {
            tracing::warn!(%err, "could not write default settings");
        }
    }
    tracing::info!(path = %store.path().display(), ?settings, "settings loaded");

    let desired_size = match (env_u32("SIMON_WINDOW_WIDTH"), env_u32("SIMON_WINDOW_HEIGHT")) {
        (Some(w), Some(h)) => PhysicalSize::new(w.max(1), h.max(1)),
        _ => DEFAULT_WINDOW_SIZE,
    };
    let config = AppConfig {
        title: "Simon Memory Game".to_string(),
        desired_size,
        clamp_to_monitor: true,
        vsync: settings.video.vsync,
        clear_color: COLOR_BACKGROUND,
    };

    let tones = ToneEngine::new(settings.audio.effective_volume());
    run_game(config, SimonApp::new(tones, env_u64("SIMON_SEED")))
}
