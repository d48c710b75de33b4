//! Headless demo run
//!
//! Drives the backdrop engine against the in-memory stage: applies the
//! configured default theme, simulates a host dark-mode toggle and back,
//! and logs what the stage looks like after each transition.

use anyhow::{Result, ensure};
use aura_backdrop::mock::MemoryStage;
use aura_backdrop::{BackdropSettings, Stage, ThemeController, ThemeSignal};
use aura_chat::{MemoryStorage, NewPrompt, PromptStore};
use aura_config::Config;
use aura_theme::ThemeMode;

const TICK: f32 = 1.0 / 60.0;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Using default configuration: {}", e);
            Config::default()
        }
    };
    let settings = BackdropSettings::from_config(&config);

    let mut stage = MemoryStage::new();
    let mut controller = ThemeController::new(settings, config.general.default_mode);
    let (mut host, signal) = ThemeSignal::channel();

    controller.initialize(&mut stage);
    describe(&stage, "startup");
    run_for(&mut controller, &mut stage, &signal, 2.0);

    log::info!("Host reports dark mode");
    host.publish(Some(true));
    run_for(&mut controller, &mut stage, &signal, 10.0);
    ensure!(controller.mode() == ThemeMode::Dark, "dark toggle was not applied");
    describe(&stage, "after dark toggle");

    log::info!("Host reports light mode");
    host.publish(Some(false));
    run_for(&mut controller, &mut stage, &signal, 2.0);
    describe(&stage, "after light toggle");

    demo_prompts()?;
    Ok(())
}

fn run_for(
    controller: &mut ThemeController<MemoryStage>,
    stage: &mut MemoryStage,
    signal: &ThemeSignal,
    seconds: f32,
) {
    let ticks = (seconds / TICK) as usize;
    for _ in 0..ticks {
        controller.drain_signal(stage, signal);
        controller.tick(stage, TICK);
    }
}

fn describe(stage: &MemoryStage, label: &str) {
    log::info!(
        "{}: layers {:?}, {} animations registered, pulse {}",
        label,
        stage.layer_names(),
        stage.animations().len(),
        if stage.pulse_active() { "on" } else { "off" }
    );
}

fn demo_prompts() -> Result<()> {
    let mut storage = MemoryStorage::new();
    let mut store = PromptStore::new();
    store.add(NewPrompt {
        title: "Summarize".to_string(),
        prompt: "Summarize this conversation".to_string(),
        ..NewPrompt::default()
    });
    store.save_to(&mut storage)?;

    let reloaded = PromptStore::load_from(&storage);
    log::info!("Prompt store round trip: {} prompts", reloaded.len());
    Ok(())
}
