//! Configuration hot-reload
//!
//! Watches config.toml for changes, sending reload events through a channel
//! for the application to handle on its own cadence.

use notify::{
    Config as NotifyConfig, Event, RecommendedWatcher, RecursiveMode, Watcher,
    event::ModifyKind,
};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use crate::{Config, ConfigError};

/// Events emitted by the configuration watcher
#[derive(Debug, Clone)]
pub enum ConfigEvent {
    /// Configuration file changed, contains new config
    ConfigReloaded(Config),
    /// Error occurred during reload
    ReloadError(String),
}

/// Watches the configuration file for changes
pub struct ConfigWatcher {
    _watcher: RecommendedWatcher,
    receiver: Receiver<ConfigEvent>,
}

impl ConfigWatcher {
    /// Create a new configuration watcher over ~/.aura/config.toml
    pub fn new() -> Result<Self, ConfigError> {
        let (tx, rx) = mpsc::channel();

        let config_dir = Config::config_dir()?;
        let config_file = Config::config_file_path()?;

        // Debounce: editors fire several modify events per save
        let debounce_duration = Duration::from_millis(100);
        let mut last_event: Option<Instant> = None;

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| {
                match result {
                    Ok(event) => {
                        if !matches!(event.kind, notify::EventKind::Modify(ModifyKind::Data(_))) {
                            return;
                        }

                        for path in &event.paths {
                            if path != &config_file {
                                continue;
                            }

                            let now = Instant::now();
                            if let Some(last) = last_event {
                                if now.duration_since(last) < debounce_duration {
                                    continue;
                                }
                            }
                            last_event = Some(now);

                            log::info!("Config file changed, reloading...");
                            match Config::load() {
                                Ok(new_config) => {
                                    let _ = tx.send(ConfigEvent::ConfigReloaded(new_config));
                                }
                                Err(e) => {
                                    log::error!("Failed to reload config: {}", e);
                                    let _ = tx.send(ConfigEvent::ReloadError(e.to_string()));
                                }
                            }
                        }
                    }
                    Err(e) => {
                        log::error!("Watch error: {:?}", e);
                    }
                }
            },
            NotifyConfig::default().with_poll_interval(Duration::from_secs(1)),
        )
        .map_err(|e| ConfigError::WatchError(e.to_string()))?;

        if config_dir.exists() {
            watcher
                .watch(&config_dir, RecursiveMode::NonRecursive)
                .map_err(|e| ConfigError::WatchError(e.to_string()))?;
            log::info!("Watching config directory: {:?}", config_dir);
        }

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
        })
    }

    /// Try to receive a config event without blocking
    pub fn try_recv(&self) -> Option<ConfigEvent> {
        self.receiver.try_recv().ok()
    }

    /// Get all pending events
    pub fn drain_events(&self) -> Vec<ConfigEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.receiver.try_recv() {
            events.push(event);
        }
        events
    }
}
