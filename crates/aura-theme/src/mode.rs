//! Light/dark mode and the theme state machine
//!
//! The host delivers a boolean "dark mode active" signal; everything else in
//! the engine works in terms of [`ThemeMode`]. [`ThemeState`] is the two-state
//! machine driven by that signal: it lives for the session, transitions only
//! when the signal flips, and has no terminal state.

use serde::{Deserialize, Serialize};

/// Active theme variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// Map the host's boolean signal to a mode
    pub fn from_dark(is_dark: bool) -> Self {
        if is_dark { Self::Dark } else { Self::Light }
    }

    /// Whether this is the dark variant
    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// The other mode
    pub fn opposite(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Stable lowercase name, used in logs and config
    pub fn name(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Currently active theme
///
/// Initialized by reading the external signal at startup; when the signal is
/// unavailable the state defaults to light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThemeState {
    mode: ThemeMode,
}

impl ThemeState {
    /// Create a state with an explicit initial mode
    pub fn new(mode: ThemeMode) -> Self {
        Self { mode }
    }

    /// Initialize from an optional startup reading of the signal
    pub fn from_signal(initial: Option<bool>) -> Self {
        match initial {
            Some(is_dark) => Self::new(ThemeMode::from_dark(is_dark)),
            None => {
                log::debug!("theme signal unavailable at startup, defaulting to light");
                Self::default()
            }
        }
    }

    /// The active mode
    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Switch to `mode`, returning whether the state actually changed
    pub fn transition(&mut self, mode: ThemeMode) -> bool {
        if self.mode == mode {
            return false;
        }
        log::info!("theme transition: {} -> {}", self.mode.name(), mode.name());
        self.mode = mode;
        true
    }
}
