//! Aura Theme - palettes and theme state
//!
//! This crate provides:
//! - The fixed set of style tokens shared by both themes
//! - The two bundled palettes (light, dark)
//! - The light/dark mode state machine

pub mod mode;
pub mod palette;

pub use mode::{ThemeMode, ThemeState};
pub use palette::{DARK, LIGHT, Palette, Token};
