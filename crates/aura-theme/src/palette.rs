//! Bundled palettes
//!
//! A palette is an immutable mapping from the fixed token set to color or
//! gradient value strings. Exactly two palettes exist, one per theme mode;
//! they are embedded as constants and selected, never edited, on theme
//! change. Lookup always succeeds.

use crate::mode::ThemeMode;

/// The fixed set of style tokens every palette defines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    PrimaryColor,
    PrimaryGradient,
    HeroGradient,
    SecondaryColor,
    BackgroundColor,
    SurfaceColor,
    TextColor,
    TextMuted,
    BorderColor,
    ChatBackground,
}

/// All tokens, in application order
pub const ALL_TOKENS: &[Token] = &[
    Token::PrimaryColor,
    Token::PrimaryGradient,
    Token::HeroGradient,
    Token::SecondaryColor,
    Token::BackgroundColor,
    Token::SurfaceColor,
    Token::TextColor,
    Token::TextMuted,
    Token::BorderColor,
    Token::ChatBackground,
];

impl Token {
    /// The custom-property name this token is applied under
    pub fn css_name(self) -> &'static str {
        match self {
            Token::PrimaryColor => "--primary-color",
            Token::PrimaryGradient => "--primary-gradient",
            Token::HeroGradient => "--hero-gradient",
            Token::SecondaryColor => "--secondary-color",
            Token::BackgroundColor => "--background-color",
            Token::SurfaceColor => "--surface-color",
            Token::TextColor => "--text-color",
            Token::TextMuted => "--text-muted",
            Token::BorderColor => "--border-color",
            Token::ChatBackground => "--chat-bg",
        }
    }
}

/// One theme's complete token table
pub struct Palette {
    pub mode: ThemeMode,
    values: [(Token, &'static str); 10],
}

impl Palette {
    /// Value for a token; every token is present in every palette
    pub fn value(&self, token: Token) -> &'static str {
        self.values
            .iter()
            .find(|(t, _)| *t == token)
            .map(|(_, v)| *v)
            .unwrap_or_else(|| unreachable!("palette covers all tokens"))
    }

    /// Iterate tokens in application order
    pub fn entries(&self) -> impl Iterator<Item = (Token, &'static str)> + '_ {
        self.values.iter().copied()
    }

    /// Select the palette for a mode
    pub fn for_mode(mode: ThemeMode) -> &'static Palette {
        match mode {
            ThemeMode::Light => &LIGHT,
            ThemeMode::Dark => &DARK,
        }
    }
}

/// Light palette - indigo accents on white surfaces
pub const LIGHT: Palette = Palette {
    mode: ThemeMode::Light,
    values: [
        (Token::PrimaryColor, "#667eea"),
        (
            Token::PrimaryGradient,
            "linear-gradient(135deg, #667eea 0%, #764ba2 100%)",
        ),
        (
            Token::HeroGradient,
            "linear-gradient(135deg, #667eea 0%, #764ba2 100%)",
        ),
        (Token::SecondaryColor, "#f8fafc"),
        (Token::BackgroundColor, "#ffffff"),
        (Token::SurfaceColor, "#ffffff"),
        (Token::TextColor, "#1f2937"),
        (Token::TextMuted, "#6b7280"),
        (Token::BorderColor, "#e5e7eb"),
        (Token::ChatBackground, "#f9fafb"),
    ],
};

/// Dark palette - periwinkle accents on slate surfaces
pub const DARK: Palette = Palette {
    mode: ThemeMode::Dark,
    values: [
        (Token::PrimaryColor, "#818cf8"),
        (
            Token::PrimaryGradient,
            "linear-gradient(135deg, #818cf8 0%, #a855f7 100%)",
        ),
        (
            Token::HeroGradient,
            "linear-gradient(135deg, #1e3a8a 0%, #312e81 100%)",
        ),
        (Token::SecondaryColor, "#374151"),
        (Token::BackgroundColor, "#111827"),
        (Token::SurfaceColor, "#1f2937"),
        (Token::TextColor, "#f9fafb"),
        (Token::TextMuted, "#9ca3af"),
        (Token::BorderColor, "#374151"),
        (Token::ChatBackground, "#0f172a"),
    ],
};
