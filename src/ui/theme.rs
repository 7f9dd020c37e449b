//! Fluxify theme
//!
//! Near-black background with a cyan accent, yellow ratings and red for
//! favorites and errors.

use ratatui::style::{Color, Modifier, Style};

pub struct Theme;

impl Theme {
    // ═══════════════════════════════════════════════════════════════════════
    // CORE PALETTE
    // ═══════════════════════════════════════════════════════════════════════

    /// Background: #050505
    pub const BACKGROUND: Color = Color::Rgb(0x05, 0x05, 0x05);

    /// Primary: #22d3ee (cyan)
    pub const PRIMARY: Color = Color::Rgb(0x22, 0xd3, 0xee);

    /// Secondary: #7000ff (violet, synthesis lab)
    pub const SECONDARY: Color = Color::Rgb(0x70, 0x00, 0xff);

    /// Accent: #eab308 (rating yellow)
    pub const ACCENT: Color = Color::Rgb(0xea, 0xb3, 0x08);

    /// Favorite: #ef4444
    pub const FAVORITE: Color = Color::Rgb(0xef, 0x44, 0x44);

    /// Text: #e5e7eb
    pub const TEXT: Color = Color::Rgb(0xe5, 0xe7, 0xeb);

    /// Dim: #6b7280
    pub const DIM: Color = Color::Rgb(0x6b, 0x72, 0x80);

    /// Success: #4ade80
    pub const SUCCESS: Color = Color::Rgb(0x4a, 0xde, 0x80);

    /// Error: #f87171
    pub const ERROR: Color = Color::Rgb(0xf8, 0x71, 0x71);

    /// Panels and the status bar: #111111
    pub const BACKGROUND_LIGHT: Color = Color::Rgb(0x11, 0x11, 0x11);

    /// Border color (dim cyan)
    pub const BORDER: Color = Color::Rgb(0x15, 0x5e, 0x75);

    pub const BORDER_FOCUSED: Color = Self::PRIMARY;

    // ═══════════════════════════════════════════════════════════════════════
    // STYLE HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    pub fn text() -> Style {
        Style::default().fg(Self::TEXT)
    }

    pub fn dimmed() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn error() -> Style {
        Style::default()
            .fg(Self::ERROR)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Synthesis lab accents
    pub fn lab() -> Style {
        Style::default()
            .fg(Self::SECONDARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn accent() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn favorite() -> Style {
        Style::default().fg(Self::FAVORITE)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    pub fn border_focused() -> Style {
        Style::default()
            .fg(Self::BORDER_FOCUSED)
            .add_modifier(Modifier::BOLD)
    }

    pub fn list_item() -> Style {
        Style::default().fg(Self::TEXT)
    }

    pub fn list_item_selected() -> Style {
        Style::default()
            .fg(Self::BACKGROUND)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn input() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND_LIGHT)
    }

    pub fn keybind() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    pub fn keybind_desc() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND_LIGHT)
    }

    pub fn loading() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Year/date metadata
    pub fn year() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn genre() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    /// Rating color by score (yellow for good, dim for weak)
    pub fn rating(score: f32) -> Style {
        if score >= 7.0 {
            Style::default().fg(Self::ACCENT).add_modifier(Modifier::BOLD)
        } else if score >= 5.0 {
            Style::default().fg(Self::ACCENT)
        } else {
            Style::default().fg(Self::DIM)
        }
    }
}
