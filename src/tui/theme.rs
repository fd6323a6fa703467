//! Color theme for the catalog TUI.
//!
//! All color constants are RGB truecolor. Views import from here instead of
//! using inline `Color::*` literals.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

// ── Primary palette ─────────────────────────────────────────────────────────

/// Blue: links, focused borders, selected cards.
pub const PRIMARY: Color = Color::Rgb(0x3B, 0x82, 0xF6);
/// Light blue: hover-ish emphasis, key hints.
pub const PRIMARY_LIGHT: Color = Color::Rgb(0x60, 0xA5, 0xFA);

// ── Insights ────────────────────────────────────────────────────────────────

/// Purple: AI insight headings and toggles.
pub const INSIGHT: Color = Color::Rgb(0xA8, 0x55, 0xF7);
/// Soft purple: AI insight body text.
pub const INSIGHT_TEXT: Color = Color::Rgb(0xD8, 0xB4, 0xFE);

// ── Backgrounds ─────────────────────────────────────────────────────────────

/// Base background, used for inverted badges.
pub const BG_BASE: Color = Color::Rgb(0x11, 0x18, 0x27);

// ── Text ────────────────────────────────────────────────────────────────────

/// Primary text.
pub const TEXT: Color = Color::Rgb(0xF3, 0xF4, 0xF6);
/// Muted text: author, year, secondary labels.
pub const TEXT_MUTED: Color = Color::Rgb(0x9C, 0xA3, 0xAF);
/// Dim text: placeholders, unfocused borders.
pub const TEXT_DIM: Color = Color::Rgb(0x4B, 0x55, 0x63);

// ── Semantic ────────────────────────────────────────────────────────────────

/// Error: failed fetches.
pub const ERROR: Color = Color::Rgb(0xEF, 0x44, 0x44);

// ── Style helpers ───────────────────────────────────────────────────────────

/// Page and card titles.
pub fn title() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}

/// Section header style.
pub fn heading() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

/// Muted label text.
pub fn muted() -> Style {
    Style::default().fg(TEXT_MUTED)
}

/// Dim text for placeholders and faint hints.
pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Key hint style (e.g., "[q]:quit").
pub fn key_hint() -> Style {
    Style::default()
        .fg(PRIMARY_LIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Link / call-to-action text.
pub fn link() -> Style {
    Style::default()
        .fg(PRIMARY)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

/// Error text.
pub fn error() -> Style {
    Style::default().fg(ERROR)
}

/// Status bar brand badge.
pub fn brand_badge() -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(PRIMARY)
        .add_modifier(Modifier::BOLD)
}

// ── Block builders ──────────────────────────────────────────────────────────

/// A rounded bordered block; highlighted when `focused`.
pub fn card_block(focused: bool) -> Block<'static> {
    let border = if focused {
        Style::default().fg(PRIMARY)
    } else {
        Style::default().fg(TEXT_DIM)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border)
}

/// A titled panel block.
pub fn panel_block(title: &str, focused: bool) -> Block<'_> {
    card_block(focused).title(format!(" {title} "))
}
