use center_core::{
    aggregate::palette_color,
    present::{Glyph, Tone},
};
use ratatui::style::{Color, Modifier, Style};

use crate::notice::NoticeLevel;

pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Success => Color::Rgb(0x10, 0xB9, 0x81),
        Tone::Info => Color::Rgb(0x3B, 0x82, 0xF6),
        Tone::Warning => Color::Rgb(0xF5, 0x9E, 0x0B),
        Tone::Danger => Color::Rgb(0xEF, 0x44, 0x44),
        Tone::Accent => Color::Rgb(0x63, 0x66, 0xF1),
        Tone::Neutral => Color::Gray,
    }
}

pub fn glyph_symbol(glyph: Glyph) -> &'static str {
    match glyph {
        Glyph::CheckCircle => "✔",
        Glyph::Clock => "◷",
        Glyph::PencilSquare => "✎",
        Glyph::XCircle => "✖",
        Glyph::DocumentCheck => "▤",
    }
}

pub fn chart_color(index: usize) -> Color {
    let (r, g, b) = palette_color(index);
    Color::Rgb(r, g, b)
}

/// Bar `index` of a chart, cycling through the palette.
pub fn bar(index: usize) -> Style {
    Style::default().fg(chart_color(index))
}

pub fn bar_value() -> Style {
    Style::default()
        .fg(Color::Black)
        .add_modifier(Modifier::BOLD)
}

/// Filled pill: dark text on the tone colour.
pub fn badge(tone: Tone) -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(tone_color(tone))
        .add_modifier(Modifier::BOLD)
}

pub fn icon(tone: Tone) -> Style {
    Style::default().fg(tone_color(tone))
}

pub fn card_title() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

pub fn card_border() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn overdue_border() -> Style {
    Style::default().fg(tone_color(Tone::Danger))
}

pub fn overdue_banner() -> Style {
    Style::default()
        .fg(Color::White)
        .bg(tone_color(Tone::Danger))
        .add_modifier(Modifier::BOLD)
}

pub fn tab_active() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

pub fn label() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

pub fn value() -> Style {
    Style::default().fg(Color::White)
}

pub fn dim() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn system() -> Style {
    Style::default().fg(Color::Gray)
}

pub fn error() -> Style {
    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
}

pub fn notice(level: NoticeLevel) -> Style {
    match level {
        NoticeLevel::System => system(),
        NoticeLevel::Success => Style::default().fg(tone_color(Tone::Success)),
        NoticeLevel::Help => value(),
        NoticeLevel::Error => error(),
    }
}
