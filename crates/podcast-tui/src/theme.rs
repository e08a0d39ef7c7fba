//! Colour palettes and style helpers for the podcast TUI.

use podcast_core::theme::Theme;
use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub bg: Color,
    pub accent: Color,
    pub playing: Color,
    pub paused: Color,
    pub error: Color,
    pub muted: Color,
    pub separator: Color,
    pub secondary: Color,
    pub primary: Color,
    pub selection_bg: Color,
    pub border: Color,
    pub border_focused: Color,
    pub number_hint: Color,
    pub filter_bg: Color,
    pub filter_fg: Color,
    pub tag: Color,
    pub date: Color,
    pub favourite: Color,
    pub overlay_bg: Color,
    pub toast_info: Color,
    pub toast_success: Color,
    pub toast_warning: Color,
    pub toast_error: Color,
    pub mode_normal: Color,
    pub mode_search: Color,
}

// ── Palettes ──────────────────────────────────────────────────────────────────

pub const DARK: Palette = Palette {
    bg: Color::Rgb(18, 18, 18),
    accent: Color::Rgb(255, 95, 95),
    playing: Color::Rgb(80, 200, 120),
    paused: Color::Rgb(255, 184, 80),
    error: Color::Rgb(255, 80, 80),
    muted: Color::Rgb(72, 72, 88),
    separator: Color::Rgb(40, 40, 52),
    secondary: Color::Rgb(115, 115, 138),
    primary: Color::Rgb(210, 210, 225),
    selection_bg: Color::Rgb(28, 28, 40),
    border: Color::Rgb(40, 40, 52),
    border_focused: Color::Rgb(120, 100, 200),
    number_hint: Color::Rgb(90, 90, 115),
    filter_bg: Color::Rgb(20, 20, 32),
    filter_fg: Color::Rgb(255, 200, 80),
    tag: Color::Rgb(80, 140, 200),
    date: Color::Rgb(100, 160, 130),
    favourite: Color::Rgb(255, 210, 50),
    overlay_bg: Color::Rgb(18, 18, 26),
    toast_info: Color::Rgb(80, 160, 220),
    toast_success: Color::Rgb(80, 200, 120),
    toast_warning: Color::Rgb(255, 184, 80),
    toast_error: Color::Rgb(255, 95, 95),
    mode_normal: Color::Rgb(115, 115, 138),
    mode_search: Color::Rgb(255, 200, 80),
};

pub const LIGHT: Palette = Palette {
    bg: Color::Rgb(246, 244, 240),
    accent: Color::Rgb(196, 48, 48),
    playing: Color::Rgb(30, 130, 70),
    paused: Color::Rgb(176, 110, 10),
    error: Color::Rgb(200, 40, 40),
    muted: Color::Rgb(160, 158, 168),
    separator: Color::Rgb(214, 210, 204),
    secondary: Color::Rgb(96, 94, 110),
    primary: Color::Rgb(28, 28, 36),
    selection_bg: Color::Rgb(226, 222, 240),
    border: Color::Rgb(204, 200, 196),
    border_focused: Color::Rgb(96, 72, 180),
    number_hint: Color::Rgb(150, 146, 170),
    filter_bg: Color::Rgb(236, 232, 220),
    filter_fg: Color::Rgb(150, 90, 0),
    tag: Color::Rgb(30, 90, 160),
    date: Color::Rgb(40, 110, 80),
    favourite: Color::Rgb(200, 140, 0),
    overlay_bg: Color::Rgb(252, 250, 246),
    toast_info: Color::Rgb(30, 100, 170),
    toast_success: Color::Rgb(30, 130, 70),
    toast_warning: Color::Rgb(176, 110, 10),
    toast_error: Color::Rgb(196, 48, 48),
    mode_normal: Color::Rgb(96, 94, 110),
    mode_search: Color::Rgb(150, 90, 0),
};

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => DARK,
            Theme::Light => LIGHT,
        }
    }

    // ── Predefined styles ─────────────────────────────────────────────────────

    pub fn style_default(&self) -> Style {
        Style::default().fg(self.primary)
    }

    pub fn style_secondary(&self) -> Style {
        Style::default().fg(self.secondary)
    }

    pub fn style_muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn style_accent(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn style_focused_border(&self) -> Style {
        Style::default().fg(self.border_focused)
    }

    pub fn style_unfocused_border(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn style_heading(&self) -> Style {
        Style::default().fg(self.primary).add_modifier(Modifier::BOLD)
    }
}

impl Default for Palette {
    fn default() -> Self {
        DARK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_selects_palette() {
        assert_eq!(Palette::for_theme(Theme::Dark), DARK);
        assert_eq!(Palette::for_theme(Theme::Light), LIGHT);
        assert_ne!(DARK.bg, LIGHT.bg);
    }
}
