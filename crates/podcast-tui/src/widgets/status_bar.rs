//! Status bar: bottom line with the input mode and keybindings.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use podcast_core::navigation::Route;

use crate::theme::Palette;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

impl InputMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Search => "SEARCH",
        }
    }

    pub fn color(self, palette: &Palette) -> Color {
        match self {
            Self::Normal => palette.mode_normal,
            Self::Search => palette.mode_search,
        }
    }
}

/// Key hints for the current route and mode.
pub fn key_hints(mode: InputMode, route: &Route) -> &'static str {
    match mode {
        InputMode::Search => " type to search  Enter apply  Esc clear+close",
        InputMode::Normal => match route {
            Route::Catalog => {
                " ↑↓/jk select  Enter open  / search  s/S sort  g/G genre  ←→ page  F favourites  Space pause  T theme  ? help  q quit"
            }
            Route::Show { .. } => {
                " ↑↓/jk select  Enter play  f favourite  [/] season  , . seek  Space pause  Esc back  ? help  q quit"
            }
            Route::Favourites => {
                " ↑↓/jk select  Enter play  d remove  s sort  t show  Space pause  Esc back  ? help  q quit"
            }
            Route::NotFound(_) => " Esc back  q quit",
        },
    }
}

pub fn draw_keys_bar(frame: &mut Frame, area: Rect, mode: InputMode, route: &Route, palette: &Palette) {
    let spans = vec![
        Span::styled(
            format!(" {} ", mode.label()),
            Style::default()
                .fg(mode.color(palette))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(key_hints(mode, route), Style::default().fg(palette.muted)),
    ];
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
