//! HelpOverlay component: centered popup with the keyboard reference.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    theme::Palette,
};

pub struct HelpOverlay {
    pub visible: bool,
}

impl HelpOverlay {
    pub fn new() -> Self {
        Self { visible: false }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }
}

impl Default for HelpOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for HelpOverlay {
    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release || !self.visible {
            return vec![];
        }
        match key.code {
            KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Esc => vec![Action::ToggleHelp],
            // Consume all keys while overlay is open
            _ => vec![],
        }
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if let Action::ToggleHelp = action {
            self.toggle();
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        if !self.visible {
            return;
        }
        let p = &state.palette;
        let popup = centered_rect(68, 32, area);

        let section = |title: &'static str| {
            Line::from(Span::styled(
                title,
                Style::default().fg(p.muted).add_modifier(Modifier::BOLD),
            ))
        };

        let help_lines: Vec<Line> = vec![
            Line::from(Span::styled(" keyboard shortcuts", p.style_heading())),
            Line::from(""),
            section(" browse"),
            help_row(p, "↑ / ↓  or  j / k", "move selection"),
            help_row(p, "enter", "open show / play episode"),
            help_row(p, "/", "search titles (Esc clears + closes)"),
            help_row(p, "s / S", "cycle sort forward / backward"),
            help_row(p, "g / G", "cycle genre forward / backward"),
            help_row(p, "← / →  or  h / l", "previous / next page"),
            help_row(p, "r", "reload catalog / retry show"),
            Line::from(""),
            section(" show page"),
            help_row(p, "[ / ]", "previous / next season"),
            help_row(p, "f", "toggle favourite"),
            help_row(p, "esc", "back"),
            Line::from(""),
            section(" favourites"),
            help_row(p, "F", "open favourites"),
            help_row(p, "d / x", "remove favourite"),
            help_row(p, "s", "cycle sort"),
            help_row(p, "t", "cycle show filter"),
            Line::from(""),
            section(" playback & ui"),
            help_row(p, "space", "pause / resume"),
            help_row(p, ", / .", "seek back / forward"),
            help_row(p, "X", "stop playback"),
            help_row(p, "T", "toggle light / dark theme"),
            help_row(p, "?", "toggle this help overlay"),
            help_row(p, "q / Ctrl+C", "quit"),
            Line::from(""),
            Line::from(Span::styled(" press ? or esc to close", p.style_muted())),
        ];

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(help_lines)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(p.style_unfocused_border())
                        .style(Style::default().bg(p.overlay_bg)),
                )
                .wrap(Wrap { trim: false }),
            popup,
        );
    }
}

fn help_row<'a>(p: &Palette, key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::raw(" "),
        Span::styled(
            format!("{:<20}", key),
            Style::default().fg(p.primary).add_modifier(Modifier::BOLD),
        ),
        Span::styled(desc, p.style_secondary()),
    ])
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vert[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;

    #[test]
    fn swallows_keys_while_open() {
        let state = AppState::for_tests();
        let mut help = HelpOverlay::new();
        help.on_action(&Action::ToggleHelp, &state);
        assert!(help.visible);
        let j = help.handle_key(KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE), &state);
        assert!(j.is_empty());
        let esc = help.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE), &state);
        assert!(matches!(esc.as_slice(), [Action::ToggleHelp]));
    }
}
