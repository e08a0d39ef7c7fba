//! ShowDetail component: one show: header, season tabs, episode list.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use podcast_core::detail::ShowDetail;
use podcast_core::fetch::LoadState;

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    widgets::pane_chrome::{pane_chrome, Badge},
};

pub struct ShowDetailView {
    /// Episode row within the selected season.
    selected: usize,
    list_state: ListState,
}

impl ShowDetailView {
    pub fn new() -> Self {
        Self {
            selected: 0,
            list_state: ListState::default(),
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    fn detail(state: &AppState) -> Option<&ShowDetail> {
        state.detail.state().loaded()
    }

    fn episode_count(state: &AppState) -> usize {
        Self::detail(state).map(|d| d.episodes().len()).unwrap_or(0)
    }

    fn select_down(&mut self, state: &AppState) {
        let len = Self::episode_count(state);
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    fn play_selected(&self, state: &AppState) -> Vec<Action> {
        Self::detail(state)
            .and_then(|d| d.snapshot(self.selected))
            .map(|snap| vec![Action::Play(snap.track())])
            .unwrap_or_default()
    }

    fn season_tabs<'a>(detail: &'a ShowDetail, state: &AppState) -> Line<'a> {
        let palette = &state.palette;
        let mut spans = Vec::new();
        for (i, season) in detail.show().seasons.iter().enumerate() {
            let label = if season.title.is_empty() {
                format!(" Season {} ", season.number)
            } else {
                format!(" {} ", season.title)
            };
            let style = if i == detail.selected_index() {
                Style::default()
                    .fg(palette.primary)
                    .bg(palette.selection_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                palette.style_muted()
            };
            spans.push(Span::styled(label, style));
            spans.push(Span::raw(" "));
        }
        Line::from(spans)
    }

    fn draw_detail(&mut self, frame: &mut Frame, area: Rect, detail: &ShowDetail, state: &AppState) {
        let palette = &state.palette;
        let show = detail.show();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        let mut meta = vec![Span::styled(show.title.as_str(), palette.style_heading())];
        if let Some(updated) = show.updated {
            meta.push(Span::styled(
                format!("  updated {}", updated.format("%Y-%m-%d")),
                Style::default().fg(palette.date),
            ));
        }
        if !show.genre_names.is_empty() {
            meta.push(Span::styled(
                format!("  {}", show.genre_names.join(" · ")),
                Style::default().fg(palette.tag),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(meta)), chunks[0]);

        frame.render_widget(
            Paragraph::new(show.description.as_str())
                .style(palette.style_secondary())
                .wrap(Wrap { trim: true }),
            chunks[1],
        );

        frame.render_widget(Paragraph::new(Self::season_tabs(detail, state)), chunks[2]);

        if !detail.has_episodes() {
            frame.render_widget(
                Paragraph::new(Span::styled("no episodes available", palette.style_muted())),
                chunks[3],
            );
            return;
        }

        let episodes = detail.episodes();
        self.selected = self.selected.min(episodes.len().saturating_sub(1));
        let playing_id = state.playback.now_playing().map(|t| t.episode_id.as_str());
        let paused = state.playback.is_paused();

        let items: Vec<ListItem> = episodes
            .iter()
            .enumerate()
            .map(|(i, ep)| {
                let is_selected = i == self.selected;
                let id = podcast_core::model::favourite_id(&show.id, ep);
                let (icon, icon_color) = if playing_id == Some(id.as_str()) {
                    if paused {
                        ("⏸", palette.paused)
                    } else {
                        ("▶", palette.playing)
                    }
                } else {
                    (" ", palette.muted)
                };
                let star = if state.favourites.is_favourite(&id) { "★" } else { " " };
                let title_style = if is_selected {
                    Style::default()
                        .fg(palette.primary)
                        .add_modifier(Modifier::BOLD)
                } else {
                    palette.style_secondary()
                };
                let item = ListItem::new(Line::from(vec![
                    Span::styled(format!("{} ", star), Style::default().fg(palette.favourite)),
                    Span::styled(icon, Style::default().fg(icon_color)),
                    Span::styled(format!(" {:>3}. ", ep.number), palette.style_muted()),
                    Span::styled(ep.title.clone(), title_style),
                ]));
                if is_selected {
                    item.style(Style::default().bg(palette.selection_bg))
                } else {
                    item
                }
            })
            .collect();
        self.list_state.select(Some(self.selected));
        frame.render_stateful_widget(List::new(items), chunks[3], &mut self.list_state);
    }
}

impl Default for ShowDetailView {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for ShowDetailView {
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match key.code {
            KeyCode::Esc | KeyCode::Backspace => return vec![Action::Back],
            KeyCode::Char('r') if state.detail.state().error().is_some() => {
                return vec![Action::RetryDetail]
            }
            _ => {}
        }

        let Some(detail) = Self::detail(state) else {
            return vec![];
        };
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.select_down(state),
            KeyCode::Enter | KeyCode::Char('p') => return self.play_selected(state),
            KeyCode::Char('f') => {
                if let Some(snap) = detail.snapshot(self.selected) {
                    return vec![Action::ToggleFavourite(snap)];
                }
            }
            KeyCode::Char('[') | KeyCode::Char('h') | KeyCode::Left => {
                let idx = detail.selected_index();
                if idx > 0 {
                    return vec![Action::SelectSeason(idx - 1)];
                }
            }
            KeyCode::Char(']') | KeyCode::Char('l') | KeyCode::Right => {
                let idx = detail.selected_index();
                if idx + 1 < detail.season_count() {
                    return vec![Action::SelectSeason(idx + 1)];
                }
            }
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, state: &AppState) -> Vec<Action> {
        match event.kind {
            MouseEventKind::ScrollUp => self.selected = self.selected.saturating_sub(1),
            MouseEventKind::ScrollDown => self.select_down(state),
            MouseEventKind::Down(MouseButton::Left) => {
                // border + header + description + tabs
                let first_row = area.y + 1 + 1 + 3 + 1;
                if event.row >= first_row {
                    let row = (event.row - first_row) as usize + self.list_state.offset();
                    if row < Self::episode_count(state) {
                        self.selected = row;
                    }
                }
            }
            _ => {}
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        match action {
            Action::Navigate(_) | Action::SelectSeason(_) | Action::RetryDetail => {
                self.selected = 0;
                *self.list_state.offset_mut() = 0;
            }
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let palette = &state.palette;
        let (title, badge) = match state.detail.state() {
            LoadState::Loading => (
                "Show",
                Some(Badge {
                    text: "LOADING",
                    color: palette.paused,
                }),
            ),
            LoadState::Failed(_) => (
                "Show",
                Some(Badge {
                    text: "ERR",
                    color: palette.error,
                }),
            ),
            LoadState::Loaded(d) => (d.show().title.as_str(), None),
            LoadState::Idle => ("Show", None),
        };
        let block = pane_chrome(title, Some('2'), focused, badge, palette);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        match state.detail.state() {
            LoadState::Loaded(detail) => self.draw_detail(frame, inner, detail, state),
            LoadState::Loading => frame.render_widget(
                Paragraph::new(Span::styled("loading show…", palette.style_muted())),
                inner,
            ),
            LoadState::Failed(msg) => frame.render_widget(
                Paragraph::new(vec![
                    Line::from(Span::styled(msg.as_str(), Style::default().fg(palette.error))),
                    Line::from(Span::styled(
                        "r retry  Esc back",
                        palette.style_muted(),
                    )),
                ]),
                inner,
            ),
            LoadState::Idle => {}
        }
    }
}
