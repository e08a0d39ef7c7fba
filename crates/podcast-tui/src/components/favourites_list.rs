//! FavouritesList component: saved episodes grouped by show.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

use podcast_core::favourites::{FavouriteGroup, ShowFilter};
use podcast_core::model::FavouriteEntry;

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    widgets::pane_chrome::pane_chrome,
};

/// The show filter after `current`: All, then each title, then All again.
pub fn next_show_filter(current: &ShowFilter, titles: &[&str]) -> ShowFilter {
    let next_idx = match current {
        ShowFilter::All => 0,
        ShowFilter::Title(t) => match titles.iter().position(|x| x == t) {
            Some(i) => i + 1,
            None => titles.len(),
        },
    };
    match titles.get(next_idx) {
        Some(t) => ShowFilter::Title(t.to_string()),
        None => ShowFilter::All,
    }
}

pub struct FavouritesList {
    /// Index into the flattened entry list (headers are not selectable).
    selected: usize,
    list_state: ListState,
}

impl FavouritesList {
    pub fn new() -> Self {
        Self {
            selected: 0,
            list_state: ListState::default(),
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    fn groups(state: &AppState) -> Vec<FavouriteGroup<'_>> {
        state.favourites.list_filtered(&state.favourite_filter)
    }

    fn visible_entries(state: &AppState) -> Vec<&FavouriteEntry> {
        Self::groups(state)
            .into_iter()
            .flat_map(|g| g.entries)
            .collect()
    }

    fn selected_entry<'a>(&self, state: &'a AppState) -> Option<&'a FavouriteEntry> {
        Self::visible_entries(state).get(self.selected).copied()
    }

    fn select_down(&mut self, state: &AppState) {
        let len = Self::visible_entries(state).len();
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }
}

impl Default for FavouritesList {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for FavouritesList {
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match key.code {
            KeyCode::Esc | KeyCode::Backspace => return vec![Action::Back],
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.select_down(state),
            KeyCode::Enter | KeyCode::Char('p') => {
                if let Some(entry) = self.selected_entry(state) {
                    return vec![Action::Play(entry.track())];
                }
            }
            KeyCode::Char('d') | KeyCode::Char('x') | KeyCode::Delete => {
                if let Some(entry) = self.selected_entry(state) {
                    return vec![Action::RemoveFavourite(entry.id.clone())];
                }
            }
            KeyCode::Char('s') => return vec![Action::SortFavourites(state.favourites.sort().next())],
            KeyCode::Char('t') => {
                let titles = state.favourites.show_titles();
                return vec![Action::FilterFavourites(next_show_filter(
                    &state.favourite_filter,
                    &titles,
                ))];
            }
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, state: &AppState) -> Vec<Action> {
        match event.kind {
            MouseEventKind::ScrollUp => self.selected = self.selected.saturating_sub(1),
            MouseEventKind::ScrollDown => self.select_down(state),
            _ => {}
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if let Action::FilterFavourites(_) | Action::SortFavourites(_) = action {
            self.selected = 0;
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let palette = &state.palette;
        let block = pane_chrome("Favourites", Some('3'), focused, None, palette);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(inner);

        let filter_label = match &state.favourite_filter {
            ShowFilter::All => "All Shows",
            ShowFilter::Title(t) => t.as_str(),
        };
        let header = Line::from(vec![
            Span::styled(format!("{} saved", state.favourites.len()), palette.style_default()),
            Span::styled("  sort: ", palette.style_muted()),
            Span::styled(state.favourites.sort().label(), palette.style_secondary()),
            Span::styled("  show: ", palette.style_muted()),
            Span::styled(filter_label, Style::default().fg(palette.tag)),
        ]);
        frame.render_widget(Paragraph::new(header), chunks[0]);

        let groups = Self::groups(state);
        if groups.is_empty() {
            let msg = if state.favourites.is_empty() {
                "no favourites yet (press f on an episode to save it)"
            } else {
                "no favourites for this show"
            };
            frame.render_widget(
                Paragraph::new(Span::styled(msg, palette.style_muted())),
                chunks[1],
            );
            return;
        }

        let entry_count: usize = groups.iter().map(|g| g.len()).sum();
        self.selected = self.selected.min(entry_count.saturating_sub(1));

        let playing_id = state.playback.now_playing().map(|t| t.episode_id.as_str());
        let mut items = Vec::new();
        let mut selected_row = 0;
        let mut entry_idx = 0;
        for group in &groups {
            items.push(ListItem::new(Line::from(vec![
                Span::styled(group.show_title, palette.style_heading()),
                Span::styled(format!("  ({})", group.len()), palette.style_muted()),
            ])));
            for entry in &group.entries {
                let is_selected = entry_idx == self.selected;
                if is_selected {
                    selected_row = items.len();
                }
                let icon = if playing_id == Some(entry.id.as_str()) {
                    Span::styled("▶ ", Style::default().fg(palette.playing))
                } else {
                    Span::raw("  ")
                };
                let title_style = if is_selected {
                    Style::default()
                        .fg(palette.primary)
                        .add_modifier(Modifier::BOLD)
                } else {
                    palette.style_secondary()
                };
                let item = ListItem::new(Line::from(vec![
                    Span::raw("  "),
                    icon,
                    Span::styled(
                        format!("S{}E{} ", entry.season, entry.number),
                        palette.style_muted(),
                    ),
                    Span::styled(entry.title.as_str(), title_style),
                    Span::styled(
                        format!("  added {}", entry.added_at.format("%Y-%m-%d %H:%M")),
                        Style::default().fg(palette.date),
                    ),
                ]));
                items.push(if is_selected {
                    item.style(Style::default().bg(palette.selection_bg))
                } else {
                    item
                });
                entry_idx += 1;
            }
        }
        self.list_state.select(Some(selected_row));
        frame.render_stateful_widget(List::new(items), chunks[1], &mut self.list_state);
    }
}
