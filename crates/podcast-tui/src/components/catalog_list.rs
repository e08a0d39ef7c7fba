//! CatalogList component: the browse page: search bar, show rows, page footer.

use std::time::Instant;

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

use podcast_core::genres::{genre_title, GenreFilter};
use podcast_core::model::Show;
use podcast_core::navigation::Route;

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    theme::Palette,
    widgets::{
        filter_input::{FilterAction, FilterInput},
        pane_chrome::{pane_chrome, Badge},
    },
};

pub struct CatalogList {
    pub filter_input: FilterInput,
    /// Row within the current page.
    selected: usize,
    list_state: ListState,
    last_click: Option<(usize, Instant)>,
}

impl CatalogList {
    pub fn new() -> Self {
        Self {
            filter_input: FilterInput::new("show title…"),
            selected: 0,
            list_state: ListState::default(),
            last_click: None,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    fn page_len(state: &AppState) -> usize {
        state.catalog.view().items.len()
    }

    fn select_up(&mut self, n: usize) {
        self.selected = self.selected.saturating_sub(n);
    }

    fn select_down(&mut self, n: usize, state: &AppState) {
        let len = Self::page_len(state);
        if len > 0 {
            self.selected = (self.selected + n).min(len - 1);
        }
    }

    fn open_selected(&self, state: &AppState) -> Vec<Action> {
        let view = state.catalog.view();
        match view.items.get(self.selected) {
            Some(show) => {
                let genre = match state.catalog.query().genre {
                    GenreFilter::All => None,
                    GenreFilter::Id(id) => Some(id),
                };
                vec![Action::Navigate(Route::Show {
                    id: show.id.clone(),
                    genre,
                })]
            }
            None => vec![],
        }
    }

    fn render_item<'a>(show: &'a Show, is_selected: bool, palette: &Palette) -> ListItem<'a> {
        let title_style = if is_selected {
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.secondary)
        };

        let mut spans = vec![
            Span::styled(if is_selected { "› " } else { "  " }, palette.style_accent()),
            Span::styled(show.title.as_str(), title_style),
        ];

        let seasons = match show.season_count {
            1 => "1 season".to_string(),
            n => format!("{} seasons", n),
        };
        spans.push(Span::styled(format!("  {}", seasons), palette.style_muted()));

        if let Some(updated) = show.updated {
            spans.push(Span::styled(
                format!("  {}", updated.format("%Y-%m-%d")),
                Style::default().fg(palette.date),
            ));
        }

        let genres: Vec<&str> = show.genres.iter().filter_map(|g| genre_title(*g)).collect();
        if !genres.is_empty() {
            spans.push(Span::styled(
                format!("  {}", genres.join(" · ")),
                Style::default().fg(palette.tag),
            ));
        }

        let item = ListItem::new(Line::from(spans));
        if is_selected {
            item.style(Style::default().bg(palette.selection_bg))
        } else {
            item
        }
    }
}

impl Default for CatalogList {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for CatalogList {
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }

        if self.filter_input.is_active() {
            match key.code {
                KeyCode::Up => {
                    self.select_up(1);
                    return vec![];
                }
                KeyCode::Down => {
                    self.select_down(1, state);
                    return vec![];
                }
                _ => {}
            }
            return match self.filter_input.handle_key(key) {
                FilterAction::Changed(q) => vec![Action::SearchTyped(q)],
                FilterAction::Confirmed => vec![Action::SearchCommitted, Action::CloseFilter],
                FilterAction::Cancelled => vec![Action::CloseFilter],
                FilterAction::None => vec![],
            };
        }

        let query = state.catalog.query();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.select_up(1),
            KeyCode::Down | KeyCode::Char('j') => self.select_down(1, state),
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = Self::page_len(state).saturating_sub(1),

            KeyCode::Enter => return self.open_selected(state),

            KeyCode::Char('/') => {
                self.filter_input.set_value(&state.search_draft);
                self.filter_input.activate();
                return vec![Action::OpenFilter];
            }

            KeyCode::Char('s') => return vec![Action::SetSort(query.sort_key.next())],
            KeyCode::Char('S') => return vec![Action::SetSort(query.sort_key.prev())],
            KeyCode::Char('g') => return vec![Action::SetGenre(query.genre.next())],
            KeyCode::Char('G') => return vec![Action::SetGenre(query.genre.prev())],

            KeyCode::Left | KeyCode::Char('h') | KeyCode::PageUp => {
                return vec![Action::PrevPage]
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::PageDown => {
                return vec![Action::NextPage]
            }

            KeyCode::Char('r') => return vec![Action::ReloadCatalog],

            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, state: &AppState) -> Vec<Action> {
        // search bar row + top border
        let rel_row = event.row.saturating_sub(area.y + 2) as usize;
        match event.kind {
            MouseEventKind::ScrollUp => self.select_up(1),
            MouseEventKind::ScrollDown => self.select_down(1, state),
            MouseEventKind::Down(MouseButton::Left) => {
                if rel_row >= Self::page_len(state) {
                    return vec![];
                }
                let is_double = self
                    .last_click
                    .map(|(row, t)| row == rel_row && t.elapsed().as_millis() < 400)
                    .unwrap_or(false);
                self.selected = rel_row;
                self.last_click = Some((rel_row, Instant::now()));
                if is_double {
                    self.last_click = None;
                    return self.open_selected(state);
                }
            }
            _ => {}
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        match action {
            Action::ApplySearch(_)
            | Action::SetSort(_)
            | Action::SetGenre(_)
            | Action::NextPage
            | Action::PrevPage
            | Action::ReloadCatalog => self.selected = 0,
            Action::CloseFilter => self.filter_input.deactivate(),
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let palette = &state.palette;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        if !self.filter_input.is_active() {
            self.filter_input.set_value(&state.search_draft);
        }
        self.filter_input.draw(frame, chunks[0], palette);

        let view = state.catalog.view();
        let badge = if state.catalog_load.state().is_loading() {
            Some(Badge {
                text: "LOADING",
                color: palette.paused,
            })
        } else if state.catalog_load.state().error().is_some() {
            Some(Badge {
                text: "ERR",
                color: palette.error,
            })
        } else {
            None
        };
        let block = pane_chrome("Shows", Some('1'), focused, badge, palette);
        let inner = block.inner(chunks[1]);
        frame.render_widget(block, chunks[1]);

        if view.items.is_empty() {
            let msg = if state.catalog_load.state().is_loading() {
                "loading shows…".to_string()
            } else if let Some(err) = state.catalog_load.state().error() {
                format!("could not load shows: {} (r to retry)", err)
            } else if state.catalog.shows().is_empty() {
                "no shows yet".to_string()
            } else {
                "no shows match the current search".to_string()
            };
            frame.render_widget(
                Paragraph::new(Span::styled(msg, palette.style_muted())),
                inner,
            );
        } else {
            self.selected = self.selected.min(view.items.len() - 1);
            let items: Vec<ListItem> = view
                .items
                .iter()
                .enumerate()
                .map(|(i, show)| Self::render_item(show, i == self.selected, palette))
                .collect();
            self.list_state.select(Some(self.selected));
            frame.render_stateful_widget(List::new(items), inner, &mut self.list_state);
        }

        let query = state.catalog.query();
        let footer = Line::from(vec![
            Span::styled(
                format!(" page {}/{}", view.page, view.total_pages),
                palette.style_default(),
            ),
            Span::styled(format!("  {} shows", view.total_count), palette.style_muted()),
            Span::styled("  sort: ", palette.style_muted()),
            Span::styled(query.sort_key.label(), palette.style_secondary()),
            Span::styled("  genre: ", palette.style_muted()),
            Span::styled(query.genre.label(), Style::default().fg(palette.tag)),
        ]);
        frame.render_widget(Paragraph::new(footer), chunks[2]);
    }
}
