//! App: component-based event loop.
//!
//! Architecture:
//! - `App` owns all components and `AppState` (shared read-only data for components).
//! - A `tokio::mpsc` channel carries `AppMessage` events in from background tasks
//!   (terminal input, catalog fetches, mpv events).
//! - The event loop draws each frame, then awaits the next message or timer.
//! - Components return `Vec<Action>`; App dispatches each Action.
//! - Player commands come out of `PlaybackCoordinator` and go to mpv.

use std::collections::VecDeque;
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use unicode_width::UnicodeWidthStr;

use podcast_core::api::CatalogClient;
use podcast_core::catalog::{CatalogQuery, CatalogState};
use podcast_core::config::Config;
use podcast_core::debounce::Debouncer;
use podcast_core::detail::ShowDetail;
use podcast_core::error::CatalogError;
use podcast_core::favourites::{FavouritesStore, ShowFilter};
use podcast_core::fetch::FetchTicket;
use podcast_core::layout::{GridLayout, Viewport};
use podcast_core::model::{Show, ShowId};
use podcast_core::navigation::Route;
use podcast_core::playback::PlayerCommand;
use podcast_core::storage::Storage;
use podcast_core::theme::Theme;

use crate::{
    action::Action,
    app_state::{AppState, PlaybackInfo},
    component::Component,
    components::{
        catalog_list::CatalogList, favourites_list::FavouritesList, help_overlay::HelpOverlay,
        player_bar, show_detail::ShowDetailView,
    },
    mpv::{MpvDriver, MpvEvent, MpvHandle, PlayerEvent},
    widgets::{
        status_bar::{self, InputMode},
        toast::ToastManager,
    },
};

/// Rows around the catalog list: header, search bar, pane borders, footer,
/// player bar, keys bar.
const CATALOG_CHROME_ROWS: u16 = 7;

// ── Internal event bus ────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum AppMessage {
    Event(Event),
    CatalogLoaded(FetchTicket, Result<Vec<Show>, CatalogError>),
    DetailLoaded(FetchTicket, Result<Show, CatalogError>),
    Player(PlayerEvent),
}

pub struct App {
    pub state: AppState,
    config: Config,
    client: CatalogClient,
    storage: Arc<dyn Storage>,

    // ── Components ────────────────────────────────────────────────────────────
    catalog_list: CatalogList,
    show_detail: ShowDetailView,
    favourites_list: FavouritesList,
    help_overlay: HelpOverlay,
    toast: ToastManager,

    // ── Runtime ───────────────────────────────────────────────────────────────
    search: Debouncer<String>,
    tx: mpsc::Sender<AppMessage>,
    rx: Option<mpsc::Receiver<AppMessage>>,
    cancel: CancellationToken,
    audio_enabled: bool,
    mpv: Option<MpvHandle>,
    mpv_driver: MpvDriver,
    /// Where the route component was last drawn, for mouse hit-testing.
    body_area: Rect,
    should_quit: bool,
}

impl App {
    pub fn new(
        config: Config,
        client: CatalogClient,
        storage: Arc<dyn Storage>,
        favourites: FavouritesStore,
        initial_route: Route,
        audio_enabled: bool,
    ) -> Self {
        let theme = Theme::load(storage.as_ref());
        let query = CatalogQuery {
            sort_key: config.catalog.sort_key(),
            ..CatalogQuery::default()
        };
        let mut state = AppState::new(CatalogState::new(query), favourites, theme);
        // `go` ignores the root route itself
        state.nav.go(initial_route);

        let (tx, rx) = mpsc::channel::<AppMessage>(1024);
        let search = Debouncer::new(config.catalog.search_debounce());
        let mpv_driver = MpvDriver::new(config.player.default_volume);

        Self {
            state,
            config,
            client,
            storage,
            catalog_list: CatalogList::new(),
            show_detail: ShowDetailView::new(),
            favourites_list: FavouritesList::new(),
            help_overlay: HelpOverlay::new(),
            toast: ToastManager::new(),
            search,
            tx,
            rx: Some(rx),
            cancel: CancellationToken::new(),
            audio_enabled,
            mpv: None,
            mpv_driver,
            body_area: Rect::default(),
            should_quit: false,
        }
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        let mut rx = self
            .rx
            .take()
            .ok_or_else(|| anyhow::anyhow!("app already running"))?;

        if self.audio_enabled {
            self.start_audio().await;
        } else {
            info!("audio disabled by flag");
        }

        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let size = terminal.size()?;
        self.dispatch(Action::Resize(size.width, size.height)).await;

        // ── Background task: keyboard/mouse events ────────────────────────────
        let event_tx = self.tx.clone();
        tokio::task::spawn_blocking(move || loop {
            match event::read() {
                Ok(ev) => {
                    if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        });

        // ── Initial fetches ───────────────────────────────────────────────────
        self.spawn_catalog_fetch();
        if let Route::Show { id, .. } = self.state.route().clone() {
            self.spawn_detail_fetch(id);
        }

        let mut toast_tick = tokio::time::interval(Duration::from_millis(250));
        toast_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // ── Main loop ─────────────────────────────────────────────────────────
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }
            needs_redraw = false;

            if self.should_quit {
                break;
            }

            let search_deadline = self.search.deadline();
            tokio::select! {
                Some(msg) = rx.recv() => {
                    needs_redraw = self.handle_message(msg).await;
                }

                _ = sleep_until_deadline(search_deadline) => {
                    if let Some(text) = self.search.poll(Instant::now()) {
                        self.dispatch(Action::ApplySearch(text)).await;
                        needs_redraw = true;
                    }
                }

                _ = toast_tick.tick() => {
                    needs_redraw = self.toast.tick();
                }
            }
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        self.cancel.cancel();
        self.mpv_driver.kill().await;
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        info!("podcasts exiting");

        Ok(())
    }

    // ── Audio ─────────────────────────────────────────────────────────────────

    async fn start_audio(&mut self) {
        let (mpv_tx, mut mpv_rx) = mpsc::channel::<MpvEvent>(256);
        match self.mpv_driver.spawn_and_connect(mpv_tx).await {
            Ok(handle) => {
                handle.observe_properties().await;
                if let Err(e) = handle.set_volume(self.config.player.default_volume).await {
                    warn!("mpv: set volume failed: {}", e);
                }
                self.mpv = Some(handle);
                self.state.audio_available = true;

                let tx = self.tx.clone();
                let cancel = self.cancel.clone();
                tokio::spawn(async move {
                    loop {
                        tokio::select! {
                            _ = cancel.cancelled() => break,
                            ev = mpv_rx.recv() => {
                                let Some(ev) = ev else { break };
                                if let Some(player_ev) = ev.to_player_event() {
                                    if tx.send(AppMessage::Player(player_ev)).await.is_err() {
                                        break;
                                    }
                                }
                            }
                        }
                    }
                    debug!("mpv event forwarder exiting");
                });
            }
            Err(e) => {
                warn!("audio unavailable: {}", e);
                self.toast.warning(format!("audio unavailable: {}", e));
            }
        }
    }

    async fn send_player(&mut self, cmd: Option<PlayerCommand>) {
        let Some(cmd) = cmd else { return };
        debug!("player command: {:?}", cmd);
        let Some(handle) = &self.mpv else {
            if matches!(cmd, PlayerCommand::Load { .. }) {
                self.toast.warning("no audio backend (is mpv installed?)");
            }
            return;
        };
        if let Err(e) = handle.apply(&cmd).await {
            warn!("mpv command {:?} failed: {}", cmd, e);
            self.toast.error(format!("audio: {}", e));
        }
    }

    // ── Fetches ───────────────────────────────────────────────────────────────

    fn spawn_catalog_fetch(&mut self) {
        let ticket = self.state.catalog_load.begin();
        let client = self.client.clone();
        let tx = self.tx.clone();
        let cancel = self.cancel.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {}
                result = client.fetch_show_list() => {
                    let _ = tx.send(AppMessage::CatalogLoaded(ticket, result)).await;
                }
            }
        });
    }

    fn spawn_detail_fetch(&mut self, id: ShowId) {
        let ticket = self.state.detail.begin();
        debug!("detail: fetching {} (generation {})", id, ticket.generation());
        let client = self.client.clone();
        let tx = self.tx.clone();
        let cancel = self.cancel.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {}
                result = client.fetch_show_detail(&id) => {
                    let _ = tx.send(AppMessage::DetailLoaded(ticket, result)).await;
                }
            }
        });
    }

    // ── Message handling ──────────────────────────────────────────────────────

    /// Returns whether the screen needs a redraw.
    pub async fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::Event(ev) => match ev {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Release {
                        return false;
                    }
                    for a in self.handle_key(key) {
                        self.dispatch(a).await;
                    }
                }
                Event::Mouse(mouse) => {
                    for a in self.handle_mouse(mouse) {
                        self.dispatch(a).await;
                    }
                }
                Event::Resize(w, h) => {
                    self.dispatch(Action::Resize(w, h)).await;
                }
                _ => return false,
            },

            AppMessage::CatalogLoaded(ticket, result) => {
                if !self.state.catalog_load.is_current(ticket) {
                    debug!("catalog: dropping stale response");
                    return false;
                }
                let result = result.map(|shows| self.state.catalog.set_shows(shows));
                if let Err(e) = &result {
                    warn!("catalog: fetch failed: {}", e);
                    self.toast.error(format!("could not load shows: {}", e.user_message()));
                }
                self.state.catalog_load.complete(ticket, result);
            }

            AppMessage::DetailLoaded(ticket, result) => {
                if let Err(e) = &result {
                    warn!("detail: fetch failed: {}", e);
                }
                if !self.state.detail.complete(ticket, result.map(ShowDetail::new)) {
                    debug!("detail: dropping stale response");
                    return false;
                }
            }

            AppMessage::Player(ev) => self.on_player_event(ev),
        }
        true
    }

    fn on_player_event(&mut self, ev: PlayerEvent) {
        match ev {
            PlayerEvent::TimePos(pos) => self.state.playback_info.time_pos_secs = pos,
            PlayerEvent::Duration(d) => self.state.playback_info.duration_secs = d,
            PlayerEvent::Paused(paused) => debug!("mpv: pause={}", paused),
            PlayerEvent::Ended => {
                if let Some(track) = self.state.playback.now_playing() {
                    self.toast.info(format!("finished: {}", track.title));
                }
                self.state.playback.track_ended();
                self.state.playback_info = PlaybackInfo::default();
            }
            PlayerEvent::Failed(reason) => {
                warn!("mpv: playback failed: {}", reason);
                self.toast.error(format!("playback failed: {}", reason));
                // mpv already dropped the file
                let _ = self.state.playback.stop();
                self.state.playback_info = PlaybackInfo::default();
            }
        }
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        let normal = self.state.input_mode == InputMode::Normal;
        match key.code {
            KeyCode::Char('c') if key.modifiers == KeyModifiers::CONTROL => {
                return vec![Action::Quit];
            }
            KeyCode::Char('q') if normal && !self.help_overlay.visible => {
                return vec![Action::Quit];
            }
            _ => {}
        }

        // Help overlay captures all keys when visible
        if self.help_overlay.visible {
            return self.help_overlay.handle_key(key, &self.state);
        }

        if normal {
            let step = self.config.player.seek_step_secs as f64;
            match key.code {
                KeyCode::Char('?') => return vec![Action::ToggleHelp],
                KeyCode::Char('T') => return vec![Action::ToggleTheme],
                KeyCode::Char('F') => return vec![Action::Navigate(Route::Favourites)],
                KeyCode::Char(' ') => return vec![Action::TogglePause],
                KeyCode::Char('X') => return vec![Action::Stop],
                KeyCode::Char(',') => return vec![Action::SeekRelative(-step)],
                KeyCode::Char('.') => return vec![Action::SeekRelative(step)],
                _ => {}
            }
        }

        match self.state.route() {
            Route::Catalog => self.catalog_list.handle_key(key, &self.state),
            Route::Show { .. } => self.show_detail.handle_key(key, &self.state),
            Route::Favourites => self.favourites_list.handle_key(key, &self.state),
            Route::NotFound(_) => match key.code {
                KeyCode::Esc | KeyCode::Backspace => vec![Action::Back],
                _ => vec![],
            },
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent) -> Vec<Action> {
        if self.help_overlay.visible {
            return vec![];
        }
        let area = self.body_area;
        let inside = event.column >= area.x
            && event.column < area.x + area.width
            && event.row >= area.y
            && event.row < area.y + area.height;
        if !inside {
            return vec![];
        }
        match self.state.route() {
            Route::Catalog => self.catalog_list.handle_mouse(event, area, &self.state),
            Route::Show { .. } => self.show_detail.handle_mouse(event, area, &self.state),
            Route::Favourites => self.favourites_list.handle_mouse(event, area, &self.state),
            Route::NotFound(_) => vec![],
        }
    }

    // ── Dispatch ──────────────────────────────────────────────────────────────

    pub async fn dispatch(&mut self, action: Action) {
        let mut queue = VecDeque::from([action]);
        while let Some(action) = queue.pop_front() {
            // Components see the action first so cursors reset before the next draw
            let secondary: Vec<Action> = {
                let s = &self.state;
                let mut out = Vec::new();
                out.extend(self.catalog_list.on_action(&action, s));
                out.extend(self.show_detail.on_action(&action, s));
                out.extend(self.favourites_list.on_action(&action, s));
                out.extend(self.help_overlay.on_action(&action, s));
                out
            };
            let follow_up = self.apply_action(action).await;
            queue.extend(secondary);
            queue.extend(follow_up);
        }
    }

    async fn apply_action(&mut self, action: Action) -> Option<Action> {
        match &action {
            Action::SearchTyped(_) => {}
            _ => debug!("apply_action: {:?}", action),
        }
        match action {
            // ── Navigation ────────────────────────────────────────────────────
            Action::Navigate(route) => {
                let fetch = match &route {
                    Route::Show { id, .. } => Some(id.clone()),
                    _ => None,
                };
                self.state.nav.go(route);
                if let Some(id) = fetch {
                    self.spawn_detail_fetch(id);
                }
            }
            Action::Back => {
                let leaving_show = matches!(self.state.route(), Route::Show { .. });
                if self.state.nav.back() && leaving_show {
                    // a late response must not land on a page that is gone
                    self.state.detail.dispose();
                }
            }

            // ── Catalog query ─────────────────────────────────────────────────
            Action::SearchTyped(text) => {
                self.state.search_draft = text.clone();
                self.search.push(text, Instant::now());
            }
            Action::SearchCommitted => {
                return self.search.flush().map(Action::ApplySearch);
            }
            Action::ApplySearch(text) => {
                debug!("catalog: search {:?}", text);
                self.state.catalog.set_search_text(text);
            }
            Action::SetSort(key) => self.state.catalog.set_sort_key(key),
            Action::SetGenre(genre) => self.state.catalog.set_genre_filter(genre),
            Action::NextPage => self.state.catalog.next_page(),
            Action::PrevPage => self.state.catalog.prev_page(),
            Action::ReloadCatalog => self.spawn_catalog_fetch(),

            // ── Show detail ───────────────────────────────────────────────────
            Action::SelectSeason(idx) => {
                if let Some(detail) = self.state.detail.state_mut().loaded_mut() {
                    detail.select_season(idx);
                }
            }
            Action::RetryDetail => {
                if let Route::Show { id, .. } = self.state.route().clone() {
                    self.spawn_detail_fetch(id);
                }
            }

            // ── Favourites ────────────────────────────────────────────────────
            Action::ToggleFavourite(snapshot) => {
                let title = snapshot.episode.title.clone();
                if self.state.favourites.toggle_favourite(snapshot) {
                    self.toast.success(format!("★ saved {}", title));
                } else {
                    self.toast.info(format!("removed {}", title));
                }
            }
            Action::RemoveFavourite(id) => {
                self.state.favourites.remove_favourite(&id);
                if let ShowFilter::Title(t) = &self.state.favourite_filter {
                    if !self.state.favourites.show_titles().contains(&t.as_str()) {
                        self.state.favourite_filter = ShowFilter::All;
                    }
                }
                self.toast.info("removed from favourites");
            }
            Action::SortFavourites(key) => {
                self.state.favourites.sort_favourites(key);
            }
            Action::FilterFavourites(filter) => self.state.favourite_filter = filter,

            // ── Playback ──────────────────────────────────────────────────────
            Action::Play(track) => {
                let cmd = self.state.playback.play(track);
                if cmd.is_none() {
                    self.toast.warning("this episode has no audio");
                } else {
                    self.state.playback_info = PlaybackInfo::default();
                }
                self.send_player(cmd).await;
            }
            Action::TogglePause => {
                let cmd = self.state.playback.toggle_pause();
                self.send_player(cmd).await;
            }
            Action::Stop => {
                let cmd = self.state.playback.stop();
                self.state.playback_info = PlaybackInfo::default();
                self.send_player(cmd).await;
            }
            Action::SeekRelative(delta) => {
                let info = &self.state.playback_info;
                let current = info
                    .time_pos_secs
                    .or(self.state.playback.seek_position())
                    .unwrap_or(0.0);
                let mut target = current + delta;
                if let Some(d) = info.duration_secs {
                    target = target.min(d);
                }
                let cmd = self.state.playback.seek(target);
                self.send_player(cmd).await;
            }

            // ── Filter/search ─────────────────────────────────────────────────
            Action::OpenFilter => self.state.input_mode = InputMode::Search,
            Action::CloseFilter => {
                self.state.input_mode = InputMode::Normal;
                return self.search.flush().map(Action::ApplySearch);
            }

            // ── UI toggles ────────────────────────────────────────────────────
            Action::ToggleTheme => {
                let theme = self.state.theme.toggled();
                theme.save(self.storage.as_ref());
                self.state.set_theme(theme);
                info!("theme: {}", theme);
            }
            Action::ToggleHelp => {}

            // ── System ────────────────────────────────────────────────────────
            Action::Quit => self.should_quit = true,
            Action::Resize(w, h) => {
                let page_size = self.page_size_for(w, h);
                if page_size != self.state.catalog.query().page_size {
                    debug!("catalog: page size {}", page_size);
                    self.state.catalog.set_page_size(page_size);
                }
            }
        }
        None
    }

    fn page_size_for(&self, width: u16, height: u16) -> usize {
        if self.config.catalog.page_size > 0 {
            return self.config.catalog.page_size;
        }
        GridLayout::list_rows().page_size(Viewport {
            width,
            height: height.saturating_sub(CATALOG_CHROME_ROWS),
        })
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let palette = self.state.palette;
        frame.render_widget(Block::default().style(Style::default().bg(palette.bg)), area);

        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        self.draw_header(frame, outer[0]);

        self.body_area = outer[1];
        match self.state.route().clone() {
            Route::Catalog => self.catalog_list.draw(frame, outer[1], true, &self.state),
            Route::Show { .. } => self.show_detail.draw(frame, outer[1], true, &self.state),
            Route::Favourites => self.favourites_list.draw(frame, outer[1], true, &self.state),
            Route::NotFound(path) => frame.render_widget(
                Paragraph::new(vec![
                    Line::from(Span::styled(
                        format!("nothing at {}", path),
                        Style::default().fg(palette.error),
                    )),
                    Line::from(Span::styled("Esc back", palette.style_muted())),
                ]),
                outer[1],
            ),
        }

        player_bar::draw(frame, outer[2], &self.state);
        status_bar::draw_keys_bar(
            frame,
            outer[3],
            self.state.input_mode,
            self.state.route(),
            &palette,
        );

        self.help_overlay.draw(frame, area, false, &self.state);
        self.toast.draw(frame, area, &palette);
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let palette = &self.state.palette;
        let left = format!(" podcasts  {}", self.state.route());
        let right = format!("★ {}  {} ", self.state.favourites.len(), self.state.theme);
        let pad = (area.width as usize).saturating_sub(left.width() + right.width());
        let line = Line::from(vec![
            Span::styled(
                left,
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" ".repeat(pad)),
            Span::styled(right, Style::default().fg(palette.favourite)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(d) => tokio::time::sleep_until(tokio::time::Instant::from_std(d)).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use podcast_core::model::{Episode, EpisodeSnapshot, Season};
    use podcast_core::storage::{MemoryStorage, THEME_KEY};

    fn app() -> (App, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let dyn_storage: Arc<dyn Storage> = storage.clone();
        let client = CatalogClient::with_base_url("http://127.0.0.1:9").unwrap();
        let favourites = FavouritesStore::load(dyn_storage.clone());
        let app = App::new(
            Config::default(),
            client,
            dyn_storage,
            favourites,
            Route::Catalog,
            false,
        );
        (app, storage)
    }

    fn show(id: &str) -> Show {
        Show {
            id: ShowId::from(id),
            title: format!("Show {}", id),
            seasons: vec![Season {
                number: 1,
                episodes: vec![Episode {
                    title: "Pilot".into(),
                    audio_src: "https://cdn.test/pilot.mp3".into(),
                    season: 1,
                    number: 1,
                    ..Episode::default()
                }],
                ..Season::default()
            }],
            season_count: 1,
            ..Show::default()
        }
    }

    #[tokio::test]
    async fn stale_detail_response_is_dropped() {
        let (mut app, _) = app();
        app.dispatch(Action::Navigate(Route::show("1"))).await;
        let old = app.state.detail.begin();
        let current = app.state.detail.begin();

        assert!(!app.handle_message(AppMessage::DetailLoaded(old, Ok(show("1")))).await);
        assert!(app.state.detail.state().is_loading());

        assert!(app.handle_message(AppMessage::DetailLoaded(current, Ok(show("1")))).await);
        assert_eq!(
            app.state.detail.state().loaded().map(|d| d.show().title.as_str()),
            Some("Show 1")
        );
    }

    #[tokio::test]
    async fn leaving_the_show_page_disposes_the_fetch() {
        let (mut app, _) = app();
        app.dispatch(Action::Navigate(Route::show("1"))).await;
        let ticket = app.state.detail.begin();
        app.dispatch(Action::Back).await;
        assert_eq!(*app.state.route(), Route::Catalog);

        app.handle_message(AppMessage::DetailLoaded(ticket, Ok(show("1")))).await;
        assert!(app.state.detail.state().loaded().is_none());
    }

    #[tokio::test]
    async fn catalog_response_fills_the_view() {
        let (mut app, _) = app();
        let ticket = app.state.catalog_load.begin();
        app.handle_message(AppMessage::CatalogLoaded(ticket, Ok(vec![show("1"), show("2")])))
            .await;
        assert_eq!(app.state.catalog.view().total_count, 2);
        assert!(app.state.catalog_load.state().loaded().is_some());
    }

    #[tokio::test]
    async fn committed_search_applies_immediately() {
        let (mut app, _) = app();
        let ticket = app.state.catalog_load.begin();
        app.handle_message(AppMessage::CatalogLoaded(ticket, Ok(vec![show("1"), show("22")])))
            .await;

        app.dispatch(Action::SearchTyped("22".into())).await;
        assert_eq!(app.state.catalog.view().total_count, 2);
        assert_eq!(app.state.search_draft, "22");

        app.dispatch(Action::SearchCommitted).await;
        assert_eq!(app.state.catalog.query().search_text, "22");
        assert_eq!(app.state.catalog.view().total_count, 1);
    }

    #[tokio::test]
    async fn theme_toggle_persists() {
        let (mut app, storage) = app();
        assert_eq!(app.state.theme, Theme::Dark);
        app.dispatch(Action::ToggleTheme).await;
        assert_eq!(app.state.theme, Theme::Light);
        assert!(storage.read(THEME_KEY).unwrap().is_some());
    }

    #[tokio::test]
    async fn favourite_toggle_and_filter_reset() {
        let (mut app, _) = app();
        let snap = EpisodeSnapshot {
            show_id: ShowId::from("1"),
            show_title: "Show 1".into(),
            show_image: String::new(),
            episode: show("1").seasons[0].episodes[0].clone(),
        };
        app.dispatch(Action::ToggleFavourite(snap.clone())).await;
        assert!(app.state.favourites.is_favourite(&snap.id()));

        app.dispatch(Action::FilterFavourites(ShowFilter::Title("Show 1".into())))
            .await;
        app.dispatch(Action::RemoveFavourite(snap.id())).await;
        assert!(app.state.favourites.is_empty());
        assert_eq!(app.state.favourite_filter, ShowFilter::All);
    }

    #[tokio::test]
    async fn playback_without_audio_backend_still_tracks_state() {
        let (mut app, _) = app();
        let track = EpisodeSnapshot {
            show_id: ShowId::from("1"),
            show_title: "Show 1".into(),
            show_image: String::new(),
            episode: show("1").seasons[0].episodes[0].clone(),
        }
        .track();
        app.dispatch(Action::Play(track)).await;
        assert!(app.state.playback.is_playing());
        app.dispatch(Action::TogglePause).await;
        assert!(app.state.playback.is_paused());
        app.dispatch(Action::SeekRelative(-30.0)).await;
        assert_eq!(app.state.playback.seek_position(), Some(0.0));
        app.on_player_event(PlayerEvent::Ended);
        assert!(app.state.playback.now_playing().is_none());
    }

    #[tokio::test]
    async fn resize_sets_page_size_from_height() {
        let (mut app, _) = app();
        app.dispatch(Action::Resize(120, 40)).await;
        assert_eq!(app.state.catalog.query().page_size, 33);
    }
}
