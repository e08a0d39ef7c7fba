//! AppState: shared read-only data passed to all components during render/event.
//!
//! Components read this but never mutate it.
//! The App event-loop is the only thing that writes to AppState.

use podcast_core::catalog::CatalogState;
use podcast_core::detail::ShowDetail;
use podcast_core::favourites::{FavouritesStore, ShowFilter};
use podcast_core::fetch::FetchSlot;
use podcast_core::navigation::{Navigator, Route};
use podcast_core::playback::PlaybackCoordinator;
use podcast_core::theme::Theme;

use crate::theme::Palette;
use crate::widgets::status_bar::InputMode;

/// Position reported by the audio backend for the current track.
#[derive(Debug, Clone, Default)]
pub struct PlaybackInfo {
    pub time_pos_secs: Option<f64>,
    pub duration_secs: Option<f64>,
}

/// The full shared state of the application.
pub struct AppState {
    // ── Stores ──────────────────────────────────────────────────────────────
    pub catalog: CatalogState,
    /// List fetch status; the shows themselves live in `catalog`.
    pub catalog_load: FetchSlot<()>,
    pub detail: FetchSlot<ShowDetail>,
    pub favourites: FavouritesStore,
    pub favourite_filter: ShowFilter,
    pub playback: PlaybackCoordinator,

    // ── Navigation / UI ─────────────────────────────────────────────────────
    pub nav: Navigator,
    pub input_mode: InputMode,
    pub theme: Theme,
    pub palette: Palette,
    /// Text typed into the search box, possibly not yet applied.
    pub search_draft: String,

    // ── Audio ───────────────────────────────────────────────────────────────
    pub playback_info: PlaybackInfo,
    pub audio_available: bool,
}

impl AppState {
    pub fn new(catalog: CatalogState, favourites: FavouritesStore, theme: Theme) -> Self {
        let search_draft = catalog.query().search_text.clone();
        Self {
            catalog,
            catalog_load: FetchSlot::new(),
            detail: FetchSlot::new(),
            favourites,
            favourite_filter: ShowFilter::All,
            playback: PlaybackCoordinator::new(),
            nav: Navigator::default(),
            input_mode: InputMode::Normal,
            theme,
            palette: Palette::for_theme(theme),
            search_draft,
            playback_info: PlaybackInfo::default(),
            audio_available: false,
        }
    }

    pub fn route(&self) -> &Route {
        self.nav.current()
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.palette = Palette::for_theme(theme);
    }
}

#[cfg(test)]
impl AppState {
    /// State over in-memory storage, for component tests.
    pub fn for_tests() -> Self {
        use podcast_core::catalog::CatalogQuery;
        Self::new(
            CatalogState::new(CatalogQuery::default()),
            FavouritesStore::in_memory(),
            Theme::default(),
        )
    }
}
