//! Action enum: all user-initiated intents and internal events.

use podcast_core::catalog::SortKey;
use podcast_core::favourites::{FavouriteSort, ShowFilter};
use podcast_core::genres::GenreFilter;
use podcast_core::model::{EpisodeSnapshot, Track};
use podcast_core::navigation::Route;

/// All actions that can flow through the system.
/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Navigation ───────────────────────────────────────────────────────────
    Navigate(Route),
    Back,

    // ── Catalog query ────────────────────────────────────────────────────────
    /// Raw keystroke text; applied to the catalog after the debounce delay.
    SearchTyped(String),
    /// Apply the pending search text now (Enter).
    SearchCommitted,
    /// Debounced search text reaching the catalog query.
    ApplySearch(String),
    SetSort(SortKey),
    SetGenre(GenreFilter),
    NextPage,
    PrevPage,
    ReloadCatalog,

    // ── Show detail ──────────────────────────────────────────────────────────
    SelectSeason(usize),
    RetryDetail,

    // ── Favourites ───────────────────────────────────────────────────────────
    ToggleFavourite(EpisodeSnapshot),
    RemoveFavourite(String),
    SortFavourites(FavouriteSort),
    FilterFavourites(ShowFilter),

    // ── Playback ─────────────────────────────────────────────────────────────
    Play(Track),
    TogglePause,
    Stop,
    SeekRelative(f64),

    // ── Filter/search ────────────────────────────────────────────────────────
    OpenFilter,
    CloseFilter,

    // ── UI toggles ───────────────────────────────────────────────────────────
    ToggleTheme,
    ToggleHelp,

    // ── System ───────────────────────────────────────────────────────────────
    Quit,
    Resize(u16, u16),
}
