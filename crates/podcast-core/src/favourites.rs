//! Favourites store: keyed episode snapshots with write-through persistence.
//!
//! Every mutation rewrites the whole collection under [`FAVOURITES_KEY`].
//! Storage problems are logged and otherwise ignored: favourites are not
//! worth failing the UI over, so a broken store just runs in memory.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::catalog::compare_titles;
use crate::model::{favourite_id, Episode, EpisodeSnapshot, FavouriteEntry, ShowId};
use crate::storage::{read_json, write_json, MemoryStorage, Storage, FAVOURITES_KEY};

pub const UNKNOWN_SHOW: &str = "Unknown Show";

/// Sort order for the favourites page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FavouriteSort {
    TitleAsc,
    TitleDesc,
    /// Most recently added first.
    #[default]
    DateDesc,
    DateAsc,
}

impl FavouriteSort {
    pub const ALL: [FavouriteSort; 4] = [
        Self::DateDesc,
        Self::DateAsc,
        Self::TitleAsc,
        Self::TitleDesc,
    ];

    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim() {
            "title-asc" => Some(Self::TitleAsc),
            "title-desc" => Some(Self::TitleDesc),
            "date-desc" => Some(Self::DateDesc),
            "date-asc" => Some(Self::DateAsc),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::TitleAsc => "title-asc",
            Self::TitleDesc => "title-desc",
            Self::DateDesc => "date-desc",
            Self::DateAsc => "date-asc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::TitleAsc => "A → Z",
            Self::TitleDesc => "Z → A",
            Self::DateDesc => "Newest",
            Self::DateAsc => "Oldest",
        }
    }

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

/// "All Shows" or a single show title on the favourites page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ShowFilter {
    #[default]
    All,
    Title(String),
}

/// Favourites of one show, in store order.
#[derive(Debug, Clone, PartialEq)]
pub struct FavouriteGroup<'a> {
    pub show_title: &'a str,
    pub entries: Vec<&'a FavouriteEntry>,
}

impl FavouriteGroup<'_> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub struct FavouritesStore {
    entries: Vec<FavouriteEntry>,
    storage: Arc<dyn Storage>,
    sort: FavouriteSort,
}

impl FavouritesStore {
    /// Hydrate from storage, ordered by the default sort. Missing or corrupt
    /// data yields an empty store.
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        let entries = match read_json::<Vec<FavouriteEntry>>(storage.as_ref(), FAVOURITES_KEY) {
            Ok(Some(entries)) => dedupe(entries),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("favourites: ignoring stored data: {}", e);
                Vec::new()
            }
        };
        info!("favourites: {} entries loaded", entries.len());
        let mut store = Self {
            entries,
            storage,
            sort: FavouriteSort::default(),
        };
        store.apply_sort();
        store
    }

    /// Store with no durable backing.
    pub fn in_memory() -> Self {
        Self::load(Arc::new(MemoryStorage::new()))
    }

    pub fn entries(&self) -> &[FavouriteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Order the entries are currently kept in.
    pub fn sort(&self) -> FavouriteSort {
        self.sort
    }

    pub fn get(&self, id: &str) -> Option<&FavouriteEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn is_favourite(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Lookup by show + episode, using the same composite key as toggling.
    pub fn is_episode_favourite(&self, show_id: &ShowId, episode: &Episode) -> bool {
        self.is_favourite(&favourite_id(show_id, episode))
    }

    /// Add when absent, remove when present. Returns the new membership.
    pub fn toggle_favourite(&mut self, snapshot: EpisodeSnapshot) -> bool {
        self.toggle_favourite_at(snapshot, Utc::now())
    }

    pub fn toggle_favourite_at(&mut self, snapshot: EpisodeSnapshot, now: DateTime<Utc>) -> bool {
        let id = snapshot.id();
        let member = if let Some(pos) = self.entries.iter().position(|e| e.id == id) {
            self.entries.remove(pos);
            debug!("favourites: removed {}", id);
            false
        } else {
            self.entries.push(snapshot.into_entry(now));
            self.apply_sort();
            debug!("favourites: added {}", id);
            true
        };
        self.persist();
        member
    }

    /// Unconditional delete; absent ids are a no-op (and skip the write).
    pub fn remove_favourite(&mut self, id: &str) {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        if self.entries.len() != before {
            debug!("favourites: removed {}", id);
            self.persist();
        }
    }

    /// Reorder the stored collection and persist the new order. Later
    /// additions keep to the same order.
    pub fn sort_favourites(&mut self, key: FavouriteSort) {
        self.sort = key;
        self.apply_sort();
        self.persist();
    }

    /// Favourites grouped by show title. Group order follows the first
    /// occurrence of each title in the store.
    pub fn list(&self) -> Vec<FavouriteGroup<'_>> {
        let mut groups: Vec<FavouriteGroup<'_>> = Vec::new();
        for entry in &self.entries {
            let title = display_show_title(entry);
            match groups.iter_mut().find(|g| g.show_title == title) {
                Some(group) => group.entries.push(entry),
                None => groups.push(FavouriteGroup {
                    show_title: title,
                    entries: vec![entry],
                }),
            }
        }
        groups
    }

    pub fn list_filtered(&self, filter: &ShowFilter) -> Vec<FavouriteGroup<'_>> {
        let groups = self.list();
        match filter {
            ShowFilter::All => groups,
            ShowFilter::Title(t) => groups.into_iter().filter(|g| g.show_title == t).collect(),
        }
    }

    /// Distinct show titles, in group order.
    pub fn show_titles(&self) -> Vec<&str> {
        self.list().into_iter().map(|g| g.show_title).collect()
    }

    fn apply_sort(&mut self) {
        match self.sort {
            FavouriteSort::TitleAsc => self.entries.sort_by(|a, b| compare_titles(&a.title, &b.title)),
            FavouriteSort::TitleDesc => self.entries.sort_by(|a, b| compare_titles(&b.title, &a.title)),
            FavouriteSort::DateAsc => self.entries.sort_by_key(|e| e.added_at),
            FavouriteSort::DateDesc => self.entries.sort_by(|a, b| b.added_at.cmp(&a.added_at)),
        }
    }

    fn persist(&self) {
        if let Err(e) = write_json(self.storage.as_ref(), FAVOURITES_KEY, &self.entries) {
            warn!("favourites: failed to persist {} entries: {}", self.entries.len(), e);
        }
    }
}

fn display_show_title(entry: &FavouriteEntry) -> &str {
    if entry.show_title.trim().is_empty() {
        UNKNOWN_SHOW
    } else {
        entry.show_title.as_str()
    }
}

/// Keep the first entry for each id.
fn dedupe(entries: Vec<FavouriteEntry>) -> Vec<FavouriteEntry> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|e| seen.insert(e.id.clone()))
        .collect()
}
