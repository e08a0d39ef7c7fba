//! Catalog state manager.
//!
//! Holds the fetched show list plus the user's query and derives the
//! visible page on every read. The raw list is never reordered; the view
//! is a fresh vector of references each time.
//!
//! Derivation order:
//!   1. search: case-insensitive substring on the title
//!   2. genre : `All` or shows tagged with the id
//!   3. sort  : stable; `Default` keeps fetch order
//!   4. page  : clamp the requested page into `[1, total_pages]`, slice

use std::cmp::Ordering;

use tracing::debug;

use crate::error::{CatalogError, Result};
use crate::genres::GenreFilter;
use crate::model::{Show, ShowId};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Catalog sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Fetch order.
    #[default]
    Default,
    DateDesc,
    DateAsc,
    TitleAsc,
    TitleDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        Self::Default,
        Self::DateDesc,
        Self::DateAsc,
        Self::TitleAsc,
        Self::TitleDesc,
    ];

    /// Parse a sort key; anything unrecognised behaves as `Default`.
    pub fn from_key(key: &str) -> Self {
        match key.trim() {
            "date-desc" => Self::DateDesc,
            "date-asc" => Self::DateAsc,
            "title-asc" => Self::TitleAsc,
            "title-desc" => Self::TitleDesc,
            _ => Self::Default,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::DateDesc => "date-desc",
            Self::DateAsc => "date-asc",
            Self::TitleAsc => "title-asc",
            Self::TitleDesc => "title-desc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::DateDesc => "Newest",
            Self::DateAsc => "Oldest",
            Self::TitleAsc => "Title A → Z",
            Self::TitleDesc => "Title Z → A",
        }
    }

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let i = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Title comparison shared by the catalog and the favourites page.
/// Case-insensitive first, raw text as the tie-break so the order is total.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Transient UI query. Not persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogQuery {
    pub search_text: String,
    pub sort_key: SortKey,
    pub genre: GenreFilter,
    /// Requested page (1-based). The view clamps it.
    pub page: usize,
    pub page_size: usize,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            sort_key: SortKey::DateDesc,
            genre: GenreFilter::All,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One derived page of the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogView<'a> {
    pub items: Vec<&'a Show>,
    /// Effective page, always within `[1, total_pages]`.
    pub page: usize,
    pub total_pages: usize,
    /// Number of shows matching search + genre, across all pages.
    pub total_count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    shows: Vec<Show>,
    query: CatalogQuery,
}

impl CatalogState {
    pub fn new(query: CatalogQuery) -> Self {
        Self {
            shows: Vec::new(),
            query,
        }
    }

    pub fn with_shows(shows: Vec<Show>, query: CatalogQuery) -> Self {
        Self { shows, query }
    }

    /// Replace the raw list (after a fetch).
    pub fn set_shows(&mut self, shows: Vec<Show>) {
        debug!("catalog: {} shows loaded", shows.len());
        self.shows = shows;
    }

    pub fn shows(&self) -> &[Show] {
        &self.shows
    }

    pub fn query(&self) -> &CatalogQuery {
        &self.query
    }

    pub fn find_show(&self, id: &ShowId) -> Result<&Show> {
        self.shows
            .iter()
            .find(|s| &s.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.clone()))
    }

    // ── Setters ───────────────────────────────────────────────────────────────

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.query.search_text = text.into();
        self.query.page = 1;
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        self.query.sort_key = key;
        self.query.page = 1;
    }

    pub fn set_genre_filter(&mut self, genre: GenreFilter) {
        self.query.genre = genre;
        self.query.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.query.page = page.max(1);
    }

    /// Viewport-driven; keeps the requested page, the view clamps it.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.query.page_size = page_size.max(1);
    }

    pub fn next_page(&mut self) {
        let view = self.view();
        let next = (view.page + 1).min(view.total_pages);
        self.query.page = next;
    }

    pub fn prev_page(&mut self) {
        let current = self.view().page;
        self.query.page = current.saturating_sub(1).max(1);
    }

    // ── Derivation ────────────────────────────────────────────────────────────

    pub fn view(&self) -> CatalogView<'_> {
        derive_view(&self.shows, &self.query)
    }
}

/// Filtered + sorted shows, before pagination.
pub fn filter_and_sort<'a>(shows: &'a [Show], query: &CatalogQuery) -> Vec<&'a Show> {
    let needle = if query.search_text.trim().is_empty() {
        None
    } else {
        Some(query.search_text.to_lowercase())
    };

    let mut data: Vec<&Show> = shows
        .iter()
        .filter(|show| match &needle {
            Some(q) => show.title.to_lowercase().contains(q.as_str()),
            None => true,
        })
        .filter(|show| query.genre.matches(&show.genres))
        .collect();

    sort_shows(&mut data, query.sort_key);
    data
}

pub fn sort_shows(data: &mut [&Show], key: SortKey) {
    match key {
        SortKey::Default => {}
        SortKey::TitleAsc => data.sort_by(|a, b| compare_titles(&a.title, &b.title)),
        SortKey::TitleDesc => data.sort_by(|a, b| compare_titles(&b.title, &a.title)),
        SortKey::DateAsc => data.sort_by_key(|s| s.updated_millis()),
        SortKey::DateDesc => data.sort_by(|a, b| b.updated_millis().cmp(&a.updated_millis())),
    }
}

pub fn derive_view<'a>(shows: &'a [Show], query: &CatalogQuery) -> CatalogView<'a> {
    let filtered = filter_and_sort(shows, query);
    let page_size = query.page_size.max(1);
    let total_count = filtered.len();
    let total_pages = total_count.div_ceil(page_size).max(1);
    let page = query.page.clamp(1, total_pages);

    let start = (page - 1) * page_size;
    let end = (start + page_size).min(total_count);
    let items = if start < end {
        filtered[start..end].to_vec()
    } else {
        Vec::new()
    };

    CatalogView {
        items,
        page,
        total_pages,
        total_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn show(id: u64, title: &str, year: Option<i32>, genres: &[u32]) -> Show {
        Show {
            id: ShowId::from(id),
            title: title.to_string(),
            genres: genres.to_vec(),
            updated: year.map(|y| Utc.with_ymd_and_hms(y, 1, 1, 0, 0, 0).unwrap()),
            ..Show::default()
        }
    }

    fn titles(view: &CatalogView<'_>) -> Vec<String> {
        view.items.iter().map(|s| s.title.clone()).collect()
    }

    fn sample() -> Vec<Show> {
        vec![
            show(1, "delta", Some(2021), &[1]),
            show(2, "Alpha", Some(2024), &[2, 3]),
            show(3, "charlie", None, &[3]),
            show(4, "Bravo", Some(2019), &[1, 3]),
            show(5, "echo", Some(2022), &[]),
        ]
    }

    fn state(page_size: usize) -> CatalogState {
        let query = CatalogQuery {
            sort_key: SortKey::Default,
            page_size,
            ..CatalogQuery::default()
        };
        CatalogState::with_shows(sample(), query)
    }

    #[test]
    fn empty_list_has_one_page() {
        let st = CatalogState::default();
        let view = st.view();
        assert!(view.items.is_empty());
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.page, 1);
        assert_eq!(view.total_count, 0);
    }

    #[test]
    fn default_sort_keeps_fetch_order() {
        let st = state(10);
        assert_eq!(
            titles(&st.view()),
            vec!["delta", "Alpha", "charlie", "Bravo", "echo"]
        );
    }

    #[test]
    fn title_sort_ignores_case() {
        let mut st = state(10);
        st.set_sort_key(SortKey::TitleAsc);
        assert_eq!(
            titles(&st.view()),
            vec!["Alpha", "Bravo", "charlie", "delta", "echo"]
        );
    }

    #[test]
    fn title_desc_is_exact_reverse_without_ties() {
        let mut st = state(10);
        st.set_sort_key(SortKey::TitleAsc);
        let mut asc = titles(&st.view());
        st.set_sort_key(SortKey::TitleDesc);
        asc.reverse();
        assert_eq!(titles(&st.view()), asc);
    }

    #[test]
    fn missing_dates_sort_as_epoch() {
        let mut st = state(10);
        st.set_sort_key(SortKey::DateAsc);
        assert_eq!(titles(&st.view())[0], "charlie");
        st.set_sort_key(SortKey::DateDesc);
        assert_eq!(titles(&st.view()).last().unwrap(), "charlie");
        assert_eq!(titles(&st.view())[0], "Alpha");
    }

    #[test]
    fn whitespace_search_matches_everything() {
        let mut st = state(10);
        st.set_search_text("   ");
        assert_eq!(st.view().total_count, 5);
    }

    #[test]
    fn search_and_genre_combine() {
        let mut st = state(10);
        st.set_search_text("A");
        st.set_genre_filter(GenreFilter::Id(3));
        assert_eq!(titles(&st.view()), vec!["Alpha", "charlie", "Bravo"]);
    }

    #[test]
    fn setters_reset_page() {
        let mut st = state(1);
        st.set_page(4);
        assert_eq!(st.view().page, 4);
        st.set_search_text("e");
        assert_eq!(st.query().page, 1);

        st.set_page(3);
        st.set_sort_key(SortKey::TitleAsc);
        assert_eq!(st.query().page, 1);

        st.set_page(3);
        st.set_genre_filter(GenreFilter::Id(1));
        assert_eq!(st.query().page, 1);
    }

    #[test]
    fn page_never_exceeds_page_size_or_count() {
        for size in 1..=6 {
            let mut st = state(size);
            for page in 0..=7 {
                st.set_page(page);
                let view = st.view();
                assert!(view.items.len() <= size);
                assert!(view.items.len() <= view.total_count);
                assert!(view.page >= 1 && view.page <= view.total_pages);
            }
        }
    }

    #[test]
    fn next_and_prev_page_stay_in_range() {
        let mut st = state(2);
        assert_eq!(st.view().total_pages, 3);
        st.next_page();
        st.next_page();
        st.next_page();
        assert_eq!(st.view().page, 3);
        assert_eq!(titles(&st.view()), vec!["echo"]);
        st.prev_page();
        st.prev_page();
        st.prev_page();
        assert_eq!(st.view().page, 1);
    }

    #[test]
    fn unknown_sort_key_is_default() {
        assert_eq!(SortKey::from_key("popularity"), SortKey::Default);
        assert_eq!(SortKey::from_key("title-desc"), SortKey::TitleDesc);
        for key in SortKey::ALL {
            assert_eq!(SortKey::from_key(key.key()), key);
        }
    }

    #[test]
    fn find_show_reports_not_found() {
        let st = state(10);
        assert_eq!(st.find_show(&ShowId::from(2)).unwrap().title, "Alpha");
        let err = st.find_show(&ShowId::from(99)).unwrap_err();
        assert!(err.is_not_found());
    }
}
