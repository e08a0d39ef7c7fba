//! Show detail page: a fetched show plus the selected season.

use crate::model::{Episode, EpisodeSnapshot, Season, Show};

#[derive(Debug, Clone, PartialEq)]
pub struct ShowDetail {
    show: Show,
    /// 0-based, always a valid index when the show has seasons.
    season: usize,
}

impl ShowDetail {
    pub fn new(show: Show) -> Self {
        Self { show, season: 0 }
    }

    pub fn show(&self) -> &Show {
        &self.show
    }

    pub fn has_episodes(&self) -> bool {
        self.show.total_episodes() > 0
    }

    pub fn total_episodes(&self) -> usize {
        self.show.total_episodes()
    }

    pub fn season_count(&self) -> usize {
        self.show.seasons.len()
    }

    pub fn selected_index(&self) -> usize {
        self.season
    }

    pub fn selected_season(&self) -> Option<&Season> {
        self.show.seasons.get(self.season)
    }

    pub fn episodes(&self) -> &[Episode] {
        self.selected_season()
            .map(|s| s.episodes.as_slice())
            .unwrap_or(&[])
    }

    /// Select a season by index, clamped to the season list.
    pub fn select_season(&mut self, index: usize) {
        self.season = index.min(self.season_count().saturating_sub(1));
    }

    pub fn next_season(&mut self) {
        self.select_season(self.season + 1);
    }

    pub fn prev_season(&mut self) {
        self.select_season(self.season.saturating_sub(1));
    }

    /// Episode `index` of the selected season with its show context.
    pub fn snapshot(&self, index: usize) -> Option<EpisodeSnapshot> {
        let episode = self.episodes().get(index)?;
        let season_image = self
            .selected_season()
            .map(|s| s.image.as_str())
            .filter(|img| !img.is_empty());
        Some(EpisodeSnapshot {
            show_id: self.show.id.clone(),
            show_title: self.show.title.clone(),
            show_image: season_image.unwrap_or(&self.show.image).to_string(),
            episode: episode.clone(),
        })
    }
}
