//! Canonical catalog types.
//!
//! The remote API is loose about field names and id types; `api` normalizes
//! every response into these shapes and nothing downstream looks at the raw
//! JSON again.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Show identifier. The API sends both `"10716"` and `10716`; we keep the
/// textual form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShowId(pub String);

impl ShowId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ShowId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ShowId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<u64> for ShowId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

/// A podcast series. Previews from the list endpoint carry no seasons,
/// only `season_count`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Show {
    pub id: ShowId,
    pub title: String,
    pub description: String,
    pub image: String,
    /// Numeric genre ids (list endpoint).
    pub genres: Vec<u32>,
    /// Genre names (detail endpoint).
    pub genre_names: Vec<String>,
    pub seasons: Vec<Season>,
    pub season_count: usize,
    pub updated: Option<DateTime<Utc>>,
}

impl Show {
    /// Milliseconds since the epoch; a missing date sorts as epoch 0.
    pub fn updated_millis(&self) -> i64 {
        self.updated.map(|d| d.timestamp_millis()).unwrap_or(0)
    }

    pub fn total_episodes(&self) -> usize {
        self.seasons.iter().map(|s| s.episodes.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Season {
    /// 1-based season number.
    pub number: u32,
    pub title: String,
    pub description: String,
    pub image: String,
    pub episodes: Vec<Episode>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Episode {
    /// Upstream id, when the source has one. The public API does not.
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub audio_src: String,
    pub season: u32,
    pub number: u32,
}

/// Identity of an episode across the app: composite of show and episode,
/// so two shows can never collide.
pub fn favourite_id(show_id: &ShowId, episode: &Episode) -> String {
    match episode.id.as_deref().filter(|id| !id.is_empty()) {
        Some(id) => format!("{}:{}", show_id, id),
        None => format!("{}-S{}-E{}", show_id, episode.season, episode.number),
    }
}

/// An episode together with the show context needed to display it on its
/// own (favourites page, player bar).
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeSnapshot {
    pub show_id: ShowId,
    pub show_title: String,
    pub show_image: String,
    pub episode: Episode,
}

impl EpisodeSnapshot {
    pub fn id(&self) -> String {
        favourite_id(&self.show_id, &self.episode)
    }

    pub fn into_entry(self, added_at: DateTime<Utc>) -> FavouriteEntry {
        FavouriteEntry {
            id: self.id(),
            show_id: self.show_id,
            show_title: self.show_title,
            show_image: self.show_image,
            title: self.episode.title,
            description: self.episode.description,
            audio_src: self.episode.audio_src,
            season: self.episode.season,
            number: self.episode.number,
            added_at,
        }
    }

    pub fn track(&self) -> Track {
        Track {
            src: self.episode.audio_src.clone(),
            title: self.episode.title.clone(),
            show_title: self.show_title.clone(),
            show_id: self.show_id.clone(),
            episode_id: self.id(),
            season_index: self.episode.season.saturating_sub(1) as usize,
        }
    }
}

/// Denormalized snapshot of a favourited episode. Stays displayable even
/// when the show is no longer in the fetched catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavouriteEntry {
    pub id: String,
    pub show_id: ShowId,
    #[serde(default)]
    pub show_title: String,
    #[serde(default)]
    pub show_image: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub audio_src: String,
    #[serde(default = "default_one")]
    pub season: u32,
    #[serde(default = "default_one")]
    pub number: u32,
    pub added_at: DateTime<Utc>,
}

fn default_one() -> u32 {
    1
}

impl FavouriteEntry {
    pub fn track(&self) -> Track {
        Track {
            src: self.audio_src.clone(),
            title: self.title.clone(),
            show_title: self.show_title.clone(),
            show_id: self.show_id.clone(),
            episode_id: self.id.clone(),
            season_index: self.season.saturating_sub(1) as usize,
        }
    }
}

/// The one globally active playback item.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub src: String,
    pub title: String,
    pub show_title: String,
    pub show_id: ShowId,
    pub episode_id: String,
    /// 0-based index of the season the episode belongs to.
    pub season_index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn episode(id: Option<&str>, season: u32, number: u32) -> Episode {
        Episode {
            id: id.map(str::to_string),
            title: "Pilot".into(),
            description: String::new(),
            audio_src: "https://cdn.test/pilot.mp3".into(),
            season,
            number,
        }
    }

    #[test]
    fn favourite_id_falls_back_to_position() {
        let show = ShowId::from("42");
        assert_eq!(favourite_id(&show, &episode(None, 2, 7)), "42-S2-E7");
        assert_eq!(favourite_id(&show, &episode(Some(""), 1, 1)), "42-S1-E1");
    }

    #[test]
    fn favourite_id_is_composite_with_stable_id() {
        let a = favourite_id(&ShowId::from("1"), &episode(Some("ep-9"), 1, 1));
        let b = favourite_id(&ShowId::from("2"), &episode(Some("ep-9"), 1, 1));
        assert_eq!(a, "1:ep-9");
        assert_ne!(a, b);
    }

    #[test]
    fn missing_update_date_is_epoch() {
        let mut show = Show::default();
        assert_eq!(show.updated_millis(), 0);
        show.updated = Some(Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 1).unwrap());
        assert_eq!(show.updated_millis(), 1000);
    }

    #[test]
    fn snapshot_builds_entry_and_track() {
        let snap = EpisodeSnapshot {
            show_id: ShowId::from("42"),
            show_title: "Night Shift".into(),
            show_image: "https://cdn.test/42.jpg".into(),
            episode: episode(None, 3, 4),
        };
        let added = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let track = snap.track();
        let entry = snap.into_entry(added);
        assert_eq!(entry.id, "42-S3-E4");
        assert_eq!(entry.show_title, "Night Shift");
        assert_eq!(entry.added_at, added);
        assert_eq!(track.episode_id, entry.id);
        assert_eq!(track.season_index, 2);
    }

    #[test]
    fn favourite_entry_uses_camel_case_on_disk() {
        let entry = FavouriteEntry {
            id: "42-S1-E1".into(),
            show_id: ShowId::from("42"),
            show_title: "Night Shift".into(),
            show_image: String::new(),
            title: "Pilot".into(),
            description: String::new(),
            audio_src: "https://cdn.test/pilot.mp3".into(),
            season: 1,
            number: 1,
            added_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["showId"], "42");
        assert_eq!(json["audioSrc"], "https://cdn.test/pilot.mp3");
        assert!(json.get("addedAt").is_some());
    }

    #[test]
    fn bare_show_has_no_date_or_episodes() {
        let show = Show::default();
        assert_eq!(show.id, ShowId::default());
        assert_eq!(show.id.as_str(), "");
        assert_eq!(show.updated_millis(), 0);
        assert_eq!(show.total_episodes(), 0);
    }
}
