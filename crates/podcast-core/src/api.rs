//! Remote catalog client.
//!
//! Two read-only endpoints: `GET {base}/` for show previews and
//! `GET {base}/id/{id}` for one show with seasons and episodes. Each call is
//! a single attempt; callers own loading and error display.
//!
//! The wire format is loose (ids as strings or numbers, `seasons` as a count
//! or a list, genres as ids or names, several names for the audio URL).
//! Everything is normalized here into [`crate::model`] types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::ApiConfig;
use crate::error::{CatalogError, Result};
use crate::genres::{genre_id_by_title, genre_title};
use crate::model::{Episode, Season, Show, ShowId};

#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| CatalogError::Fetch {
                url: base_url.clone(),
                status: None,
                message: e.to_string(),
            })?;
        Ok(Self { http, base_url })
    }

    /// Client with default settings against `base_url`.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        Self::new(&ApiConfig {
            base_url: base_url.into(),
            ..ApiConfig::default()
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Every show preview, in API order.
    pub async fn fetch_show_list(&self) -> Result<Vec<Show>> {
        let url = format!("{}/", self.base_url);
        let wire: Vec<WireShow> = self.get_json(&url).await?;
        let shows: Vec<Show> = wire.into_iter().map(WireShow::into_show).collect();
        info!("api: fetched {} shows", shows.len());
        Ok(shows)
    }

    /// One show with its seasons. HTTP 404 becomes [`CatalogError::NotFound`].
    pub async fn fetch_show_detail(&self, id: &ShowId) -> Result<Show> {
        let url = format!("{}/id/{}", self.base_url, id);
        match self.get_json::<WireShow>(&url).await {
            Ok(wire) => {
                let show = wire.into_show();
                info!(
                    "api: fetched show {} ({} seasons, {} episodes)",
                    show.id,
                    show.seasons.len(),
                    show.total_episodes()
                );
                Ok(show)
            }
            Err(CatalogError::Fetch {
                status: Some(404), ..
            }) => Err(CatalogError::NotFound(id.clone())),
            Err(e) => Err(e),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("api: GET {}", url);
        let response = self
            .http
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                warn!("api: request to {} failed: {}", url, e);
                CatalogError::Fetch {
                    url: url.to_string(),
                    status: None,
                    message: e.to_string(),
                }
            })?;

        let status = response.status();
        debug!("api: {} -> {}", url, status);
        if !status.is_success() {
            warn!("api: {} returned {}", url, status);
            return Err(CatalogError::Fetch {
                url: url.to_string(),
                status: Some(status.as_u16()),
                message: status.to_string(),
            });
        }

        let body = response.bytes().await.map_err(|e| CatalogError::Fetch {
            url: url.to_string(),
            status: Some(status.as_u16()),
            message: e.to_string(),
        })?;
        serde_json::from_slice(&body).map_err(|source| CatalogError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

/// Decode a show-list body without the network.
pub fn parse_show_list(body: &str) -> serde_json::Result<Vec<Show>> {
    let wire: Vec<WireShow> = serde_json::from_str(body)?;
    Ok(wire.into_iter().map(WireShow::into_show).collect())
}

/// Decode a show-detail body without the network.
pub fn parse_show_detail(body: &str) -> serde_json::Result<Show> {
    serde_json::from_str::<WireShow>(body).map(WireShow::into_show)
}

/// Accepts RFC 3339 or a bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_updated(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

// ── Wire shapes ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Loose {
    Int(u64),
    Float(f64),
    Text(String),
}

impl Loose {
    fn into_text(self) -> String {
        match self {
            Self::Int(n) => n.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Text(s) => s,
        }
    }

    fn as_u32(&self) -> Option<u32> {
        match self {
            Self::Int(n) => u32::try_from(*n).ok(),
            Self::Float(f) if *f >= 0.0 && f.fract() == 0.0 => u32::try_from(*f as u64).ok(),
            Self::Float(_) => None,
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireSeasons {
    Count(u64),
    List(Vec<WireSeason>),
}

#[derive(Debug, Deserialize)]
struct WireShow {
    id: Option<Loose>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    /// Genre ids (as number or string) or genre names.
    genres: Vec<Loose>,
    #[serde(default)]
    seasons: Option<WireSeasons>,
    #[serde(default)]
    updated: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireSeason {
    #[serde(default)]
    season: Option<Loose>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    episodes: Vec<WireEpisode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireEpisode {
    #[serde(default)]
    id: Option<Loose>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    episode: Option<Loose>,
    #[serde(default)]
    number: Option<Loose>,
    #[serde(default)]
    file: Option<String>,
    #[serde(default)]
    audio: Option<String>,
    #[serde(default)]
    audio_url: Option<String>,
    #[serde(default)]
    src: Option<String>,
}

impl WireShow {
    fn into_show(self) -> Show {
        let mut genres = Vec::new();
        let mut genre_names = Vec::new();
        for g in self.genres {
            match g.as_u32() {
                Some(id) => {
                    genres.push(id);
                    if let Some(name) = genre_title(id) {
                        genre_names.push(name.to_string());
                    }
                }
                None => {
                    let name = g.into_text();
                    if let Some(id) = genre_id_by_title(&name) {
                        genres.push(id);
                    }
                    genre_names.push(name);
                }
            }
        }

        let (seasons, season_count) = match self.seasons {
            Some(WireSeasons::Count(n)) => (Vec::new(), n as usize),
            Some(WireSeasons::List(list)) => {
                let seasons: Vec<Season> = list
                    .into_iter()
                    .enumerate()
                    .map(|(i, s)| s.into_season(i as u32 + 1))
                    .collect();
                let count = seasons.len();
                (seasons, count)
            }
            None => (Vec::new(), 0),
        };

        Show {
            id: ShowId(self.id.map(Loose::into_text).unwrap_or_default()),
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            image: self.image.unwrap_or_default(),
            genres,
            genre_names,
            seasons,
            season_count,
            updated: self.updated.as_deref().and_then(parse_updated),
        }
    }
}

impl WireSeason {
    fn into_season(self, position: u32) -> Season {
        let number = self
            .season
            .as_ref()
            .and_then(Loose::as_u32)
            .filter(|n| *n > 0)
            .unwrap_or(position);
        let episodes = self
            .episodes
            .into_iter()
            .enumerate()
            .map(|(i, e)| e.into_episode(number, i as u32 + 1))
            .collect();
        Season {
            number,
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            image: self.image.unwrap_or_default(),
            episodes,
        }
    }
}

impl WireEpisode {
    fn into_episode(self, season: u32, position: u32) -> Episode {
        let number = self
            .episode
            .as_ref()
            .or(self.number.as_ref())
            .and_then(Loose::as_u32)
            .filter(|n| *n > 0)
            .unwrap_or(position);
        let audio_src = [self.file, self.audio, self.audio_url, self.src]
            .into_iter()
            .flatten()
            .map(|s| s.trim().to_string())
            .find(|s| !s.is_empty())
            .unwrap_or_default();
        Episode {
            id: self.id.map(Loose::into_text).filter(|s| !s.is_empty()),
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            audio_src,
            season,
            number,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_shape() {
        let shows = parse_show_list(
            r#"[{"id":"10716","title":"Something Was Wrong","description":"d",
                 "seasons":14,"image":"https://img.test/1.jpg","genres":[2,1],
                 "updated":"2022-11-03T07:00:00.000Z"},
                {"id":5675,"title":"This Is Actually Happening","seasons":12,
                 "genres":[],"updated":"2022-10-24"}]"#,
        )
        .unwrap();
        assert_eq!(shows.len(), 2);
        let a = &shows[0];
        assert_eq!(a.id, ShowId::from("10716"));
        assert_eq!(a.season_count, 14);
        assert!(a.seasons.is_empty());
        assert_eq!(a.genres, vec![2, 1]);
        assert_eq!(a.genre_names, vec!["Investigative Journalism", "Personal Growth"]);
        assert!(a.updated.is_some());

        let b = &shows[1];
        assert_eq!(b.id, ShowId::from("5675"));
        assert_eq!(b.description, "");
        assert_eq!(b.updated, parse_updated("2022-10-24T00:00:00Z"));
    }

    #[test]
    fn string_genre_ids_are_kept() {
        let shows = parse_show_list(
            r#"[{"id":1,"title":"A","genres":["2"," 1 ","Investigative Journalism"]}]"#,
        )
        .unwrap();
        assert_eq!(shows[0].genres, vec![2, 1, 2]);
        assert_eq!(shows[0].genre_names[0], "Investigative Journalism");
    }

    #[test]
    fn detail_shape() {
        let show = parse_show_detail(
            r#"{"id":"10716","title":"Something Was Wrong",
                "genres":["Investigative Journalism","Unlisted"],
                "updated":"not a date",
                "seasons":[
                  {"season":1,"title":"Season 1","episodes":[
                    {"title":"Ep 1","episode":1,"file":"https://cdn.test/1.mp3"},
                    {"title":"Ep 2","audioUrl":"https://cdn.test/2.mp3"}
                  ]},
                  {"title":"Season 2","episodes":[
                    {"id":99,"title":"Ep 1","number":"3","file":"","src":"https://cdn.test/3.mp3"}
                  ]}
                ]}"#,
        )
        .unwrap();
        assert_eq!(show.genres, vec![2]);
        assert_eq!(show.genre_names.len(), 2);
        assert_eq!(show.updated, None);
        assert_eq!(show.season_count, 2);
        assert_eq!(show.total_episodes(), 3);

        let s1 = &show.seasons[0];
        assert_eq!(s1.episodes[0].audio_src, "https://cdn.test/1.mp3");
        assert_eq!(s1.episodes[1].number, 2);
        assert_eq!(s1.episodes[1].audio_src, "https://cdn.test/2.mp3");
        assert_eq!(s1.episodes[1].id, None);

        let s2 = &show.seasons[1];
        assert_eq!(s2.number, 2);
        let ep = &s2.episodes[0];
        assert_eq!(ep.id.as_deref(), Some("99"));
        assert_eq!(ep.season, 2);
        assert_eq!(ep.number, 3);
        assert_eq!(ep.audio_src, "https://cdn.test/3.mp3");
    }

    #[test]
    fn updated_formats() {
        assert!(parse_updated("2024-01-01T10:00:00+02:00").is_some());
        assert_eq!(
            parse_updated("2024-01-01").map(|d| d.timestamp()),
            Some(1_704_067_200)
        );
        assert_eq!(parse_updated(""), None);
        assert_eq!(parse_updated("yesterday"), None);
    }
}
