//! The API's fixed genre table. The list endpoint only sends ids.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub const GENRES: &[(u32, &str)] = &[
    (1, "Personal Growth"),
    (2, "Investigative Journalism"),
    (3, "History"),
    (4, "Comedy"),
    (5, "Entertainment"),
    (6, "Business"),
    (7, "Fiction"),
    (8, "News"),
    (9, "Kids and Family"),
];

pub fn genre_title(id: u32) -> Option<&'static str> {
    GENRES.iter().find(|(gid, _)| *gid == id).map(|(_, t)| *t)
}

pub fn genre_id_by_title(title: &str) -> Option<u32> {
    GENRES
        .iter()
        .find(|(_, t)| t.eq_ignore_ascii_case(title.trim()))
        .map(|(id, _)| *id)
}

/// Catalog genre filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenreFilter {
    #[default]
    All,
    Id(u32),
}

impl GenreFilter {
    /// Step through `All → 1 → … → 9 → All`.
    pub fn next(self) -> Self {
        match self {
            Self::All => Self::Id(GENRES[0].0),
            Self::Id(id) => match GENRES.iter().position(|(gid, _)| *gid == id) {
                Some(i) if i + 1 < GENRES.len() => Self::Id(GENRES[i + 1].0),
                _ => Self::All,
            },
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::All => Self::Id(GENRES[GENRES.len() - 1].0),
            Self::Id(id) => match GENRES.iter().position(|(gid, _)| *gid == id) {
                Some(0) | None => Self::All,
                Some(i) => Self::Id(GENRES[i - 1].0),
            },
        }
    }

    pub fn label(self) -> String {
        match self {
            Self::All => "all genres".to_string(),
            Self::Id(id) => genre_title(id)
                .map(str::to_string)
                .unwrap_or_else(|| format!("genre {}", id)),
        }
    }

    pub fn matches(self, genres: &[u32]) -> bool {
        match self {
            Self::All => true,
            Self::Id(id) => genres.contains(&id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid genre filter {0:?}")]
pub struct ParseGenreError(pub String);

impl FromStr for GenreFilter {
    type Err = ParseGenreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse::<u32>()
            .map(Self::Id)
            .map_err(|_| ParseGenreError(s.to_string()))
    }
}

impl fmt::Display for GenreFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Id(id) => write!(f, "{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_and_ids() {
        assert_eq!("all".parse::<GenreFilter>(), Ok(GenreFilter::All));
        assert_eq!("".parse::<GenreFilter>(), Ok(GenreFilter::All));
        assert_eq!(" 2 ".parse::<GenreFilter>(), Ok(GenreFilter::Id(2)));
        assert!("comedy".parse::<GenreFilter>().is_err());
    }

    #[test]
    fn cycles_through_every_genre() {
        let mut f = GenreFilter::All;
        for _ in 0..GENRES.len() {
            f = f.next();
            assert!(matches!(f, GenreFilter::Id(_)));
        }
        assert_eq!(f.next(), GenreFilter::All);
        assert_eq!(GenreFilter::All.prev(), GenreFilter::Id(9));
        assert_eq!(GenreFilter::Id(1).prev(), GenreFilter::All);
    }

    #[test]
    fn titles_round_trip() {
        assert_eq!(genre_title(4), Some("Comedy"));
        assert_eq!(genre_id_by_title("kids and family"), Some(9));
        assert_eq!(genre_title(42), None);
        assert_eq!(GenreFilter::Id(42).label(), "genre 42");
    }

    #[test]
    fn bad_filter_reports_input() {
        let err = "comedy".parse::<GenreFilter>().unwrap_err();
        assert_eq!(err, ParseGenreError("comedy".into()));
        assert_eq!(err.to_string(), "invalid genre filter \"comedy\"");
    }
}
