use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::storage::{read_json, write_json, Storage, THEME_KEY};

/// Colour scheme preference. Read once at startup, written on toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    /// Stored preference; unknown, missing or unreadable values give `Dark`.
    pub fn load(storage: &dyn Storage) -> Self {
        match read_json::<String>(storage, THEME_KEY) {
            Ok(Some(name)) => name.parse().unwrap_or_default(),
            Ok(None) => Self::default(),
            Err(e) => {
                warn!("theme: ignoring stored value: {}", e);
                Self::default()
            }
        }
    }

    pub fn save(self, storage: &dyn Storage) {
        if let Err(e) = write_json(storage, THEME_KEY, self.as_str()) {
            warn!("theme: failed to persist: {}", e);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme {0:?}")]
pub struct ParseThemeError(pub String);

impl FromStr for Theme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            _ => Err(ParseThemeError(s.trim().to_string())),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn defaults_to_dark() {
        let storage = MemoryStorage::new();
        assert_eq!(Theme::load(&storage), Theme::Dark);

        storage.write(THEME_KEY, "\"sepia\"").unwrap();
        assert_eq!(Theme::load(&storage), Theme::Dark);

        storage.write(THEME_KEY, "not json").unwrap();
        assert_eq!(Theme::load(&storage), Theme::Dark);
    }

    #[test]
    fn toggle_persists() {
        let storage = MemoryStorage::new();
        let theme = Theme::load(&storage).toggled();
        theme.save(&storage);
        assert_eq!(storage.read(THEME_KEY).unwrap().as_deref(), Some("\"light\""));
        assert_eq!(Theme::load(&storage), Theme::Light);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(" Light ".parse::<Theme>(), Ok(Theme::Light));
        assert_eq!(
            "sepia".parse::<Theme>(),
            Err(ParseThemeError("sepia".into()))
        );
    }
}
