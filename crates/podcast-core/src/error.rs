use thiserror::Error;

use crate::model::ShowId;

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Failures surfaced to whoever started a catalog fetch.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Network failure or a non-2xx response. `status` is `None` when the
    /// request never produced a response.
    #[error("failed to fetch {url}: {message}")]
    Fetch {
        url: String,
        status: Option<u16>,
        message: String,
    },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no details available for show {0}")]
    NotFound(ShowId),
}

impl CatalogError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// One-line text for an error banner.
    pub fn user_message(&self) -> String {
        match self {
            Self::Fetch {
                status: Some(code), ..
            } => format!("server responded with status {}", code),
            Self::Fetch { message, .. } => format!("network error: {}", message),
            Self::Decode { .. } => "unexpected response from server".to_string(),
            Self::NotFound(_) => "no details available".to_string(),
        }
    }
}

/// Durable storage failures. Never shown to the user; callers log and
/// carry on with in-memory state.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize {key}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("stored value for {key} is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_message_prefers_status() {
        let err = CatalogError::Fetch {
            url: "https://example.test/".into(),
            status: Some(503),
            message: "Service Unavailable".into(),
        };
        assert_eq!(err.user_message(), "server responded with status 503");
        assert!(!err.is_not_found());
    }

    #[test]
    fn not_found_is_flagged() {
        let err = CatalogError::NotFound(ShowId::from("10716"));
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "no details available for show 10716");
    }
}
