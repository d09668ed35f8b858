use thiserror::Error;

use crate::selectors::Field;

/// Errors produced while fetching or extracting pages.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Server answered with a non-2xx status
    #[error("HTTP status {status} for {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("error connecting to {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("timeout fetching {url}")]
    Timeout { url: String },

    /// Any other request failure (builder, redirect, body read)
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// A locator or pattern in the selector table does not compile
    #[error("invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },

    #[error("movie list container not found on list page")]
    MissingListContainer,

    #[error("required field `{field}` not found")]
    MissingField { field: Field },
}

/// Coarse category of a failure, used to aggregate per-page outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FailureKind {
    /// The page could not be retrieved.
    Network,
    /// The page was retrieved but its markup did not have what we need.
    Parse,
    /// Broken configuration; affects every page.
    Setup,
}

impl ScrapeError {
    /// Classify a reqwest error the same way for every fetch.
    pub fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        let url = url.to_string();
        if let Some(status) = err.status() {
            ScrapeError::Status { url, status }
        } else if err.is_timeout() {
            ScrapeError::Timeout { url }
        } else if err.is_connect() {
            ScrapeError::Connect { url, source: err }
        } else {
            ScrapeError::Request { url, source: err }
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            ScrapeError::Status { .. }
            | ScrapeError::Connect { .. }
            | ScrapeError::Timeout { .. }
            | ScrapeError::Request { .. } => FailureKind::Network,
            ScrapeError::InvalidUrl { .. }
            | ScrapeError::MissingListContainer
            | ScrapeError::MissingField { .. } => FailureKind::Parse,
            ScrapeError::Client(_) | ScrapeError::Selector { .. } => FailureKind::Setup,
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FailureKind::Network => "network",
            FailureKind::Parse => "parse",
            FailureKind::Setup => "setup",
        };
        f.write_str(name)
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_names_url() {
        let err = ScrapeError::Status {
            url: "https://www.imdb.com/title/tt0068646/".to_string(),
            status: reqwest::StatusCode::NOT_FOUND,
        };
        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("https://www.imdb.com/title/tt0068646/"));
        assert_eq!(err.kind(), FailureKind::Network);
    }

    #[test]
    fn missing_field_is_parse_failure() {
        let err = ScrapeError::MissingField { field: Field::Title };
        assert_eq!(err.kind(), FailureKind::Parse);
        assert_eq!(err.to_string(), "required field `Movie` not found");
    }
}
