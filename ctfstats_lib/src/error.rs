//! Error types for the library layer.

use std::fmt;

use crate::scrape::ScrapeError;

/// Errors produced by the library layer, wrapping fetch errors and adding
/// scrape, serialization, I/O, and input validation failures.
#[derive(Debug)]
pub enum CtfStatsError {
    /// An error from the underlying page fetcher.
    Api(ctftime_api::Error),
    /// The page layout could not be applied (e.g. a malformed selector).
    Scrape(ScrapeError),
    /// JSON serialization failed.
    Serialization(serde_json::Error),
    /// Reading or writing a local file failed.
    Io(std::io::Error),
    /// User-provided input failed validation.
    InvalidInput(String),
}

impl fmt::Display for CtfStatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "Fetch error: {}", e),
            Self::Scrape(e) => write!(f, "Scrape error: {}", e),
            Self::Serialization(e) => write!(f, "Serialization error: {}", e),
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for CtfStatsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Scrape(e) => Some(e),
            Self::Serialization(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::InvalidInput(_) => None,
        }
    }
}

impl From<ctftime_api::Error> for CtfStatsError {
    fn from(e: ctftime_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<ScrapeError> for CtfStatsError {
    fn from(e: ScrapeError) -> Self {
        Self::Scrape(e)
    }
}

impl From<serde_json::Error> for CtfStatsError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e)
    }
}

impl From<std::io::Error> for CtfStatsError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
