//! Error types for WikiHarvest.
//!
//! Library crates use [`WikiHarvestError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all WikiHarvest operations.
#[derive(Debug, thiserror::Error)]
pub enum WikiHarvestError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Network/HTTP error while talking to the wiki API.
    #[error("network error: {0}")]
    Network(String),

    /// The API answered, but with an error object or an envelope we
    /// could not decode.
    #[error("api error: {0}")]
    Api(String),

    /// The requested page does not exist (or has no revisions).
    #[error("page not found: {title}")]
    PageMissing { title: String },

    /// The document contains no infobox template.
    #[error("no infobox template found in document")]
    MissingInfobox,

    /// The infobox has neither a `birth_name` nor a `name` field.
    #[error("infobox has no usable name field")]
    MissingName,

    /// A date field's value contains no nested template to read from.
    #[error("no date template found in field value")]
    MissingDateTemplate,

    /// A date template's positional fields did not form a valid date.
    #[error("invalid date field: {0}")]
    InvalidDateField(String),

    /// A roster template is missing a required field.
    #[error("roster entry missing field: {0}")]
    MissingRosterField(&'static str),

    /// A roster age field did not yield the expected six numeric tokens.
    #[error("malformed age field: expected 6 numeric tokens, found {found}")]
    MalformedAgeField { found: usize },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, WikiHarvestError>;

impl WikiHarvestError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a network error from any displayable message.
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create an API error from any displayable message.
    pub fn api(msg: impl Into<String>) -> Self {
        Self::Api(msg.into())
    }

    /// Create a page-missing error for the given page title.
    pub fn page_missing(title: impl Into<String>) -> Self {
        Self::PageMissing {
            title: title.into(),
        }
    }

    /// Create an invalid-date error from any displayable message.
    pub fn invalid_date(msg: impl Into<String>) -> Self {
        Self::InvalidDateField(msg.into())
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
