//! Unified error types for test-review.
//!
//! Structural errors (bad arguments such as an unknown status or filter id)
//! are returned synchronously as [`ReviewError`]. Incomplete test maps are not
//! errors: they produce [`MapWarning`](crate::model::MapWarning)s instead.

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by the review components, loaders and replay.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReviewError {
    /// A caller passed a value outside a closed set
    #[error("Validation failed: {context}")]
    Validation {
        context: String,
        #[source]
        source: ValidationErrorKind,
    },

    /// Input documents (test maps, event scripts) could not be decoded
    #[error("Failed to parse input: {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseErrorKind,
    },

    /// Reading a map, script or report target failed
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// The effective configuration is unusable
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Which closed set a rejected value fell outside of.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationErrorKind {
    #[error("Unknown item status '{0}'")]
    UnknownStatus(String),

    #[error("Unknown filter '{0}'")]
    UnknownFilter(String),

    #[error("Filter '{0}' is not configured for this panel")]
    FilterNotConfigured(String),

    #[error("Unknown review layout '{0}'")]
    UnknownLayout(String),

    #[error("Unknown answer tab '{0}'")]
    UnknownTab(String),
}

/// What was wrong with an input document.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Invalid host event on line {line}: {message}")]
    InvalidEvent { line: usize, message: String },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ReviewError>;

impl ReviewError {
    pub fn validation(context: impl Into<String>, source: ValidationErrorKind) -> Self {
        Self::Validation {
            context: context.into(),
            source,
        }
    }

    /// A status string that is not one of the known status kinds.
    pub fn unknown_status(status: impl Into<String>) -> Self {
        Self::validation("setting item status", ValidationErrorKind::UnknownStatus(status.into()))
    }

    /// A filter id that is not one of the review filters.
    pub fn unknown_filter(filter: impl Into<String>) -> Self {
        Self::validation("selecting filter", ValidationErrorKind::UnknownFilter(filter.into()))
    }

    pub fn parse(context: impl Into<String>, source: ParseErrorKind) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Wrap an IO failure on `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: Some(path.into()),
            message: source.to_string(),
            source,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// The validation kind, if this is a validation error.
    #[must_use]
    pub fn validation_kind(&self) -> Option<&ValidationErrorKind> {
        match self {
            Self::Validation { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ReviewError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for ReviewError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(
            "JSON deserialization",
            ParseErrorKind::InvalidJson(err.to_string()),
        )
    }
}

/// Attach a description of the failing step to an error.
///
/// Context strings chain from the outside in, so an error raised while
/// loading a map and re-wrapped by the CLI reads `"outer: inner"`.
///
/// ```ignore
/// use test_review::error::ErrorContext;
///
/// let content = std::fs::read_to_string(path)
///     .with_context(|| format!("reading test map {}", path.display()))?;
/// ```
pub trait ErrorContext<T> {
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Like [`context`](Self::context), building the string only on failure.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<ReviewError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let context = context.into();
        self.map_err(|err| prepend_context(err.into(), &context))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|err| {
            let context: String = f().into();
            prepend_context(err.into(), &context)
        })
    }
}

fn prepend_context(err: ReviewError, outer: &str) -> ReviewError {
    match err {
        ReviewError::Validation {
            context: existing,
            source,
        } => ReviewError::Validation {
            context: chain_context(outer, &existing),
            source,
        },
        ReviewError::Parse {
            context: existing,
            source,
        } => ReviewError::Parse {
            context: chain_context(outer, &existing),
            source,
        },
        ReviewError::Io {
            path,
            message,
            source,
        } => ReviewError::Io {
            path,
            message: chain_context(outer, &message),
            source,
        },
        ReviewError::Config(msg) => ReviewError::Config(chain_context(outer, &msg)),
    }
}

fn chain_context(outer: &str, inner: &str) -> String {
    if inner.is_empty() {
        outer.to_string()
    } else {
        format!("{outer}: {inner}")
    }
}

/// Turn a missing value into a [`ReviewError::Config`].
pub trait OptionContext<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| ReviewError::Config(context.into()))
    }
}
