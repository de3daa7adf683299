//! Common error type definitions.

use strum::{AsRefStr, IntoStaticStr};
use thiserror::Error;

/// Type alias for boxed dynamic errors that can be sent across threads.
///
/// Data sources wrap their native failures in this type so that the
/// paginator can surface them without knowing the storage engine.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for Results with our custom Error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Categories of errors that can occur while paginating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// A field path could not be resolved on a record.
    Resolution,
    /// A token does not fit the configured ordering.
    InvalidToken,
    /// The paginator configuration is unusable.
    InvalidConfig,
    /// The underlying data source failed to execute a query.
    DataSource,
    /// Record (de)serialization failed.
    Serialization,
}

/// A structured error type for pagination operations.
#[derive(Debug, Error)]
#[must_use = "pagination errors should be handled appropriately"]
#[error("{}{}", kind.as_ref(), message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional error message.
    pub message: Option<String>,
    /// Optional source error.
    #[source]
    pub source: Option<BoxedError>,
}

impl Error {
    /// Creates a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            source: None,
        }
    }

    /// Adds a message to this error.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Adds a source error to this error.
    pub fn with_source(mut self, source: impl Into<BoxedError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Creates a new resolution error.
    pub fn resolution() -> Self {
        Self::new(ErrorKind::Resolution)
    }

    /// Creates a new invalid token error.
    pub fn invalid_token() -> Self {
        Self::new(ErrorKind::InvalidToken)
    }

    /// Creates a new invalid configuration error.
    pub fn invalid_config() -> Self {
        Self::new(ErrorKind::InvalidConfig)
    }

    /// Creates a new data source error.
    pub fn data_source() -> Self {
        Self::new(ErrorKind::DataSource)
    }

    /// Creates a new serialization error.
    pub fn serialization() -> Self {
        Self::new(ErrorKind::Serialization)
    }

    /// Returns the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error kind as a string.
    pub fn kind_str(&self) -> &'static str {
        self.kind.into()
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::serialization()
            .with_message("failed to decode records")
            .with_source(value)
    }
}
