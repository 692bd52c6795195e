//! Error types for lazyview hosts and settings.
//!
//! Geometry is assumed well-formed; the only failures are a host that cannot
//! answer a query (typically a handle detached from its document) and
//! string-keyed settings that do not parse.

use thiserror::Error;

/// Result alias for operations that query or mutate the host.
pub type HostResult<T> = std::result::Result<T, HostError>;

/// Failure reported by a [`GeometryHost`](crate::GeometryHost) or a
/// [`ContentSwap`](crate::ContentSwap) actuator.
///
/// These are caller contract violations (malformed or detached handles) and
/// are propagated unchanged out of every evaluator predicate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HostError {
    /// The handle no longer refers to a live element.
    #[error("element is detached: {0}")]
    Detached(String),

    /// A geometry query failed inside the host.
    #[error("geometry query failed: {0}")]
    Query(String),

    /// Writing to the element (attributes, styles) failed.
    #[error("content swap failed: {0}")]
    Mutation(String),
}

/// Failure while applying a string-keyed option to
/// [`LazyLoadSettings`](crate::LazyLoadSettings).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("unknown option `{0}`")]
    UnknownKey(String),

    #[error("option `{key}` cannot be set from text")]
    NotTextual { key: String },

    #[error("option `{key}` expects a number, got `{value}`")]
    InvalidNumber { key: String, value: String },

    #[error("option `{key}` must not be negative, got `{value}`")]
    Negative { key: String, value: String },

    #[error("option `{key}` expects true or false, got `{value}`")]
    InvalidFlag { key: String, value: String },

    #[error("unknown effect `{0}`")]
    InvalidEffect(String),
}
