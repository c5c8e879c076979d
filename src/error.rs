//! Unified error type for the Tdarr adapter.
//!
//! Every operation funnels its failures into [`Error`], which carries enough
//! context for the HTTP surface to derive a status code via
//! [`Error::http_status`].

use std::fmt;

use crate::config::IntegrationKind;

/// Error type covering all failure modes of the adapter.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested entity could not be found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity (e.g. "app", "config set").
        entity: String,
        /// The identifier that was looked up.
        id: String,
    },

    /// The app exists but is configured for a different integration.
    #[error("app {app_id} is not a tdarr integration (configured as {kind})")]
    WrongIntegration {
        app_id: String,
        /// Configured kind, or `none` when the app has no integration.
        kind: String,
    },

    /// An upstream response did not match the expected shape.
    #[error("unexpected response from {endpoint}: {source}")]
    SchemaViolation {
        endpoint: &'static str,
        source: serde_json::Error,
    },

    /// The upstream request failed at the network or HTTP level.
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        source: reqwest::Error,
    },

    /// Caller input failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl Error {
    /// Map this error to an appropriate HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::NotFound { .. } => 404,
            Error::WrongIntegration { .. } => 400,
            Error::Validation(_) => 400,
            Error::SchemaViolation { .. } => 502,
            Error::Transport { .. } => 502,
            Error::Config(_) => 500,
            Error::Io { .. } => 500,
        }
    }

    /// Short machine-readable name of the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Error::NotFound { .. } => "not_found",
            Error::WrongIntegration { .. } => "wrong_integration",
            Error::Validation(_) => "validation_error",
            Error::SchemaViolation { .. } => "schema_violation",
            Error::Transport { .. } => "transport_error",
            Error::Config(_) => "config_error",
            Error::Io { .. } => "io_error",
        }
    }

    /// Convenience constructor for [`Error::NotFound`].
    pub fn not_found(entity: impl Into<String>, id: impl fmt::Display) -> Self {
        Error::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Convenience constructor for [`Error::WrongIntegration`].
    pub fn wrong_integration(app_id: impl Into<String>, kind: Option<&IntegrationKind>) -> Self {
        Error::WrongIntegration {
            app_id: app_id.into(),
            kind: kind.map_or_else(|| "none".to_string(), |k| k.to_string()),
        }
    }

    /// Whether the failure was caused by the caller rather than upstream.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.http_status())
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
