//! tdarr-bridge - Dashboard adapter for the Tdarr transcoding service
//!
//! Resolves a Tdarr app from a dashboard configuration set, queries the
//! Tdarr v2 API and reshapes statistics, workers and queue pages for the UI.

pub mod config;
pub mod error;
pub mod integration;
pub mod server;
pub mod tdarr;

pub use error::{Error, Result};
pub use integration::{AppRef, QueueQuery, TdarrIntegration};
