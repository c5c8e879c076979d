//! Tdarr v2 API: client, response validation and remapping.

mod client;
pub mod queue;
pub mod schema;
mod types;

pub use client::TdarrClient;
pub use queue::{fetch_queue_page, QueuePageRequest, StatusTable, StatusTableSource};
pub use types::*;
