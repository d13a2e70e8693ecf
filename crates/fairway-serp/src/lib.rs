//! Client for the SerpAPI Google Shopping endpoint.
//!
//! [`SerpClient`] wraps `reqwest` with typed errors, retry with exponential
//! back-off, and a concurrent multi-page [`SerpClient::fetch_all`] used by
//! the ingestion pipeline.

mod client;
mod error;
mod retry;
mod types;

pub use client::{SearchSettings, SerpClient};
pub use error::SerpError;
pub use types::{SearchResponse, ShoppingResult};
