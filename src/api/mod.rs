// src/api/mod.rs
//! Coda API interaction.
//!
//! [`Fetcher`] is the only I/O boundary: operations describe requests as
//! data, a fetcher sends them. Parsing, pagination and polling are layered
//! on top without touching HTTP details.

pub mod client;
pub mod endpoint;
pub mod pagination;
pub mod parser;
pub mod polling;
pub mod request;

use crate::error::AppError;
use request::{FetchRequest, FetchResponse};
use serde::de::DeserializeOwned;

/// The ability to send one HTTP request and read its response.
///
/// Implementations must not retry or cache on their own; non-success
/// statuses are returned as responses, not errors.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, AppError>;
}

/// Sends a request and parses a JSON success body.
pub async fn fetch_json<T>(fetcher: &dyn Fetcher, request: FetchRequest) -> Result<T, AppError>
where
    T: DeserializeOwned,
{
    let response = fetcher.fetch(request).await?;
    parser::parse_api_response(&response)
}

/// Sends a request and returns the success body as text.
pub async fn fetch_text(fetcher: &dyn Fetcher, request: FetchRequest) -> Result<String, AppError> {
    let response = fetcher.fetch(request).await?.error_for_status()?;
    Ok(response.body)
}

pub use client::CodaHttpClient;
pub use endpoint::{ApiRoutes, DocEndpoint, EndpointResolver};
pub use pagination::{collect_all, ItemPage, PaginationResult};
pub use polling::{poll_until_ready, JobState, PollPolicy};
pub use request::{CachePolicy, HttpMethod};
