// src/api/pagination.rs
//! Follow-the-link pagination over list endpoints.

use super::request::FetchRequest;
use super::{fetch_json, Fetcher};
use crate::error::AppError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashSet;
use url::Url;

/// One page of a list endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPage<T> {
    pub items: Vec<T>,
    /// Absent on the last page
    #[serde(default)]
    pub next_page_link: Option<String>,
}

/// Result of a pagination operation.
#[derive(Debug, Clone)]
pub struct PaginationResult<T> {
    pub items: Vec<T>,
    pub pages_fetched: u32,
}

/// Fetches every page starting at `initial_url`, in server order.
///
/// Each request bypasses caches so freshly created pages show up. The
/// caller bounds the work with a `limit` query parameter; a server that
/// hands back a link it already served is reported as
/// [`AppError::PaginationLoop`] instead of being followed forever.
pub async fn collect_all<T>(
    fetcher: &dyn Fetcher,
    initial_url: Url,
) -> Result<PaginationResult<T>, AppError>
where
    T: DeserializeOwned + Send,
{
    let mut all_items = Vec::new();
    let mut consumed: HashSet<String> = HashSet::new();
    let mut next = Some(initial_url);
    let mut pages_fetched = 0u32;

    while let Some(url) = next.take() {
        if !consumed.insert(url.as_str().to_string()) {
            log::warn!("Next page link {} was already fetched; stopping", url);
            return Err(AppError::PaginationLoop(url.to_string()));
        }

        let page: ItemPage<T> = fetch_json(fetcher, FetchRequest::get(url).bypass_cache()).await?;
        pages_fetched += 1;
        all_items.extend(page.items);

        next = page
            .next_page_link
            .as_deref()
            .map(Url::parse)
            .transpose()?;
    }

    log::debug!(
        "Collected {} items across {} page(s)",
        all_items.len(),
        pages_fetched
    );

    Ok(PaginationResult {
        items: all_items,
        pages_fetched,
    })
}
