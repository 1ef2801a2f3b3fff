// src/operations/pages.rs
//! Single-request page operations.

use super::PackContext;
use crate::api::request::FetchRequest;
use crate::api::{fetch_json, ItemPage};
use crate::constants::LIST_PAGES_DEFAULT_LIMIT;
use crate::error::AppError;
use crate::model::{MutationReceipt, NewPage, Page, PageSummary, PageUpdate};
use crate::types::{PageId, PageIdOrName};

/// Lists one page of results as `(id, name)` pairs in server order.
///
/// `None` and `Some(0)` both mean the default limit. No further pages are
/// followed.
pub async fn list_pages(ctx: &PackContext, limit: Option<u32>) -> Result<Vec<PageSummary>, AppError> {
    let endpoint = ctx.doc_endpoint()?;
    let limit = limit.filter(|l| *l > 0).unwrap_or(LIST_PAGES_DEFAULT_LIMIT);

    let request = FetchRequest::get(endpoint.pages_with_limit(limit)).bypass_cache();
    let page: ItemPage<Page> = fetch_json(ctx.fetcher(), request).await?;

    log::debug!("Listed {} page(s) in doc {}", page.items.len(), endpoint.doc_id());
    Ok(page.items.iter().map(Page::summary).collect())
}

/// Reads a page's metadata.
pub async fn get_page(ctx: &PackContext, page: &PageIdOrName) -> Result<Page, AppError> {
    let endpoint = ctx.doc_endpoint()?;
    let request = FetchRequest::get(endpoint.page(page)).bypass_cache();
    fetch_json(ctx.fetcher(), request).await
}

/// Creates a page and returns its ID.
///
/// The payload is sent as-is; the API validates parents and icons.
pub async fn add_page(ctx: &PackContext, page: &NewPage) -> Result<PageId, AppError> {
    let endpoint = ctx.doc_endpoint()?;
    let request = FetchRequest::post_json(endpoint.pages(), page)?;
    let receipt: MutationReceipt = fetch_json(ctx.fetcher(), request).await?;

    log::info!("Created page {} in doc {}", receipt.id, endpoint.doc_id());
    Ok(receipt.id)
}

/// Updates name, subtitle, icon or cover image of a page.
///
/// When several pages share the given name, the API picks the target.
pub async fn rename_page(
    ctx: &PackContext,
    page: &PageIdOrName,
    update: &PageUpdate,
) -> Result<PageId, AppError> {
    let endpoint = ctx.doc_endpoint()?;
    if update.is_empty() {
        log::debug!("Update for page '{}' changes nothing", page);
    }

    let request = FetchRequest::put_json(endpoint.page(page), update)?;
    let receipt: MutationReceipt = fetch_json(ctx.fetcher(), request).await?;

    log::info!("Updated page {}", receipt.id);
    Ok(receipt.id)
}
