// src/operations/copy.rs
//! Page duplication through the export API.
//!
//! The API has no copy endpoint, so a copy is assembled from pieces:
//!
//! 1. read the source page's metadata
//! 2. submit an export job for the source page
//! 3. poll the job until it completes
//! 4. download the exported body from the job's download link
//! 5. build a creation payload from the new identity and the copied properties
//! 6. create the page
//!
//! Only step 6 writes, so any failure before it leaves the doc untouched
//! and the whole operation can be retried.

use super::pages::{add_page, get_page};
use super::PackContext;
use crate::api::request::FetchRequest;
use crate::api::{fetch_json, fetch_text, poll_until_ready, DocEndpoint, JobState};
use crate::error::AppError;
use crate::model::{ExportJob, ExportRequest, ExportStatus, NewPage, Page, PageContent};
use crate::types::{PageId, PageIdOrName, Patch};

/// Arguments of a page copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyRequest {
    pub source: PageIdOrName,
    pub new_name: String,
    /// Parent of the copy; the copy lands at the top level when absent.
    pub parent_page_id: Option<String>,
}

/// Copies a page and returns the new page's ID.
pub async fn copy_page(ctx: &PackContext, request: &CopyRequest) -> Result<PageId, AppError> {
    let endpoint = ctx.doc_endpoint()?;
    log::info!(
        "Copying page '{}' to '{}' in doc {}",
        request.source,
        request.new_name,
        endpoint.doc_id()
    );

    let source = get_page(ctx, &request.source).await?;
    log::info!("Source page resolved to {} ('{}')", source.id, source.name);

    let source_ref = PageIdOrName::from(&source.id);
    let job = submit_export(ctx, &endpoint, &source_ref).await?;
    log::info!("Export job {} submitted for page {}", job.id, source.id);

    let download_link = wait_for_export(ctx, &endpoint, &source_ref, &job).await?;
    let content = fetch_text(ctx.fetcher(), FetchRequest::get(download_link).bypass_cache()).await?;
    log::info!("Downloaded {} bytes of exported content", content.len());

    let payload = copy_payload(&source, request, content);
    add_page(ctx, &payload).await
}

/// Builds the creation payload of a copy.
///
/// Name and parent come from the request; subtitle, icon and cover image
/// are taken from the source page when it has them.
pub fn copy_payload(source: &Page, request: &CopyRequest, content: String) -> NewPage {
    NewPage {
        name: Patch::Present(request.new_name.clone()),
        parent_page_id: request.parent_page_id.clone().into(),
        subtitle: source.subtitle.clone().into(),
        icon_name: source.icon_name().map(str::to_string).into(),
        image_url: source.cover_image_url().map(str::to_string).into(),
        page_content: Patch::Present(PageContent::canvas_markdown(content)),
    }
}

async fn submit_export(
    ctx: &PackContext,
    endpoint: &DocEndpoint,
    page: &PageIdOrName,
) -> Result<ExportJob, AppError> {
    let body = ExportRequest {
        output_format: ctx.export_format(),
    };
    let request = FetchRequest::post_json(endpoint.page_export(page), &body)?;
    fetch_json(ctx.fetcher(), request).await
}

/// Polls the job until it is complete and returns its download link.
async fn wait_for_export(
    ctx: &PackContext,
    endpoint: &DocEndpoint,
    page: &PageIdOrName,
    job: &ExportJob,
) -> Result<url::Url, AppError> {
    let status_url = endpoint.page_export_status(page, &job.id);

    let link = poll_until_ready(job.id.as_str(), ctx.poll_policy(), |_| {
        let request = FetchRequest::get(status_url.clone()).bypass_cache();
        async move {
            let status: ExportJob = fetch_json(ctx.fetcher(), request).await?;
            Ok(match status.status {
                ExportStatus::Complete => match status.download_link {
                    Some(link) => JobState::Ready(link),
                    None => {
                        return Err(AppError::MalformedResponse(format!(
                            "export {} is complete but has no download link",
                            status.id
                        )))
                    }
                },
                ExportStatus::Failed => JobState::Failed(
                    status
                        .error
                        .unwrap_or_else(|| "export failed without a reason".to_string()),
                ),
                ExportStatus::Pending(_) => JobState::Pending,
            })
        }
    })
    .await?;

    Ok(url::Url::parse(&link)?)
}
