// src/operations/connection.rs
//! Who is connected, and to which doc.

use super::PackContext;
use crate::api::request::FetchRequest;
use crate::api::{collect_all, fetch_json};
use crate::constants::DOC_LIST_BATCH_SIZE;
use crate::error::AppError;
use crate::model::{Doc, User};
use crate::search::AutocompleteOption;

/// The user behind the API token.
pub async fn whoami(ctx: &PackContext) -> Result<User, AppError> {
    let request = FetchRequest::get(ctx.routes().whoami()).bypass_cache();
    fetch_json(ctx.fetcher(), request).await
}

/// The bound doc's metadata.
pub async fn current_doc(ctx: &PackContext) -> Result<Doc, AppError> {
    let endpoint = ctx.doc_endpoint()?;
    let request = FetchRequest::get(endpoint.url().clone()).bypass_cache();
    fetch_json(ctx.fetcher(), request).await
}

/// Label for the active connection: the user's name, plus the doc's name
/// once a doc is bound.
pub async fn describe_connection(ctx: &PackContext) -> Result<String, AppError> {
    let user = whoami(ctx).await?;
    if !ctx.endpoint().is_bound() {
        return Ok(user.name);
    }

    let doc = current_doc(ctx).await?;
    Ok(format!("{} ({})", doc.name, user.name))
}

/// Docs the user may bind the connection to.
///
/// With a doc already known, that doc is the only option and it must be
/// owned by the current user. Otherwise every doc the user owns is offered.
/// Option values are doc endpoint URLs.
pub async fn list_selectable_documents(
    ctx: &PackContext,
) -> Result<Vec<AutocompleteOption>, AppError> {
    if ctx.endpoint().is_bound() {
        let doc = current_doc(ctx).await?;
        let user = whoami(ctx).await?;

        if !doc.is_owned_by(&user) {
            log::warn!(
                "Refusing to bind doc {}: owned by {}, not {}",
                doc.id,
                doc.owner,
                user.login_id
            );
            return Err(AppError::NotDocumentOwner {
                doc: doc.name,
                owner: doc.owner,
                login_id: user.login_id,
            });
        }

        return Ok(vec![doc_option(doc)]);
    }

    let docs = collect_all::<Doc>(ctx.fetcher(), ctx.routes().owned_docs(DOC_LIST_BATCH_SIZE)).await?;
    log::debug!("{} owned doc(s) available for selection", docs.items.len());
    Ok(docs.items.into_iter().map(doc_option).collect())
}

fn doc_option(doc: Doc) -> AutocompleteOption {
    AutocompleteOption {
        display: doc.name,
        value: doc.href,
    }
}
