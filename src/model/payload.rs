// src/model/payload.rs
//! Request payloads for creating and updating pages.
//!
//! Every optional field is a [`Patch`]: a key is emitted only when the
//! caller supplied a value.

use crate::types::{PageId, Patch};
use serde::{Deserialize, Serialize};

/// Body of `POST /docs/{docId}/pages`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPage {
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub name: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub parent_page_id: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub subtitle: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub icon_name: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub image_url: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub page_content: Patch<PageContent>,
}

/// Body of `PUT /docs/{docId}/pages/{pageIdOrName}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageUpdate {
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub name: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub subtitle: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub icon_name: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub image_url: Patch<String>,
}

impl PageUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_unset()
            && self.subtitle.is_unset()
            && self.icon_name.is_unset()
            && self.image_url.is_unset()
    }
}

/// Initial body of a new page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PageContent {
    Canvas {
        #[serde(rename = "canvasContent")]
        canvas_content: CanvasContent,
    },
}

impl PageContent {
    pub fn canvas_markdown(content: impl Into<String>) -> Self {
        PageContent::Canvas {
            canvas_content: CanvasContent {
                format: ContentFormat::Markdown,
                content: content.into(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanvasContent {
    pub format: ContentFormat,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentFormat {
    Markdown,
}

/// Acknowledgement of an accepted create/update; the mutation is applied
/// asynchronously but the page ID is final.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationReceipt {
    pub id: PageId,
    #[serde(default)]
    pub request_id: Option<String>,
}
