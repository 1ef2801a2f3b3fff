// src/model/page.rs
use crate::types::PageId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A page in a Coda doc.
///
/// Pages are never cached locally; every read goes back to the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: PageId,
    pub name: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub icon: Option<PageIcon>,
    #[serde(default)]
    pub image: Option<PageImage>,
    #[serde(default)]
    pub parent: Option<PageReference>,
    #[serde(default)]
    pub children: Vec<PageReference>,
    /// `canvas` for pages with a body, `embed` for embedded pages
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub browser_link: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Page {
    pub fn summary(&self) -> PageSummary {
        PageSummary {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }

    pub fn icon_name(&self) -> Option<&str> {
        self.icon.as_ref().map(|icon| icon.name.as_str())
    }

    pub fn cover_image_url(&self) -> Option<&str> {
        self.image.as_ref().map(|image| image.browser_link.as_str())
    }

    pub fn is_canvas(&self) -> bool {
        self.content_type.as_deref() == Some("canvas")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageIcon {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub browser_link: Option<String>,
}

/// Cover image of a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageImage {
    pub browser_link: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// Reference to another page (parent or child).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageReference {
    pub id: PageId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub href: Option<String>,
}

/// The `[id, name]` pair ListPages returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSummary {
    pub id: PageId,
    pub name: String,
}

impl PageSummary {
    pub fn into_row(self) -> Vec<String> {
        vec![self.id.into_string(), self.name]
    }
}
