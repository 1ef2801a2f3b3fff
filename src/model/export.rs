// src/model/export.rs
use crate::types::ExportRequestId;
use serde::{Deserialize, Serialize};

/// Output format of a page export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Html,
    Markdown,
}

/// Body of `POST /docs/{docId}/pages/{page}/export`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub output_format: ExportFormat,
}

/// Status of an export job.
///
/// Only `complete` and `failed` are terminal; any other value the API sends
/// is kept verbatim and treated as still pending.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ExportStatus {
    Complete,
    Failed,
    Pending(String),
}

impl From<String> for ExportStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "complete" => ExportStatus::Complete,
            "failed" => ExportStatus::Failed,
            _ => ExportStatus::Pending(raw),
        }
    }
}

/// An export job, as returned on submission and on every status check.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportJob {
    pub id: ExportRequestId,
    pub status: ExportStatus,
    #[serde(default)]
    pub href: Option<String>,
    /// Present only once the job is complete
    #[serde(default)]
    pub download_link: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
