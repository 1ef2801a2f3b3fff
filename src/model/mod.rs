// src/model/mod.rs
//! Coda objects as the API returns them, and the payloads sent back.

mod export;
mod icon;
mod identity;
mod page;
mod payload;

pub use export::{ExportFormat, ExportJob, ExportRequest, ExportStatus};
pub use icon::{Icon, IconCatalog};
pub use identity::{Doc, User};
pub use page::{Page, PageIcon, PageImage, PageReference, PageSummary};
pub use payload::{CanvasContent, ContentFormat, MutationReceipt, NewPage, PageContent, PageUpdate};
