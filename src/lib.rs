// src/lib.rs
//! coda-pages library: page management for Coda docs over the Coda REST API.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `CodaErrorCode`, `ValidationError`
//! - **Configuration**: `CommandLineInput`, `PackConfig`
//! - **Domain model**: `Page`, `Doc`, `User`, `ExportJob`, payloads
//! - **API layer**: the `Fetcher` seam, routes, pagination and polling
//! - **Operations**: page CRUD, page copies, connection setup
//! - **Formulas**: the `FormulaRegistry` and its argument types

pub mod api;
pub mod formulas;
pub mod model;
pub mod operations;
pub mod search;

mod config;
mod constants;
mod error;
mod types;

// --- Error Handling ---
pub use crate::error::{AppError, CodaErrorCode, Result};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{resolve_endpoint, Command, CommandLineInput, PackConfig, API_TOKEN_ENV};

// --- Domain Types ---
pub use crate::types::{
    ApiToken, DocId, ExportRequestId, Id, PageId, PageIdOrName, Patch, ValidatedUrl,
};

// --- Domain Model ---
pub use crate::model::{
    CanvasContent, ContentFormat, Doc, ExportFormat, ExportJob, ExportStatus, NewPage, Page,
    PageContent, PageSummary, PageUpdate, User,
};

// --- API Client ---
pub use crate::api::request::{FetchRequest, FetchResponse};
pub use crate::api::{
    ApiRoutes, CachePolicy, CodaHttpClient, DocEndpoint, EndpointResolver, Fetcher, HttpMethod,
    PollPolicy,
};

// --- Operations ---
pub use crate::operations::PackContext;
pub use crate::search::AutocompleteOption;

// --- Formulas ---
pub use crate::formulas::{FormulaRegistry, FormulaSpec, FormulaValue, ParamKind, ParamValue};
