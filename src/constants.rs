// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Coda API boundaries
// ---------------------------------------------------------------------------

/// Versioned root of the Coda REST API.
pub const CODA_API_BASE: &str = "https://coda.io/apis/v1";

/// Icon catalog search path, on the API host but outside the versioned root.
pub const ICON_SEARCH_PATH: &str = "/api/icons";

/// Pages returned by ListPages when the caller gives no limit.
pub const LIST_PAGES_DEFAULT_LIMIT: u32 = 100;

/// Page size requested while collecting every page for autocomplete.
pub const PAGE_SEARCH_BATCH_SIZE: u32 = 100;

/// Page size requested while collecting owned docs for doc selection.
pub const DOC_LIST_BATCH_SIZE: u32 = 100;

/// Icons returned by one icon autocomplete request.
pub const ICON_SEARCH_DEFAULT_LIMIT: u32 = 50;

// ---------------------------------------------------------------------------
// Export polling
// ---------------------------------------------------------------------------

/// Delay between export status checks.
pub const EXPORT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Status checks before an export is reported as timed out.
///
/// Two minutes at the default interval; a page export that takes longer is
/// almost certainly stuck.
pub const EXPORT_POLL_MAX_ATTEMPTS: u32 = 120;

/// Cap for the delay when a backoff factor is configured.
pub const EXPORT_POLL_MAX_INTERVAL: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
