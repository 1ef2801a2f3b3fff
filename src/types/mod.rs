// src/types/mod.rs
use thiserror::Error;

mod domain_types;
mod ids;
mod patch;

pub use domain_types::*;
pub use ids::*;
pub use patch::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid {kind} identifier: {reason}")]
    InvalidId { kind: &'static str, reason: String },

    #[error("Invalid URL: {url} - {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Empty required field: {0}")]
    EmptyField(&'static str),

    #[error("Invalid API token format: {reason}")]
    InvalidApiToken { reason: String },
}
