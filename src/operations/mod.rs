// src/operations/mod.rs
//! The work behind each formula: page CRUD, page copies and connection setup.

pub mod connection;
pub mod copy;
pub mod pages;

use crate::api::{ApiRoutes, DocEndpoint, EndpointResolver, Fetcher, PollPolicy};
use crate::config::PackConfig;
use crate::error::AppError;
use crate::model::ExportFormat;
use std::sync::Arc;

/// Everything an invocation needs besides its own arguments.
///
/// Contexts are cheap to clone and hold no mutable state; concurrent
/// invocations each get their own.
#[derive(Clone)]
pub struct PackContext {
    fetcher: Arc<dyn Fetcher>,
    routes: ApiRoutes,
    endpoint: EndpointResolver,
    poll_policy: PollPolicy,
    export_format: ExportFormat,
}

impl PackContext {
    pub fn new(fetcher: Arc<dyn Fetcher>, routes: ApiRoutes) -> Self {
        Self {
            fetcher,
            routes,
            endpoint: EndpointResolver::Unbound,
            poll_policy: PollPolicy::default(),
            export_format: ExportFormat::default(),
        }
    }

    pub fn from_config(fetcher: Arc<dyn Fetcher>, config: &PackConfig) -> Self {
        Self::new(fetcher, ApiRoutes::new(config.api_base.as_url().clone()))
            .with_endpoint(config.endpoint.clone())
            .with_poll_policy(config.poll_policy.clone())
            .with_export_format(config.export_format)
    }

    pub fn with_endpoint(mut self, endpoint: EndpointResolver) -> Self {
        self.endpoint = endpoint;
        self
    }

    pub fn with_poll_policy(mut self, poll_policy: PollPolicy) -> Self {
        self.poll_policy = poll_policy;
        self
    }

    pub fn with_export_format(mut self, export_format: ExportFormat) -> Self {
        self.export_format = export_format;
        self
    }

    pub fn fetcher(&self) -> &dyn Fetcher {
        self.fetcher.as_ref()
    }

    pub fn routes(&self) -> &ApiRoutes {
        &self.routes
    }

    pub fn endpoint(&self) -> &EndpointResolver {
        &self.endpoint
    }

    /// The bound doc, or [`AppError::NotBound`].
    pub fn doc_endpoint(&self) -> Result<DocEndpoint, AppError> {
        self.endpoint.resolve(&self.routes)
    }

    pub fn poll_policy(&self) -> &PollPolicy {
        &self.poll_policy
    }

    pub fn export_format(&self) -> ExportFormat {
        self.export_format
    }
}
