// src/api/request.rs
//! Request/response values exchanged with a [`Fetcher`](super::Fetcher).
//!
//! Everything here is plain data so fakes can record and replay it.

use crate::error::AppError;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
            HttpMethod::Put => write!(f, "PUT"),
        }
    }
}

/// Whether intermediaries may answer from a cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    #[default]
    Default,
    /// Always hit the origin; listings must reflect pages added a moment ago.
    Bypass,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub body: Option<Value>,
    pub cache: CachePolicy,
}

impl FetchRequest {
    pub fn new(method: HttpMethod, url: Url) -> Self {
        Self {
            method,
            url,
            body: None,
            cache: CachePolicy::Default,
        }
    }

    pub fn get(url: Url) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    pub fn post_json<T: Serialize>(url: Url, body: &T) -> Result<Self, AppError> {
        Self::new(HttpMethod::Post, url).with_json(body)
    }

    pub fn put_json<T: Serialize>(url: Url, body: &T) -> Result<Self, AppError> {
        Self::new(HttpMethod::Put, url).with_json(body)
    }

    pub fn with_json<T: Serialize>(mut self, body: &T) -> Result<Self, AppError> {
        self.body = Some(serde_json::to_value(body).map_err(|e| AppError::InternalError {
            message: "Failed to serialize request body".to_string(),
            source: Some(Box::new(e)),
        })?);
        Ok(self)
    }

    pub fn bypass_cache(mut self) -> Self {
        self.cache = CachePolicy::Bypass;
        self
    }
}

impl fmt::Display for FetchRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}

/// A response with its body read to text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub url: String,
    pub body: String,
}

impl FetchResponse {
    pub fn new(status: u16, url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            url: url.into(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Passes success responses through and turns anything else into the
    /// API's own error.
    pub fn error_for_status(self) -> Result<Self, AppError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(super::parser::parse_error_response(&self))
        }
    }
}
