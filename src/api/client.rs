// src/api/client.rs
//! HTTP client for the Coda API.
//!
//! A thin wrapper around reqwest that attaches credentials and reads the
//! body to text. It does no parsing and no business logic; those live
//! behind the [`Fetcher`] seam so they can be tested without a network.

use super::request::{CachePolicy, FetchRequest, FetchResponse, HttpMethod};
use super::Fetcher;
use crate::error::AppError;
use crate::types::ApiToken;
use reqwest::{header, Client, Method, Response};
use url::Url;

/// Authenticated reqwest client.
///
/// The bearer token is only sent to the API host. Export download links
/// point at a separate file host and are pre-signed, so they are fetched
/// without credentials.
#[derive(Clone)]
pub struct CodaHttpClient {
    client: Client,
    authorization: header::HeaderValue,
    api_host: Option<String>,
}

impl CodaHttpClient {
    /// Creates a new HTTP client for the API rooted at `api_base`.
    pub fn new(token: &ApiToken, api_base: &Url) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(concat!("coda-pages/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            authorization: Self::bearer(token)?,
            api_host: api_base.host_str().map(str::to_string),
        })
    }

    fn bearer(token: &ApiToken) -> Result<header::HeaderValue, AppError> {
        let mut value = header::HeaderValue::from_str(&format!("Bearer {}", token.as_str()))
            .map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid API token format: {}", e))
            })?;
        value.set_sensitive(true);
        Ok(value)
    }

    fn is_api_host(&self, url: &Url) -> bool {
        match (&self.api_host, url.host_str()) {
            (Some(api_host), Some(host)) => api_host.eq_ignore_ascii_case(host),
            _ => false,
        }
    }
}

#[async_trait::async_trait]
impl Fetcher for CodaHttpClient {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, AppError> {
        log::debug!("{}", request);

        let method = match request.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
        };

        let mut builder = self.client.request(method, request.url.clone());

        if self.is_api_host(&request.url) {
            builder = builder.header(header::AUTHORIZATION, self.authorization.clone());
        }

        if request.cache == CachePolicy::Bypass {
            builder = builder.header(header::CACHE_CONTROL, "no-cache");
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        log::debug!("{} -> {}", request, response.status());
        extract_response_text(response).await
    }
}

/// Reads the status, final URL and body text of a response.
pub async fn extract_response_text(response: Response) -> Result<FetchResponse, AppError> {
    let status = response.status().as_u16();
    let url = response.url().to_string();
    let body = response.text().await?;

    Ok(FetchResponse { status, url, body })
}
