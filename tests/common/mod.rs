// tests/common/mod.rs
//! Shared helpers: a scripted fetcher and contexts wired to it.

#![allow(dead_code)]

use coda_pages::{
    ApiRoutes, AppError, DocId, EndpointResolver, FetchRequest, FetchResponse, Fetcher,
    HttpMethod, PackContext, PollPolicy,
};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use url::Url;

pub const API_BASE: &str = "https://coda.test/apis/v1";
pub const DOC_ID: &str = "d1";

pub fn doc_url(path: &str) -> String {
    format!("{}/docs/{}{}", API_BASE, DOC_ID, path)
}

/// Fetcher that replays scripted responses keyed by `"METHOD url"`.
///
/// Each route holds a queue; the last response of a queue is repeated once
/// the others are used up. Unscripted routes answer 404.
#[derive(Clone, Default)]
pub struct FakeFetcher {
    routes: Arc<Mutex<HashMap<String, VecDeque<FetchResponse>>>>,
    requests: Arc<Mutex<Vec<FetchRequest>>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn respond(&self, method: HttpMethod, url: &str, status: u16, body: Value) {
        self.respond_text(method, url, status, body.to_string()).await;
    }

    pub async fn respond_text(
        &self,
        method: HttpMethod,
        url: &str,
        status: u16,
        body: impl Into<String>,
    ) {
        let key = route_key(method, url);
        self.routes
            .lock()
            .await
            .entry(key)
            .or_default()
            .push_back(FetchResponse::new(status, url, body));
    }

    pub async fn requests(&self) -> Vec<FetchRequest> {
        self.requests.lock().await.clone()
    }

    /// Requests sent with the given method, in order.
    pub async fn requests_with(&self, method: HttpMethod) -> Vec<FetchRequest> {
        self.requests()
            .await
            .into_iter()
            .filter(|request| request.method == method)
            .collect()
    }

    pub async fn count(&self, method: HttpMethod, url: &str) -> usize {
        self.requests()
            .await
            .iter()
            .filter(|request| request.method == method && request.url.as_str() == url)
            .count()
    }
}

fn route_key(method: HttpMethod, url: &str) -> String {
    // Normalize through Url so keys match what the crate builds
    let url = Url::parse(url).map(|u| u.to_string()).unwrap_or_else(|_| url.to_string());
    format!("{} {}", method, url)
}

#[async_trait::async_trait]
impl Fetcher for FakeFetcher {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, AppError> {
        let key = route_key(request.method, request.url.as_str());
        self.requests.lock().await.push(request.clone());

        let mut routes = self.routes.lock().await;
        let response = match routes.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };

        Ok(response.unwrap_or_else(|| {
            FetchResponse::new(
                404,
                request.url.as_str(),
                serde_json::json!({
                    "statusCode": 404,
                    "statusMessage": "Not Found",
                    "message": format!("No route for {}", key),
                })
                .to_string(),
            )
        }))
    }
}

/// Poll policy fast enough for tests.
pub fn quick_polls(max_attempts: u32) -> PollPolicy {
    PollPolicy::fixed(Duration::from_millis(1), max_attempts)
}

pub fn unbound_context(fetcher: &FakeFetcher) -> PackContext {
    let routes = ApiRoutes::new(Url::parse(API_BASE).expect("test base URL"));
    PackContext::new(Arc::new(fetcher.clone()), routes).with_poll_policy(quick_polls(10))
}

pub fn bound_context(fetcher: &FakeFetcher) -> PackContext {
    unbound_context(fetcher).with_endpoint(EndpointResolver::Fixed {
        doc_id: DocId::parse(DOC_ID).expect("test doc ID"),
    })
}
