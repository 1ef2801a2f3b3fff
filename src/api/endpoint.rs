// src/api/endpoint.rs
//! URL construction for API routes and doc-scoped endpoints.
//!
//! Two ways of reaching a doc exist: a system-wide token with a fixed doc,
//! or a per-connection endpoint URL stored when the user picked a doc.
//! [`EndpointResolver`] hides which one is in use; everything downstream
//! works with a resolved [`DocEndpoint`].

use crate::constants::ICON_SEARCH_PATH;
use crate::error::AppError;
use crate::types::{DocId, ExportRequestId, PageIdOrName, ValidatedUrl};
use url::Url;

/// Appends percent-encoded path segments to a URL.
fn with_segments(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    // http(s) URLs always have a path to extend
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

fn with_query(mut url: Url, pairs: &[(&str, String)]) -> Url {
    {
        let mut query = url.query_pairs_mut();
        for (key, value) in pairs {
            query.append_pair(key, value);
        }
    }
    url
}

/// Routes that do not depend on a doc.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRoutes {
    base: Url,
}

impl ApiRoutes {
    /// `base` is the versioned API root, e.g. `https://coda.io/apis/v1`.
    pub fn new(base: Url) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn whoami(&self) -> Url {
        with_segments(&self.base, &["whoami"])
    }

    pub fn doc(&self, doc_id: &DocId) -> Url {
        with_segments(&self.base, &["docs", doc_id.as_str()])
    }

    /// Docs owned by the token's user, first page.
    pub fn owned_docs(&self, limit: u32) -> Url {
        with_query(
            with_segments(&self.base, &["docs"]),
            &[("isOwner", "true".to_string()), ("limit", limit.to_string())],
        )
    }

    /// Icon catalog search. Lives on the host root, outside the versioned API.
    pub fn icons(&self, term: &str, limit: u32) -> Url {
        let mut url = self.base.clone();
        url.set_path(ICON_SEARCH_PATH);
        url.set_query(None);
        with_query(
            url,
            &[("term", term.to_string()), ("limit", limit.to_string())],
        )
    }

    pub fn doc_endpoint(&self, doc_id: &DocId) -> DocEndpoint {
        DocEndpoint {
            doc_id: doc_id.clone(),
            base: self.doc(doc_id),
        }
    }
}

/// How the current invocation finds its doc.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EndpointResolver {
    /// No doc selected yet; only identity and doc selection work.
    #[default]
    Unbound,
    /// System-wide token, doc fixed by configuration.
    Fixed { doc_id: DocId },
    /// Per-connection endpoint stored after doc selection.
    Connection { endpoint: ValidatedUrl },
}

impl EndpointResolver {
    pub fn is_bound(&self) -> bool {
        !matches!(self, EndpointResolver::Unbound)
    }

    pub fn resolve(&self, routes: &ApiRoutes) -> Result<DocEndpoint, AppError> {
        match self {
            EndpointResolver::Unbound => Err(AppError::NotBound),
            EndpointResolver::Fixed { doc_id } => Ok(routes.doc_endpoint(doc_id)),
            EndpointResolver::Connection { endpoint } => DocEndpoint::from_url(endpoint.as_url()),
        }
    }
}

/// Base URL of one doc (`.../docs/{docId}`) and the routes beneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocEndpoint {
    doc_id: DocId,
    base: Url,
}

impl DocEndpoint {
    /// Reads a stored endpoint; anything after `/docs/{docId}` is dropped.
    pub fn from_url(url: &Url) -> Result<Self, AppError> {
        let segments: Vec<&str> = url
            .path_segments()
            .map(|segments| segments.collect())
            .unwrap_or_default();

        let position = segments
            .iter()
            .position(|segment| *segment == "docs")
            .filter(|position| position + 1 < segments.len())
            .ok_or_else(|| {
                AppError::MissingConfiguration(format!(
                    "Endpoint {} does not point at a doc (expected .../docs/<docId>)",
                    url
                ))
            })?;

        let doc_id = DocId::parse(segments[position + 1])?;
        let mut base = url.clone();
        base.set_query(None);
        base.set_fragment(None);
        base.set_path(&format!("/{}", segments[..=position + 1].join("/")));

        Ok(Self { doc_id, base })
    }

    pub fn doc_id(&self) -> &DocId {
        &self.doc_id
    }

    /// The doc resource itself (`GET` returns the doc's metadata).
    pub fn url(&self) -> &Url {
        &self.base
    }

    pub fn pages(&self) -> Url {
        with_segments(&self.base, &["pages"])
    }

    pub fn pages_with_limit(&self, limit: u32) -> Url {
        with_query(self.pages(), &[("limit", limit.to_string())])
    }

    pub fn page(&self, page: &PageIdOrName) -> Url {
        with_segments(&self.base, &["pages", page.as_str()])
    }

    pub fn page_export(&self, page: &PageIdOrName) -> Url {
        with_segments(&self.base, &["pages", page.as_str(), "export"])
    }

    pub fn page_export_status(&self, page: &PageIdOrName, request: &ExportRequestId) -> Url {
        with_segments(
            &self.base,
            &["pages", page.as_str(), "export", request.as_str()],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn routes() -> ApiRoutes {
        ApiRoutes::new(Url::parse("https://coda.io/apis/v1").unwrap())
    }

    #[test]
    fn builds_static_routes() {
        let routes = routes();
        assert_eq!(routes.whoami().as_str(), "https://coda.io/apis/v1/whoami");
        assert_eq!(
            routes.owned_docs(100).as_str(),
            "https://coda.io/apis/v1/docs?isOwner=true&limit=100"
        );
        assert_eq!(
            routes.icons("rocket ship", 50).as_str(),
            "https://coda.io/api/icons?term=rocket+ship&limit=50"
        );
    }

    #[test]
    fn page_names_are_percent_encoded() {
        let endpoint = routes().doc_endpoint(&DocId::parse("d1").unwrap());
        let page = PageIdOrName::new("Q3 / Plans?").unwrap();
        assert_eq!(
            endpoint.page(&page).as_str(),
            "https://coda.io/apis/v1/docs/d1/pages/Q3%20%2F%20Plans%3F"
        );
        assert_eq!(
            endpoint.pages_with_limit(25).as_str(),
            "https://coda.io/apis/v1/docs/d1/pages?limit=25"
        );
    }

    #[test]
    fn connection_endpoint_is_normalized() {
        let url = Url::parse("https://coda.io/apis/v1/docs/AbC123/pages?limit=3").unwrap();
        let endpoint = DocEndpoint::from_url(&url).unwrap();
        assert_eq!(endpoint.doc_id().as_str(), "AbC123");
        assert_eq!(endpoint.url().as_str(), "https://coda.io/apis/v1/docs/AbC123");
    }

    #[test]
    fn resolver_requires_a_doc() {
        assert!(matches!(
            EndpointResolver::Unbound.resolve(&routes()),
            Err(AppError::NotBound)
        ));
        let fixed = EndpointResolver::Fixed {
            doc_id: DocId::parse("d1").unwrap(),
        };
        assert_eq!(
            fixed.resolve(&routes()).unwrap().pages().as_str(),
            "https://coda.io/apis/v1/docs/d1/pages"
        );
        let bad = EndpointResolver::Connection {
            endpoint: ValidatedUrl::parse("https://coda.io/apis/v1/whoami").unwrap(),
        };
        assert!(bad.resolve(&routes()).is_err());
    }
}
