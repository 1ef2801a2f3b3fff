// src/search.rs
//! Autocomplete suggestions for page and icon parameters.
//!
//! Suggestions are fetched live on every call so they always reflect the
//! doc's current pages and the current icon catalog.

use crate::api::request::FetchRequest;
use crate::api::{collect_all, fetch_json};
use crate::constants::PAGE_SEARCH_BATCH_SIZE;
use crate::error::AppError;
use crate::model::{IconCatalog, Page};
use crate::operations::PackContext;
use serde::{Deserialize, Serialize};

/// One entry of an autocomplete dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutocompleteOption {
    pub display: String,
    pub value: String,
}

/// How well a candidate matched; lower sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum MatchTier {
    Exact,
    Prefix,
    Contains,
}

/// Filters and ranks candidates by their display text.
///
/// Matching is case-insensitive. A candidate matches when its display text
/// contains every whitespace-separated term of the query. Exact matches
/// come first, then prefix matches, then the rest; candidates keep their
/// original order within a tier. An empty query returns every candidate.
pub fn search_objects<T, D, V>(
    query: &str,
    candidates: &[T],
    display_of: D,
    value_of: V,
) -> Vec<AutocompleteOption>
where
    D: Fn(&T) -> &str,
    V: Fn(&T) -> &str,
{
    let query = query.trim().to_lowercase();
    let terms: Vec<&str> = query.split_whitespace().collect();

    let mut ranked: Vec<(MatchTier, AutocompleteOption)> = candidates
        .iter()
        .filter_map(|candidate| {
            let display = display_of(candidate);
            let tier = match_tier(&query, &terms, &display.to_lowercase())?;
            Some((
                tier,
                AutocompleteOption {
                    display: display.to_string(),
                    value: value_of(candidate).to_string(),
                },
            ))
        })
        .collect();

    ranked.sort_by_key(|(tier, _)| *tier);
    ranked.into_iter().map(|(_, option)| option).collect()
}

fn match_tier(query: &str, terms: &[&str], display: &str) -> Option<MatchTier> {
    if terms.is_empty() {
        return Some(MatchTier::Contains);
    }
    if display == query {
        return Some(MatchTier::Exact);
    }
    if !terms.iter().all(|term| display.contains(term)) {
        return None;
    }
    if display.starts_with(query) {
        Some(MatchTier::Prefix)
    } else {
        Some(MatchTier::Contains)
    }
}

/// Pages of the bound doc whose name matches `query`; values are page IDs.
pub async fn search_pages(
    ctx: &PackContext,
    query: &str,
) -> Result<Vec<AutocompleteOption>, AppError> {
    let endpoint = ctx.doc_endpoint()?;
    let pages = collect_all::<Page>(ctx.fetcher(), endpoint.pages_with_limit(PAGE_SEARCH_BATCH_SIZE))
        .await?;

    Ok(search_objects(
        query,
        &pages.items,
        |page| page.name.as_str(),
        |page| page.id.as_str(),
    ))
}

/// Icons matching `query`, as ranked by the API; values are icon names.
pub async fn search_icons(
    ctx: &PackContext,
    query: &str,
    limit: u32,
) -> Result<Vec<AutocompleteOption>, AppError> {
    let request = FetchRequest::get(ctx.routes().icons(query, limit)).bypass_cache();
    let catalog: IconCatalog = fetch_json(ctx.fetcher(), request).await?;

    Ok(catalog
        .icons
        .into_iter()
        .map(|icon| AutocompleteOption {
            value: icon.name,
            display: icon.label,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pairs() -> Vec<(&'static str, &'static str)> {
        vec![
            ("Project notes", "p1"),
            ("Notes", "p2"),
            ("Meeting notes archive", "p3"),
            ("Roadmap", "p4"),
            ("notes from launch", "p5"),
        ]
    }

    fn values(options: &[AutocompleteOption]) -> Vec<&str> {
        options.iter().map(|o| o.value.as_str()).collect()
    }

    #[test]
    fn ranks_exact_then_prefix_then_contains() {
        let candidates = pairs();
        let options = search_objects("NOTES", &candidates, |c| c.0, |c| c.1);
        assert_eq!(values(&options), vec!["p2", "p5", "p1", "p3"]);
    }

    #[test]
    fn requires_every_term() {
        let candidates = pairs();
        let options = search_objects("notes archive", &candidates, |c| c.0, |c| c.1);
        assert_eq!(values(&options), vec!["p3"]);
    }

    #[test]
    fn empty_query_keeps_everything_in_order() {
        let candidates = pairs();
        let options = search_objects("  ", &candidates, |c| c.0, |c| c.1);
        assert_eq!(values(&options), vec!["p1", "p2", "p3", "p4", "p5"]);
        assert_eq!(options[0].display, "Project notes");
    }
}
