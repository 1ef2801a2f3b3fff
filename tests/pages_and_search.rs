// tests/pages_and_search.rs
//! Page formulas and autocomplete against a scripted API.

mod common;

use common::{bound_context, doc_url, unbound_context, FakeFetcher};
use coda_pages::formulas::autocomplete;
use coda_pages::formulas::AutocompleteSource;
use coda_pages::operations::pages::list_pages;
use coda_pages::search::{search_icons, search_pages};
use coda_pages::{
    AppError, CodaErrorCode, FormulaRegistry, FormulaValue, HttpMethod, ParamValue,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn text(value: &str) -> Option<ParamValue> {
    Some(ParamValue::String(value.to_string()))
}

#[tokio::test]
async fn list_pages_defaults_to_one_hundred() {
    let fetcher = FakeFetcher::new();
    fetcher
        .respond(
            HttpMethod::Get,
            &doc_url("/pages?limit=100"),
            200,
            json!({
                "items": [
                    { "id": "p1", "name": "Home" },
                    { "id": "p2", "name": "Notes" }
                ],
                "nextPageLink": doc_url("/pages?pageToken=next")
            }),
        )
        .await;
    let ctx = bound_context(&fetcher);

    let pages = list_pages(&ctx, None).await.unwrap();
    let zero = list_pages(&ctx, Some(0)).await.unwrap();

    assert_eq!(pages, zero);
    let names: Vec<&str> = pages.iter().map(|page| page.name.as_str()).collect();
    assert_eq!(names, vec!["Home", "Notes"]);
    // The next page link is not followed
    assert_eq!(fetcher.requests().await.len(), 2);
}

#[tokio::test]
async fn list_pages_formula_returns_rows() {
    let fetcher = FakeFetcher::new();
    fetcher
        .respond(
            HttpMethod::Get,
            &doc_url("/pages?limit=1"),
            200,
            json!({ "items": [{ "id": "p1", "name": "Home" }] }),
        )
        .await;
    let ctx = bound_context(&fetcher);

    let value = FormulaRegistry::standard()
        .unwrap()
        .invoke(&ctx, "ListPages", vec![Some(ParamValue::Number(1.0))])
        .await
        .unwrap();

    assert_eq!(
        value,
        FormulaValue::Rows(vec![vec!["p1".to_string(), "Home".to_string()]])
    );
}

#[tokio::test]
async fn list_pages_rejects_fractional_limit() {
    let fetcher = FakeFetcher::new();
    let ctx = bound_context(&fetcher);

    let err = FormulaRegistry::standard()
        .unwrap()
        .invoke(&ctx, "ListPages", vec![Some(ParamValue::Number(2.5))])
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::InvalidArgument { .. }), "{:?}", err);
    assert!(fetcher.requests().await.is_empty());
}

#[tokio::test]
async fn add_page_sends_only_supplied_fields() {
    let fetcher = FakeFetcher::new();
    fetcher
        .respond(
            HttpMethod::Post,
            &doc_url("/pages"),
            202,
            json!({ "id": "p9", "requestId": "r9" }),
        )
        .await;
    let ctx = bound_context(&fetcher);

    let value = FormulaRegistry::standard()
        .unwrap()
        .invoke(
            &ctx,
            "AddPage",
            vec![text("Weekly"), None, text(""), None, None, text("# Agenda")],
        )
        .await
        .unwrap();

    assert_eq!(value, FormulaValue::Text("p9".to_string()));
    let posts = fetcher.requests_with(HttpMethod::Post).await;
    assert_eq!(
        posts[0].body,
        Some(json!({
            "name": "Weekly",
            "subtitle": "",
            "pageContent": {
                "type": "canvas",
                "canvasContent": { "format": "markdown", "content": "# Agenda" }
            }
        }))
    );
}

#[tokio::test]
async fn add_page_with_no_arguments_posts_empty_object() {
    let fetcher = FakeFetcher::new();
    fetcher
        .respond(HttpMethod::Post, &doc_url("/pages"), 202, json!({ "id": "p10" }))
        .await;
    let ctx = bound_context(&fetcher);

    FormulaRegistry::standard()
        .unwrap()
        .invoke(&ctx, "AddPage", vec![])
        .await
        .unwrap();

    let posts = fetcher.requests_with(HttpMethod::Post).await;
    assert_eq!(posts[0].body, Some(json!({})));
}

#[tokio::test]
async fn add_page_leaves_out_empty_content() {
    let fetcher = FakeFetcher::new();
    fetcher
        .respond(HttpMethod::Post, &doc_url("/pages"), 202, json!({ "id": "p11" }))
        .await;
    let ctx = bound_context(&fetcher);

    FormulaRegistry::standard()
        .unwrap()
        .invoke(&ctx, "AddPage", vec![text("N"), None, None, None, None, text("")])
        .await
        .unwrap();

    let posts = fetcher.requests_with(HttpMethod::Post).await;
    assert_eq!(posts[0].body, Some(json!({ "name": "N" })));
}

#[tokio::test]
async fn add_page_forwards_cover_url_and_surfaces_rejection() {
    let fetcher = FakeFetcher::new();
    fetcher
        .respond(
            HttpMethod::Post,
            &doc_url("/pages"),
            400,
            json!({
                "statusCode": 400,
                "statusMessage": "Bad Request",
                "message": "Invalid image URL"
            }),
        )
        .await;
    let ctx = bound_context(&fetcher);

    let err = FormulaRegistry::standard()
        .unwrap()
        .invoke(
            &ctx,
            "AddPage",
            vec![
                text("N"),
                None,
                None,
                None,
                Some(ParamValue::Image("cover.png".into())),
            ],
        )
        .await
        .unwrap_err();

    match err {
        AppError::CodaService { code, message, status } => {
            assert_eq!(code, CodaErrorCode::BadRequest);
            assert_eq!(message, "Invalid image URL");
            assert_eq!(status, 400);
        }
        other => panic!("unexpected error: {:?}", other),
    }
    let posts = fetcher.requests_with(HttpMethod::Post).await;
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].body, Some(json!({ "name": "N", "imageUrl": "cover.png" })));
}

#[tokio::test]
async fn rename_page_targets_name_and_sends_sparse_update() {
    let fetcher = FakeFetcher::new();
    let target = doc_url("/pages/Q3%20Plans");
    fetcher
        .respond(HttpMethod::Put, &target, 202, json!({ "id": "p3", "requestId": "r3" }))
        .await;
    let ctx = bound_context(&fetcher);

    let value = FormulaRegistry::standard()
        .unwrap()
        .invoke(
            &ctx,
            "RenamePage",
            vec![
                text("Q3 Plans"),
                text("Q3 Roadmap"),
                None,
                text("rocket"),
                Some(ParamValue::Image("https://img.test/cover.png".into())),
            ],
        )
        .await
        .unwrap();

    assert_eq!(value, FormulaValue::Text("p3".to_string()));
    let puts = fetcher.requests_with(HttpMethod::Put).await;
    assert_eq!(puts[0].url.as_str(), target);
    assert_eq!(
        puts[0].body,
        Some(json!({
            "name": "Q3 Roadmap",
            "iconName": "rocket",
            "imageUrl": "https://img.test/cover.png"
        }))
    );
}

#[tokio::test]
async fn rename_page_requires_a_page() {
    let fetcher = FakeFetcher::new();
    let ctx = bound_context(&fetcher);

    let err = FormulaRegistry::standard()
        .unwrap()
        .invoke(&ctx, "RenamePage", vec![None, text("New")])
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::InvalidArgument { .. }), "{:?}", err);
    assert!(fetcher.requests().await.is_empty());
}

#[tokio::test]
async fn unknown_formula_is_reported() {
    let fetcher = FakeFetcher::new();
    let ctx = bound_context(&fetcher);

    let err = FormulaRegistry::standard()
        .unwrap()
        .invoke(&ctx, "DeletePage", vec![])
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::UnknownFormula(ref name) if name == "DeletePage"));
}

#[tokio::test]
async fn doc_operations_need_a_bound_doc() {
    let fetcher = FakeFetcher::new();
    let ctx = unbound_context(&fetcher);

    let err = list_pages(&ctx, None).await.unwrap_err();

    assert!(matches!(err, AppError::NotBound));
    assert!(fetcher.requests().await.is_empty());
}

#[tokio::test]
async fn page_search_reads_every_page_of_results() {
    let fetcher = FakeFetcher::new();
    fetcher
        .respond(
            HttpMethod::Get,
            &doc_url("/pages?limit=100"),
            200,
            json!({
                "items": [
                    { "id": "p1", "name": "Project notes" },
                    { "id": "p2", "name": "Roadmap" }
                ],
                "nextPageLink": doc_url("/pages?limit=100&pageToken=t2")
            }),
        )
        .await;
    fetcher
        .respond(
            HttpMethod::Get,
            &doc_url("/pages?limit=100&pageToken=t2"),
            200,
            json!({ "items": [{ "id": "p3", "name": "Notes" }] }),
        )
        .await;
    let ctx = bound_context(&fetcher);

    let options = search_pages(&ctx, "notes").await.unwrap();

    let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
    assert_eq!(values, vec!["p3", "p1"]);
    assert_eq!(options[0].display, "Notes");
}

#[tokio::test]
async fn icon_search_maps_label_and_name() {
    let fetcher = FakeFetcher::new();
    fetcher
        .respond(
            HttpMethod::Get,
            "https://coda.test/api/icons?term=rocket&limit=50",
            200,
            json!({
                "icons": [
                    { "name": "rocket", "label": "Rocket" },
                    { "name": "rocket-launch", "label": "Rocket launch" }
                ]
            }),
        )
        .await;
    let ctx = unbound_context(&fetcher);

    let options = autocomplete(&ctx, AutocompleteSource::Icons, "rocket")
        .await
        .unwrap();

    assert_eq!(options.len(), 2);
    assert_eq!(options[1].display, "Rocket launch");
    assert_eq!(options[1].value, "rocket-launch");

    let limited = search_icons(&ctx, "rocket", 50).await.unwrap();
    assert_eq!(limited, options);
}

#[tokio::test]
async fn registry_autocomplete_follows_parameter_source() {
    let fetcher = FakeFetcher::new();
    fetcher
        .respond(
            HttpMethod::Get,
            &doc_url("/pages?limit=100"),
            200,
            json!({ "items": [{ "id": "p1", "name": "Home" }] }),
        )
        .await;
    let ctx = bound_context(&fetcher);
    let registry = FormulaRegistry::standard().unwrap();

    let options = registry
        .autocomplete(&ctx, "CopyPage", "parentPageId", "ho")
        .await
        .unwrap();
    assert_eq!(options[0].value, "p1");

    assert!(registry
        .autocomplete(&ctx, "CopyPage", "newName", "x")
        .await
        .is_err());
}
