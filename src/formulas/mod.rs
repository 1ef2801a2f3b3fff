// src/formulas/mod.rs
//! The formula surface: which formulas exist, their parameters, and the
//! dispatcher that runs one invocation.
//!
//! The registry is an ordinary value built at startup and handed to
//! whoever dispatches invocations; nothing registers itself globally.

mod params;

pub use params::{
    Arguments, AutocompleteSource, FormulaValue, ParamKind, ParamSpec, ParamValue, ResultShape,
};

use crate::constants::ICON_SEARCH_DEFAULT_LIMIT;
use crate::error::AppError;
use crate::model::{NewPage, PageContent, PageUpdate};
use crate::operations::copy::{copy_page, CopyRequest};
use crate::operations::pages::{add_page, list_pages, rename_page};
use crate::operations::PackContext;
use crate::search::{search_icons, search_pages, AutocompleteOption};
use crate::types::{PageIdOrName, Patch};
use indexmap::IndexMap;
use serde::Serialize;

/// Which operation a formula runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormulaHandler {
    ListPages,
    AddPage,
    RenamePage,
    CopyPage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormulaSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub params: Vec<ParamSpec>,
    pub result: ResultShape,
    /// Actions change the doc; plain formulas only read
    pub is_action: bool,
    #[serde(skip)]
    pub handler: FormulaHandler,
}

/// Formulas by name, in registration order.
#[derive(Debug, Clone, Default)]
pub struct FormulaRegistry {
    formulas: IndexMap<&'static str, FormulaSpec>,
}

impl FormulaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The page formulas.
    pub fn standard() -> Result<Self, AppError> {
        let mut registry = Self::new();
        for spec in standard_formulas() {
            registry.register(spec)?;
        }
        Ok(registry)
    }

    pub fn register(&mut self, spec: FormulaSpec) -> Result<(), AppError> {
        if self.formulas.contains_key(spec.name) {
            return Err(AppError::InternalError {
                message: format!("formula {} is already registered", spec.name),
                source: None,
            });
        }
        self.formulas.insert(spec.name, spec);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&FormulaSpec> {
        self.formulas.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FormulaSpec> {
        self.formulas.values()
    }

    pub fn len(&self) -> usize {
        self.formulas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formulas.is_empty()
    }

    /// Runs one formula with positional arguments.
    pub async fn invoke(
        &self,
        ctx: &PackContext,
        name: &str,
        values: Vec<Option<ParamValue>>,
    ) -> Result<FormulaValue, AppError> {
        let spec = self
            .get(name)
            .ok_or_else(|| AppError::UnknownFormula(name.to_string()))?;
        let args = Arguments::bind(spec.name, &spec.params, values)?;
        log::debug!("Invoking {}", spec.name);

        match spec.handler {
            FormulaHandler::ListPages => {
                let pages = list_pages(ctx, args.count(0)?).await?;
                Ok(FormulaValue::Rows(
                    pages.into_iter().map(|page| page.into_row()).collect(),
                ))
            }
            FormulaHandler::AddPage => {
                let payload = NewPage {
                    name: args.text(0).into(),
                    parent_page_id: args.text(1).into(),
                    subtitle: args.text(2).into(),
                    icon_name: args.text(3).into(),
                    image_url: args.text(4).into(),
                    // Empty content leaves the page body out
                    page_content: Patch::from(args.text(5).filter(|content| !content.is_empty()))
                        .map(PageContent::canvas_markdown),
                };
                let id = add_page(ctx, &payload).await?;
                Ok(FormulaValue::Text(id.into_string()))
            }
            FormulaHandler::RenamePage => {
                let page = PageIdOrName::new(args.required_text(0)?)?;
                let update = PageUpdate {
                    name: args.text(1).into(),
                    subtitle: args.text(2).into(),
                    icon_name: args.text(3).into(),
                    image_url: args.text(4).into(),
                };
                let id = rename_page(ctx, &page, &update).await?;
                Ok(FormulaValue::Text(id.into_string()))
            }
            FormulaHandler::CopyPage => {
                let request = CopyRequest {
                    source: PageIdOrName::new(args.required_text(0)?)?,
                    new_name: args.required_text(1)?,
                    parent_page_id: args.text(2),
                };
                let id = copy_page(ctx, &request).await?;
                Ok(FormulaValue::Text(id.into_string()))
            }
        }
    }

    /// Suggestions for one parameter of a formula.
    pub async fn autocomplete(
        &self,
        ctx: &PackContext,
        formula: &str,
        param: &str,
        query: &str,
    ) -> Result<Vec<AutocompleteOption>, AppError> {
        let spec = self
            .get(formula)
            .ok_or_else(|| AppError::UnknownFormula(formula.to_string()))?;
        let source = spec
            .params
            .iter()
            .find(|p| p.name == param)
            .and_then(|p| p.autocomplete)
            .ok_or_else(|| {
                AppError::invalid_argument(
                    spec.name,
                    format!("parameter '{}' has no autocomplete", param),
                )
            })?;

        autocomplete(ctx, source, query).await
    }
}

/// Runs an autocomplete source directly.
pub async fn autocomplete(
    ctx: &PackContext,
    source: AutocompleteSource,
    query: &str,
) -> Result<Vec<AutocompleteOption>, AppError> {
    match source {
        AutocompleteSource::Pages => search_pages(ctx, query).await,
        AutocompleteSource::Icons => search_icons(ctx, query, ICON_SEARCH_DEFAULT_LIMIT).await,
    }
}

fn standard_formulas() -> Vec<FormulaSpec> {
    use AutocompleteSource::{Icons, Pages};
    use ParamKind as Kind;

    vec![
        FormulaSpec {
            name: "ListPages",
            description: "Returns a list of all pages in the doc as [ID, name] pairs",
            params: vec![ParamSpec::optional(
                "limit",
                Kind::Number,
                "Maximum number of pages to return (default: 100)",
            )],
            result: ResultShape::Rows,
            is_action: false,
            handler: FormulaHandler::ListPages,
        },
        FormulaSpec {
            name: "AddPage",
            description: "Adds a new page and returns its ID, which later calls can use to update it",
            params: vec![
                ParamSpec::optional("name", Kind::String, "Name of the page"),
                ParamSpec::optional("parent", Kind::String, "Parent of this new page").autocomplete(Pages),
                ParamSpec::optional("subtitle", Kind::String, "Subtitle of the page"),
                ParamSpec::optional("iconName", Kind::String, "Name of the icon for this new page")
                    .autocomplete(Icons),
                ParamSpec::optional("coverImage", Kind::Image, "Cover image to use"),
                ParamSpec::optional("content", Kind::String, "Content of the page in Markdown format"),
            ],
            result: ResultShape::Text,
            is_action: true,
            handler: FormulaHandler::AddPage,
        },
        FormulaSpec {
            name: "RenamePage",
            description: "Renames an existing page",
            params: vec![
                ParamSpec::required(
                    "pageIdOrName",
                    Kind::String,
                    "ID or name of the page to rename. Prefer IDs: names can change and several pages can share one",
                )
                .autocomplete(Pages),
                ParamSpec::optional("name", Kind::String, "New name of the page"),
                ParamSpec::optional("subtitle", Kind::String, "New subtitle of the page"),
                ParamSpec::optional("iconName", Kind::String, "New name of the icon for this page")
                    .autocomplete(Icons),
                ParamSpec::optional("coverImage", Kind::Image, "New cover image to use"),
            ],
            result: ResultShape::Text,
            is_action: true,
            handler: FormulaHandler::RenamePage,
        },
        FormulaSpec {
            name: "CopyPage",
            description: "Copies a page with its content, subtitle, icon and cover image, and returns the new page's ID",
            params: vec![
                ParamSpec::required("sourcePageIdOrName", Kind::String, "ID or name of the page to copy")
                    .autocomplete(Pages),
                ParamSpec::required("newName", Kind::String, "Name of the copy"),
                ParamSpec::optional("parentPageId", Kind::String, "Parent of the copy")
                    .autocomplete(Pages),
            ],
            result: ResultShape::Text,
            is_action: true,
            handler: FormulaHandler::CopyPage,
        },
    ]
}
