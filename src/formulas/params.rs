// src/formulas/params.rs
//! Parameter and result shapes of the formula surface.

use crate::error::AppError;
use crate::search::AutocompleteOption;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    String,
    Number,
    /// An image URL
    Image,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamKind::String => write!(f, "string"),
            ParamKind::Number => write!(f, "number"),
            ParamKind::Image => write!(f, "image"),
        }
    }
}

/// Where a parameter's autocomplete suggestions come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AutocompleteSource {
    Pages,
    Icons,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: ParamKind,
    pub optional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autocomplete: Option<AutocompleteSource>,
}

impl ParamSpec {
    pub fn required(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            description,
            kind,
            optional: false,
            autocomplete: None,
        }
    }

    pub fn optional(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            optional: true,
            ..Self::required(name, kind, description)
        }
    }

    pub fn autocomplete(mut self, source: AutocompleteSource) -> Self {
        self.autocomplete = Some(source);
        self
    }
}

/// A value passed for one parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    String(String),
    Number(f64),
    Image(String),
}

impl ParamValue {
    fn kind(&self) -> ParamKind {
        match self {
            ParamValue::String(_) => ParamKind::String,
            ParamValue::Number(_) => ParamKind::Number,
            ParamValue::Image(_) => ParamKind::Image,
        }
    }

    /// Reads a textual argument as the given kind.
    pub fn parse(kind: ParamKind, raw: &str) -> Result<Self, String> {
        match kind {
            ParamKind::String => Ok(ParamValue::String(raw.to_string())),
            ParamKind::Image => Ok(ParamValue::Image(raw.to_string())),
            ParamKind::Number => raw
                .trim()
                .parse::<f64>()
                .map(ParamValue::Number)
                .map_err(|_| format!("'{}' is not a number", raw)),
        }
    }
}

/// What a formula returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FormulaValue {
    Text(String),
    Rows(Vec<Vec<String>>),
    Options(Vec<AutocompleteOption>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultShape {
    Text,
    Rows,
}

/// Positional arguments checked against a formula's parameter list.
#[derive(Debug)]
pub struct Arguments {
    formula: &'static str,
    values: Vec<Option<ParamValue>>,
}

impl Arguments {
    /// Validates arity, required parameters and kinds.
    ///
    /// Trailing optional parameters may be left out; a `None` in the middle
    /// marks an optional parameter as not supplied.
    pub fn bind(
        formula: &'static str,
        params: &[ParamSpec],
        mut values: Vec<Option<ParamValue>>,
    ) -> Result<Self, AppError> {
        if values.len() > params.len() {
            return Err(AppError::invalid_argument(
                formula,
                format!(
                    "expected at most {} argument(s), got {}",
                    params.len(),
                    values.len()
                ),
            ));
        }
        values.resize(params.len(), None);

        for (spec, value) in params.iter().zip(&values) {
            match value {
                None if !spec.optional => {
                    return Err(AppError::invalid_argument(
                        formula,
                        format!("missing required parameter '{}'", spec.name),
                    ));
                }
                None => {}
                Some(value) => check_kind(formula, spec, value)?,
            }
        }

        Ok(Self { formula, values })
    }

    /// Text of a string or image argument, if supplied.
    pub fn text(&self, index: usize) -> Option<String> {
        match self.values.get(index)? {
            Some(ParamValue::String(value)) | Some(ParamValue::Image(value)) => {
                Some(value.clone())
            }
            _ => None,
        }
    }

    pub fn required_text(&self, index: usize) -> Result<String, AppError> {
        self.text(index).ok_or_else(|| {
            AppError::invalid_argument(self.formula, format!("argument {} is required", index + 1))
        })
    }

    /// A non-negative whole-number argument, if supplied.
    pub fn count(&self, index: usize) -> Result<Option<u32>, AppError> {
        match self.values.get(index) {
            Some(Some(ParamValue::Number(number))) => {
                if !number.is_finite() || *number < 0.0 || number.fract() != 0.0 {
                    return Err(AppError::invalid_argument(
                        self.formula,
                        format!("{} is not a non-negative whole number", number),
                    ));
                }
                Ok(Some(number.min(u32::MAX as f64) as u32))
            }
            _ => Ok(None),
        }
    }
}

fn check_kind(formula: &str, spec: &ParamSpec, value: &ParamValue) -> Result<(), AppError> {
    if value.kind() != spec.kind {
        return Err(AppError::invalid_argument(
            formula,
            format!(
                "parameter '{}' expects a {}, got a {}",
                spec.name,
                spec.kind,
                value.kind()
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> Vec<ParamSpec> {
        vec![
            ParamSpec::required("page", ParamKind::String, "page"),
            ParamSpec::optional("limit", ParamKind::Number, "limit"),
            ParamSpec::optional("cover", ParamKind::Image, "cover"),
        ]
    }

    #[test]
    fn trailing_optionals_may_be_omitted() {
        let args = Arguments::bind(
            "Test",
            &params(),
            vec![Some(ParamValue::String("Home".into()))],
        )
        .unwrap();
        assert_eq!(args.text(0).as_deref(), Some("Home"));
        assert_eq!(args.count(1).unwrap(), None);
        assert_eq!(args.text(2), None);
    }

    #[test]
    fn rejects_bad_arity_and_kinds() {
        assert!(Arguments::bind("Test", &params(), vec![None]).is_err());
        assert!(Arguments::bind("Test", &params(), vec![None, None, None, None]).is_err());
        assert!(Arguments::bind(
            "Test",
            &params(),
            vec![Some(ParamValue::Number(1.0))]
        )
        .is_err());
    }

    #[test]
    fn image_text_passes_through_unchecked() {
        let args = Arguments::bind(
            "Test",
            &params(),
            vec![
                Some(ParamValue::String("Home".into())),
                None,
                Some(ParamValue::Image("cover.png".into())),
            ],
        )
        .unwrap();
        assert_eq!(args.text(2).as_deref(), Some("cover.png"));
    }

    #[test]
    fn counts_must_be_whole_numbers() {
        let bind = |n: f64| {
            Arguments::bind(
                "Test",
                &params(),
                vec![Some(ParamValue::String("x".into())), Some(ParamValue::Number(n))],
            )
            .unwrap()
        };
        assert_eq!(bind(25.0).count(1).unwrap(), Some(25));
        assert!(bind(-1.0).count(1).is_err());
        assert!(bind(2.5).count(1).is_err());
    }

    #[test]
    fn parses_textual_arguments() {
        assert_eq!(
            ParamValue::parse(ParamKind::Number, " 12 ").unwrap(),
            ParamValue::Number(12.0)
        );
        assert!(ParamValue::parse(ParamKind::Number, "twelve").is_err());
    }
}
