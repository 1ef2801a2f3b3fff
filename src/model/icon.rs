// src/model/icon.rs
use serde::{Deserialize, Serialize};

/// Response of the icon catalog search.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IconCatalog {
    #[serde(default)]
    pub icons: Vec<Icon>,
}

/// An icon: `name` is what payloads reference, `label` is what people read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Icon {
    pub name: String,
    pub label: String,
}
