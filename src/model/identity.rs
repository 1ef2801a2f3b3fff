// src/model/identity.rs
use crate::types::DocId;
use serde::{Deserialize, Serialize};

/// The user behind the API token (`GET /whoami`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub name: String,
    pub login_id: String,
    #[serde(default)]
    pub token_name: Option<String>,
    #[serde(default)]
    pub scoped: bool,
}

/// A Coda doc.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doc {
    pub id: DocId,
    pub name: String,
    /// Login ID (email) of the owner
    pub owner: String,
    #[serde(default)]
    pub owner_name: Option<String>,
    /// API URL of the doc, used as the connection endpoint
    pub href: String,
    #[serde(default)]
    pub browser_link: Option<String>,
}

impl Doc {
    pub fn is_owned_by(&self, user: &User) -> bool {
        self.owner == user.login_id
    }
}
