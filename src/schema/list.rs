// src/schema/list.rs
use serde::{Deserialize, Serialize};

/// `{ "name": ..., "url": ... }` – the API's universal reference shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

/// Reference without a name (evolution chains are linked this way).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResource {
    pub url: String,
}

/// One page of a list endpoint. `next` is absent/null on the last page.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResourceList {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub results: Vec<NamedResource>,
}
