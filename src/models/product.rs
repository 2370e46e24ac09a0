use serde::{Deserialize, Serialize};

/// Core product entity. `id` is `None` until the store has assigned one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Product {
    pub id: Option<i32>,
    pub name: String,
}

impl Product {
    /// A product that has not been persisted yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }
}


// ── Request payloads ─────────────────────────────────────────────────────────

/// Body of `POST /product` and `PUT /product/{id}`.
#[derive(Debug, Deserialize)]
pub struct ProductPayload {
    pub name: String,
}
