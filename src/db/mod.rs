mod postgres;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::Product;

pub use postgres::PgProductRepository;

/// Any failure coming back from the relational store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence operations for [`Product`]. Every call commits on its own.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Point lookup by primary key.
    async fn find_by_id(&self, id: i32) -> StoreResult<Option<Product>>;

    /// Every row, in whatever order the store returns them.
    async fn find_all(&self) -> StoreResult<Vec<Product>>;

    /// Inserts when `product.id` is `None` (the store assigns the id),
    /// otherwise updates the existing row with that id. Updating a row that
    /// no longer exists fails rather than recreating it.
    async fn save(&self, product: Product) -> StoreResult<Product>;

    /// Removes the row with the product's id; fails if that row is already
    /// gone. Unsaved products are ignored.
    async fn delete(&self, product: &Product) -> StoreResult<()>;
}
