//! Test doubles for [`ProductRepository`].

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{ProductRepository, StoreError, StoreResult};
use crate::models::Product;

#[derive(Debug, Default)]
struct Inner {
    rows: BTreeMap<i32, Product>,
    next_id: i32,
}

/// Map-backed repository that assigns ids the way a SERIAL column would.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_id(&self, id: i32) -> StoreResult<Option<Product>> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn find_all(&self) -> StoreResult<Vec<Product>> {
        Ok(self.inner.read().await.rows.values().cloned().collect())
    }

    async fn save(&self, mut product: Product) -> StoreResult<Product> {
        let mut inner = self.inner.write().await;
        let id = match product.id {
            Some(id) if inner.rows.contains_key(&id) => id,
            Some(_) => return Err(StoreError::Database(sqlx::Error::RowNotFound)),
            None => {
                inner.next_id += 1;
                inner.next_id
            }
        };
        product.id = Some(id);
        inner.rows.insert(id, product.clone());
        Ok(product)
    }

    async fn delete(&self, product: &Product) -> StoreResult<()> {
        let Some(id) = product.id else {
            return Ok(());
        };
        match self.inner.write().await.rows.remove(&id) {
            Some(_) => Ok(()),
            None => Err(StoreError::Database(sqlx::Error::RowNotFound)),
        }
    }
}

/// Wraps [`InMemoryProductRepository`] and removes each row right after it
/// has been looked up, as a concurrent DELETE would.
#[derive(Debug, Default, Clone)]
pub struct VanishingProductRepository {
    inner: InMemoryProductRepository,
}

impl VanishingProductRepository {
    pub fn new(inner: InMemoryProductRepository) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ProductRepository for VanishingProductRepository {
    async fn find_by_id(&self, id: i32) -> StoreResult<Option<Product>> {
        let found = self.inner.find_by_id(id).await?;
        if let Some(product) = &found {
            self.inner.delete(product).await?;
        }
        Ok(found)
    }

    async fn find_all(&self) -> StoreResult<Vec<Product>> {
        self.inner.find_all().await
    }

    async fn save(&self, product: Product) -> StoreResult<Product> {
        self.inner.save(product).await
    }

    async fn delete(&self, product: &Product) -> StoreResult<()> {
        self.inner.delete(product).await
    }
}

/// Repository whose every call fails, counting how often it was hit.
#[derive(Debug, Default, Clone)]
pub struct FailingProductRepository {
    calls: Arc<AtomicUsize>,
}

impl FailingProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail<T>(&self) -> StoreResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }
}

#[async_trait]
impl ProductRepository for FailingProductRepository {
    async fn find_by_id(&self, _id: i32) -> StoreResult<Option<Product>> {
        self.fail()
    }

    async fn find_all(&self) -> StoreResult<Vec<Product>> {
        self.fail()
    }

    async fn save(&self, _product: Product) -> StoreResult<Product> {
        self.fail()
    }

    async fn delete(&self, _product: &Product) -> StoreResult<()> {
        self.fail()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_without_id_assigns_increasing_ids() {
        let repo = InMemoryProductRepository::new();
        let a = repo.save(Product::new("A")).await.unwrap();
        let b = repo.save(Product::new("B")).await.unwrap();
        assert_eq!(a.id, Some(1));
        assert_eq!(b.id, Some(2));
    }

    #[tokio::test]
    async fn save_with_id_replaces_row() {
        let repo = InMemoryProductRepository::new();
        let mut p = repo.save(Product::new("A")).await.unwrap();
        p.name = "B".to_string();
        repo.save(p.clone()).await.unwrap();
        assert_eq!(repo.len().await, 1);
        assert_eq!(repo.find_by_id(1).await.unwrap(), Some(p));
    }

    #[tokio::test]
    async fn save_with_unknown_id_does_not_insert() {
        let repo = InMemoryProductRepository::new();
        let ghost = Product {
            id: Some(9),
            name: "Ghost".to_string(),
        };
        assert!(repo.save(ghost).await.is_err());
        assert_eq!(repo.len().await, 0);
    }

    #[tokio::test]
    async fn delete_of_missing_row_fails() {
        let repo = InMemoryProductRepository::new();
        let product = repo.save(Product::new("A")).await.unwrap();
        repo.delete(&product).await.unwrap();
        assert!(repo.delete(&product).await.is_err());
    }

    #[tokio::test]
    async fn delete_unsaved_product_is_noop() {
        let repo = InMemoryProductRepository::new();
        repo.save(Product::new("A")).await.unwrap();
        repo.delete(&Product::new("A")).await.unwrap();
        assert_eq!(repo.len().await, 1);
    }
}
