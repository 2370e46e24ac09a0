use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::{ProductRepository, StoreError, StoreResult};
use crate::models::Product;

/// `products(id SERIAL PRIMARY KEY, name VARCHAR(128))` on PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_by_id(&self, id: i32) -> StoreResult<Option<Product>> {
        debug!(id, "Find product by id");

        let product = sqlx::query_as::<_, Product>("SELECT id, name FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    async fn find_all(&self) -> StoreResult<Vec<Product>> {
        debug!("Find all products");

        let products = sqlx::query_as::<_, Product>("SELECT id, name FROM products")
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    async fn save(&self, product: Product) -> StoreResult<Product> {
        debug!(id = ?product.id, name = %product.name, "Save product");

        let saved = match product.id {
            None => {
                sqlx::query_as::<_, Product>(
                    "INSERT INTO products (name) VALUES ($1) RETURNING id, name",
                )
                .bind(&product.name)
                .fetch_one(&self.pool)
                .await?
            }
            Some(id) => sqlx::query_as::<_, Product>(
                "UPDATE products SET name = $1 WHERE id = $2 RETURNING id, name",
            )
            .bind(&product.name)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::Database(sqlx::Error::RowNotFound))?,
        };

        Ok(saved)
    }

    async fn delete(&self, product: &Product) -> StoreResult<()> {
        let Some(id) = product.id else {
            debug!(name = %product.name, "Skipping delete of unsaved product");
            return Ok(());
        };
        debug!(id, name = %product.name, "Delete product");

        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Database(sqlx::Error::RowNotFound));
        }
        Ok(())
    }
}
