//! # Category Repository
//!
//! CRUD for product categories. Deleting a category leaves its products in
//! place with `category_id` cleared (`ON DELETE SET NULL`).

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use kasir_core::{Category, CategoryInput};

/// Repository for category database operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Lists all categories ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM categories ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Gets a category by its ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM categories WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Inserts a new category.
    pub async fn insert(&self, input: &CategoryInput) -> DbResult<Category> {
        debug!(name = %input.name, "Inserting category");

        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, description)
            VALUES (?1, ?2)
            RETURNING id, name, description
            "#,
        )
        .bind(input.name.trim())
        .bind(input.description.trim())
        .fetch_one(&self.pool)
        .await?;

        Ok(category)
    }

    /// Updates an existing category.
    pub async fn update(&self, id: i64, input: &CategoryInput) -> DbResult<Category> {
        debug!(id = %id, "Updating category");

        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories SET name = ?2, description = ?3
            WHERE id = ?1
            RETURNING id, name, description
            "#,
        )
        .bind(id)
        .bind(input.name.trim())
        .bind(input.description.trim())
        .fetch_optional(&self.pool)
        .await?;

        category.ok_or_else(|| DbError::not_found("Category", id))
    }

    /// Deletes a category.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Deleting category");

        let result = sqlx::query("DELETE FROM categories WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use kasir_core::ProductInput;

    fn input(name: &str, description: &str) -> CategoryInput {
        CategoryInput {
            name: name.to_string(),
            description: description.to_string(),
        }
    }

    #[tokio::test]
    async fn test_category_crud() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.categories();

        let makanan = repo.insert(&input("Makanan", "Makanan ringan")).await.unwrap();
        let minuman = repo.insert(&input("Minuman", "")).await.unwrap();

        let all = repo.list().await.unwrap();
        assert_eq!(all, vec![makanan.clone(), minuman.clone()]);

        let updated = repo
            .update(minuman.id, &input("Minuman Dingin", "Dari kulkas"))
            .await
            .unwrap();
        assert_eq!(updated.description, "Dari kulkas");
        assert_eq!(
            repo.get_by_id(minuman.id).await.unwrap().unwrap().name,
            "Minuman Dingin"
        );

        repo.delete(makanan.id).await.unwrap();
        assert!(repo.get_by_id(makanan.id).await.unwrap().is_none());
        assert!(matches!(
            repo.delete(makanan.id).await.unwrap_err(),
            DbError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_delete_category_detaches_products() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let category = db.categories().insert(&input("Alat Tulis", "")).await.unwrap();

        let product = db
            .products()
            .insert(&ProductInput {
                name: "Pulpen".to_string(),
                price: 2500,
                stock: 30,
                category_id: Some(category.id),
            })
            .await
            .unwrap();

        db.categories().delete(category.id).await.unwrap();

        let product = db.products().get_by_id(product.id).await.unwrap().unwrap();
        assert_eq!(product.category_id, None);
    }
}
