//! Fruit repository for Orchard.

use super::fruit::{Fruit, FruitForm};
use super::DbPool;
use crate::{OrchardError, Result};

const FRUIT_COLUMNS: &str = "id, name, is_ready_to_eat, extra, created_at, updated_at";

/// Repository for fruit CRUD operations.
pub struct FruitRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> FruitRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// List all fruits in insertion order.
    pub async fn list(&self) -> Result<Vec<Fruit>> {
        let sql = format!("SELECT {FRUIT_COLUMNS} FROM fruits ORDER BY id");
        let fruits = sqlx::query_as::<_, Fruit>(&sql)
            .fetch_all(self.pool)
            .await?;
        Ok(fruits)
    }

    /// Get a fruit by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Fruit>> {
        let sql = format!("SELECT {FRUIT_COLUMNS} FROM fruits WHERE id = ?");
        let fruit = sqlx::query_as::<_, Fruit>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(fruit)
    }

    /// Create a fruit. A missing name is stored as an empty string.
    pub async fn create(&self, form: &FruitForm) -> Result<Fruit> {
        let result =
            sqlx::query("INSERT INTO fruits (name, is_ready_to_eat, extra) VALUES (?, ?, ?)")
                .bind(form.name.as_deref().unwrap_or_default())
                .bind(form.is_ready_to_eat)
                .bind(form.extra_json())
                .execute(self.pool)
                .await?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| OrchardError::NotFound("fruit".to_string()))
    }

    /// Update a fruit by ID.
    ///
    /// The readiness flag is always overwritten, the name only when
    /// submitted, and extra fields are merged into the stored ones.
    /// Returns false if no fruit has this ID.
    pub async fn update(&self, id: i64, form: &FruitForm) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE fruits
             SET name = COALESCE(?, name),
                 is_ready_to_eat = ?,
                 extra = json_patch(extra, ?),
                 updated_at = datetime('now')
             WHERE id = ?",
        )
        .bind(form.name.as_deref())
        .bind(form.is_ready_to_eat)
        .bind(form.extra_json())
        .bind(id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a fruit by ID.
    ///
    /// Returns true if a fruit was deleted, false if not found.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM fruits WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use serde_json::Value;

    async fn setup_db() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let db = setup_db().await;
        let repo = FruitRepository::new(db.pool());

        let form = FruitForm::new("Apple", true).with_extra("color", "red");
        let fruit = repo.create(&form).await.unwrap();

        assert_eq!(fruit.name, "Apple");
        assert!(fruit.is_ready_to_eat);
        assert_eq!(fruit.extra["color"], Value::String("red".to_string()));

        let fetched = repo.get_by_id(fruit.id).await.unwrap().unwrap();
        assert_eq!(fetched, fruit);
    }

    #[tokio::test]
    async fn test_create_without_name() {
        let db = setup_db().await;
        let repo = FruitRepository::new(db.pool());

        let fruit = repo.create(&FruitForm::default()).await.unwrap();
        assert_eq!(fruit.name, "");
        assert!(!fruit.is_ready_to_eat);
    }

    #[tokio::test]
    async fn test_list_in_order() {
        let db = setup_db().await;
        let repo = FruitRepository::new(db.pool());

        repo.create(&FruitForm::new("Apple", true)).await.unwrap();
        repo.create(&FruitForm::new("Banana", false)).await.unwrap();

        let names: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, vec!["Apple", "Banana"]);
    }

    #[tokio::test]
    async fn test_update_overwrites_flag_and_keeps_missing_name() {
        let db = setup_db().await;
        let repo = FruitRepository::new(db.pool());

        let fruit = repo
            .create(&FruitForm::new("Mango", true).with_extra("origin", "India"))
            .await
            .unwrap();

        let update = FruitForm {
            name: None,
            is_ready_to_eat: false,
            ..FruitForm::default()
        }
        .with_extra("color", "yellow");
        assert!(repo.update(fruit.id, &update).await.unwrap());

        let updated = repo.get_by_id(fruit.id).await.unwrap().unwrap();
        assert_eq!(updated.name, "Mango");
        assert!(!updated.is_ready_to_eat);
        assert_eq!(updated.extra["origin"], Value::String("India".to_string()));
        assert_eq!(updated.extra["color"], Value::String("yellow".to_string()));
    }

    #[tokio::test]
    async fn test_update_missing() {
        let db = setup_db().await;
        let repo = FruitRepository::new(db.pool());

        assert!(!repo.update(99, &FruitForm::new("Ghost", true)).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete() {
        let db = setup_db().await;
        let repo = FruitRepository::new(db.pool());

        let fruit = repo.create(&FruitForm::new("Cherry", true)).await.unwrap();

        assert!(repo.delete(fruit.id).await.unwrap());
        assert!(repo.get_by_id(fruit.id).await.unwrap().is_none());
        assert!(!repo.delete(fruit.id).await.unwrap());
        assert!(repo.list().await.unwrap().is_empty());
    }
}
