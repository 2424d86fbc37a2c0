//! The catalog service.
//!
//! Owns the connection pool and runs each storage operation. Every mutation happens inside
//! its own SQL transaction which is committed only once the whole operation succeeded; on
//! failure it is rolled back before the error is returned, so no partial write is visible.

use sqlx::sqlite::SqlitePool;
use sqlx::{Sqlite, Transaction};

use crate::domain::plant::{NewPlant, Plant};
use crate::error::{CatalogError, CatalogResult};
use crate::infra::config;
use crate::storage::{self, plants};

pub struct CatalogService {
    pool: SqlitePool,
}

impl CatalogService {
    /// Connects using the environment configuration and applies pending migrations.
    ///
    /// Callers load `.env` (see `config::load_dotenv`) before this.
    pub async fn new() -> CatalogResult<Self> {
        let database_url = config::database_url();
        let pool = storage::connect(&database_url, config::max_connections()).await?;
        tracing::info!(%database_url, "connected to database");
        Self::with_pool(pool).await
    }

    /// Wraps an existing pool, applying pending migrations first.
    pub async fn with_pool(pool: SqlitePool) -> CatalogResult<Self> {
        storage::migrate(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn list_plants(&self) -> CatalogResult<Vec<Plant>> {
        let mut conn = self.pool.acquire().await?;
        Ok(plants::fetch_all(&mut conn).await?)
    }

    pub async fn get_plant(&self, id: i64) -> CatalogResult<Plant> {
        let mut conn = self.pool.acquire().await?;
        plants::fetch_by_id(&mut conn, id)
            .await?
            .ok_or(CatalogError::NotFound)
    }

    pub async fn create_plant(&self, new_plant: NewPlant) -> CatalogResult<Plant> {
        let mut tx = self.pool.begin().await?;
        let result = plants::insert(&mut tx, &new_plant)
            .await
            .map_err(CatalogError::from);
        let plant = finish(tx, result).await?;
        tracing::debug!(id = plant.id, name = %plant.name, "plant created");
        Ok(plant)
    }

    /// Flips the stock flag, the only field that can change after creation.
    pub async fn set_in_stock(&self, id: i64, is_in_stock: bool) -> CatalogResult<Plant> {
        let mut tx = self.pool.begin().await?;
        let result = match plants::update_stock(&mut tx, id, is_in_stock).await {
            Ok(Some(plant)) => Ok(plant),
            Ok(None) => Err(CatalogError::NotFound),
            Err(e) => Err(e.into()),
        };
        let plant = finish(tx, result).await?;
        tracing::debug!(id, is_in_stock, "plant stock updated");
        Ok(plant)
    }

    pub async fn delete_plant(&self, id: i64) -> CatalogResult<()> {
        let mut tx = self.pool.begin().await?;
        let result = match plants::delete(&mut tx, id).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(CatalogError::NotFound),
            Err(e) => Err(e.into()),
        };
        finish(tx, result).await?;
        tracing::debug!(id, "plant deleted");
        Ok(())
    }

    /// Empties the table and inserts `seed` in a single transaction.
    pub async fn replace_all(&self, seed: &[NewPlant]) -> CatalogResult<Vec<Plant>> {
        let mut tx = self.pool.begin().await?;
        let result = async {
            let removed = plants::clear(&mut tx).await?;
            tracing::info!(removed, "cleared plants table");
            let mut inserted = Vec::with_capacity(seed.len());
            for new_plant in seed {
                inserted.push(plants::insert(&mut tx, new_plant).await?);
            }
            Ok::<_, CatalogError>(inserted)
        }
        .await;
        finish(tx, result).await
    }
}

/// Commits on success, rolls back on failure. A failed rollback is logged and the original
/// error is still returned.
async fn finish<T>(
    tx: Transaction<'static, Sqlite>,
    result: CatalogResult<T>,
) -> CatalogResult<T> {
    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!(error = %rollback_err, "transaction rollback failed");
            }
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn service() -> CatalogResult<CatalogService> {
        CatalogService::with_pool(storage::connect_in_memory().await?).await
    }

    #[tokio::test]
    async fn test_create_then_get() -> anyhow::Result<()> {
        let service = service().await?;
        let created = service
            .create_plant(NewPlant::new("Aloe", "./images/aloe.jpg", 11.5))
            .await?;
        assert_eq!(service.get_plant(created.id).await?, created);
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_ids_are_not_found() -> anyhow::Result<()> {
        let service = service().await?;
        assert!(matches!(service.get_plant(7).await, Err(CatalogError::NotFound)));
        assert!(matches!(
            service.set_in_stock(7, false).await,
            Err(CatalogError::NotFound)
        ));
        assert!(matches!(service.delete_plant(7).await, Err(CatalogError::NotFound)));
        Ok(())
    }

    #[tokio::test]
    async fn test_set_in_stock_leaves_other_fields() -> anyhow::Result<()> {
        let service = service().await?;
        let created = service
            .create_plant(NewPlant::new("ZZ Plant", "./images/zz-plant.jpg", 25.98))
            .await?;
        let updated = service.set_in_stock(created.id, false).await?;
        assert_eq!(
            updated,
            Plant {
                is_in_stock: false,
                ..created
            }
        );
        Ok(())
    }

    async fn install_trigger(service: &CatalogService, sql: &str) -> anyhow::Result<()> {
        sqlx::query(sql).execute(service.pool()).await?;
        Ok(())
    }

    fn assert_persistence_error<T: std::fmt::Debug>(result: CatalogResult<T>, needle: &str) {
        match result {
            Err(err @ CatalogError::Persistence(_)) => {
                assert!(err.to_string().contains(needle), "{}", err)
            }
            other => panic!("expected a persistence error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_failed_create_is_rolled_back() -> anyhow::Result<()> {
        let service = service().await?;
        install_trigger(
            &service,
            "CREATE TRIGGER reject_insert AFTER INSERT ON plants \
             BEGIN SELECT RAISE(ABORT, 'insert rejected'); END",
        )
        .await?;

        let result = service
            .create_plant(NewPlant::new("Aloe", "./images/aloe.jpg", 11.5))
            .await;
        assert_persistence_error(result, "insert rejected");
        assert!(service.list_plants().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_update_and_delete_leave_row_intact() -> anyhow::Result<()> {
        let service = service().await?;
        let created = service
            .create_plant(NewPlant::new("Fern", "fern.png", 3.0))
            .await?;
        install_trigger(
            &service,
            "CREATE TRIGGER reject_update BEFORE UPDATE ON plants \
             BEGIN SELECT RAISE(ABORT, 'update rejected'); END",
        )
        .await?;
        install_trigger(
            &service,
            "CREATE TRIGGER reject_delete BEFORE DELETE ON plants \
             BEGIN SELECT RAISE(ABORT, 'delete rejected'); END",
        )
        .await?;

        assert_persistence_error(service.set_in_stock(created.id, false).await, "update rejected");
        assert_persistence_error(service.delete_plant(created.id).await, "delete rejected");
        assert_eq!(service.get_plant(created.id).await?, created);
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_replace_all_restores_previous_rows() -> anyhow::Result<()> {
        let service = service().await?;
        service.create_plant(NewPlant::new("Fern", "fern.png", 3.0)).await?;
        service.create_plant(NewPlant::new("Ivy", "ivy.png", 2.0)).await?;
        let before = service.list_plants().await?;
        install_trigger(
            &service,
            "CREATE TRIGGER reject_bad AFTER INSERT ON plants WHEN NEW.name = 'Bad' \
             BEGIN SELECT RAISE(ABORT, 'bad plant'); END",
        )
        .await?;

        // The table is cleared and one row inserted before the failing insert.
        let result = service
            .replace_all(&[
                NewPlant::new("Aloe", "./images/aloe.jpg", 11.5),
                NewPlant::new("Bad", "bad.png", 1.0),
            ])
            .await;
        assert_persistence_error(result, "bad plant");
        assert_eq!(service.list_plants().await?, before);
        Ok(())
    }

    #[tokio::test]
    async fn test_replace_all_resets_table() -> anyhow::Result<()> {
        let service = service().await?;
        service.create_plant(NewPlant::new("Fern", "fern.png", 3.0)).await?;
        service.create_plant(NewPlant::new("Ivy", "ivy.png", 2.0)).await?;

        let seeded = service
            .replace_all(&[NewPlant::new("Aloe", "./images/aloe.jpg", 11.5)])
            .await?;
        assert_eq!(seeded.len(), 1);
        assert_eq!(seeded[0].id, 1);
        assert_eq!(service.list_plants().await?, seeded);
        Ok(())
    }
}
