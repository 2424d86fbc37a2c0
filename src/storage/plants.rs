//! Queries against the `plants` table.
//!
//! Every function takes an explicit connection so callers decide the transaction boundary
//! (pass `&mut *tx` for a transaction, `&mut *conn` for a pooled connection).

use sqlx::SqliteConnection;

use crate::domain::plant::{NewPlant, Plant};

const COLUMNS: &str = "id, name, image, price, is_in_stock";

/// Full scan in insertion order.
pub async fn fetch_all(conn: &mut SqliteConnection) -> Result<Vec<Plant>, sqlx::Error> {
    let sql = format!("SELECT {} FROM plants ORDER BY id", COLUMNS);
    sqlx::query_as::<_, Plant>(&sql).fetch_all(conn).await
}

pub async fn fetch_by_id(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Option<Plant>, sqlx::Error> {
    let sql = format!("SELECT {} FROM plants WHERE id = ?", COLUMNS);
    sqlx::query_as::<_, Plant>(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await
}

/// Inserts a row and returns it with the id assigned by SQLite.
pub async fn insert(conn: &mut SqliteConnection, plant: &NewPlant) -> Result<Plant, sqlx::Error> {
    let sql = format!(
        "INSERT INTO plants (name, image, price, is_in_stock) VALUES (?, ?, ?, ?) RETURNING {}",
        COLUMNS
    );
    sqlx::query_as::<_, Plant>(&sql)
        .bind(&plant.name)
        .bind(&plant.image)
        .bind(plant.price)
        .bind(plant.is_in_stock)
        .fetch_one(conn)
        .await
}

/// Returns `None` if no row has this id.
pub async fn update_stock(
    conn: &mut SqliteConnection,
    id: i64,
    is_in_stock: bool,
) -> Result<Option<Plant>, sqlx::Error> {
    let sql = format!(
        "UPDATE plants SET is_in_stock = ? WHERE id = ? RETURNING {}",
        COLUMNS
    );
    sqlx::query_as::<_, Plant>(&sql)
        .bind(is_in_stock)
        .bind(id)
        .fetch_optional(conn)
        .await
}

/// Returns whether a row was removed.
pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM plants WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Removes every row and restarts id assignment at 1.
pub async fn clear(conn: &mut SqliteConnection) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM plants").execute(&mut *conn).await?;
    sqlx::query("DELETE FROM sqlite_sequence WHERE name = 'plants'")
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected())
}
