//! Record CRUD operations.

use serde_json::Value;
use sqlx::SqlitePool;
use tracing::warn;

use crate::error::{DatabaseError, Result};

fn decode(collection: &str, id: &str, body: &str) -> Result<Value> {
    serde_json::from_str(body).map_err(|source| DatabaseError::Corrupt {
        collection: collection.to_string(),
        id: id.to_string(),
        source,
    })
}

/// Insert a record, or replace its body if the id already exists.
///
/// New records get the next sequence number; replaced records keep theirs.
pub async fn put_record(pool: &SqlitePool, collection: &str, id: &str, body: &Value) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO records (collection, id, seq, body)
        VALUES (?, ?, (SELECT COALESCE(MAX(seq), 0) + 1 FROM records), ?)
        ON CONFLICT(collection, id) DO UPDATE SET
            body = excluded.body,
            updated_at = datetime('now')
        "#,
    )
    .bind(collection)
    .bind(id)
    .bind(body.to_string())
    .execute(pool)
    .await?;

    Ok(())
}

/// Get a record body by collection and id.
pub async fn get_record(pool: &SqlitePool, collection: &str, id: &str) -> Result<Option<Value>> {
    let body = sqlx::query_scalar::<_, String>(
        r#"
        SELECT body
        FROM records
        WHERE collection = ? AND id = ?
        "#,
    )
    .bind(collection)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    body.map(|body| decode(collection, id, &body)).transpose()
}

/// Delete a record. Returns whether a row was removed.
pub async fn delete_record(pool: &SqlitePool, collection: &str, id: &str) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM records
        WHERE collection = ? AND id = ?
        "#,
    )
    .bind(collection)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// List record bodies in a collection, newest insert first.
///
/// Bodies that are not valid JSON are skipped.
pub async fn list_records(pool: &SqlitePool, collection: &str) -> Result<Vec<Value>> {
    let rows = sqlx::query_as::<_, (String, String)>(
        r#"
        SELECT id, body
        FROM records
        WHERE collection = ?
        ORDER BY seq DESC
        "#,
    )
    .bind(collection)
    .fetch_all(pool)
    .await?;

    let mut records = Vec::with_capacity(rows.len());
    for (id, body) in rows {
        match decode(collection, &id, &body) {
            Ok(value) => records.push(value),
            Err(e) => warn!("{}", e),
        }
    }

    Ok(records)
}

/// Delete every record in a collection.
pub async fn clear_collection(pool: &SqlitePool, collection: &str) -> Result<u64> {
    let result = sqlx::query(
        r#"
        DELETE FROM records
        WHERE collection = ?
        "#,
    )
    .bind(collection)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Count records in a collection.
pub async fn count_records(pool: &SqlitePool, collection: &str) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM records WHERE collection = ?
        "#,
    )
    .bind(collection)
    .fetch_one(pool)
    .await?;

    Ok(count)
}
