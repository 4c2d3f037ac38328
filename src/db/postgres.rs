// src/db/postgres.rs
// DOCUMENTATION: PostgreSQL object store (HBNB_TYPE_STORAGE=db)
// PURPOSE: Persist every entity as a JSONB document in one `objects` table

use serde_json::Value;
use sqlx::types::Json;
use sqlx::PgPool;

use super::store::EntityStore;
use crate::errors::PlacesError;
use crate::models::{City, Entity, EntityKind, Place};

/// Object store backed by a PostgreSQL pool
/// DOCUMENTATION: `seq` records insertion order, so `all()` enumerates the way
/// the in-memory store does. Upserts keep the original `seq`.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the `objects` table and relationship indexes if missing
    /// DOCUMENTATION: Called once during startup in main.rs
    pub async fn init_schema(&self) -> Result<(), PlacesError> {
        let statements = [
            r#"
            CREATE TABLE IF NOT EXISTS objects (
                seq BIGSERIAL NOT NULL,
                kind TEXT NOT NULL,
                id TEXT NOT NULL,
                body JSONB NOT NULL,
                PRIMARY KEY (kind, id)
            )
            "#,
            "CREATE INDEX IF NOT EXISTS objects_kind_seq_idx ON objects (kind, seq)",
            "CREATE INDEX IF NOT EXISTS objects_state_id_idx ON objects (kind, (body->>'state_id'))",
            "CREATE INDEX IF NOT EXISTS objects_city_id_idx ON objects (kind, (body->>'city_id'))",
            "CREATE INDEX IF NOT EXISTS objects_user_id_idx ON objects (kind, (body->>'user_id'))",
        ];

        for sql in statements {
            sqlx::query(sql).execute(&self.pool).await.map_err(|e| {
                log::error!("Failed to initialize schema: {}", e);
                PlacesError::Storage(e.to_string())
            })?;
        }

        log::info!("Object store schema ready");
        Ok(())
    }

    /// Fetch every document of `kind` whose `field` equals `value`, in insertion order
    /// DOCUMENTATION: `field` is spelled into the SQL so the expression indexes apply
    async fn find_by_field<E: Entity>(
        &self,
        field: &'static str,
        value: &str,
    ) -> Result<Vec<E>, PlacesError> {
        let sql = format!(
            "SELECT body FROM objects WHERE kind = $1 AND body->>'{}' = $2 ORDER BY seq",
            field
        );

        let rows = sqlx::query_as::<_, (Json<Value>,)>(&sql)
            .bind(E::KIND.as_str())
            .bind(value)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                log::error!("Failed to list {} by {}={}: {}", E::KIND, field, value, e);
                PlacesError::Storage(e.to_string())
            })?;

        rows.into_iter().map(|(body,)| decode::<E>(body.0)).collect()
    }
}

fn decode<E: Entity>(body: Value) -> Result<E, PlacesError> {
    serde_json::from_value(body).map_err(|e| {
        log::error!("Corrupt {} document: {}", E::KIND, e);
        PlacesError::Storage(e.to_string())
    })
}

impl EntityStore for PgStore {
    async fn get<E: Entity>(&self, id: &str) -> Result<Option<E>, PlacesError> {
        let row = sqlx::query_as::<_, (Json<Value>,)>(
            "SELECT body FROM objects WHERE kind = $1 AND id = $2",
        )
        .bind(E::KIND.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            log::error!("Database error fetching {} {}: {}", E::KIND, id, e);
            PlacesError::Storage(e.to_string())
        })?;

        row.map(|(body,)| decode::<E>(body.0)).transpose()
    }

    async fn all<E: Entity>(&self) -> Result<Vec<E>, PlacesError> {
        let rows = sqlx::query_as::<_, (Json<Value>,)>(
            "SELECT body FROM objects WHERE kind = $1 ORDER BY seq",
        )
        .bind(E::KIND.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            log::error!("Database error listing {}: {}", E::KIND, e);
            PlacesError::Storage(e.to_string())
        })?;

        rows.into_iter().map(|(body,)| decode::<E>(body.0)).collect()
    }

    async fn save<E: Entity>(&self, entity: &E) -> Result<(), PlacesError> {
        let body = serde_json::to_value(entity).map_err(|e| PlacesError::Storage(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO objects (kind, id, body)
            VALUES ($1, $2, $3)
            ON CONFLICT (kind, id) DO UPDATE
            SET body = EXCLUDED.body
            "#,
        )
        .bind(E::KIND.as_str())
        .bind(entity.id())
        .bind(Json(body))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            log::error!("Failed to save {} {}: {}", E::KIND, entity.id(), e);
            PlacesError::Storage(e.to_string())
        })?;

        Ok(())
    }

    async fn delete<E: Entity>(&self, id: &str) -> Result<bool, PlacesError> {
        let rows = sqlx::query("DELETE FROM objects WHERE kind = $1 AND id = $2")
            .bind(E::KIND.as_str())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                log::error!("Delete failed for {} {}: {}", E::KIND, id, e);
                PlacesError::Storage(e.to_string())
            })?
            .rows_affected();

        Ok(rows > 0)
    }

    async fn modify<E, F>(&self, id: &str, f: F) -> Result<Option<E>, PlacesError>
    where
        E: Entity,
        F: FnOnce(&mut E) -> bool + Send,
    {
        let storage = |e: sqlx::Error| {
            log::error!("Update failed for {} {}: {}", E::KIND, id, e);
            PlacesError::Storage(e.to_string())
        };

        let mut tx = self.pool.begin().await.map_err(storage)?;

        // Row lock held until commit; concurrent modifies of the same id queue up
        let row = sqlx::query_as::<_, (Json<Value>,)>(
            "SELECT body FROM objects WHERE kind = $1 AND id = $2 FOR UPDATE",
        )
        .bind(E::KIND.as_str())
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(storage)?;

        let Some((body,)) = row else {
            return Ok(None);
        };
        let mut entity = decode::<E>(body.0)?;
        if !f(&mut entity) {
            return Ok(Some(entity));
        }

        let body = serde_json::to_value(&entity).map_err(|e| PlacesError::Storage(e.to_string()))?;
        sqlx::query("UPDATE objects SET body = $3 WHERE kind = $1 AND id = $2")
            .bind(E::KIND.as_str())
            .bind(id)
            .bind(Json(body))
            .execute(&mut *tx)
            .await
            .map_err(storage)?;

        tx.commit().await.map_err(storage)?;
        Ok(Some(entity))
    }

    async fn count(&self, kind: EntityKind) -> Result<usize, PlacesError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM objects WHERE kind = $1")
            .bind(kind.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                log::error!("Count query error for {}: {}", kind, e);
                PlacesError::Storage(e.to_string())
            })?;

        Ok(count as usize)
    }

    async fn cities_of_state(&self, state_id: &str) -> Result<Vec<City>, PlacesError> {
        self.find_by_field::<City>("state_id", state_id).await
    }

    async fn places_of_city(&self, city_id: &str) -> Result<Vec<Place>, PlacesError> {
        self.find_by_field::<Place>("city_id", city_id).await
    }

    async fn places_of_user(&self, user_id: &str) -> Result<Vec<Place>, PlacesError> {
        self.find_by_field::<Place>("user_id", user_id).await
    }
}
