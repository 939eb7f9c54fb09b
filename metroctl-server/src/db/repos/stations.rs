//! Station repository

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use metroctl_core::StationName;

use super::DbError;

/// Station record from database
#[derive(Debug, Clone, FromRow)]
pub struct StationRecord {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Station repository
pub struct StationRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> StationRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a station.
    pub async fn create(&self, name: StationName) -> Result<StationRecord, DbError> {
        let station = sqlx::query_as::<_, StationRecord>(
            r#"
            INSERT INTO stations (name)
            VALUES ($1)
            RETURNING id, name, created_at
            "#,
        )
        .bind(name.as_str())
        .fetch_one(self.pool)
        .await?;

        Ok(station)
    }

    /// List all stations in creation order.
    pub async fn list(&self) -> Result<Vec<StationRecord>, DbError> {
        let stations = sqlx::query_as::<_, StationRecord>(
            "SELECT id, name, created_at FROM stations ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(stations)
    }

    /// Delete a station by id.
    ///
    /// A station still referenced by a section is protected by the
    /// foreign keys; remove its sections through the line APIs first.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM stations WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "station",
                id: id.to_string(),
            });
        }

        Ok(())
    }
}

/// Resolve a station id to its record on any executor (pool or open
/// transaction).
pub(crate) async fn fetch_station<'e, E>(executor: E, id: i64) -> Result<StationRecord, DbError>
where
    E: sqlx::PgExecutor<'e>,
{
    sqlx::query_as::<_, StationRecord>("SELECT id, name, created_at FROM stations WHERE id = $1")
        .bind(id)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "station",
            id: id.to_string(),
        })
}

#[cfg(test)]
mod tests {
    // Integration tests - run with DATABASE_URL set
    // cargo test -p metroctl-server -- --ignored

    use super::*;
    use crate::db::{create_pool, migrations};

    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_then_delete_station() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");
        migrations::run(&pool).await.expect("migrations failed");

        let repo = StationRepo::new(&pool);
        let station = repo
            .create(StationName::new("Gangnam").unwrap())
            .await
            .expect("create failed");

        repo.delete(station.id).await.expect("delete failed");

        let err = repo.delete(station.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "station", .. }));
    }
}
