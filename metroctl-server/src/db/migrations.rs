//! Database migrations for station, line, and section tables

use sqlx::PgPool;

use super::DbError;

/// Run all migrations.
///
/// Line deletion cascades to sections in application code, inside the
/// deleting transaction - the schema deliberately carries no ON DELETE
/// CASCADE.
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS stations (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS lines (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            color TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sections (
            id BIGSERIAL PRIMARY KEY,
            line_id BIGINT NOT NULL REFERENCES lines(id),
            up_station_id BIGINT NOT NULL REFERENCES stations(id),
            down_station_id BIGINT NOT NULL REFERENCES stations(id),
            distance BIGINT NOT NULL CHECK (distance > 0),
            duration BIGINT CHECK (duration > 0),
            position INT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            UNIQUE (line_id, position)
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Migrations complete");
    Ok(())
}
