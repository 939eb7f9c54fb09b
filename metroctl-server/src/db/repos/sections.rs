//! Section repository
//!
//! All chain mutations happen inside one transaction that first locks the
//! owning line row (`SELECT ... FOR UPDATE`), so two concurrent edits of
//! the same line can never both validate against a stale terminal
//! station. Validation runs on the in-memory [`SectionChain`] before any
//! row is written; a rejected mutation rolls back untouched.

use sqlx::{FromRow, PgPool};

use metroctl_core::{Distance, Duration, Section, SectionChain, ValidationError};

use super::stations::fetch_station;
use super::DbError;

/// Section record from database, ordered by `position` within its line.
#[derive(Debug, Clone, FromRow)]
pub struct SectionRecord {
    pub id: i64,
    pub line_id: i64,
    pub up_station_id: i64,
    pub down_station_id: i64,
    pub distance: i64,
    pub duration: Option<i64>,
    pub position: i32,
}

/// Rebuild the domain section from a stored row.
pub(crate) fn to_section(record: &SectionRecord) -> Result<Section, ValidationError> {
    Ok(Section::new(
        record.up_station_id,
        record.down_station_id,
        Distance::new(record.distance)?,
        record.duration.map(Duration::new).transpose()?,
    ))
}

/// Rebuild a line's chain from its stored rows.
pub(crate) fn to_chain(records: &[SectionRecord]) -> Result<SectionChain, ValidationError> {
    let sections = records.iter().map(to_section).collect::<Result<Vec<_>, _>>()?;
    Ok(SectionChain::from_sections(sections))
}

pub(crate) async fn fetch_sections<'e, E>(
    executor: E,
    line_id: i64,
) -> Result<Vec<SectionRecord>, sqlx::Error>
where
    E: sqlx::PgExecutor<'e>,
{
    sqlx::query_as::<_, SectionRecord>(
        r#"
        SELECT id, line_id, up_station_id, down_station_id, distance, duration, position
        FROM sections
        WHERE line_id = $1
        ORDER BY position
        "#,
    )
    .bind(line_id)
    .fetch_all(executor)
    .await
}

/// Section repository
pub struct SectionRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> SectionRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a line's sections in path order.
    pub async fn list(&self, line_id: i64) -> Result<Vec<SectionRecord>, DbError> {
        let exists: Option<(i64,)> = sqlx::query_as("SELECT id FROM lines WHERE id = $1")
            .bind(line_id)
            .fetch_optional(self.pool)
            .await?;

        if exists.is_none() {
            return Err(DbError::NotFound {
                resource: "line",
                id: line_id.to_string(),
            });
        }

        Ok(fetch_sections(self.pool, line_id).await?)
    }

    /// Append a section at the line's terminal (atomic).
    pub async fn append(&self, line_id: i64, section: Section) -> Result<SectionRecord, DbError> {
        let mut tx = self.pool.begin().await?;

        lock_line(&mut tx, line_id).await?;

        fetch_station(&mut *tx, section.up_station).await?;
        fetch_station(&mut *tx, section.down_station).await?;

        let rows = fetch_sections(&mut *tx, line_id).await?;
        let mut chain = to_chain(&rows)?;
        chain.add(section.clone())?;

        let record = sqlx::query_as::<_, SectionRecord>(
            r#"
            INSERT INTO sections (line_id, up_station_id, down_station_id, distance, duration, position)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, line_id, up_station_id, down_station_id, distance, duration, position
            "#,
        )
        .bind(line_id)
        .bind(section.up_station)
        .bind(section.down_station)
        .bind(section.distance.get())
        .bind(section.duration.map(Duration::get))
        .bind(rows.len() as i32)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(line_id, section_id = record.id, "section appended");
        Ok(record)
    }

    /// Remove the terminal section, addressed by its down station (atomic).
    pub async fn remove(&self, line_id: i64, station_id: i64) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        lock_line(&mut tx, line_id).await?;

        let rows = fetch_sections(&mut *tx, line_id).await?;
        let mut chain = to_chain(&rows)?;
        chain.remove(station_id)?;

        // remove() succeeding means rows has >= 2 entries
        let last = rows.last().expect("chain validated non-empty");
        sqlx::query("DELETE FROM sections WHERE id = $1")
            .bind(last.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(line_id, section_id = last.id, "section removed");
        Ok(())
    }
}

/// Lock the line row for the duration of the transaction.
pub(crate) async fn lock_line(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    line_id: i64,
) -> Result<(), DbError> {
    let locked: Option<(i64,)> = sqlx::query_as("SELECT id FROM lines WHERE id = $1 FOR UPDATE")
        .bind(line_id)
        .fetch_optional(&mut **tx)
        .await?;

    if locked.is_none() {
        return Err(DbError::NotFound {
            resource: "line",
            id: line_id.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(up: i64, down: i64, position: i32) -> SectionRecord {
        SectionRecord {
            id: position as i64 + 1,
            line_id: 1,
            up_station_id: up,
            down_station_id: down,
            distance: 10,
            duration: None,
            position,
        }
    }

    #[test]
    fn rebuilds_chain_in_position_order() {
        let rows = vec![record(1, 2, 0), record(2, 3, 1)];
        let chain = to_chain(&rows).unwrap();

        assert_eq!(chain.stations(), vec![1, 2, 3]);
        assert_eq!(chain.terminal(), Some(3));
    }

    #[test]
    fn rejects_corrupt_distance_on_load() {
        let mut bad = record(1, 2, 0);
        bad.distance = 0;

        assert!(to_section(&bad).is_err());
    }

    #[test]
    fn preserves_duration_on_load() {
        let mut row = record(1, 2, 0);
        row.duration = Some(4);

        let section = to_section(&row).unwrap();
        assert_eq!(section.duration.map(|d| d.get()), Some(4));
    }

    // Integration tests - run with DATABASE_URL set
    // cargo test -p metroctl-server -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn append_and_remove_follow_tail_only_rules() {
        use metroctl_core::{Distance, LineColor, LineName, Section, SectionError, StationName};

        use crate::db::repos::{LineRepo, StationRepo};
        use crate::db::{create_pool, migrations, DbError};

        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");
        migrations::run(&pool).await.expect("migrations failed");

        let stations = StationRepo::new(&pool);
        let a = stations.create(StationName::new("A").unwrap()).await.unwrap();
        let b = stations.create(StationName::new("B").unwrap()).await.unwrap();
        let c = stations.create(StationName::new("C").unwrap()).await.unwrap();

        let line = LineRepo::new(&pool)
            .create(
                LineName::new("Line 1").unwrap(),
                LineColor::new("bg-red-600").unwrap(),
                Section::new(a.id, b.id, Distance::new(10).unwrap(), None),
            )
            .await
            .unwrap();

        let repo = SectionRepo::new(&pool);

        // appending anywhere but the terminal fails
        let err = repo
            .append(
                line.line.id,
                Section::new(a.id, c.id, Distance::new(5).unwrap(), None),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::Chain(SectionError::NotTerminalUpStation { .. })
        ));

        // appending at the terminal succeeds
        repo.append(
            line.line.id,
            Section::new(b.id, c.id, Distance::new(20).unwrap(), None),
        )
        .await
        .unwrap();
        assert_eq!(repo.list(line.line.id).await.unwrap().len(), 2);

        // only the terminal station's section can be removed
        let err = repo.remove(line.line.id, b.id).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Chain(SectionError::NotTerminalStation { .. })
        ));

        repo.remove(line.line.id, c.id).await.unwrap();
        assert_eq!(repo.list(line.line.id).await.unwrap().len(), 1);

        // the last section never comes out
        let err = repo.remove(line.line.id, b.id).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Chain(SectionError::LastRemainingSection)
        ));

        LineRepo::new(&pool).delete(line.line.id).await.unwrap();
        for id in [a.id, b.id, c.id] {
            stations.delete(id).await.unwrap();
        }
    }
}
