//! Line repository
//!
//! A line exclusively owns its sections: creation inserts the line and
//! its initial section in one transaction, and deletion removes the
//! sections and the line in one transaction (explicit cascade).

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use metroctl_core::{Duration, LineColor, LineName, Section};

use super::sections::{fetch_sections, to_chain, SectionRecord};
use super::stations::{fetch_station, StationRecord};
use super::DbError;

/// Line record from database
#[derive(Debug, Clone, FromRow)]
pub struct LineRecord {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
}

/// Line with its ordered sections and the station records along the path.
#[derive(Debug, Clone)]
pub struct LineDetail {
    pub line: LineRecord,
    pub sections: Vec<SectionRecord>,
    pub stations: Vec<StationRecord>,
}

/// Line repository
pub struct LineRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> LineRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a line with its initial section (atomic).
    ///
    /// Both stations must already exist; the initial section lands at
    /// position 0 and bootstraps the chain.
    pub async fn create(
        &self,
        name: LineName,
        color: LineColor,
        initial: Section,
    ) -> Result<LineDetail, DbError> {
        let mut tx = self.pool.begin().await?;

        let up = fetch_station(&mut *tx, initial.up_station).await?;
        let down = fetch_station(&mut *tx, initial.down_station).await?;

        let line = sqlx::query_as::<_, LineRecord>(
            r#"
            INSERT INTO lines (name, color)
            VALUES ($1, $2)
            RETURNING id, name, color, created_at
            "#,
        )
        .bind(name.as_str())
        .bind(color.as_str())
        .fetch_one(&mut *tx)
        .await?;

        let section = sqlx::query_as::<_, SectionRecord>(
            r#"
            INSERT INTO sections (line_id, up_station_id, down_station_id, distance, duration, position)
            VALUES ($1, $2, $3, $4, $5, 0)
            RETURNING id, line_id, up_station_id, down_station_id, distance, duration, position
            "#,
        )
        .bind(line.id)
        .bind(initial.up_station)
        .bind(initial.down_station)
        .bind(initial.distance.get())
        .bind(initial.duration.map(Duration::get))
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(line_id = line.id, name = %line.name, "line created");
        Ok(LineDetail {
            line,
            sections: vec![section],
            stations: vec![up, down],
        })
    }

    /// List all lines with their sections and stations.
    ///
    /// Three queries total regardless of line count.
    pub async fn list(&self) -> Result<Vec<LineDetail>, DbError> {
        let lines = sqlx::query_as::<_, LineRecord>(
            "SELECT id, name, color, created_at FROM lines ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        let sections = sqlx::query_as::<_, SectionRecord>(
            r#"
            SELECT id, line_id, up_station_id, down_station_id, distance, duration, position
            FROM sections
            ORDER BY line_id, position
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        let mut by_line: HashMap<i64, Vec<SectionRecord>> = HashMap::new();
        for section in sections {
            by_line.entry(section.line_id).or_default().push(section);
        }

        let station_ids: Vec<i64> = by_line
            .values()
            .flatten()
            .flat_map(|s| [s.up_station_id, s.down_station_id])
            .collect();
        let stations = fetch_stations_by_ids(self.pool, &station_ids).await?;

        lines
            .into_iter()
            .map(|line| {
                let sections = by_line.remove(&line.id).unwrap_or_default();
                let stations = stations_along(&sections, &stations)?;
                Ok(LineDetail { line, sections, stations })
            })
            .collect()
    }

    /// Get a single line with its sections and stations.
    pub async fn get(&self, id: i64) -> Result<LineDetail, DbError> {
        let line = sqlx::query_as::<_, LineRecord>(
            "SELECT id, name, color, created_at FROM lines WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "line",
            id: id.to_string(),
        })?;

        let sections = fetch_sections(self.pool, id).await?;

        let station_ids: Vec<i64> = sections
            .iter()
            .flat_map(|s| [s.up_station_id, s.down_station_id])
            .collect();
        let stations = fetch_stations_by_ids(self.pool, &station_ids).await?;
        let stations = stations_along(&sections, &stations)?;

        Ok(LineDetail { line, sections, stations })
    }

    /// Rename/recolor a line.
    pub async fn update(
        &self,
        id: i64,
        name: LineName,
        color: LineColor,
    ) -> Result<LineDetail, DbError> {
        let updated: Option<(i64,)> = sqlx::query_as(
            "UPDATE lines SET name = $2, color = $3 WHERE id = $1 RETURNING id",
        )
        .bind(id)
        .bind(name.as_str())
        .bind(color.as_str())
        .fetch_optional(self.pool)
        .await?;

        if updated.is_none() {
            return Err(DbError::NotFound {
                resource: "line",
                id: id.to_string(),
            });
        }

        self.get(id).await
    }

    /// Delete a line and all its sections (atomic).
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM sections WHERE line_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM lines WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "line",
                id: id.to_string(),
            });
        }

        tx.commit().await?;

        tracing::info!(line_id = id, "line deleted");
        Ok(())
    }
}

/// Fetch station records for a set of ids, keyed by id.
async fn fetch_stations_by_ids(
    pool: &PgPool,
    ids: &[i64],
) -> Result<HashMap<i64, StationRecord>, DbError> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let records = sqlx::query_as::<_, StationRecord>(
        "SELECT id, name, created_at FROM stations WHERE id = ANY($1)",
    )
    .bind(ids)
    .fetch_all(pool)
    .await?;

    Ok(records.into_iter().map(|s| (s.id, s)).collect())
}

/// Station records in path order for a line's sections.
fn stations_along(
    sections: &[SectionRecord],
    stations: &HashMap<i64, StationRecord>,
) -> Result<Vec<StationRecord>, DbError> {
    to_chain(sections)?
        .stations()
        .into_iter()
        .map(|id| {
            stations.get(&id).cloned().ok_or_else(|| DbError::NotFound {
                resource: "station",
                id: id.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(id: i64, name: &str) -> StationRecord {
        StationRecord {
            id,
            name: name.to_owned(),
            created_at: Utc::now(),
        }
    }

    fn section(up: i64, down: i64, position: i32) -> SectionRecord {
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
    fn stations_follow_path_order() {
        let sections = vec![section(3, 1, 0), section(1, 2, 1)];
        let lookup: HashMap<i64, StationRecord> = [
            (1, station(1, "B")),
            (2, station(2, "C")),
            (3, station(3, "A")),
        ]
        .into_iter()
        .collect();

        let ordered = stations_along(&sections, &lookup).unwrap();
        let names: Vec<&str> = ordered.iter().map(|s| s.name.as_str()).collect();

        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn missing_station_record_is_an_error() {
        let sections = vec![section(1, 2, 0)];
        let lookup: HashMap<i64, StationRecord> =
            [(1, station(1, "A"))].into_iter().collect();

        let err = stations_along(&sections, &lookup).unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "station", .. }));
    }
}
