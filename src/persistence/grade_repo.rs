//! Repository for grade rows.

use sqlx::PgPool;
use uuid::Uuid;

use super::models::GradeRow;
use crate::error::ConsoleError;

/// PostgreSQL-backed grade repository.
#[derive(Debug, Clone)]
pub struct GradeRepo {
    pool: PgPool,
}

impl GradeRepo {
    /// Creates a repository over the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetches the full grade table ordered by range start. The table
    /// is small (a handful of tiers) so overlap checks and user
    /// classification load it whole.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Persistence`] on database failure.
    pub async fn list_all(&self) -> Result<Vec<GradeRow>, ConsoleError> {
        let rows = sqlx::query_as::<_, GradeRow>(
            "SELECT id, name, min_points, max_points FROM grades ORDER BY min_points",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Inserts a new grade row.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Validation`] when the name is taken and
    /// [`ConsoleError::Persistence`] on other database failures.
    pub async fn insert(&self, row: &GradeRow) -> Result<(), ConsoleError> {
        let result = sqlx::query(
            "INSERT INTO grades (id, name, min_points, max_points) VALUES ($1, $2, $3, $4)",
        )
        .bind(row.id)
        .bind(&row.name)
        .bind(row.min_points)
        .bind(row.max_points)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Err(
                ConsoleError::Validation(format!("grade name already exists: {}", row.name)),
            ),
            Err(other) => Err(other.into()),
        }
    }

    /// Replaces a grade's name and range.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::GradeNotFound`] when no row matches.
    pub async fn update(&self, row: &GradeRow) -> Result<(), ConsoleError> {
        let result = sqlx::query(
            "UPDATE grades SET name = $2, min_points = $3, max_points = $4 WHERE id = $1",
        )
        .bind(row.id)
        .bind(&row.name)
        .bind(row.min_points)
        .bind(row.max_points)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(ConsoleError::GradeNotFound(row.id));
        }
        Ok(())
    }

    /// Deletes a grade row. Grades are display-time classification
    /// only, so deletion has no cascade.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::GradeNotFound`] when no row matches.
    pub async fn delete(&self, id: Uuid) -> Result<(), ConsoleError> {
        let result = sqlx::query("DELETE FROM grades WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ConsoleError::GradeNotFound(id));
        }
        Ok(())
    }
}
