//! Repository for equipment rows and their append-only input records.

use chrono::{NaiveDate, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::models::{EquipmentRow, InputRecordRow};
use super::{PageRows, escape_like};
use crate::error::ConsoleError;

/// Optional filters for the equipment list.
#[derive(Debug, Clone, Default)]
pub struct EquipmentFilter {
    /// Exact region match.
    pub region: Option<String>,
    /// In-service flag match.
    pub usable: Option<bool>,
    /// Case-insensitive substring over code and location.
    pub keyword: Option<String>,
}

/// Optional filters for the input-record list.
#[derive(Debug, Clone, Default)]
pub struct InputRecordFilter {
    /// Exact fleet-code match.
    pub equipment_code: Option<String>,
    /// Inclusive start date.
    pub from: Option<NaiveDate>,
    /// Inclusive end date.
    pub to: Option<NaiveDate>,
}

/// PostgreSQL-backed equipment repository.
#[derive(Debug, Clone)]
pub struct EquipmentRepo {
    pool: PgPool,
}

impl EquipmentRepo {
    /// Creates a repository over the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new equipment row.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::DuplicateCode`] when the code is taken
    /// and [`ConsoleError::Persistence`] on other database failures.
    pub async fn insert(&self, row: &EquipmentRow) -> Result<(), ConsoleError> {
        let result = sqlx::query(
            "INSERT INTO equipment \
             (id, code, location, region, map_x, map_y, usable, total_input_g, total_input_count, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(row.id)
        .bind(&row.code)
        .bind(&row.location)
        .bind(&row.region)
        .bind(row.map_x)
        .bind(row.map_y)
        .bind(row.usable)
        .bind(row.total_input_g)
        .bind(row.total_input_count)
        .bind(row.created_at)
        .bind(row.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(ConsoleError::DuplicateCode(row.code.clone()))
            }
            Err(other) => Err(other.into()),
        }
    }

    /// Fetches one equipment row by id.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::EquipmentNotFound`] when no row matches.
    pub async fn find_by_id(&self, id: Uuid) -> Result<EquipmentRow, ConsoleError> {
        sqlx::query_as::<_, EquipmentRow>(
            "SELECT id, code, location, region, map_x, map_y, usable, \
             total_input_g, total_input_count, created_at, updated_at \
             FROM equipment WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ConsoleError::EquipmentNotFound(id.to_string()))
    }

    /// Fetches one equipment row by fleet code.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::EquipmentNotFound`] when no row matches.
    pub async fn find_by_code(&self, code: &str) -> Result<EquipmentRow, ConsoleError> {
        sqlx::query_as::<_, EquipmentRow>(
            "SELECT id, code, location, region, map_x, map_y, usable, \
             total_input_g, total_input_count, created_at, updated_at \
             FROM equipment WHERE code = $1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ConsoleError::EquipmentNotFound(code.to_string()))
    }

    /// Lists equipment with filters and limit/offset pagination,
    /// ordered by code. Over-fetches one row to compute `has_more`.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Persistence`] on database failure.
    pub async fn list(
        &self,
        filter: &EquipmentFilter,
        limit: i64,
        offset: i64,
    ) -> Result<PageRows<EquipmentRow>, ConsoleError> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT id, code, location, region, map_x, map_y, usable, \
             total_input_g, total_input_count, created_at, updated_at \
             FROM equipment WHERE 1 = 1",
        );
        if let Some(region) = &filter.region {
            qb.push(" AND region = ").push_bind(region);
        }
        if let Some(usable) = filter.usable {
            qb.push(" AND usable = ").push_bind(usable);
        }
        if let Some(keyword) = &filter.keyword {
            let pattern = format!("%{}%", escape_like(keyword));
            qb.push(" AND (code ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR location ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        qb.push(" ORDER BY code LIMIT ")
            .push_bind(limit.saturating_add(1))
            .push(" OFFSET ")
            .push_bind(offset);

        let rows = qb
            .build_query_as::<EquipmentRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(PageRows::from_overfetch(rows, usize::try_from(limit).unwrap_or(0)))
    }

    /// Applies a partial update. `None` fields keep their current
    /// value. Always bumps `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::EquipmentNotFound`] when no row matches.
    pub async fn update(
        &self,
        id: Uuid,
        location: Option<&str>,
        region: Option<&str>,
        map_x: Option<f64>,
        map_y: Option<f64>,
        usable: Option<bool>,
    ) -> Result<(), ConsoleError> {
        let result = sqlx::query(
            "UPDATE equipment SET \
             location = COALESCE($2, location), \
             region = COALESCE($3, region), \
             map_x = COALESCE($4, map_x), \
             map_y = COALESCE($5, map_y), \
             usable = COALESCE($6, usable), \
             updated_at = $7 \
             WHERE id = $1",
        )
        .bind(id)
        .bind(location)
        .bind(region)
        .bind(map_x)
        .bind(map_y)
        .bind(usable)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(ConsoleError::EquipmentNotFound(id.to_string()));
        }
        Ok(())
    }

    /// Soft-disables a robot: flips `usable` off, keeping the row.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::EquipmentNotFound`] when no row matches.
    pub async fn soft_disable(&self, id: Uuid) -> Result<(), ConsoleError> {
        let result =
            sqlx::query("UPDATE equipment SET usable = FALSE, updated_at = $2 WHERE id = $1")
                .bind(id)
                .bind(Utc::now())
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(ConsoleError::EquipmentNotFound(id.to_string()));
        }
        Ok(())
    }

    /// Appends an input record and bumps the owning robot's running
    /// totals in one transaction. The only multi-statement write in
    /// the service.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::EquipmentNotFound`] when the id is
    /// unknown and [`ConsoleError::Persistence`] on database failure.
    pub async fn append_input(
        &self,
        equipment_id: Uuid,
        record: &InputRecordRow,
    ) -> Result<(), ConsoleError> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            "UPDATE equipment SET \
             total_input_g = total_input_g + $2, \
             total_input_count = total_input_count + 1, \
             updated_at = $3 \
             WHERE id = $1",
        )
        .bind(equipment_id)
        .bind(record.amount_g)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(ConsoleError::EquipmentNotFound(equipment_id.to_string()));
        }

        sqlx::query(
            "INSERT INTO input_records (id, equipment_code, collected_at, amount_g, points) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(record.id)
        .bind(&record.equipment_code)
        .bind(record.collected_at)
        .bind(record.amount_g)
        .bind(record.points)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Lists input records, newest first, with filters and pagination.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Persistence`] on database failure.
    pub async fn list_inputs(
        &self,
        filter: &InputRecordFilter,
        limit: i64,
        offset: i64,
    ) -> Result<PageRows<InputRecordRow>, ConsoleError> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT id, equipment_code, collected_at, amount_g, points \
             FROM input_records WHERE 1 = 1",
        );
        if let Some(code) = &filter.equipment_code {
            qb.push(" AND equipment_code = ").push_bind(code);
        }
        if let Some(from) = filter.from {
            qb.push(" AND collected_at::date >= ").push_bind(from);
        }
        if let Some(to) = filter.to {
            qb.push(" AND collected_at::date <= ").push_bind(to);
        }
        qb.push(" ORDER BY collected_at DESC LIMIT ")
            .push_bind(limit.saturating_add(1))
            .push(" OFFSET ")
            .push_bind(offset);

        let rows = qb
            .build_query_as::<InputRecordRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(PageRows::from_overfetch(rows, usize::try_from(limit).unwrap_or(0)))
    }
}
