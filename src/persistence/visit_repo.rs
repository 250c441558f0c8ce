//! Repository for visit-collection rows.

use chrono::{NaiveDate, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::models::VisitRow;
use super::{PageRows, escape_like};
use crate::error::ConsoleError;

/// Optional filters for the visit list.
#[derive(Debug, Clone, Default)]
pub struct VisitFilter {
    /// Case-insensitive substring over customer name.
    pub keyword: Option<String>,
    /// Inclusive start date.
    pub from: Option<NaiveDate>,
    /// Inclusive end date.
    pub to: Option<NaiveDate>,
}

/// PostgreSQL-backed visit repository.
#[derive(Debug, Clone)]
pub struct VisitRepo {
    pool: PgPool,
}

const SELECT_COLS: &str =
    "id, customer_name, phone, address, visit_date, amount_g, note, created_at, updated_at";

impl VisitRepo {
    /// Creates a repository over the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new visit row.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Persistence`] on database failure.
    pub async fn insert(&self, row: &VisitRow) -> Result<(), ConsoleError> {
        sqlx::query(
            "INSERT INTO visits \
             (id, customer_name, phone, address, visit_date, amount_g, note, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(row.id)
        .bind(&row.customer_name)
        .bind(&row.phone)
        .bind(&row.address)
        .bind(row.visit_date)
        .bind(row.amount_g)
        .bind(&row.note)
        .bind(row.created_at)
        .bind(row.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Fetches one visit row by id.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::VisitNotFound`] when no row matches.
    pub async fn find_by_id(&self, id: Uuid) -> Result<VisitRow, ConsoleError> {
        sqlx::query_as::<_, VisitRow>(&format!("SELECT {SELECT_COLS} FROM visits WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(ConsoleError::VisitNotFound(id))
    }

    /// Lists visits, most recent visit date first, with filters and
    /// pagination. Over-fetches one row to compute `has_more`.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Persistence`] on database failure.
    pub async fn list(
        &self,
        filter: &VisitFilter,
        limit: i64,
        offset: i64,
    ) -> Result<PageRows<VisitRow>, ConsoleError> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {SELECT_COLS} FROM visits WHERE 1 = 1"));
        if let Some(keyword) = &filter.keyword {
            qb.push(" AND customer_name ILIKE ")
                .push_bind(format!("%{}%", escape_like(keyword)));
        }
        if let Some(from) = filter.from {
            qb.push(" AND visit_date >= ").push_bind(from);
        }
        if let Some(to) = filter.to {
            qb.push(" AND visit_date <= ").push_bind(to);
        }
        qb.push(" ORDER BY visit_date DESC, created_at DESC LIMIT ")
            .push_bind(limit.saturating_add(1))
            .push(" OFFSET ")
            .push_bind(offset);

        let rows = qb
            .build_query_as::<VisitRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(PageRows::from_overfetch(
            rows,
            usize::try_from(limit).unwrap_or(0),
        ))
    }

    /// Applies a partial update. `None` fields keep their current
    /// value. Always bumps `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::VisitNotFound`] when no row matches.
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        customer_name: Option<&str>,
        phone: Option<&str>,
        address: Option<&str>,
        visit_date: Option<NaiveDate>,
        amount_g: Option<i64>,
        note: Option<&str>,
    ) -> Result<(), ConsoleError> {
        let result = sqlx::query(
            "UPDATE visits SET \
             customer_name = COALESCE($2, customer_name), \
             phone = COALESCE($3, phone), \
             address = COALESCE($4, address), \
             visit_date = COALESCE($5, visit_date), \
             amount_g = COALESCE($6, amount_g), \
             note = COALESCE($7, note), \
             updated_at = $8 \
             WHERE id = $1",
        )
        .bind(id)
        .bind(customer_name)
        .bind(phone)
        .bind(address)
        .bind(visit_date)
        .bind(amount_g)
        .bind(note)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(ConsoleError::VisitNotFound(id));
        }
        Ok(())
    }

    /// Hard-deletes a visit row.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::VisitNotFound`] when no row matches.
    pub async fn delete(&self, id: Uuid) -> Result<(), ConsoleError> {
        let result = sqlx::query("DELETE FROM visits WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ConsoleError::VisitNotFound(id));
        }
        Ok(())
    }
}
