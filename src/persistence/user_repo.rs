//! Repository for user account rows.

use chrono::Utc;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::models::UserRow;
use super::{PageRows, escape_like};
use crate::error::ConsoleError;

/// Optional filters for the user list.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    /// Status string match (`active` / `withdrawn`).
    pub status: Option<String>,
    /// Role string match (`admin` / `member`).
    pub role: Option<String>,
    /// Case-insensitive substring over login id and name.
    pub keyword: Option<String>,
}

/// PostgreSQL-backed user repository.
#[derive(Debug, Clone)]
pub struct UserRepo {
    pool: PgPool,
}

const SELECT_COLS: &str = "id, login_id, name, phone, email, role, points, status, \
                           password_hash, password_salt, created_at, updated_at";

impl UserRepo {
    /// Creates a repository over the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetches one user row by id.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::UserNotFound`] when no row matches.
    pub async fn find_by_id(&self, id: Uuid) -> Result<UserRow, ConsoleError> {
        sqlx::query_as::<_, UserRow>(&format!("SELECT {SELECT_COLS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(ConsoleError::UserNotFound(id))
    }

    /// Lists users with filters and limit/offset pagination, ordered
    /// by login id. Over-fetches one row to compute `has_more`.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Persistence`] on database failure.
    pub async fn list(
        &self,
        filter: &UserFilter,
        limit: i64,
        offset: i64,
    ) -> Result<PageRows<UserRow>, ConsoleError> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {SELECT_COLS} FROM users WHERE 1 = 1"));
        if let Some(status) = &filter.status {
            qb.push(" AND status = ").push_bind(status);
        }
        if let Some(role) = &filter.role {
            qb.push(" AND role = ").push_bind(role);
        }
        if let Some(keyword) = &filter.keyword {
            let pattern = format!("%{}%", escape_like(keyword));
            qb.push(" AND (login_id ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR name ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        qb.push(" ORDER BY login_id LIMIT ")
            .push_bind(limit.saturating_add(1))
            .push(" OFFSET ")
            .push_bind(offset);

        let rows = qb.build_query_as::<UserRow>().fetch_all(&self.pool).await?;
        Ok(PageRows::from_overfetch(
            rows,
            usize::try_from(limit).unwrap_or(0),
        ))
    }

    /// Applies an admin edit. `None` fields keep their current value.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::UserNotFound`] when no row matches.
    pub async fn update_profile(
        &self,
        id: Uuid,
        name: Option<&str>,
        phone: Option<&str>,
        email: Option<&str>,
        role: Option<&str>,
        points: Option<i64>,
    ) -> Result<(), ConsoleError> {
        let result = sqlx::query(
            "UPDATE users SET \
             name = COALESCE($2, name), \
             phone = COALESCE($3, phone), \
             email = COALESCE($4, email), \
             role = COALESCE($5, role), \
             points = COALESCE($6, points), \
             updated_at = $7 \
             WHERE id = $1",
        )
        .bind(id)
        .bind(name)
        .bind(phone)
        .bind(email)
        .bind(role)
        .bind(points)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(ConsoleError::UserNotFound(id));
        }
        Ok(())
    }

    /// Flips an account's status to `withdrawn`. The row stays.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::UserNotFound`] when no row matches.
    pub async fn withdraw(&self, id: Uuid) -> Result<(), ConsoleError> {
        let result =
            sqlx::query("UPDATE users SET status = 'withdrawn', updated_at = $2 WHERE id = $1")
                .bind(id)
                .bind(Utc::now())
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(ConsoleError::UserNotFound(id));
        }
        Ok(())
    }

    /// Replaces the stored password digest and salt.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::UserNotFound`] when no row matches.
    pub async fn set_password(
        &self,
        id: Uuid,
        password_hash: &str,
        password_salt: &str,
    ) -> Result<(), ConsoleError> {
        let result = sqlx::query(
            "UPDATE users SET password_hash = $2, password_salt = $3, updated_at = $4 \
             WHERE id = $1",
        )
        .bind(id)
        .bind(password_hash)
        .bind(password_salt)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(ConsoleError::UserNotFound(id));
        }
        Ok(())
    }
}
