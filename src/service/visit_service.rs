//! Visit service: manual visit-collection CRUD.

use chrono::{NaiveDate, Utc};

use crate::domain::user::normalize_phone;
use crate::domain::visit::{self, VisitId, VisitRecord};
use crate::error::ConsoleError;
use crate::persistence::models::VisitRow;
use crate::persistence::visit_repo::VisitFilter;
use crate::persistence::{PageRows, VisitRepo};

/// Fields accepted when registering a visit collection.
#[derive(Debug, Clone)]
pub struct NewVisit {
    /// Customer display name.
    pub customer_name: String,
    /// Customer phone (hyphens allowed).
    pub phone: String,
    /// Pickup address.
    pub address: String,
    /// Scheduled visit date.
    pub visit_date: NaiveDate,
    /// Collected amount in grams.
    pub amount_g: i64,
    /// Operator note.
    pub note: Option<String>,
}

/// Fields accepted when editing a visit; `None` keeps the current
/// value.
#[derive(Debug, Clone, Default)]
pub struct VisitPatch {
    /// New customer name.
    pub customer_name: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
    /// New address.
    pub address: Option<String>,
    /// New visit date.
    pub visit_date: Option<NaiveDate>,
    /// New collected amount.
    pub amount_g: Option<i64>,
    /// New note.
    pub note: Option<String>,
}

/// Orchestration layer for visit operations.
#[derive(Debug, Clone)]
pub struct VisitService {
    repo: VisitRepo,
}

impl VisitService {
    /// Creates a new `VisitService`.
    #[must_use]
    pub fn new(repo: VisitRepo) -> Self {
        Self { repo }
    }

    /// Registers a visit collection.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Validation`] on bad fields.
    pub async fn register(&self, new: NewVisit) -> Result<VisitRecord, ConsoleError> {
        visit::validate_fields(&new.customer_name, &new.address, new.amount_g)?;
        let phone = normalize_phone(&new.phone)?;

        let now = Utc::now();
        let row = VisitRow {
            id: *VisitId::new().as_uuid(),
            customer_name: new.customer_name.trim().to_string(),
            phone,
            address: new.address.trim().to_string(),
            visit_date: new.visit_date,
            amount_g: new.amount_g,
            note: new.note,
            created_at: now,
            updated_at: now,
        };
        self.repo.insert(&row).await?;

        tracing::info!(customer = %row.customer_name, date = %row.visit_date, "visit registered");
        Ok(row.into())
    }

    /// Fetches one visit by id.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::VisitNotFound`] when unknown.
    pub async fn get(&self, id: VisitId) -> Result<VisitRecord, ConsoleError> {
        Ok(self.repo.find_by_id(*id.as_uuid()).await?.into())
    }

    /// Lists visits with filters and pagination, validating the date
    /// range.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::InvalidDateRange`] when `from > to`.
    pub async fn list(
        &self,
        filter: &VisitFilter,
        limit: i64,
        offset: i64,
    ) -> Result<PageRows<VisitRecord>, ConsoleError> {
        if let (Some(from), Some(to)) = (filter.from, filter.to) {
            if from > to {
                return Err(ConsoleError::InvalidDateRange { from, to });
            }
        }
        let page = self.repo.list(filter, limit, offset).await?;
        Ok(PageRows {
            rows: page.rows.into_iter().map(VisitRecord::from).collect(),
            has_more: page.has_more,
        })
    }

    /// Applies an edit and returns the updated visit.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Validation`] on bad fields and
    /// [`ConsoleError::VisitNotFound`] when unknown.
    pub async fn update(&self, id: VisitId, patch: VisitPatch) -> Result<VisitRecord, ConsoleError> {
        if let Some(name) = &patch.customer_name {
            if name.trim().is_empty() {
                return Err(ConsoleError::Validation(
                    "customer name must not be empty".to_string(),
                ));
            }
        }
        if let Some(address) = &patch.address {
            if address.trim().is_empty() {
                return Err(ConsoleError::Validation(
                    "address must not be empty".to_string(),
                ));
            }
        }
        if let Some(amount) = patch.amount_g {
            if amount <= 0 {
                return Err(ConsoleError::Validation(format!(
                    "collected amount must be positive, got {amount}"
                )));
            }
        }
        let phone = match &patch.phone {
            Some(raw) => Some(normalize_phone(raw)?),
            None => None,
        };

        self.repo
            .update(
                *id.as_uuid(),
                patch.customer_name.as_deref(),
                phone.as_deref(),
                patch.address.as_deref(),
                patch.visit_date,
                patch.amount_g,
                patch.note.as_deref(),
            )
            .await?;

        tracing::info!(%id, "visit updated");
        self.get(id).await
    }

    /// Deletes a visit.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::VisitNotFound`] when unknown.
    pub async fn delete(&self, id: VisitId) -> Result<(), ConsoleError> {
        self.repo.delete(*id.as_uuid()).await?;
        tracing::info!(%id, "visit deleted");
        Ok(())
    }
}
