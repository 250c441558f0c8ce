//! User service: profiles, grades, withdrawal, password change, and
//! barcode payloads.

use chrono::Utc;

use crate::domain::barcode::{self, BarcodePayload};
use crate::domain::grade::{self, Grade, GradeId};
use crate::domain::user::{self, UserId, UserProfile, UserRole};
use crate::error::ConsoleError;
use crate::persistence::models::GradeRow;
use crate::persistence::user_repo::UserFilter;
use crate::persistence::{GradeRepo, PageRows, UserRepo};

/// A profile together with its derived grade name, the shape the
/// console's user screens render.
#[derive(Debug, Clone)]
pub struct ClassifiedUser {
    /// The account itself.
    pub profile: UserProfile,
    /// Name of the grade whose range contains the user's points, if
    /// any.
    pub grade: Option<String>,
}

/// Fields accepted on an admin profile edit; `None` keeps the current
/// value.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    /// New display name.
    pub name: Option<String>,
    /// New phone number (hyphens allowed, normalized before storage).
    pub phone: Option<String>,
    /// New contact email.
    pub email: Option<String>,
    /// New role.
    pub role: Option<UserRole>,
    /// New point total.
    pub points: Option<i64>,
}

/// Fields accepted when creating or updating a grade.
#[derive(Debug, Clone)]
pub struct GradeInput {
    /// Display name.
    pub name: String,
    /// Inclusive lower bound.
    pub min_points: i64,
    /// Inclusive upper bound.
    pub max_points: i64,
}

/// Orchestration layer for account and grade operations.
#[derive(Debug, Clone)]
pub struct UserService {
    users: UserRepo,
    grades: GradeRepo,
    barcode_secret: String,
}

impl UserService {
    /// Creates a new `UserService`.
    #[must_use]
    pub fn new(users: UserRepo, grades: GradeRepo, barcode_secret: String) -> Self {
        Self {
            users,
            grades,
            barcode_secret,
        }
    }

    /// Fetches one user with their derived grade.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::UserNotFound`] when unknown.
    pub async fn get(&self, id: UserId) -> Result<ClassifiedUser, ConsoleError> {
        let row = self.users.find_by_id(*id.as_uuid()).await?;
        let profile = UserProfile::try_from(row)?;
        let grades = self.grade_table().await?;
        let grade = grade::classify(profile.points, &grades).map(|g| g.name.clone());
        Ok(ClassifiedUser { profile, grade })
    }

    /// Lists users with filters and pagination, classifying each
    /// against the grade table.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Persistence`] on database failure.
    pub async fn list(
        &self,
        filter: &UserFilter,
        limit: i64,
        offset: i64,
    ) -> Result<PageRows<ClassifiedUser>, ConsoleError> {
        let page = self.users.list(filter, limit, offset).await?;
        let grades = self.grade_table().await?;

        let mut rows = Vec::with_capacity(page.rows.len());
        for row in page.rows {
            let profile = UserProfile::try_from(row)?;
            let grade = grade::classify(profile.points, &grades).map(|g| g.name.clone());
            rows.push(ClassifiedUser { profile, grade });
        }
        Ok(PageRows {
            rows,
            has_more: page.has_more,
        })
    }

    /// Applies an admin edit, normalizing and validating phone and
    /// email first.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Validation`] on bad contact fields and
    /// [`ConsoleError::UserNotFound`] when unknown.
    pub async fn update(&self, id: UserId, patch: UserPatch) -> Result<ClassifiedUser, ConsoleError> {
        let phone = match &patch.phone {
            Some(raw) => Some(user::normalize_phone(raw)?),
            None => None,
        };
        if let Some(email) = &patch.email {
            user::validate_email(email)?;
        }
        if let Some(points) = patch.points {
            if points < 0 {
                return Err(ConsoleError::Validation(format!(
                    "points must not be negative, got {points}"
                )));
            }
        }

        self.users
            .update_profile(
                *id.as_uuid(),
                patch.name.as_deref(),
                phone.as_deref(),
                patch.email.as_deref(),
                patch.role.map(|r| r.as_str()),
                patch.points,
            )
            .await?;

        tracing::info!(%id, "user profile updated");
        self.get(id).await
    }

    /// Withdraws an account. The row stays for history.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::UserNotFound`] when unknown.
    pub async fn withdraw(&self, id: UserId) -> Result<(), ConsoleError> {
        self.users.withdraw(*id.as_uuid()).await?;
        tracing::info!(%id, "user withdrawn");
        Ok(())
    }

    /// Changes a password after verifying the current one and checking
    /// the new one against policy. A fresh salt is generated.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::PasswordMismatch`] on a wrong current
    /// password and [`ConsoleError::Validation`] on a weak new one.
    pub async fn change_password(
        &self,
        id: UserId,
        current: &str,
        new: &str,
    ) -> Result<(), ConsoleError> {
        let row = self.users.find_by_id(*id.as_uuid()).await?;
        if !user::verify_password(current, &row.password_salt, &row.password_hash) {
            return Err(ConsoleError::PasswordMismatch);
        }
        user::validate_new_password(new)?;

        let salt = uuid::Uuid::new_v4().simple().to_string();
        let hash = user::hash_password(new, &salt);
        self.users.set_password(*id.as_uuid(), &hash, &salt).await?;

        tracing::info!(%id, "password changed");
        Ok(())
    }

    /// Issues a barcode payload for a user's member card. The token
    /// carries no password material.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::UserNotFound`] when unknown.
    pub async fn barcode(&self, id: UserId) -> Result<BarcodePayload, ConsoleError> {
        let row = self.users.find_by_id(*id.as_uuid()).await?;
        Ok(barcode::build_payload(
            id,
            &row.login_id,
            &self.barcode_secret,
            Utc::now(),
        ))
    }

    /// Fetches the full grade table.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Persistence`] on database failure.
    pub async fn grade_table(&self) -> Result<Vec<Grade>, ConsoleError> {
        Ok(self
            .grades
            .list_all()
            .await?
            .into_iter()
            .map(Grade::from)
            .collect())
    }

    /// Creates a grade after checking its range against the table.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::GradeOverlap`] on an intersecting range
    /// and [`ConsoleError::Validation`] on an inverted one.
    pub async fn create_grade(&self, input: GradeInput) -> Result<Grade, ConsoleError> {
        if input.name.trim().is_empty() {
            return Err(ConsoleError::Validation(
                "grade name must not be empty".to_string(),
            ));
        }
        let candidate = Grade {
            id: GradeId::new(),
            name: input.name.trim().to_string(),
            min_points: input.min_points,
            max_points: input.max_points,
        };
        let existing = self.grade_table().await?;
        grade::check_range(&candidate, &existing, None)?;

        let row = GradeRow {
            id: *candidate.id.as_uuid(),
            name: candidate.name.clone(),
            min_points: candidate.min_points,
            max_points: candidate.max_points,
        };
        self.grades.insert(&row).await?;

        tracing::info!(name = %candidate.name, "grade created");
        Ok(candidate)
    }

    /// Updates a grade, excluding itself from the overlap check.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::GradeOverlap`] on an intersecting range
    /// and [`ConsoleError::GradeNotFound`] when unknown.
    pub async fn update_grade(&self, id: GradeId, input: GradeInput) -> Result<Grade, ConsoleError> {
        if input.name.trim().is_empty() {
            return Err(ConsoleError::Validation(
                "grade name must not be empty".to_string(),
            ));
        }
        let candidate = Grade {
            id,
            name: input.name.trim().to_string(),
            min_points: input.min_points,
            max_points: input.max_points,
        };
        let existing = self.grade_table().await?;
        grade::check_range(&candidate, &existing, Some(id))?;

        let row = GradeRow {
            id: *id.as_uuid(),
            name: candidate.name.clone(),
            min_points: candidate.min_points,
            max_points: candidate.max_points,
        };
        self.grades.update(&row).await?;

        tracing::info!(name = %candidate.name, "grade updated");
        Ok(candidate)
    }

    /// Deletes a grade.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::GradeNotFound`] when unknown.
    pub async fn delete_grade(&self, id: GradeId) -> Result<(), ConsoleError> {
        self.grades.delete(*id.as_uuid()).await?;
        tracing::info!(%id, "grade deleted");
        Ok(())
    }
}
