//! Review service
//!
//! Reviews enter as pending and only count toward a clinic's rating
//! once approved. Every moderation transition into or out of approved
//! recomputes the owning clinic's denormalized rating aggregate
//! exactly once.

use crate::contract::{
    AuthContext, Page, PageRequest, PlatformError, Review, ReviewStatus,
};
use crate::domain::repository::ResourceStore;
use crate::domain::resources::clinic::ClinicService;
use crate::domain::validation::{require_field, validate_score};
use chrono::Utc;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct NewReview {
    pub clinic_id: Uuid,
    pub user_id: String,
    pub overall: u8,
    pub aspects: Option<serde_json::Value>,
    pub content: String,
}

#[derive(Debug, Clone, Default)]
pub struct ReviewFilter {
    pub clinic_id: Option<Uuid>,
    pub status: Option<ReviewStatus>,
}

pub struct ReviewService {
    store: Arc<dyn ResourceStore<Review>>,
    clinics: Arc<ClinicService>,
}

impl ReviewService {
    pub fn new(store: Arc<dyn ResourceStore<Review>>, clinics: Arc<ClinicService>) -> Self {
        Self { store, clinics }
    }

    /// List reviews, newest first, id asc tie-break.
    pub async fn list(
        &self,
        filter: &ReviewFilter,
        page: PageRequest,
    ) -> Result<Page<Review>, PlatformError> {
        let mut items = self
            .store
            .list_all()
            .await
            .map_err(PlatformError::backend)?;

        items.retain(|r| {
            filter.clinic_id.is_none_or(|c| r.clinic_id == c)
                && filter.status.is_none_or(|st| r.status == st)
        });

        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));

        Ok(page.slice(&items))
    }

    pub async fn get(&self, id: Uuid) -> Result<Review, PlatformError> {
        self.store
            .find(id)
            .await
            .map_err(PlatformError::backend)?
            .ok_or_else(|| PlatformError::not_found("review", id))
    }

    /// Submit a review; it starts pending and awaits moderation.
    pub async fn create(&self, input: NewReview) -> Result<Review, PlatformError> {
        require_field("user_id", &input.user_id)?;
        require_field("content", &input.content)?;
        validate_score(input.overall)?;

        // the clinic must exist, active or not
        self.clinics.get(input.clinic_id).await?;

        let now = Utc::now();
        let review = Review {
            id: Uuid::new_v4(),
            clinic_id: input.clinic_id,
            user_id: input.user_id,
            overall: input.overall,
            aspects: input.aspects,
            content: input.content,
            status: ReviewStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        let created = self
            .store
            .insert(&review)
            .await
            .map_err(PlatformError::backend)?;

        debug!(id = %created.id, clinic = %created.clinic_id, "review submitted");
        Ok(created)
    }

    /// Moderate a review (admin only). A transition into or out of
    /// approved triggers one rating recomputation for the clinic.
    pub async fn moderate(
        &self,
        id: Uuid,
        to: ReviewStatus,
        auth: &AuthContext,
    ) -> Result<Review, PlatformError> {
        if !auth.is_admin {
            return Err(PlatformError::PermissionDenied);
        }

        let mut review = self.get(id).await?;
        let from = review.status;
        if from == to {
            return Ok(review);
        }

        review.status = to;
        review.updated_at = Utc::now();

        let updated = self
            .store
            .update(&review)
            .await
            .map_err(PlatformError::backend)?
            .ok_or_else(|| PlatformError::not_found("review", id))?;

        let approval_changed =
            from == ReviewStatus::Approved || to == ReviewStatus::Approved;
        if approval_changed {
            self.recompute_clinic_rating(updated.clinic_id).await?;
        }

        debug!(id = %id, from = from.as_str(), to = to.as_str(), "review moderated");
        Ok(updated)
    }

    /// Physically remove a review (admin only); recomputes the rating
    /// when an approved review disappears.
    pub async fn delete(&self, id: Uuid, auth: &AuthContext) -> Result<(), PlatformError> {
        if !auth.is_admin {
            return Err(PlatformError::PermissionDenied);
        }

        let review = self.get(id).await?;
        let removed = self
            .store
            .remove(id)
            .await
            .map_err(PlatformError::backend)?;
        if !removed {
            return Err(PlatformError::not_found("review", id));
        }

        if review.status == ReviewStatus::Approved {
            self.recompute_clinic_rating(review.clinic_id).await?;
        }
        Ok(())
    }

    /// Mean of approved overall scores, rounded to one decimal.
    async fn recompute_clinic_rating(&self, clinic_id: Uuid) -> Result<(), PlatformError> {
        let reviews = self
            .store
            .list_all()
            .await
            .map_err(PlatformError::backend)?;

        let approved: Vec<&Review> = reviews
            .iter()
            .filter(|r| r.clinic_id == clinic_id && r.status == ReviewStatus::Approved)
            .collect();

        let count = approved.len() as u32;
        let rating = if approved.is_empty() {
            0.0
        } else {
            let sum: u32 = approved.iter().map(|r| r.overall as u32).sum();
            let mean = sum as f64 / approved.len() as f64;
            (mean * 10.0).round() / 10.0
        };

        self.clinics.set_rating(clinic_id, rating, count).await
    }
}
