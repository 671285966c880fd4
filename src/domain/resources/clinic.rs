//! Clinic service
//!
//! Deletion is a status transition to inactive, never physical removal:
//! historical appointments and reviews keep their back-references.

use crate::contract::{
    AuthContext, Clinic, Page, PageRequest, PlatformError, ResourceStatus,
};
use crate::domain::repository::ResourceStore;
use crate::domain::validation::require_field;
use chrono::Utc;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Input for creating a clinic.
#[derive(Debug, Clone, Default)]
pub struct NewClinic {
    pub name: String,
    pub name_kr: Option<String>,
    pub district: String,
    pub address: String,
    pub phone: String,
    pub description: String,
    pub specialties: Vec<String>,
    pub featured: bool,
    pub sort_order: i32,
}

/// Partial update; unspecified fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ClinicPatch {
    pub name: Option<String>,
    pub name_kr: Option<String>,
    pub district: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub specialties: Option<Vec<String>>,
    pub featured: Option<bool>,
    pub sort_order: Option<i32>,
}

/// Allow-listed listing filters.
#[derive(Debug, Clone, Default)]
pub struct ClinicFilter {
    pub district: Option<String>,
    pub specialty: Option<String>,
    pub status: Option<ResourceStatus>,
}

pub struct ClinicService {
    store: Arc<dyn ResourceStore<Clinic>>,
}

impl ClinicService {
    pub fn new(store: Arc<dyn ResourceStore<Clinic>>) -> Self {
        Self { store }
    }

    /// List clinics ordered by featured desc, sort_order desc, rating
    /// desc, id asc. Deterministic for equal inputs.
    pub async fn list(
        &self,
        filter: &ClinicFilter,
        page: PageRequest,
    ) -> Result<Page<Clinic>, PlatformError> {
        let mut items = self
            .store
            .list_all()
            .await
            .map_err(PlatformError::backend)?;

        items.retain(|c| {
            filter.district.as_ref().is_none_or(|d| &c.district == d)
                && filter
                    .specialty
                    .as_ref()
                    .is_none_or(|s| c.specialties.contains(s))
                && filter.status.is_none_or(|st| c.status == st)
        });

        items.sort_by(|a, b| {
            b.featured
                .cmp(&a.featured)
                .then(b.sort_order.cmp(&a.sort_order))
                .then(b.rating.partial_cmp(&a.rating).unwrap_or(std::cmp::Ordering::Equal))
                .then(a.id.cmp(&b.id))
        });

        Ok(page.slice(&items))
    }

    pub async fn get(&self, id: Uuid) -> Result<Clinic, PlatformError> {
        self.store
            .find(id)
            .await
            .map_err(PlatformError::backend)?
            .ok_or_else(|| PlatformError::not_found("clinic", id))
    }

    pub async fn create(&self, input: NewClinic) -> Result<Clinic, PlatformError> {
        require_field("name", &input.name)?;
        require_field("district", &input.district)?;
        require_field("address", &input.address)?;
        require_field("phone", &input.phone)?;
        require_field("description", &input.description)?;

        let now = Utc::now();
        let clinic = Clinic {
            id: Uuid::new_v4(),
            name: input.name,
            name_kr: input.name_kr,
            district: input.district,
            address: input.address,
            phone: input.phone,
            description: input.description,
            specialties: input.specialties,
            featured: input.featured,
            sort_order: input.sort_order,
            rating: 0.0,
            review_count: 0,
            status: ResourceStatus::Active,
            created_at: now,
            updated_at: now,
        };

        let created = self
            .store
            .insert(&clinic)
            .await
            .map_err(PlatformError::backend)?;

        debug!(id = %created.id, name = %created.name, "clinic created");
        Ok(created)
    }

    pub async fn update(&self, id: Uuid, patch: ClinicPatch) -> Result<Clinic, PlatformError> {
        let mut clinic = self.get(id).await?;

        if let Some(name) = patch.name {
            require_field("name", &name)?;
            clinic.name = name;
        }
        if let Some(name_kr) = patch.name_kr {
            clinic.name_kr = Some(name_kr);
        }
        if let Some(district) = patch.district {
            require_field("district", &district)?;
            clinic.district = district;
        }
        if let Some(address) = patch.address {
            clinic.address = address;
        }
        if let Some(phone) = patch.phone {
            clinic.phone = phone;
        }
        if let Some(description) = patch.description {
            clinic.description = description;
        }
        if let Some(specialties) = patch.specialties {
            clinic.specialties = specialties;
        }
        if let Some(featured) = patch.featured {
            clinic.featured = featured;
        }
        if let Some(sort_order) = patch.sort_order {
            clinic.sort_order = sort_order;
        }
        clinic.updated_at = Utc::now();

        self.store
            .update(&clinic)
            .await
            .map_err(PlatformError::backend)?
            .ok_or_else(|| PlatformError::not_found("clinic", id))
    }

    /// Deactivate a clinic (admin only). The record stays listable
    /// under a status=inactive filter.
    pub async fn delete(&self, id: Uuid, auth: &AuthContext) -> Result<(), PlatformError> {
        if !auth.is_admin {
            return Err(PlatformError::PermissionDenied);
        }

        let mut clinic = self.get(id).await?;
        clinic.status = ResourceStatus::Inactive;
        clinic.updated_at = Utc::now();

        self.store
            .update(&clinic)
            .await
            .map_err(PlatformError::backend)?
            .ok_or_else(|| PlatformError::not_found("clinic", id))?;

        debug!(id = %id, "clinic deactivated");
        Ok(())
    }

    /// Overwrite the denormalized rating aggregate. Called by the
    /// review service on moderation transitions.
    pub(crate) async fn set_rating(
        &self,
        id: Uuid,
        rating: f64,
        review_count: u32,
    ) -> Result<(), PlatformError> {
        let mut clinic = self.get(id).await?;
        clinic.rating = rating;
        clinic.review_count = review_count;
        clinic.updated_at = Utc::now();

        self.store
            .update(&clinic)
            .await
            .map_err(PlatformError::backend)?
            .ok_or_else(|| PlatformError::not_found("clinic", id))?;

        Ok(())
    }
}
