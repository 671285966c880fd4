//! Consultant service
//!
//! Same deactivate-on-delete policy as clinics.

use crate::contract::{
    AuthContext, Consultant, Page, PageRequest, PlatformError, ResourceStatus,
};
use crate::domain::repository::ResourceStore;
use crate::domain::validation::require_field;
use chrono::Utc;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct NewConsultant {
    pub name: String,
    pub name_kr: Option<String>,
    pub phone: String,
    pub languages: Vec<String>,
    pub service_areas: Vec<String>,
    pub specialties: Vec<String>,
    pub consultation_fee: i64,
    pub accompany_fee: i64,
    pub featured: bool,
    pub sort_order: i32,
}

#[derive(Debug, Clone, Default)]
pub struct ConsultantPatch {
    pub name: Option<String>,
    pub name_kr: Option<String>,
    pub phone: Option<String>,
    pub languages: Option<Vec<String>>,
    pub service_areas: Option<Vec<String>>,
    pub specialties: Option<Vec<String>>,
    pub consultation_fee: Option<i64>,
    pub accompany_fee: Option<i64>,
    pub featured: Option<bool>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct ConsultantFilter {
    pub service_area: Option<String>,
    pub language: Option<String>,
    pub status: Option<ResourceStatus>,
}

pub struct ConsultantService {
    store: Arc<dyn ResourceStore<Consultant>>,
}

impl ConsultantService {
    pub fn new(store: Arc<dyn ResourceStore<Consultant>>) -> Self {
        Self { store }
    }

    /// List consultants ordered by featured desc, sort_order desc,
    /// rating desc, id asc.
    pub async fn list(
        &self,
        filter: &ConsultantFilter,
        page: PageRequest,
    ) -> Result<Page<Consultant>, PlatformError> {
        let mut items = self
            .store
            .list_all()
            .await
            .map_err(PlatformError::backend)?;

        items.retain(|c| {
            filter
                .service_area
                .as_ref()
                .is_none_or(|a| c.service_areas.contains(a))
                && filter
                    .language
                    .as_ref()
                    .is_none_or(|l| c.languages.contains(l))
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

    pub async fn get(&self, id: Uuid) -> Result<Consultant, PlatformError> {
        self.store
            .find(id)
            .await
            .map_err(PlatformError::backend)?
            .ok_or_else(|| PlatformError::not_found("consultant", id))
    }

    pub async fn create(&self, input: NewConsultant) -> Result<Consultant, PlatformError> {
        require_field("name", &input.name)?;
        require_field("phone", &input.phone)?;
        if input.languages.is_empty() {
            return Err(PlatformError::validation(
                "languages",
                "at least one language is required",
            ));
        }

        let now = Utc::now();
        let consultant = Consultant {
            id: Uuid::new_v4(),
            name: input.name,
            name_kr: input.name_kr,
            phone: input.phone,
            languages: input.languages,
            service_areas: input.service_areas,
            specialties: input.specialties,
            consultation_fee: input.consultation_fee,
            accompany_fee: input.accompany_fee,
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
            .insert(&consultant)
            .await
            .map_err(PlatformError::backend)?;

        debug!(id = %created.id, name = %created.name, "consultant created");
        Ok(created)
    }

    pub async fn update(
        &self,
        id: Uuid,
        patch: ConsultantPatch,
    ) -> Result<Consultant, PlatformError> {
        let mut consultant = self.get(id).await?;

        if let Some(name) = patch.name {
            require_field("name", &name)?;
            consultant.name = name;
        }
        if let Some(name_kr) = patch.name_kr {
            consultant.name_kr = Some(name_kr);
        }
        if let Some(phone) = patch.phone {
            consultant.phone = phone;
        }
        if let Some(languages) = patch.languages {
            consultant.languages = languages;
        }
        if let Some(service_areas) = patch.service_areas {
            consultant.service_areas = service_areas;
        }
        if let Some(specialties) = patch.specialties {
            consultant.specialties = specialties;
        }
        if let Some(fee) = patch.consultation_fee {
            consultant.consultation_fee = fee;
        }
        if let Some(fee) = patch.accompany_fee {
            consultant.accompany_fee = fee;
        }
        if let Some(featured) = patch.featured {
            consultant.featured = featured;
        }
        if let Some(sort_order) = patch.sort_order {
            consultant.sort_order = sort_order;
        }
        consultant.updated_at = Utc::now();

        self.store
            .update(&consultant)
            .await
            .map_err(PlatformError::backend)?
            .ok_or_else(|| PlatformError::not_found("consultant", id))
    }

    /// Deactivate a consultant (admin only).
    pub async fn delete(&self, id: Uuid, auth: &AuthContext) -> Result<(), PlatformError> {
        if !auth.is_admin {
            return Err(PlatformError::PermissionDenied);
        }

        let mut consultant = self.get(id).await?;
        consultant.status = ResourceStatus::Inactive;
        consultant.updated_at = Utc::now();

        self.store
            .update(&consultant)
            .await
            .map_err(PlatformError::backend)?
            .ok_or_else(|| PlatformError::not_found("consultant", id))?;

        debug!(id = %id, "consultant deactivated");
        Ok(())
    }
}
