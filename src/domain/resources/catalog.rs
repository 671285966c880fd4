//! Catalog service - the bookable treatments
//!
//! Treatments carry no durable back-references (appointments
//! denormalize the service name), so deletion here is physical.

use crate::contract::{
    AuthContext, CatalogService as Treatment, Page, PageRequest, PlatformError, ResourceStatus,
};
use crate::domain::repository::ResourceStore;
use crate::domain::validation::require_field;
use chrono::Utc;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct NewTreatment {
    pub name: String,
    pub name_kr: Option<String>,
    pub category: String,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub sort_order: i32,
}

#[derive(Debug, Clone, Default)]
pub struct TreatmentPatch {
    pub name: Option<String>,
    pub name_kr: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub sort_order: Option<i32>,
    pub status: Option<ResourceStatus>,
}

#[derive(Debug, Clone, Default)]
pub struct TreatmentFilter {
    pub category: Option<String>,
    pub status: Option<ResourceStatus>,
}

pub struct CatalogServiceApi {
    store: Arc<dyn ResourceStore<Treatment>>,
}

impl CatalogServiceApi {
    pub fn new(store: Arc<dyn ResourceStore<Treatment>>) -> Self {
        Self { store }
    }

    /// List treatments ordered by sort_order desc, id asc.
    pub async fn list(
        &self,
        filter: &TreatmentFilter,
        page: PageRequest,
    ) -> Result<Page<Treatment>, PlatformError> {
        let mut items = self
            .store
            .list_all()
            .await
            .map_err(PlatformError::backend)?;

        items.retain(|t| {
            filter.category.as_ref().is_none_or(|c| &t.category == c)
                && filter.status.is_none_or(|st| t.status == st)
        });

        items.sort_by(|a, b| b.sort_order.cmp(&a.sort_order).then(a.id.cmp(&b.id)));

        Ok(page.slice(&items))
    }

    pub async fn get(&self, id: Uuid) -> Result<Treatment, PlatformError> {
        self.store
            .find(id)
            .await
            .map_err(PlatformError::backend)?
            .ok_or_else(|| PlatformError::not_found("service", id))
    }

    pub async fn create(&self, input: NewTreatment) -> Result<Treatment, PlatformError> {
        require_field("name", &input.name)?;
        require_field("category", &input.category)?;
        if input.price.is_some_and(|p| p < 0) {
            return Err(PlatformError::validation("price", "price cannot be negative"));
        }

        let now = Utc::now();
        let treatment = Treatment {
            id: Uuid::new_v4(),
            name: input.name,
            name_kr: input.name_kr,
            category: input.category,
            description: input.description,
            price: input.price,
            sort_order: input.sort_order,
            status: ResourceStatus::Active,
            created_at: now,
            updated_at: now,
        };

        let created = self
            .store
            .insert(&treatment)
            .await
            .map_err(PlatformError::backend)?;

        debug!(id = %created.id, name = %created.name, "treatment created");
        Ok(created)
    }

    pub async fn update(&self, id: Uuid, patch: TreatmentPatch) -> Result<Treatment, PlatformError> {
        let mut treatment = self.get(id).await?;

        if let Some(name) = patch.name {
            require_field("name", &name)?;
            treatment.name = name;
        }
        if let Some(name_kr) = patch.name_kr {
            treatment.name_kr = Some(name_kr);
        }
        if let Some(category) = patch.category {
            require_field("category", &category)?;
            treatment.category = category;
        }
        if let Some(description) = patch.description {
            treatment.description = Some(description);
        }
        if let Some(price) = patch.price {
            if price < 0 {
                return Err(PlatformError::validation("price", "price cannot be negative"));
            }
            treatment.price = Some(price);
        }
        if let Some(sort_order) = patch.sort_order {
            treatment.sort_order = sort_order;
        }
        if let Some(status) = patch.status {
            treatment.status = status;
        }
        treatment.updated_at = Utc::now();

        self.store
            .update(&treatment)
            .await
            .map_err(PlatformError::backend)?
            .ok_or_else(|| PlatformError::not_found("service", id))
    }

    /// Physically remove a treatment (admin only).
    pub async fn delete(&self, id: Uuid, auth: &AuthContext) -> Result<(), PlatformError> {
        if !auth.is_admin {
            return Err(PlatformError::PermissionDenied);
        }

        let removed = self
            .store
            .remove(id)
            .await
            .map_err(PlatformError::backend)?;

        if !removed {
            return Err(PlatformError::not_found("service", id));
        }

        debug!(id = %id, "treatment deleted");
        Ok(())
    }
}
