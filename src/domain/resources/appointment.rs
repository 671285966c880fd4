//! Appointment service
//!
//! Enforces the booking state machine: pending -> {confirmed,
//! cancelled}, confirmed -> {completed, cancelled}; completed and
//! cancelled are terminal. Illegal transitions fail and leave the
//! stored status untouched.

use crate::contract::{
    Appointment, AppointmentStatus, AuthContext, CancelledBy, Clinic, Page, PageRequest,
    PlatformError, ResourceStatus,
};
use crate::domain::repository::ResourceStore;
use crate::domain::validation::require_field;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub clinic_id: Uuid,
    pub user_id: String,
    pub service_name: String,
    pub scheduled_at: DateTime<Utc>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AppointmentPatch {
    pub scheduled_at: Option<DateTime<Utc>>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AppointmentFilter {
    pub clinic_id: Option<Uuid>,
    pub user_id: Option<String>,
    pub status: Option<AppointmentStatus>,
}

pub struct AppointmentService {
    store: Arc<dyn ResourceStore<Appointment>>,
    clinics: Arc<dyn ResourceStore<Clinic>>,
}

impl AppointmentService {
    pub fn new(
        store: Arc<dyn ResourceStore<Appointment>>,
        clinics: Arc<dyn ResourceStore<Clinic>>,
    ) -> Self {
        Self { store, clinics }
    }

    /// List appointments, newest first, id asc tie-break.
    pub async fn list(
        &self,
        filter: &AppointmentFilter,
        page: PageRequest,
    ) -> Result<Page<Appointment>, PlatformError> {
        let mut items = self
            .store
            .list_all()
            .await
            .map_err(PlatformError::backend)?;

        items.retain(|a| {
            filter.clinic_id.is_none_or(|c| a.clinic_id == c)
                && filter.user_id.as_ref().is_none_or(|u| &a.user_id == u)
                && filter.status.is_none_or(|st| a.status == st)
        });

        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));

        Ok(page.slice(&items))
    }

    pub async fn get(&self, id: Uuid) -> Result<Appointment, PlatformError> {
        self.store
            .find(id)
            .await
            .map_err(PlatformError::backend)?
            .ok_or_else(|| PlatformError::not_found("appointment", id))
    }

    /// Book an appointment. The clinic must exist and be active; its
    /// name is denormalized onto the booking.
    pub async fn create(&self, input: NewAppointment) -> Result<Appointment, PlatformError> {
        require_field("user_id", &input.user_id)?;
        require_field("service_name", &input.service_name)?;

        let clinic = self
            .clinics
            .find(input.clinic_id)
            .await
            .map_err(PlatformError::backend)?
            .ok_or_else(|| PlatformError::not_found("clinic", input.clinic_id))?;

        if clinic.status != ResourceStatus::Active {
            return Err(PlatformError::validation(
                "clinic_id",
                "clinic is not accepting bookings",
            ));
        }

        let now = Utc::now();
        let appointment = Appointment {
            id: Uuid::new_v4(),
            clinic_id: clinic.id,
            clinic_name: clinic.name,
            user_id: input.user_id,
            service_name: input.service_name,
            scheduled_at: input.scheduled_at,
            status: AppointmentStatus::Pending,
            cancelled_by: None,
            note: input.note,
            created_at: now,
            updated_at: now,
        };

        let created = self
            .store
            .insert(&appointment)
            .await
            .map_err(PlatformError::backend)?;

        debug!(id = %created.id, clinic = %created.clinic_name, "appointment booked");
        Ok(created)
    }

    /// Reschedule or annotate. Terminal bookings cannot be edited.
    pub async fn update(
        &self,
        id: Uuid,
        patch: AppointmentPatch,
    ) -> Result<Appointment, PlatformError> {
        let mut appointment = self.get(id).await?;

        if appointment.status.is_terminal() {
            return Err(PlatformError::InvalidStateTransition {
                from: appointment.status.as_str().to_string(),
                to: appointment.status.as_str().to_string(),
            });
        }

        if let Some(scheduled_at) = patch.scheduled_at {
            appointment.scheduled_at = scheduled_at;
        }
        if let Some(note) = patch.note {
            appointment.note = Some(note);
        }
        appointment.updated_at = Utc::now();

        self.store
            .update(&appointment)
            .await
            .map_err(PlatformError::backend)?
            .ok_or_else(|| PlatformError::not_found("appointment", id))
    }

    /// Move a booking through its lifecycle.
    pub async fn transition(
        &self,
        id: Uuid,
        to: AppointmentStatus,
        cancelled_by: Option<CancelledBy>,
    ) -> Result<Appointment, PlatformError> {
        let mut appointment = self.get(id).await?;

        if !appointment.status.can_transition_to(to) {
            return Err(PlatformError::InvalidStateTransition {
                from: appointment.status.as_str().to_string(),
                to: to.as_str().to_string(),
            });
        }

        appointment.status = to;
        appointment.cancelled_by = if to == AppointmentStatus::Cancelled {
            Some(cancelled_by.unwrap_or(CancelledBy::User))
        } else {
            None
        };
        appointment.updated_at = Utc::now();

        let updated = self
            .store
            .update(&appointment)
            .await
            .map_err(PlatformError::backend)?
            .ok_or_else(|| PlatformError::not_found("appointment", id))?;

        debug!(id = %id, status = to.as_str(), "appointment transitioned");
        Ok(updated)
    }

    /// Physically remove a booking (admin only). Normal flows cancel
    /// instead; this exists for data cleanup.
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
            return Err(PlatformError::not_found("appointment", id));
        }

        debug!(id = %id, "appointment removed");
        Ok(())
    }

    /// Convenience wrapper for the common cancellation path.
    pub async fn cancel(
        &self,
        id: Uuid,
        by: CancelledBy,
    ) -> Result<Appointment, PlatformError> {
        self.transition(id, AppointmentStatus::Cancelled, Some(by)).await
    }
}
