//! Mapper implementations for converting between DTOs and contract models
//!
//! All From/Into implementations for bidirectional conversion between
//! REST DTOs and transport-agnostic contract models live here.

use super::dto::*;
use crate::contract;
use crate::domain::resources::{
    appointment::{AppointmentPatch, NewAppointment},
    catalog::{NewTreatment, TreatmentPatch},
    clinic::{ClinicPatch, NewClinic},
    consultant::{ConsultantPatch, NewConsultant},
    review::NewReview,
};
use std::str::FromStr;

// ===== Config conversions =====

impl From<contract::ResolvedConfig> for ResolvedConfigDto {
    fn from(resolved: contract::ResolvedConfig) -> Self {
        Self {
            key: resolved.key,
            payload: resolved.payload,
            is_default: resolved.is_default,
        }
    }
}

impl From<contract::ConfigDocument> for ConfigDocumentDto {
    fn from(doc: contract::ConfigDocument) -> Self {
        Self {
            key: doc.key,
            payload: doc.payload,
            active: doc.active,
            last_modified_by: doc.last_modified_by,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

// ===== Hot search conversions =====

impl From<contract::HotSearchEntry> for HotSearchEntryDto {
    fn from(entry: contract::HotSearchEntry) -> Self {
        Self {
            keyword: entry.keyword,
            priority: entry.priority,
            is_hot: entry.is_hot,
            source: entry.source.as_str().to_string(),
        }
    }
}

impl From<Vec<contract::HotSearchEntry>> for HotSearchResponse {
    fn from(entries: Vec<contract::HotSearchEntry>) -> Self {
        Self {
            keywords: entries.iter().map(|e| e.keyword.clone()).collect(),
            items: entries.into_iter().map(Into::into).collect(),
        }
    }
}

// ===== Clinic conversions =====

impl From<contract::Clinic> for ClinicDto {
    fn from(clinic: contract::Clinic) -> Self {
        Self {
            id: clinic.id,
            name: clinic.name,
            name_kr: clinic.name_kr,
            district: clinic.district,
            address: clinic.address,
            phone: clinic.phone,
            description: clinic.description,
            specialties: clinic.specialties,
            featured: clinic.featured,
            sort_order: clinic.sort_order,
            rating: clinic.rating,
            review_count: clinic.review_count,
            status: clinic.status.as_str().to_string(),
            created_at: clinic.created_at,
            updated_at: clinic.updated_at,
        }
    }
}

impl From<CreateClinicRequest> for NewClinic {
    fn from(req: CreateClinicRequest) -> Self {
        Self {
            name: req.name,
            name_kr: req.name_kr,
            district: req.district,
            address: req.address,
            phone: req.phone,
            description: req.description,
            specialties: req.specialties,
            featured: req.featured,
            sort_order: req.sort_order,
        }
    }
}

impl From<UpdateClinicRequest> for ClinicPatch {
    fn from(req: UpdateClinicRequest) -> Self {
        Self {
            name: req.name,
            name_kr: req.name_kr,
            district: req.district,
            address: req.address,
            phone: req.phone,
            description: req.description,
            specialties: req.specialties,
            featured: req.featured,
            sort_order: req.sort_order,
        }
    }
}

// ===== Treatment conversions =====

impl From<contract::CatalogService> for TreatmentDto {
    fn from(treatment: contract::CatalogService) -> Self {
        Self {
            id: treatment.id,
            name: treatment.name,
            name_kr: treatment.name_kr,
            category: treatment.category,
            description: treatment.description,
            price: treatment.price,
            sort_order: treatment.sort_order,
            status: treatment.status.as_str().to_string(),
            created_at: treatment.created_at,
            updated_at: treatment.updated_at,
        }
    }
}

impl From<CreateTreatmentRequest> for NewTreatment {
    fn from(req: CreateTreatmentRequest) -> Self {
        Self {
            name: req.name,
            name_kr: req.name_kr,
            category: req.category,
            description: req.description,
            price: req.price,
            sort_order: req.sort_order,
        }
    }
}

impl TryFrom<UpdateTreatmentRequest> for TreatmentPatch {
    type Error = contract::PlatformError;

    fn try_from(req: UpdateTreatmentRequest) -> Result<Self, Self::Error> {
        let status = req
            .status
            .map(|s| contract::ResourceStatus::from_str(&s))
            .transpose()?;
        Ok(Self {
            name: req.name,
            name_kr: req.name_kr,
            category: req.category,
            description: req.description,
            price: req.price,
            sort_order: req.sort_order,
            status,
        })
    }
}

// ===== Consultant conversions =====

impl From<contract::Consultant> for ConsultantDto {
    fn from(consultant: contract::Consultant) -> Self {
        Self {
            id: consultant.id,
            name: consultant.name,
            name_kr: consultant.name_kr,
            phone: consultant.phone,
            languages: consultant.languages,
            service_areas: consultant.service_areas,
            specialties: consultant.specialties,
            consultation_fee: consultant.consultation_fee,
            accompany_fee: consultant.accompany_fee,
            featured: consultant.featured,
            sort_order: consultant.sort_order,
            rating: consultant.rating,
            review_count: consultant.review_count,
            status: consultant.status.as_str().to_string(),
            created_at: consultant.created_at,
            updated_at: consultant.updated_at,
        }
    }
}

impl From<CreateConsultantRequest> for NewConsultant {
    fn from(req: CreateConsultantRequest) -> Self {
        Self {
            name: req.name,
            name_kr: req.name_kr,
            phone: req.phone,
            languages: req.languages,
            service_areas: req.service_areas,
            specialties: req.specialties,
            consultation_fee: req.consultation_fee,
            accompany_fee: req.accompany_fee,
            featured: req.featured,
            sort_order: req.sort_order,
        }
    }
}

impl From<UpdateConsultantRequest> for ConsultantPatch {
    fn from(req: UpdateConsultantRequest) -> Self {
        Self {
            name: req.name,
            name_kr: req.name_kr,
            phone: req.phone,
            languages: req.languages,
            service_areas: req.service_areas,
            specialties: req.specialties,
            consultation_fee: req.consultation_fee,
            accompany_fee: req.accompany_fee,
            featured: req.featured,
            sort_order: req.sort_order,
        }
    }
}

// ===== Appointment conversions =====

impl From<contract::Appointment> for AppointmentDto {
    fn from(appointment: contract::Appointment) -> Self {
        Self {
            id: appointment.id,
            clinic_id: appointment.clinic_id,
            clinic_name: appointment.clinic_name,
            user_id: appointment.user_id,
            service_name: appointment.service_name,
            scheduled_at: appointment.scheduled_at,
            status: appointment.status.as_str().to_string(),
            cancelled_by: appointment.cancelled_by.map(|c| c.as_str().to_string()),
            note: appointment.note,
            created_at: appointment.created_at,
            updated_at: appointment.updated_at,
        }
    }
}

impl From<CreateAppointmentRequest> for NewAppointment {
    fn from(req: CreateAppointmentRequest) -> Self {
        Self {
            clinic_id: req.clinic_id,
            user_id: req.user_id,
            service_name: req.service_name,
            scheduled_at: req.scheduled_at,
            note: req.note,
        }
    }
}

impl From<UpdateAppointmentRequest> for AppointmentPatch {
    fn from(req: UpdateAppointmentRequest) -> Self {
        Self {
            scheduled_at: req.scheduled_at,
            note: req.note,
        }
    }
}

// ===== Review conversions =====

impl From<contract::Review> for ReviewDto {
    fn from(review: contract::Review) -> Self {
        Self {
            id: review.id,
            clinic_id: review.clinic_id,
            user_id: review.user_id,
            overall: review.overall,
            aspects: review.aspects,
            content: review.content,
            status: review.status.as_str().to_string(),
            created_at: review.created_at,
            updated_at: review.updated_at,
        }
    }
}

impl From<CreateReviewRequest> for NewReview {
    fn from(req: CreateReviewRequest) -> Self {
        Self {
            clinic_id: req.clinic_id,
            user_id: req.user_id,
            overall: req.overall,
            aspects: req.aspects,
            content: req.content,
        }
    }
}
