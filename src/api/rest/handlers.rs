//! HTTP request handlers - thin layer that delegates to domain services

use super::{
    dto::*,
    error::{map_domain_error, Problem},
    AppState,
};
use crate::contract::{
    AppointmentStatus, AuthContext, CancelledBy, PageRequest, ResourceStatus, ReviewStatus,
    SearchLogEntry,
};
use crate::domain::resources::{
    appointment::AppointmentFilter, catalog::TreatmentFilter, clinic::ClinicFilter,
    consultant::ConsultantFilter, review::ReviewFilter,
};
use axum::{extract::Path, http::StatusCode, Json};
use chrono::Utc;
use serde::Deserialize;
use tracing::warn;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

fn page_request(page: Option<usize>, per_page: Option<usize>) -> PageRequest {
    let defaults = PageRequest::default();
    PageRequest {
        page: page.unwrap_or(defaults.page),
        per_page: per_page.unwrap_or(defaults.per_page),
    }
}

fn parse_status<T: FromStr<Err = crate::contract::PlatformError>>(
    raw: &Option<String>,
) -> Result<Option<T>, Problem> {
    raw.as_deref()
        .map(T::from_str)
        .transpose()
        .map_err(map_domain_error)
}

// ===== Mode handlers =====

pub async fn get_mode(state: Arc<AppState>) -> Json<ModeDto> {
    let mode = state.modes.current().await;
    Json(ModeDto {
        mode: mode.as_str().to_string(),
    })
}

pub async fn set_mode(
    state: Arc<AppState>,
    auth: AuthContext,
    Json(req): Json<SetModeRequest>,
) -> Result<Json<ModeDto>, Problem> {
    let mode = state
        .modes
        .set_mode(&req.mode, &auth)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(ModeDto {
        mode: mode.as_str().to_string(),
    }))
}

// ===== Config handlers =====

/// Resolve a config key; always succeeds, substituting defaults.
pub async fn get_config(
    state: Arc<AppState>,
    Path(key): Path<String>,
) -> Json<ResolvedConfigDto> {
    Json(state.configs.get_config(&key).await.into())
}

pub async fn list_configs(state: Arc<AppState>) -> Result<Json<ConfigListResponse>, Problem> {
    let docs = state.configs.list_configs().await.map_err(map_domain_error)?;

    let items: Vec<ConfigDocumentDto> = docs.into_iter().map(Into::into).collect();
    let total = items.len();
    Ok(Json(ConfigListResponse { items, total }))
}

pub async fn upsert_config(
    state: Arc<AppState>,
    auth: AuthContext,
    Path(key): Path<String>,
    Json(req): Json<UpsertConfigRequest>,
) -> Result<(StatusCode, Json<ConfigDocumentDto>), Problem> {
    let doc = state
        .configs
        .set_config(&key, req.payload, req.active, &auth)
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::OK, Json(doc.into())))
}

pub async fn delete_config(
    state: Arc<AppState>,
    auth: AuthContext,
    Path(key): Path<String>,
) -> Result<StatusCode, Problem> {
    state
        .configs
        .delete_config(&key, &auth)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

// ===== Hot search handlers =====

#[derive(Debug, Deserialize)]
pub struct HotSearchQuery {
    /// Length of the served list
    pub limit: Option<usize>,
    /// Search-log lookback window in days
    pub days: Option<u32>,
}

pub async fn hot_searches(
    state: Arc<AppState>,
    query: HotSearchQuery,
) -> Json<HotSearchResponse> {
    let limit = query.limit.unwrap_or(state.config.hot_search_limit);
    let days = query.days.unwrap_or(state.config.hot_search_lookback_days);

    let entries = state.hot_searches.combined(limit, days).await;
    Json(entries.into())
}

/// Record one search event for later aggregation. Logging failures are
/// swallowed: a broken log backend must never disturb the searcher.
pub async fn record_search(state: Arc<AppState>, Json(req): Json<RecordSearchRequest>) -> StatusCode {
    let keyword = req.keyword.trim();
    if keyword.is_empty() {
        return StatusCode::NO_CONTENT;
    }

    let entry = SearchLogEntry {
        keyword: keyword.to_string(),
        clicked: req.clicked,
        result_count: req.result_count,
        searched_at: Utc::now(),
    };
    if let Err(err) = state.search_logs.record(entry).await {
        warn!(error = %err, "search log write failed");
    }
    StatusCode::NO_CONTENT
}

// ===== Clinic handlers =====

#[derive(Debug, Deserialize)]
pub struct ClinicListQuery {
    pub district: Option<String>,
    pub specialty: Option<String>,
    pub status: Option<String>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

pub async fn list_clinics(
    state: Arc<AppState>,
    query: ClinicListQuery,
) -> Result<Json<ClinicListResponse>, Problem> {
    let filter = ClinicFilter {
        district: query.district,
        specialty: query.specialty,
        status: parse_status::<ResourceStatus>(&query.status)?,
    };

    let page = state
        .clinics
        .list(&filter, page_request(query.page, query.per_page))
        .await
        .map_err(map_domain_error)?;

    Ok(Json(ClinicListResponse {
        total: page.total,
        items: page.items.into_iter().map(Into::into).collect(),
    }))
}

pub async fn get_clinic(
    state: Arc<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ClinicDto>, Problem> {
    let clinic = state.clinics.get(id).await.map_err(map_domain_error)?;
    Ok(Json(clinic.into()))
}

pub async fn create_clinic(
    state: Arc<AppState>,
    Json(req): Json<CreateClinicRequest>,
) -> Result<(StatusCode, Json<ClinicDto>), Problem> {
    let clinic = state
        .clinics
        .create(req.into())
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(clinic.into())))
}

pub async fn update_clinic(
    state: Arc<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateClinicRequest>,
) -> Result<Json<ClinicDto>, Problem> {
    let clinic = state
        .clinics
        .update(id, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok(Json(clinic.into()))
}

pub async fn delete_clinic(
    state: Arc<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, Problem> {
    state
        .clinics
        .delete(id, &auth)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

// ===== Treatment handlers =====

#[derive(Debug, Deserialize)]
pub struct TreatmentListQuery {
    pub category: Option<String>,
    pub status: Option<String>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

pub async fn list_treatments(
    state: Arc<AppState>,
    query: TreatmentListQuery,
) -> Result<Json<TreatmentListResponse>, Problem> {
    let filter = TreatmentFilter {
        category: query.category,
        status: parse_status::<ResourceStatus>(&query.status)?,
    };

    let page = state
        .catalog
        .list(&filter, page_request(query.page, query.per_page))
        .await
        .map_err(map_domain_error)?;

    Ok(Json(TreatmentListResponse {
        total: page.total,
        items: page.items.into_iter().map(Into::into).collect(),
    }))
}

pub async fn get_treatment(
    state: Arc<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TreatmentDto>, Problem> {
    let treatment = state.catalog.get(id).await.map_err(map_domain_error)?;
    Ok(Json(treatment.into()))
}

pub async fn create_treatment(
    state: Arc<AppState>,
    Json(req): Json<CreateTreatmentRequest>,
) -> Result<(StatusCode, Json<TreatmentDto>), Problem> {
    let treatment = state
        .catalog
        .create(req.into())
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(treatment.into())))
}

pub async fn update_treatment(
    state: Arc<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTreatmentRequest>,
) -> Result<Json<TreatmentDto>, Problem> {
    let patch = req.try_into().map_err(map_domain_error)?;
    let treatment = state
        .catalog
        .update(id, patch)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(treatment.into()))
}

pub async fn delete_treatment(
    state: Arc<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, Problem> {
    state
        .catalog
        .delete(id, &auth)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

// ===== Consultant handlers =====

#[derive(Debug, Deserialize)]
pub struct ConsultantListQuery {
    pub service_area: Option<String>,
    pub language: Option<String>,
    pub status: Option<String>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

pub async fn list_consultants(
    state: Arc<AppState>,
    query: ConsultantListQuery,
) -> Result<Json<ConsultantListResponse>, Problem> {
    let filter = ConsultantFilter {
        service_area: query.service_area,
        language: query.language,
        status: parse_status::<ResourceStatus>(&query.status)?,
    };

    let page = state
        .consultants
        .list(&filter, page_request(query.page, query.per_page))
        .await
        .map_err(map_domain_error)?;

    Ok(Json(ConsultantListResponse {
        total: page.total,
        items: page.items.into_iter().map(Into::into).collect(),
    }))
}

pub async fn get_consultant(
    state: Arc<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ConsultantDto>, Problem> {
    let consultant = state.consultants.get(id).await.map_err(map_domain_error)?;
    Ok(Json(consultant.into()))
}

pub async fn create_consultant(
    state: Arc<AppState>,
    Json(req): Json<CreateConsultantRequest>,
) -> Result<(StatusCode, Json<ConsultantDto>), Problem> {
    let consultant = state
        .consultants
        .create(req.into())
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(consultant.into())))
}

pub async fn update_consultant(
    state: Arc<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateConsultantRequest>,
) -> Result<Json<ConsultantDto>, Problem> {
    let consultant = state
        .consultants
        .update(id, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok(Json(consultant.into()))
}

pub async fn delete_consultant(
    state: Arc<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, Problem> {
    state
        .consultants
        .delete(id, &auth)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

// ===== Appointment handlers =====

#[derive(Debug, Deserialize)]
pub struct AppointmentListQuery {
    pub clinic_id: Option<Uuid>,
    pub user_id: Option<String>,
    pub status: Option<String>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

pub async fn list_appointments(
    state: Arc<AppState>,
    query: AppointmentListQuery,
) -> Result<Json<AppointmentListResponse>, Problem> {
    let filter = AppointmentFilter {
        clinic_id: query.clinic_id,
        user_id: query.user_id,
        status: parse_status::<AppointmentStatus>(&query.status)?,
    };

    let page = state
        .appointments
        .list(&filter, page_request(query.page, query.per_page))
        .await
        .map_err(map_domain_error)?;

    Ok(Json(AppointmentListResponse {
        total: page.total,
        items: page.items.into_iter().map(Into::into).collect(),
    }))
}

pub async fn get_appointment(
    state: Arc<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AppointmentDto>, Problem> {
    let appointment = state.appointments.get(id).await.map_err(map_domain_error)?;
    Ok(Json(appointment.into()))
}

pub async fn create_appointment(
    state: Arc<AppState>,
    Json(req): Json<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<AppointmentDto>), Problem> {
    let appointment = state
        .appointments
        .create(req.into())
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(appointment.into())))
}

pub async fn update_appointment(
    state: Arc<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateAppointmentRequest>,
) -> Result<Json<AppointmentDto>, Problem> {
    let appointment = state
        .appointments
        .update(id, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok(Json(appointment.into()))
}

pub async fn set_appointment_status(
    state: Arc<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AppointmentStatusRequest>,
) -> Result<Json<AppointmentDto>, Problem> {
    let to = AppointmentStatus::from_str(&req.status).map_err(map_domain_error)?;
    let cancelled_by = req
        .cancelled_by
        .as_deref()
        .map(CancelledBy::from_str)
        .transpose()
        .map_err(map_domain_error)?;

    let appointment = state
        .appointments
        .transition(id, to, cancelled_by)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(appointment.into()))
}

pub async fn delete_appointment(
    state: Arc<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, Problem> {
    state
        .appointments
        .delete(id, &auth)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

// ===== Review handlers =====

#[derive(Debug, Deserialize)]
pub struct ReviewListQuery {
    pub clinic_id: Option<Uuid>,
    pub status: Option<String>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

pub async fn list_reviews(
    state: Arc<AppState>,
    query: ReviewListQuery,
) -> Result<Json<ReviewListResponse>, Problem> {
    let filter = ReviewFilter {
        clinic_id: query.clinic_id,
        status: parse_status::<ReviewStatus>(&query.status)?,
    };

    let page = state
        .reviews
        .list(&filter, page_request(query.page, query.per_page))
        .await
        .map_err(map_domain_error)?;

    Ok(Json(ReviewListResponse {
        total: page.total,
        items: page.items.into_iter().map(Into::into).collect(),
    }))
}

pub async fn get_review(
    state: Arc<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReviewDto>, Problem> {
    let review = state.reviews.get(id).await.map_err(map_domain_error)?;
    Ok(Json(review.into()))
}

pub async fn create_review(
    state: Arc<AppState>,
    Json(req): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<ReviewDto>), Problem> {
    let review = state
        .reviews
        .create(req.into())
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(review.into())))
}

pub async fn moderate_review(
    state: Arc<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
    Json(req): Json<ModerateReviewRequest>,
) -> Result<Json<ReviewDto>, Problem> {
    let to = ReviewStatus::from_str(&req.status).map_err(map_domain_error)?;

    let review = state
        .reviews
        .moderate(id, to, &auth)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(review.into()))
}

pub async fn delete_review(
    state: Arc<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, Problem> {
    state
        .reviews
        .delete(id, &auth)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}
