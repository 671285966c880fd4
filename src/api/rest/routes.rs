//! Route registration for the platform REST surface
//!
//! Admin mutations live under `/admin`; the auth middleware installed
//! by the embedding server is expected to inject an [`AuthContext`]
//! extension. Requests without one run as non-admin.

use super::{dto::*, error::Problem, handlers, AppState};
use crate::contract::AuthContext;
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use std::sync::Arc;
use uuid::Uuid;

/// Build the full application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Mode
        .route("/config/mode", get(get_mode_handler))
        .route("/admin/mode", put(set_mode_handler))
        // Config documents
        .route("/config", get(list_configs_handler))
        .route("/config/hot-searches", get(hot_searches_handler))
        .route("/config/search-history", post(record_search_handler))
        .route("/config/{key}", get(get_config_handler))
        .route("/admin/config/{key}", put(upsert_config_handler))
        .route("/admin/config/{key}", delete(delete_config_handler))
        // Clinics
        .route("/clinics", get(list_clinics_handler))
        .route("/clinics", post(create_clinic_handler))
        .route("/clinics/{id}", get(get_clinic_handler))
        .route("/clinics/{id}", put(update_clinic_handler))
        .route("/clinics/{id}", delete(delete_clinic_handler))
        // Treatment catalog
        .route("/services", get(list_treatments_handler))
        .route("/services", post(create_treatment_handler))
        .route("/services/{id}", get(get_treatment_handler))
        .route("/services/{id}", put(update_treatment_handler))
        .route("/services/{id}", delete(delete_treatment_handler))
        // Consultants
        .route("/consultants", get(list_consultants_handler))
        .route("/consultants", post(create_consultant_handler))
        .route("/consultants/{id}", get(get_consultant_handler))
        .route("/consultants/{id}", put(update_consultant_handler))
        .route("/consultants/{id}", delete(delete_consultant_handler))
        // Appointments
        .route("/appointments", get(list_appointments_handler))
        .route("/appointments", post(create_appointment_handler))
        .route("/appointments/{id}", get(get_appointment_handler))
        .route("/appointments/{id}", put(update_appointment_handler))
        .route("/appointments/{id}", delete(delete_appointment_handler))
        .route("/appointments/{id}/status", put(set_appointment_status_handler))
        // Reviews
        .route("/reviews", get(list_reviews_handler))
        .route("/reviews", post(create_review_handler))
        .route("/reviews/{id}", get(get_review_handler))
        .route("/reviews/{id}/moderate", put(moderate_review_handler))
        .route("/reviews/{id}", delete(delete_review_handler))
        // Make state available to the wrappers below
        .layer(Extension(state))
}

fn auth_or_anonymous(auth: Option<Extension<AuthContext>>) -> AuthContext {
    auth.map(|Extension(a)| a)
        .unwrap_or_else(AuthContext::non_admin)
}

// ===== Handler wrappers that extract state from Extension =====

async fn get_mode_handler(Extension(state): Extension<Arc<AppState>>) -> Json<ModeDto> {
    handlers::get_mode(state).await
}

async fn set_mode_handler(
    Extension(state): Extension<Arc<AppState>>,
    auth: Option<Extension<AuthContext>>,
    json: Json<SetModeRequest>,
) -> Result<Json<ModeDto>, Problem> {
    handlers::set_mode(state, auth_or_anonymous(auth), json).await
}

async fn list_configs_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<ConfigListResponse>, Problem> {
    handlers::list_configs(state).await
}

async fn hot_searches_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<handlers::HotSearchQuery>,
) -> Json<HotSearchResponse> {
    handlers::hot_searches(state, query).await
}

async fn record_search_handler(
    Extension(state): Extension<Arc<AppState>>,
    json: Json<RecordSearchRequest>,
) -> StatusCode {
    handlers::record_search(state, json).await
}

async fn get_config_handler(
    Extension(state): Extension<Arc<AppState>>,
    path: Path<String>,
) -> Json<ResolvedConfigDto> {
    handlers::get_config(state, path).await
}

async fn upsert_config_handler(
    Extension(state): Extension<Arc<AppState>>,
    auth: Option<Extension<AuthContext>>,
    path: Path<String>,
    json: Json<UpsertConfigRequest>,
) -> Result<(StatusCode, Json<ConfigDocumentDto>), Problem> {
    handlers::upsert_config(state, auth_or_anonymous(auth), path, json).await
}

async fn delete_config_handler(
    Extension(state): Extension<Arc<AppState>>,
    auth: Option<Extension<AuthContext>>,
    path: Path<String>,
) -> Result<StatusCode, Problem> {
    handlers::delete_config(state, auth_or_anonymous(auth), path).await
}

async fn list_clinics_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<handlers::ClinicListQuery>,
) -> Result<Json<ClinicListResponse>, Problem> {
    handlers::list_clinics(state, query).await
}

async fn create_clinic_handler(
    Extension(state): Extension<Arc<AppState>>,
    json: Json<CreateClinicRequest>,
) -> Result<(StatusCode, Json<ClinicDto>), Problem> {
    handlers::create_clinic(state, json).await
}

async fn get_clinic_handler(
    Extension(state): Extension<Arc<AppState>>,
    path: Path<Uuid>,
) -> Result<Json<ClinicDto>, Problem> {
    handlers::get_clinic(state, path).await
}

async fn update_clinic_handler(
    Extension(state): Extension<Arc<AppState>>,
    path: Path<Uuid>,
    json: Json<UpdateClinicRequest>,
) -> Result<Json<ClinicDto>, Problem> {
    handlers::update_clinic(state, path, json).await
}

async fn delete_clinic_handler(
    Extension(state): Extension<Arc<AppState>>,
    auth: Option<Extension<AuthContext>>,
    path: Path<Uuid>,
) -> Result<StatusCode, Problem> {
    handlers::delete_clinic(state, auth_or_anonymous(auth), path).await
}

async fn list_treatments_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<handlers::TreatmentListQuery>,
) -> Result<Json<TreatmentListResponse>, Problem> {
    handlers::list_treatments(state, query).await
}

async fn create_treatment_handler(
    Extension(state): Extension<Arc<AppState>>,
    json: Json<CreateTreatmentRequest>,
) -> Result<(StatusCode, Json<TreatmentDto>), Problem> {
    handlers::create_treatment(state, json).await
}

async fn get_treatment_handler(
    Extension(state): Extension<Arc<AppState>>,
    path: Path<Uuid>,
) -> Result<Json<TreatmentDto>, Problem> {
    handlers::get_treatment(state, path).await
}

async fn update_treatment_handler(
    Extension(state): Extension<Arc<AppState>>,
    path: Path<Uuid>,
    json: Json<UpdateTreatmentRequest>,
) -> Result<Json<TreatmentDto>, Problem> {
    handlers::update_treatment(state, path, json).await
}

async fn delete_treatment_handler(
    Extension(state): Extension<Arc<AppState>>,
    auth: Option<Extension<AuthContext>>,
    path: Path<Uuid>,
) -> Result<StatusCode, Problem> {
    handlers::delete_treatment(state, auth_or_anonymous(auth), path).await
}

async fn list_consultants_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<handlers::ConsultantListQuery>,
) -> Result<Json<ConsultantListResponse>, Problem> {
    handlers::list_consultants(state, query).await
}

async fn create_consultant_handler(
    Extension(state): Extension<Arc<AppState>>,
    json: Json<CreateConsultantRequest>,
) -> Result<(StatusCode, Json<ConsultantDto>), Problem> {
    handlers::create_consultant(state, json).await
}

async fn get_consultant_handler(
    Extension(state): Extension<Arc<AppState>>,
    path: Path<Uuid>,
) -> Result<Json<ConsultantDto>, Problem> {
    handlers::get_consultant(state, path).await
}

async fn update_consultant_handler(
    Extension(state): Extension<Arc<AppState>>,
    path: Path<Uuid>,
    json: Json<UpdateConsultantRequest>,
) -> Result<Json<ConsultantDto>, Problem> {
    handlers::update_consultant(state, path, json).await
}

async fn delete_consultant_handler(
    Extension(state): Extension<Arc<AppState>>,
    auth: Option<Extension<AuthContext>>,
    path: Path<Uuid>,
) -> Result<StatusCode, Problem> {
    handlers::delete_consultant(state, auth_or_anonymous(auth), path).await
}

async fn list_appointments_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<handlers::AppointmentListQuery>,
) -> Result<Json<AppointmentListResponse>, Problem> {
    handlers::list_appointments(state, query).await
}

async fn create_appointment_handler(
    Extension(state): Extension<Arc<AppState>>,
    json: Json<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<AppointmentDto>), Problem> {
    handlers::create_appointment(state, json).await
}

async fn get_appointment_handler(
    Extension(state): Extension<Arc<AppState>>,
    path: Path<Uuid>,
) -> Result<Json<AppointmentDto>, Problem> {
    handlers::get_appointment(state, path).await
}

async fn update_appointment_handler(
    Extension(state): Extension<Arc<AppState>>,
    path: Path<Uuid>,
    json: Json<UpdateAppointmentRequest>,
) -> Result<Json<AppointmentDto>, Problem> {
    handlers::update_appointment(state, path, json).await
}

async fn delete_appointment_handler(
    Extension(state): Extension<Arc<AppState>>,
    auth: Option<Extension<AuthContext>>,
    path: Path<Uuid>,
) -> Result<StatusCode, Problem> {
    handlers::delete_appointment(state, auth_or_anonymous(auth), path).await
}

async fn set_appointment_status_handler(
    Extension(state): Extension<Arc<AppState>>,
    path: Path<Uuid>,
    json: Json<AppointmentStatusRequest>,
) -> Result<Json<AppointmentDto>, Problem> {
    handlers::set_appointment_status(state, path, json).await
}

async fn list_reviews_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<handlers::ReviewListQuery>,
) -> Result<Json<ReviewListResponse>, Problem> {
    handlers::list_reviews(state, query).await
}

async fn create_review_handler(
    Extension(state): Extension<Arc<AppState>>,
    json: Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<ReviewDto>), Problem> {
    handlers::create_review(state, json).await
}

async fn get_review_handler(
    Extension(state): Extension<Arc<AppState>>,
    path: Path<Uuid>,
) -> Result<Json<ReviewDto>, Problem> {
    handlers::get_review(state, path).await
}

async fn moderate_review_handler(
    Extension(state): Extension<Arc<AppState>>,
    auth: Option<Extension<AuthContext>>,
    path: Path<Uuid>,
    json: Json<ModerateReviewRequest>,
) -> Result<Json<ReviewDto>, Problem> {
    handlers::moderate_review(state, auth_or_anonymous(auth), path, json).await
}

async fn delete_review_handler(
    Extension(state): Extension<Arc<AppState>>,
    auth: Option<Extension<AuthContext>>,
    path: Path<Uuid>,
) -> Result<StatusCode, Problem> {
    handlers::delete_review(state, auth_or_anonymous(auth), path).await
}
