//! REST DTOs with serde derives for HTTP API

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// ===== Mode DTOs =====

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ModeDto {
    /// Active content mode
    #[schema(example = "review")]
    pub mode: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SetModeRequest {
    /// One of "review" or "production"
    #[schema(example = "production")]
    pub mode: String,
}

// ===== Config DTOs =====

/// Resolved config payload; `is_default` tells whether the compiled-in
/// default was substituted for a missing stored document.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ResolvedConfigDto {
    #[schema(example = "hot_searches")]
    pub key: String,

    pub payload: serde_json::Value,

    pub is_default: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ConfigDocumentDto {
    #[schema(example = "hot_searches")]
    pub key: String,

    pub payload: serde_json::Value,

    pub active: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_by: Option<String>,

    pub created_at: chrono::DateTime<chrono::Utc>,

    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpsertConfigRequest {
    /// Schema-free config payload
    pub payload: serde_json::Value,

    /// Documents default to active; inactive documents resolve to defaults
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ConfigListResponse {
    pub items: Vec<ConfigDocumentDto>,

    pub total: usize,
}

// ===== Hot search DTOs =====

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HotSearchEntryDto {
    #[schema(example = "双眼皮")]
    pub keyword: String,

    pub priority: i64,

    pub is_hot: bool,

    /// "admin" or "algorithm"
    #[schema(example = "admin")]
    pub source: String,
}

/// One user search, reported by the frontend after the results render.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RecordSearchRequest {
    #[schema(example = "玻尿酸")]
    pub keyword: String,

    #[serde(default)]
    pub clicked: bool,

    #[serde(default)]
    pub result_count: u32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HotSearchResponse {
    /// Keywords only, in display order
    pub keywords: Vec<String>,

    pub items: Vec<HotSearchEntryDto>,
}

// ===== Clinic DTOs =====

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClinicDto {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_kr: Option<String>,
    pub district: String,
    pub address: String,
    pub phone: String,
    pub description: String,
    pub specialties: Vec<String>,
    pub featured: bool,
    pub sort_order: i32,
    pub rating: f64,
    pub review_count: u32,
    #[schema(example = "active")]
    pub status: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateClinicRequest {
    pub name: String,
    #[serde(default)]
    pub name_kr: Option<String>,
    pub district: String,
    pub address: String,
    pub phone: String,
    pub description: String,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateClinicRequest {
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

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClinicListResponse {
    pub items: Vec<ClinicDto>,
    pub total: usize,
}

// ===== Treatment DTOs =====

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TreatmentDto {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_kr: Option<String>,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Reference price in KRW; absent means "price on consultation"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    pub sort_order: i32,
    pub status: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateTreatmentRequest {
    pub name: String,
    #[serde(default)]
    pub name_kr: Option<String>,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateTreatmentRequest {
    pub name: Option<String>,
    pub name_kr: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub sort_order: Option<i32>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TreatmentListResponse {
    pub items: Vec<TreatmentDto>,
    pub total: usize,
}

// ===== Consultant DTOs =====

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ConsultantDto {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_kr: Option<String>,
    pub phone: String,
    pub languages: Vec<String>,
    pub service_areas: Vec<String>,
    pub specialties: Vec<String>,
    pub consultation_fee: i64,
    pub accompany_fee: i64,
    pub featured: bool,
    pub sort_order: i32,
    pub rating: f64,
    pub review_count: u32,
    pub status: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateConsultantRequest {
    pub name: String,
    #[serde(default)]
    pub name_kr: Option<String>,
    pub phone: String,
    pub languages: Vec<String>,
    #[serde(default)]
    pub service_areas: Vec<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub consultation_fee: i64,
    #[serde(default)]
    pub accompany_fee: i64,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateConsultantRequest {
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

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ConsultantListResponse {
    pub items: Vec<ConsultantDto>,
    pub total: usize,
}

// ===== Appointment DTOs =====

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AppointmentDto {
    pub id: Uuid,
    pub clinic_id: Uuid,
    pub clinic_name: String,
    pub user_id: String,
    pub service_name: String,
    pub scheduled_at: chrono::DateTime<chrono::Utc>,
    #[schema(example = "pending")]
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateAppointmentRequest {
    pub clinic_id: Uuid,
    pub user_id: String,
    pub service_name: String,
    pub scheduled_at: chrono::DateTime<chrono::Utc>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateAppointmentRequest {
    pub scheduled_at: Option<chrono::DateTime<chrono::Utc>>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AppointmentStatusRequest {
    /// Target status
    #[schema(example = "confirmed")]
    pub status: String,

    /// Cancelling actor; only meaningful when status is "cancelled"
    #[serde(default)]
    pub cancelled_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AppointmentListResponse {
    pub items: Vec<AppointmentDto>,
    pub total: usize,
}

// ===== Review DTOs =====

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReviewDto {
    pub id: Uuid,
    pub clinic_id: Uuid,
    pub user_id: String,
    pub overall: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspects: Option<serde_json::Value>,
    pub content: String,
    #[schema(example = "pending")]
    pub status: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateReviewRequest {
    pub clinic_id: Uuid,
    pub user_id: String,
    /// Overall score, 1-5
    pub overall: u8,
    #[serde(default)]
    pub aspects: Option<serde_json::Value>,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ModerateReviewRequest {
    /// Target moderation status
    #[schema(example = "approved")]
    pub status: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReviewListResponse {
    pub items: Vec<ReviewDto>,
    pub total: usize,
}

// Note: Conversion implementations live in mapper.rs
