//! Contract models for the clinic platform
//!
//! These models are transport-agnostic and shared across layers.
//! NO serde derives - these are pure domain models; DTO and storage
//! conversions live in their respective mappers.

use chrono::{DateTime, Utc};
use std::str::FromStr;
use uuid::Uuid;

use super::error::PlatformError;

/// Content mode selecting which dataset is served to end users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Fail-safe default: reduced, review-friendly content.
    #[default]
    Review,
    /// Full marketplace content.
    Production,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Review => "review",
            Mode::Production => "production",
        }
    }
}

impl FromStr for Mode {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "review" => Ok(Mode::Review),
            "production" => Ok(Mode::Production),
            other => Err(PlatformError::InvalidMode {
                value: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named configuration document holding a schema-free payload.
///
/// At most one active document exists per `key` in a given backend.
/// Created implicitly on first save, updated in place afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDocument {
    /// Logical config type, unique per backend (e.g. "hot_searches")
    pub key: String,
    /// Arbitrary structured value; consumers validate shape at the point of use
    pub payload: serde_json::Value,
    /// Only active documents are served to readers
    pub active: bool,
    /// Acting administrator of the last write
    pub last_modified_by: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Set on every successful save
    pub updated_at: DateTime<Utc>,
}

impl ConfigDocument {
    /// Build a fresh active document stamped with the current time.
    pub fn new(key: impl Into<String>, payload: serde_json::Value) -> Self {
        let now = Utc::now();
        Self {
            key: key.into(),
            payload,
            active: true,
            last_modified_by: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Result of a config resolution: either the stored active document's
/// payload or the compiled-in default for the key.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub key: String,
    pub payload: serde_json::Value,
    pub is_default: bool,
}

/// Origin of a hot-search entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotSearchSource {
    Admin,
    Algorithm,
}

impl HotSearchSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            HotSearchSource::Admin => "admin",
            HotSearchSource::Algorithm => "algorithm",
        }
    }
}

/// A trending search keyword surfaced to end users.
#[derive(Debug, Clone, PartialEq)]
pub struct HotSearchEntry {
    /// Natural key for de-duplication
    pub keyword: String,
    /// Ranking score; admin entries default to 100, algorithm to 50
    pub priority: i64,
    /// Display flag
    pub is_hot: bool,
    pub source: HotSearchSource,
}

/// A single end-user search event.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchLogEntry {
    pub keyword: String,
    pub clicked: bool,
    pub result_count: u32,
    pub searched_at: DateTime<Utc>,
}

/// Pre-aggregated per-keyword statistics over a lookback window.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordStats {
    pub keyword: String,
    pub count: u64,
    pub clicks: u64,
    pub avg_result_count: f64,
}

/// Authentication context supplied per request by the auth collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthContext {
    /// Whether the principal may perform admin mutations
    pub is_admin: bool,
    /// Opaque principal identifier for audit stamping
    pub user_id: Option<String>,
}

impl AuthContext {
    /// Create a non-admin context
    pub fn non_admin() -> Self {
        Self::default()
    }

    /// Create an admin context
    pub fn admin(user_id: Option<String>) -> Self {
        Self {
            is_admin: true,
            user_id,
        }
    }
}

// ===== Booking resources =====

/// Lifecycle status for resources that deactivate instead of delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResourceStatus {
    #[default]
    Active,
    Inactive,
}

impl ResourceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceStatus::Active => "active",
            ResourceStatus::Inactive => "inactive",
        }
    }
}

impl FromStr for ResourceStatus {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ResourceStatus::Active),
            "inactive" => Ok(ResourceStatus::Inactive),
            other => Err(PlatformError::Validation {
                field: "status".to_string(),
                message: format!("unknown status '{}'", other),
            }),
        }
    }
}

/// A beauty clinic listed on the marketplace.
#[derive(Debug, Clone, PartialEq)]
pub struct Clinic {
    pub id: Uuid,
    pub name: String,
    pub name_kr: Option<String>,
    pub district: String,
    pub address: String,
    pub phone: String,
    pub description: String,
    pub specialties: Vec<String>,
    pub featured: bool,
    pub sort_order: i32,
    /// Arithmetic mean of approved reviews' overall score, one decimal
    pub rating: f64,
    pub review_count: u32,
    pub status: ResourceStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A bookable treatment offered on the marketplace.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogService {
    pub id: Uuid,
    pub name: String,
    pub name_kr: Option<String>,
    pub category: String,
    pub description: Option<String>,
    /// Reference price in KRW; None means "price on consultation"
    pub price: Option<i64>,
    pub sort_order: i32,
    pub status: ResourceStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A consultant/advisor accompanying customers to clinics.
#[derive(Debug, Clone, PartialEq)]
pub struct Consultant {
    pub id: Uuid,
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
    pub rating: f64,
    pub review_count: u32,
    pub status: ResourceStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Appointment lifecycle.
///
/// pending -> {confirmed, cancelled}; confirmed -> {completed, cancelled};
/// completed and cancelled are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Completed | AppointmentStatus::Cancelled
        )
    }

    /// Whether `self -> to` is a legal forward transition.
    pub fn can_transition_to(&self, to: AppointmentStatus) -> bool {
        use AppointmentStatus::*;
        matches!(
            (self, to),
            (Pending, Confirmed)
                | (Pending, Cancelled)
                | (Confirmed, Completed)
                | (Confirmed, Cancelled)
        )
    }
}

impl FromStr for AppointmentStatus {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(AppointmentStatus::Pending),
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            other => Err(PlatformError::Validation {
                field: "status".to_string(),
                message: format!("unknown appointment status '{}'", other),
            }),
        }
    }
}

/// Actor that cancelled an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelledBy {
    User,
    Clinic,
    Admin,
    System,
}

impl CancelledBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CancelledBy::User => "user",
            CancelledBy::Clinic => "clinic",
            CancelledBy::Admin => "admin",
            CancelledBy::System => "system",
        }
    }
}

impl FromStr for CancelledBy {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(CancelledBy::User),
            "clinic" => Ok(CancelledBy::Clinic),
            "admin" => Ok(CancelledBy::Admin),
            "system" => Ok(CancelledBy::System),
            other => Err(PlatformError::Validation {
                field: "cancelled_by".to_string(),
                message: format!("unknown actor '{}'", other),
            }),
        }
    }
}

/// A booking of a clinic visit.
#[derive(Debug, Clone, PartialEq)]
pub struct Appointment {
    pub id: Uuid,
    pub clinic_id: Uuid,
    /// Denormalized at creation so historical bookings survive clinic edits
    pub clinic_name: String,
    pub user_id: String,
    pub service_name: String,
    pub scheduled_at: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub cancelled_by: Option<CancelledBy>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Moderation status of a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Approved => "approved",
            ReviewStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for ReviewStatus {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReviewStatus::Pending),
            "approved" => Ok(ReviewStatus::Approved),
            "rejected" => Ok(ReviewStatus::Rejected),
            other => Err(PlatformError::Validation {
                field: "status".to_string(),
                message: format!("unknown review status '{}'", other),
            }),
        }
    }
}

/// A customer review of a clinic, moderated before it counts toward ratings.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: Uuid,
    pub clinic_id: Uuid,
    pub user_id: String,
    /// Overall score, 1-5
    pub overall: u8,
    /// Optional per-aspect scores (environment, service, effect, ...)
    pub aspects: Option<serde_json::Value>,
    pub content: String,
    pub status: ReviewStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Identity accessor used by generic resource stores.
pub trait Identified {
    fn id(&self) -> Uuid;
}

macro_rules! impl_identified {
    ($($ty:ty),*) => {
        $(impl Identified for $ty {
            fn id(&self) -> Uuid {
                self.id
            }
        })*
    };
}

impl_identified!(Clinic, CatalogService, Consultant, Appointment, Review);

/// One page of a resource listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
}

/// Offset/limit pagination; `page` is 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub per_page: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 20,
        }
    }
}

impl PageRequest {
    /// Slice a sorted snapshot into the requested page.
    pub fn slice<T: Clone>(&self, items: &[T]) -> Page<T> {
        let total = items.len();
        let page = self.page.max(1);
        let start = (page - 1).saturating_mul(self.per_page);
        let items = items
            .iter()
            .skip(start)
            .take(self.per_page)
            .cloned()
            .collect();
        Page { items, total }
    }
}
