//! Contract layer - transport-agnostic models and errors
//!
//! NO serde derives on models - these are pure domain types.

pub mod error;
pub mod model;

pub use error::PlatformError;
pub use model::{
    Appointment, AppointmentStatus, AuthContext, CancelledBy, CatalogService, Clinic,
    ConfigDocument, Consultant, HotSearchEntry, HotSearchSource, Identified, KeywordStats, Mode,
    Page, PageRequest, ResolvedConfig, ResourceStatus, Review, ReviewStatus, SearchLogEntry,
};
