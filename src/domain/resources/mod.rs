//! Resource CRUD services over the configured backend adapters

pub mod appointment;
pub mod catalog;
pub mod clinic;
pub mod consultant;
pub mod review;

pub use appointment::{
    AppointmentFilter, AppointmentPatch, AppointmentService, NewAppointment,
};
pub use catalog::{CatalogServiceApi, NewTreatment, TreatmentFilter, TreatmentPatch};
pub use clinic::{ClinicFilter, ClinicPatch, ClinicService, NewClinic};
pub use consultant::{ConsultantFilter, ConsultantPatch, ConsultantService, NewConsultant};
pub use review::{NewReview, ReviewFilter, ReviewService};
