//! Booking resource tests: clinics, treatments, consultants,
//! appointments and reviews

mod common;

use chrono::{Duration, Utc};
use clinic_platform::contract::{
    AppointmentStatus, AuthContext, CancelledBy, PageRequest, PlatformError, ResourceStatus,
    ReviewStatus,
};
use clinic_platform::domain::resources::{
    AppointmentFilter, AppointmentPatch, AppointmentService, CatalogServiceApi, ClinicFilter,
    ClinicPatch, ClinicService, ConsultantFilter, ConsultantService, NewAppointment,
    NewConsultant, NewReview, NewTreatment, ReviewFilter, ReviewService, TreatmentFilter,
};
use clinic_platform::infra::MemoryResourceStore;
use std::sync::Arc;
use uuid::Uuid;

fn admin() -> AuthContext {
    AuthContext::admin(Some("admin-1".to_string()))
}

fn booking_stack() -> (Arc<ClinicService>, AppointmentService, ReviewService) {
    let clinic_store = Arc::new(MemoryResourceStore::new());
    let clinics = Arc::new(ClinicService::new(clinic_store.clone()));
    let appointments =
        AppointmentService::new(Arc::new(MemoryResourceStore::new()), clinic_store);
    let reviews = ReviewService::new(Arc::new(MemoryResourceStore::new()), clinics.clone());
    (clinics, appointments, reviews)
}

fn sample_appointment(clinic_id: Uuid) -> NewAppointment {
    NewAppointment {
        clinic_id,
        user_id: "user-1".to_string(),
        service_name: "双眼皮手术".to_string(),
        scheduled_at: Utc::now() + Duration::days(3),
        note: None,
    }
}

fn sample_review(clinic_id: Uuid, user: &str, overall: u8) -> NewReview {
    NewReview {
        clinic_id,
        user_id: user.to_string(),
        overall,
        aspects: None,
        content: "매우 만족합니다".to_string(),
    }
}

// ===== Clinics =====

#[tokio::test]
async fn clinic_create_requires_core_fields() {
    let (clinics, _, _) = booking_stack();

    let mut input = common::sample_clinic("Seoul Beauty");
    input.phone = String::new();

    let err = clinics.create(input).await.unwrap_err();
    assert!(matches!(err, PlatformError::Validation { ref field, .. } if field == "phone"));
}

#[tokio::test]
async fn clinic_update_merges_only_given_fields() {
    let (clinics, _, _) = booking_stack();
    let created = clinics.create(common::sample_clinic("Seoul Beauty")).await.unwrap();

    let updated = clinics
        .update(
            created.id,
            ClinicPatch {
                district: Some("Hongdae".to_string()),
                ..ClinicPatch::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.district, "Hongdae");
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.phone, created.phone);
}

#[tokio::test]
async fn clinic_delete_deactivates_instead_of_removing() {
    let (clinics, _, _) = booking_stack();
    let created = clinics.create(common::sample_clinic("Seoul Beauty")).await.unwrap();

    clinics.delete(created.id, &admin()).await.unwrap();

    // still retrievable, just inactive
    let after = clinics.get(created.id).await.unwrap();
    assert_eq!(after.status, ResourceStatus::Inactive);

    let inactive = clinics
        .list(
            &ClinicFilter {
                status: Some(ResourceStatus::Inactive),
                ..ClinicFilter::default()
            },
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(inactive.total, 1);
}

#[tokio::test]
async fn clinic_delete_rejects_non_admin() {
    let (clinics, _, _) = booking_stack();
    let created = clinics.create(common::sample_clinic("Seoul Beauty")).await.unwrap();

    let err = clinics
        .delete(created.id, &AuthContext::non_admin())
        .await
        .unwrap_err();
    assert!(matches!(err, PlatformError::PermissionDenied));
}

#[tokio::test]
async fn clinic_listing_orders_featured_then_sort_order() {
    let (clinics, _, _) = booking_stack();

    let mut plain = common::sample_clinic("Plain");
    plain.sort_order = 50;
    let plain = clinics.create(plain).await.unwrap();

    let mut featured_low = common::sample_clinic("Featured Low");
    featured_low.featured = true;
    featured_low.sort_order = 1;
    let featured_low = clinics.create(featured_low).await.unwrap();

    let mut featured_high = common::sample_clinic("Featured High");
    featured_high.featured = true;
    featured_high.sort_order = 10;
    let featured_high = clinics.create(featured_high).await.unwrap();

    let page = clinics
        .list(&ClinicFilter::default(), PageRequest::default())
        .await
        .unwrap();

    let ids: Vec<Uuid> = page.items.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![featured_high.id, featured_low.id, plain.id]);
}

#[tokio::test]
async fn clinic_listing_filters_by_district_and_specialty() {
    let (clinics, _, _) = booking_stack();

    let mut gangnam = common::sample_clinic("Gangnam Skin");
    gangnam.specialties = vec!["皮肤管理".to_string()];
    clinics.create(gangnam).await.unwrap();

    let mut hongdae = common::sample_clinic("Hongdae Lift");
    hongdae.district = "Hongdae".to_string();
    hongdae.specialties = vec!["轮廓".to_string()];
    clinics.create(hongdae).await.unwrap();

    let page = clinics
        .list(
            &ClinicFilter {
                district: Some("Gangnam".to_string()),
                specialty: Some("皮肤管理".to_string()),
                status: None,
            },
            PageRequest::default(),
        )
        .await
        .unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].name, "Gangnam Skin");
}

#[tokio::test]
async fn clinic_pagination_reports_full_total() {
    let (clinics, _, _) = booking_stack();

    for i in 0..5 {
        clinics
            .create(common::sample_clinic(&format!("Clinic {}", i)))
            .await
            .unwrap();
    }

    let page = clinics
        .list(&ClinicFilter::default(), PageRequest { page: 2, per_page: 2 })
        .await
        .unwrap();

    assert_eq!(page.total, 5);
    assert_eq!(page.items.len(), 2);

    let past_end = clinics
        .list(&ClinicFilter::default(), PageRequest { page: 9, per_page: 2 })
        .await
        .unwrap();
    assert!(past_end.items.is_empty());
    assert_eq!(past_end.total, 5);
}

// ===== Treatments =====

#[tokio::test]
async fn treatment_create_rejects_negative_price() {
    let catalog = CatalogServiceApi::new(Arc::new(MemoryResourceStore::new()));

    let err = catalog
        .create(NewTreatment {
            name: "玻尿酸".to_string(),
            category: "injection".to_string(),
            price: Some(-1),
            ..NewTreatment::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, PlatformError::Validation { ref field, .. } if field == "price"));
}

#[tokio::test]
async fn treatment_delete_is_physical() {
    let catalog = CatalogServiceApi::new(Arc::new(MemoryResourceStore::new()));

    let created = catalog
        .create(NewTreatment {
            name: "玻尿酸".to_string(),
            category: "injection".to_string(),
            price: Some(300_000),
            ..NewTreatment::default()
        })
        .await
        .unwrap();

    catalog.delete(created.id, &admin()).await.unwrap();

    let err = catalog.get(created.id).await.unwrap_err();
    assert!(matches!(err, PlatformError::NotFound { .. }));
}

#[tokio::test]
async fn treatment_listing_filters_by_category() {
    let catalog = CatalogServiceApi::new(Arc::new(MemoryResourceStore::new()));

    for (name, category) in [("玻尿酸", "injection"), ("皮肤管理", "skin")] {
        catalog
            .create(NewTreatment {
                name: name.to_string(),
                category: category.to_string(),
                ..NewTreatment::default()
            })
            .await
            .unwrap();
    }

    let page = catalog
        .list(
            &TreatmentFilter {
                category: Some("skin".to_string()),
                status: None,
            },
            PageRequest::default(),
        )
        .await
        .unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].name, "皮肤管理");
}

// ===== Consultants =====

#[tokio::test]
async fn consultant_requires_a_language() {
    let consultants = ConsultantService::new(Arc::new(MemoryResourceStore::new()));

    let err = consultants
        .create(NewConsultant {
            name: "Kim".to_string(),
            phone: "+82-10-1234-5678".to_string(),
            languages: vec![],
            ..NewConsultant::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, PlatformError::Validation { ref field, .. } if field == "languages"));
}

#[tokio::test]
async fn consultant_delete_deactivates_and_filters_apply() {
    let consultants = ConsultantService::new(Arc::new(MemoryResourceStore::new()));

    let created = consultants
        .create(NewConsultant {
            name: "Kim".to_string(),
            phone: "+82-10-1234-5678".to_string(),
            languages: vec!["zh".to_string(), "ko".to_string()],
            service_areas: vec!["Gangnam".to_string()],
            ..NewConsultant::default()
        })
        .await
        .unwrap();

    consultants.delete(created.id, &admin()).await.unwrap();
    assert_eq!(
        consultants.get(created.id).await.unwrap().status,
        ResourceStatus::Inactive
    );

    let active = consultants
        .list(
            &ConsultantFilter {
                language: Some("zh".to_string()),
                status: Some(ResourceStatus::Active),
                ..ConsultantFilter::default()
            },
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(active.total, 0);
}

// ===== Appointments =====

#[tokio::test]
async fn appointment_denormalizes_clinic_name() {
    let (clinics, appointments, _) = booking_stack();
    let clinic = clinics.create(common::sample_clinic("Seoul Beauty")).await.unwrap();

    let booked = appointments
        .create(sample_appointment(clinic.id))
        .await
        .unwrap();

    assert_eq!(booked.status, AppointmentStatus::Pending);
    assert_eq!(booked.clinic_name, "Seoul Beauty");

    // renaming the clinic afterwards leaves the booking untouched
    clinics
        .update(
            clinic.id,
            ClinicPatch {
                name: Some("Renamed".to_string()),
                ..ClinicPatch::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(
        appointments.get(booked.id).await.unwrap().clinic_name,
        "Seoul Beauty"
    );
}

#[tokio::test]
async fn booking_requires_an_active_clinic() {
    let (clinics, appointments, _) = booking_stack();

    let missing = appointments
        .create(sample_appointment(Uuid::new_v4()))
        .await
        .unwrap_err();
    assert!(matches!(missing, PlatformError::NotFound { .. }));

    let clinic = clinics.create(common::sample_clinic("Seoul Beauty")).await.unwrap();
    clinics.delete(clinic.id, &admin()).await.unwrap();

    let inactive = appointments
        .create(sample_appointment(clinic.id))
        .await
        .unwrap_err();
    assert!(matches!(inactive, PlatformError::Validation { .. }));
}

#[tokio::test]
async fn appointment_follows_the_state_machine() {
    let (clinics, appointments, _) = booking_stack();
    let clinic = clinics.create(common::sample_clinic("Seoul Beauty")).await.unwrap();
    let booked = appointments
        .create(sample_appointment(clinic.id))
        .await
        .unwrap();

    // pending -> completed skips confirmation
    let err = appointments
        .transition(booked.id, AppointmentStatus::Completed, None)
        .await
        .unwrap_err();
    assert!(matches!(err, PlatformError::InvalidStateTransition { .. }));

    let confirmed = appointments
        .transition(booked.id, AppointmentStatus::Confirmed, None)
        .await
        .unwrap();
    assert_eq!(confirmed.status, AppointmentStatus::Confirmed);

    let completed = appointments
        .transition(booked.id, AppointmentStatus::Completed, None)
        .await
        .unwrap();
    assert_eq!(completed.status, AppointmentStatus::Completed);

    // terminal states admit nothing further
    let err = appointments
        .transition(booked.id, AppointmentStatus::Cancelled, None)
        .await
        .unwrap_err();
    assert!(matches!(err, PlatformError::InvalidStateTransition { .. }));

    // and the stored status is unchanged
    assert_eq!(
        appointments.get(booked.id).await.unwrap().status,
        AppointmentStatus::Completed
    );
}

#[tokio::test]
async fn cancellation_records_the_actor() {
    let (clinics, appointments, _) = booking_stack();
    let clinic = clinics.create(common::sample_clinic("Seoul Beauty")).await.unwrap();
    let booked = appointments
        .create(sample_appointment(clinic.id))
        .await
        .unwrap();

    let cancelled = appointments
        .cancel(booked.id, CancelledBy::Clinic)
        .await
        .unwrap();
    assert_eq!(cancelled.status, AppointmentStatus::Cancelled);
    assert_eq!(cancelled.cancelled_by, Some(CancelledBy::Clinic));
}

#[tokio::test]
async fn cancellation_defaults_to_the_user() {
    let (clinics, appointments, _) = booking_stack();
    let clinic = clinics.create(common::sample_clinic("Seoul Beauty")).await.unwrap();
    let booked = appointments
        .create(sample_appointment(clinic.id))
        .await
        .unwrap();

    let cancelled = appointments
        .transition(booked.id, AppointmentStatus::Cancelled, None)
        .await
        .unwrap();
    assert_eq!(cancelled.cancelled_by, Some(CancelledBy::User));
}

#[tokio::test]
async fn terminal_appointments_cannot_be_rescheduled() {
    let (clinics, appointments, _) = booking_stack();
    let clinic = clinics.create(common::sample_clinic("Seoul Beauty")).await.unwrap();
    let booked = appointments
        .create(sample_appointment(clinic.id))
        .await
        .unwrap();
    appointments.cancel(booked.id, CancelledBy::User).await.unwrap();

    let err = appointments
        .update(
            booked.id,
            AppointmentPatch {
                scheduled_at: Some(Utc::now() + Duration::days(10)),
                note: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, PlatformError::InvalidStateTransition { .. }));
}

#[tokio::test]
async fn appointment_delete_is_physical_and_admin_only() {
    let (clinics, appointments, _) = booking_stack();
    let clinic = clinics.create(common::sample_clinic("Seoul Beauty")).await.unwrap();
    let booked = appointments
        .create(sample_appointment(clinic.id))
        .await
        .unwrap();

    let err = appointments
        .delete(booked.id, &AuthContext::non_admin())
        .await
        .unwrap_err();
    assert!(matches!(err, PlatformError::PermissionDenied));

    appointments.delete(booked.id, &admin()).await.unwrap();
    let err = appointments.get(booked.id).await.unwrap_err();
    assert!(matches!(err, PlatformError::NotFound { .. }));
}

#[tokio::test]
async fn appointment_listing_filters_by_user_and_status() {
    let (clinics, appointments, _) = booking_stack();
    let clinic = clinics.create(common::sample_clinic("Seoul Beauty")).await.unwrap();

    let first = appointments
        .create(sample_appointment(clinic.id))
        .await
        .unwrap();
    let mut other = sample_appointment(clinic.id);
    other.user_id = "user-2".to_string();
    appointments.create(other).await.unwrap();

    appointments
        .transition(first.id, AppointmentStatus::Confirmed, None)
        .await
        .unwrap();

    let page = appointments
        .list(
            &AppointmentFilter {
                user_id: Some("user-1".to_string()),
                status: Some(AppointmentStatus::Confirmed),
                ..AppointmentFilter::default()
            },
            PageRequest::default(),
        )
        .await
        .unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, first.id);
}

// ===== Reviews and ratings =====

#[tokio::test]
async fn review_starts_pending_and_needs_a_valid_score() {
    let (clinics, _, reviews) = booking_stack();
    let clinic = clinics.create(common::sample_clinic("Seoul Beauty")).await.unwrap();

    let err = reviews
        .create(sample_review(clinic.id, "user-1", 6))
        .await
        .unwrap_err();
    assert!(matches!(err, PlatformError::Validation { .. }));

    let created = reviews
        .create(sample_review(clinic.id, "user-1", 5))
        .await
        .unwrap();
    assert_eq!(created.status, ReviewStatus::Pending);

    // not yet counted toward the clinic rating
    let clinic = clinics.get(clinic.id).await.unwrap();
    assert_eq!(clinic.rating, 0.0);
    assert_eq!(clinic.review_count, 0);
}

#[tokio::test]
async fn approval_recomputes_the_clinic_rating() {
    let (clinics, _, reviews) = booking_stack();
    let clinic = clinics.create(common::sample_clinic("Seoul Beauty")).await.unwrap();

    for (user, score) in [("u1", 5), ("u2", 4), ("u3", 3)] {
        let review = reviews
            .create(sample_review(clinic.id, user, score))
            .await
            .unwrap();
        reviews
            .moderate(review.id, ReviewStatus::Approved, &admin())
            .await
            .unwrap();
    }

    let clinic = clinics.get(clinic.id).await.unwrap();
    assert_eq!(clinic.rating, 4.0); // mean of 5, 4, 3
    assert_eq!(clinic.review_count, 3);
}

#[tokio::test]
async fn rating_rounds_to_one_decimal() {
    let (clinics, _, reviews) = booking_stack();
    let clinic = clinics.create(common::sample_clinic("Seoul Beauty")).await.unwrap();

    for (user, score) in [("u1", 5), ("u2", 4), ("u3", 4)] {
        let review = reviews
            .create(sample_review(clinic.id, user, score))
            .await
            .unwrap();
        reviews
            .moderate(review.id, ReviewStatus::Approved, &admin())
            .await
            .unwrap();
    }

    // 13 / 3 = 4.333... -> 4.3
    let clinic = clinics.get(clinic.id).await.unwrap();
    assert_eq!(clinic.rating, 4.3);
}

#[tokio::test]
async fn unapproving_a_review_pulls_it_out_of_the_aggregate() {
    let (clinics, _, reviews) = booking_stack();
    let clinic = clinics.create(common::sample_clinic("Seoul Beauty")).await.unwrap();

    let keep = reviews.create(sample_review(clinic.id, "u1", 5)).await.unwrap();
    let drop = reviews.create(sample_review(clinic.id, "u2", 1)).await.unwrap();
    reviews.moderate(keep.id, ReviewStatus::Approved, &admin()).await.unwrap();
    reviews.moderate(drop.id, ReviewStatus::Approved, &admin()).await.unwrap();

    reviews
        .moderate(drop.id, ReviewStatus::Rejected, &admin())
        .await
        .unwrap();

    let clinic = clinics.get(clinic.id).await.unwrap();
    assert_eq!(clinic.rating, 5.0);
    assert_eq!(clinic.review_count, 1);
}

#[tokio::test]
async fn pending_to_rejected_does_not_touch_the_rating() {
    let (clinics, _, reviews) = booking_stack();
    let clinic = clinics.create(common::sample_clinic("Seoul Beauty")).await.unwrap();

    let approved = reviews.create(sample_review(clinic.id, "u1", 4)).await.unwrap();
    reviews
        .moderate(approved.id, ReviewStatus::Approved, &admin())
        .await
        .unwrap();
    let before = clinics.get(clinic.id).await.unwrap();

    let other = reviews.create(sample_review(clinic.id, "u2", 1)).await.unwrap();
    reviews
        .moderate(other.id, ReviewStatus::Rejected, &admin())
        .await
        .unwrap();

    let after = clinics.get(clinic.id).await.unwrap();
    assert_eq!(after.rating, before.rating);
    assert_eq!(after.review_count, before.review_count);
}

#[tokio::test]
async fn deleting_an_approved_review_recomputes() {
    let (clinics, _, reviews) = booking_stack();
    let clinic = clinics.create(common::sample_clinic("Seoul Beauty")).await.unwrap();

    let review = reviews.create(sample_review(clinic.id, "u1", 5)).await.unwrap();
    reviews
        .moderate(review.id, ReviewStatus::Approved, &admin())
        .await
        .unwrap();
    assert_eq!(clinics.get(clinic.id).await.unwrap().rating, 5.0);

    reviews.delete(review.id, &admin()).await.unwrap();

    let clinic = clinics.get(clinic.id).await.unwrap();
    assert_eq!(clinic.rating, 0.0);
    assert_eq!(clinic.review_count, 0);
}

#[tokio::test]
async fn moderation_is_admin_only() {
    let (clinics, _, reviews) = booking_stack();
    let clinic = clinics.create(common::sample_clinic("Seoul Beauty")).await.unwrap();
    let review = reviews.create(sample_review(clinic.id, "u1", 4)).await.unwrap();

    let err = reviews
        .moderate(review.id, ReviewStatus::Approved, &AuthContext::non_admin())
        .await
        .unwrap_err();
    assert!(matches!(err, PlatformError::PermissionDenied));
}

#[tokio::test]
async fn review_listing_filters_by_clinic_and_status() {
    let (clinics, _, reviews) = booking_stack();
    let first = clinics.create(common::sample_clinic("First")).await.unwrap();
    let second = clinics.create(common::sample_clinic("Second")).await.unwrap();

    let approved = reviews.create(sample_review(first.id, "u1", 5)).await.unwrap();
    reviews
        .moderate(approved.id, ReviewStatus::Approved, &admin())
        .await
        .unwrap();
    reviews.create(sample_review(first.id, "u2", 3)).await.unwrap();
    reviews.create(sample_review(second.id, "u3", 4)).await.unwrap();

    let page = reviews
        .list(
            &ReviewFilter {
                clinic_id: Some(first.id),
                status: Some(ReviewStatus::Approved),
            },
            PageRequest::default(),
        )
        .await
        .unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, approved.id);
}
