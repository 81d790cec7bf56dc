//! # Doctor & Clinic Handlers
//!
//! - `GET /api/doctors`, `POST /api/doctors`
//! - `GET /api/doctors/clinic/{id}`
//! - `POST /api/clinics`, `GET /api/clinics/{id}`

use axum::extract::{Json, Path, State};
use lib_core::dto::{CreateClinicRequest, CreateDoctorRequest};
use lib_core::model::store::models::{Clinic, Doctor};
use lib_core::{AppError, RecordStore, Result};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::extract::ValidatedJson;

/// **Route**: `GET /api/doctors`
#[instrument(skip_all)]
pub async fn list_doctors(State(store): State<Arc<RecordStore>>) -> Json<Vec<Doctor>> {
    let doctors = store.list_doctors().await;
    debug!("[DOCTORS] listing {} doctors", doctors.len());
    Json(doctors)
}

/// **Route**: `GET /api/doctors/clinic/{id}`
///
/// An unknown clinic yields an empty list.
#[instrument(skip(store))]
pub async fn doctors_by_clinic(
    State(store): State<Arc<RecordStore>>,
    Path(id): Path<String>,
) -> Json<Vec<Doctor>> {
    Json(store.doctors_by_clinic(&id).await)
}

/// Create a doctor profile. `rating` defaults to 0.
///
/// **Route**: `POST /api/doctors`
#[instrument(skip_all)]
pub async fn create_doctor(
    State(store): State<Arc<RecordStore>>,
    ValidatedJson(input): ValidatedJson<CreateDoctorRequest>,
) -> Result<Json<Doctor>> {
    let doctor = store.create_doctor(input).await?;
    info!("[DOCTORS] created id={} specialty={}", doctor.id, doctor.specialty);
    Ok(Json(doctor))
}

/// **Route**: `POST /api/clinics`
#[instrument(skip_all)]
pub async fn create_clinic(
    State(store): State<Arc<RecordStore>>,
    ValidatedJson(input): ValidatedJson<CreateClinicRequest>,
) -> Result<Json<Clinic>> {
    let clinic = store.create_clinic(input).await?;
    info!("[CLINICS] created id={}", clinic.id);
    Ok(Json(clinic))
}

/// **Route**: `GET /api/clinics/{id}`
#[instrument(skip(store))]
pub async fn get_clinic(
    State(store): State<Arc<RecordStore>>,
    Path(id): Path<String>,
) -> Result<Json<Clinic>> {
    store
        .get_clinic(&id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Clinic not found".to_string()))
}
