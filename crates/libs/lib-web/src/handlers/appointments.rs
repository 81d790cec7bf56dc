//! # Appointment Handlers
//!
//! - `POST /api/appointments` - book (duration defaults to 30, status to `scheduled`)
//! - `GET /api/appointments/{id}`
//! - `PATCH /api/appointments/{id}` - partial update
//! - `GET /api/appointments/patient/{id}`, `GET /api/appointments/doctor/{id}`

use axum::extract::{Json, Path, State};
use lib_core::dto::{CreateAppointmentRequest, UpdateAppointmentRequest};
use lib_core::model::store::models::Appointment;
use lib_core::{AppError, RecordStore, Result};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::extract::ValidatedJson;

/// **Route**: `POST /api/appointments`
#[instrument(skip_all)]
pub async fn create_appointment(
    State(store): State<Arc<RecordStore>>,
    ValidatedJson(input): ValidatedJson<CreateAppointmentRequest>,
) -> Result<Json<Appointment>> {
    let appointment = store.create_appointment(input).await?;
    info!(
        "[APPOINTMENTS] created id={} patient={} doctor={}",
        appointment.id, appointment.patient_id, appointment.doctor_id
    );
    Ok(Json(appointment))
}

/// **Route**: `GET /api/appointments/{id}`
#[instrument(skip(store))]
pub async fn get_appointment(
    State(store): State<Arc<RecordStore>>,
    Path(id): Path<String>,
) -> Result<Json<Appointment>> {
    store
        .get_appointment(&id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Appointment not found".to_string()))
}

/// Apply only the fields present in the body; everything else is left as is.
///
/// **Route**: `PATCH /api/appointments/{id}`
///
/// # Errors
///
/// - `400` - empty body or a field failing its check
/// - `404` - unknown appointment
#[instrument(skip(store, patch))]
pub async fn update_appointment(
    State(store): State<Arc<RecordStore>>,
    Path(id): Path<String>,
    ValidatedJson(patch): ValidatedJson<UpdateAppointmentRequest>,
) -> Result<Json<Appointment>> {
    let appointment = store.update_appointment(&id, patch).await?;
    info!("[APPOINTMENTS] updated id={} status={:?}", appointment.id, appointment.status);
    Ok(Json(appointment))
}

/// **Route**: `GET /api/appointments/patient/{id}`
#[instrument(skip(store))]
pub async fn appointments_by_patient(
    State(store): State<Arc<RecordStore>>,
    Path(id): Path<String>,
) -> Json<Vec<Appointment>> {
    Json(store.appointments_by_patient(&id).await)
}

/// **Route**: `GET /api/appointments/doctor/{id}`
#[instrument(skip(store))]
pub async fn appointments_by_doctor(
    State(store): State<Arc<RecordStore>>,
    Path(id): Path<String>,
) -> Json<Vec<Appointment>> {
    Json(store.appointments_by_doctor(&id).await)
}
