//! # Record DTOs
//!
//! Create/update bodies for users, doctors, clinics, appointments,
//! telemedicine sessions, chat messages and news.
//!
//! ## Example
//!
//! ```text
//! POST /api/users
//! Content-Type: application/json
//!
//! { "email": "a@b.com", "name": "A", "role": "patient" }
//! ```

use chrono::{DateTime, Utc};
use lib_utils::{validate_email, validate_max_length, validate_not_empty, validate_range};
use serde::{Deserialize, Serialize};

use super::{check, non_blank, Validate};
use crate::error::ValidationError;
use crate::model::store::models::*;

/// Longest appointment accepted, in minutes.
pub const MAX_APPOINTMENT_DURATION: u32 = 24 * 60;

const MAX_MESSAGE_LENGTH: usize = 4000;

// region: --- Users

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub email: String,
    pub name: String,
    pub role: UserRole,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl Validate for CreateUserRequest {
    type Output = UserForCreate;

    fn validate(self) -> Result<UserForCreate, ValidationError> {
        check("email", validate_email(&self.email))?;
        check("name", validate_not_empty(&self.name, "name"))?;

        Ok(UserForCreate {
            email: self.email.trim().to_string(),
            name: self.name.trim().to_string(),
            role: self.role,
            avatar: non_blank(self.avatar),
            phone: non_blank(self.phone),
        })
    }
}

// endregion: --- Users

// region: --- Doctors & Clinics

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateDoctorRequest {
    pub user_id: String,
    pub specialty: String,
    #[serde(default)]
    pub experience: Option<u32>,
    #[serde(default)]
    pub fee: Option<u32>,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub availability: Option<Availability>,
    #[serde(default)]
    pub clinic_id: Option<String>,
}

impl Validate for CreateDoctorRequest {
    type Output = DoctorForCreate;

    fn validate(self) -> Result<DoctorForCreate, ValidationError> {
        check("userId", validate_not_empty(&self.user_id, "userId"))?;
        check("specialty", validate_not_empty(&self.specialty, "specialty"))?;
        if let Some(rating) = self.rating {
            check("rating", validate_range(rating, 0, MAX_DOCTOR_RATING, "rating"))?;
        }

        Ok(DoctorForCreate {
            user_id: self.user_id,
            specialty: self.specialty.trim().to_string(),
            experience: self.experience,
            fee: self.fee,
            rating: self.rating,
            availability: self.availability,
            clinic_id: non_blank(self.clinic_id),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateClinicRequest {
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Validate for CreateClinicRequest {
    type Output = ClinicForCreate;

    fn validate(self) -> Result<ClinicForCreate, ValidationError> {
        check("userId", validate_not_empty(&self.user_id, "userId"))?;
        check("name", validate_not_empty(&self.name, "name"))?;

        Ok(ClinicForCreate {
            user_id: self.user_id,
            name: self.name.trim().to_string(),
            address: non_blank(self.address),
            phone: non_blank(self.phone),
            description: non_blank(self.description),
        })
    }
}

// endregion: --- Doctors & Clinics

// region: --- Appointments

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    pub patient_id: String,
    pub doctor_id: String,
    #[serde(default)]
    pub clinic_id: Option<String>,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub status: Option<AppointmentStatus>,
    #[serde(rename = "type")]
    pub appointment_type: AppointmentType,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub session_notes: Option<String>,
}

fn check_duration(duration: Option<u32>) -> Result<(), ValidationError> {
    match duration {
        Some(d) => check("duration", validate_range(d, 1, MAX_APPOINTMENT_DURATION, "duration")),
        None => Ok(()),
    }
}

impl Validate for CreateAppointmentRequest {
    type Output = AppointmentForCreate;

    fn validate(self) -> Result<AppointmentForCreate, ValidationError> {
        check("patientId", validate_not_empty(&self.patient_id, "patientId"))?;
        check("doctorId", validate_not_empty(&self.doctor_id, "doctorId"))?;
        check_duration(self.duration)?;

        Ok(AppointmentForCreate {
            patient_id: self.patient_id,
            doctor_id: self.doctor_id,
            clinic_id: non_blank(self.clinic_id),
            date: self.date,
            duration: self.duration,
            status: self.status,
            appointment_type: self.appointment_type,
            notes: self.notes,
            session_notes: self.session_notes,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppointmentRequest {
    #[serde(default)]
    pub status: Option<AppointmentStatus>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub session_notes: Option<String>,
}

impl Validate for UpdateAppointmentRequest {
    type Output = AppointmentForUpdate;

    fn validate(self) -> Result<AppointmentForUpdate, ValidationError> {
        check_duration(self.duration)?;

        let patch = AppointmentForUpdate {
            status: self.status,
            date: self.date,
            duration: self.duration,
            notes: self.notes,
            session_notes: self.session_notes,
        };
        if patch.is_empty() {
            return Err(ValidationError::new("body", "at least one field must be provided"));
        }
        Ok(patch)
    }
}

// endregion: --- Appointments

// region: --- Telemedicine

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    pub appointment_id: String,
    #[serde(default)]
    pub room_id: Option<String>,
    #[serde(default)]
    pub status: Option<SessionStatus>,
}

impl Validate for CreateSessionRequest {
    type Output = SessionForCreate;

    fn validate(self) -> Result<SessionForCreate, ValidationError> {
        check("appointmentId", validate_not_empty(&self.appointment_id, "appointmentId"))?;

        Ok(SessionForCreate {
            appointment_id: self.appointment_id,
            room_id: non_blank(self.room_id),
            status: self.status,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateSessionRequest {
    pub status: SessionStatus,
}

impl Validate for UpdateSessionRequest {
    type Output = SessionForUpdate;

    fn validate(self) -> Result<SessionForUpdate, ValidationError> {
        Ok(SessionForUpdate::status(self.status))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateChatMessageRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    pub sender_id: String,
    pub message: String,
}

impl Validate for CreateChatMessageRequest {
    type Output = ChatMessageForCreate;

    fn validate(self) -> Result<ChatMessageForCreate, ValidationError> {
        check("senderId", validate_not_empty(&self.sender_id, "senderId"))?;
        check("message", validate_not_empty(&self.message, "message"))?;
        check("message", validate_max_length(&self.message, MAX_MESSAGE_LENGTH, "message"))?;

        Ok(ChatMessageForCreate {
            session_id: non_blank(self.session_id),
            sender_id: self.sender_id,
            message: self.message,
            timestamp: None,
        })
    }
}

// endregion: --- Telemedicine

// region: --- News

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateNewsRequest {
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

impl Validate for CreateNewsRequest {
    type Output = NewsForCreate;

    fn validate(self) -> Result<NewsForCreate, ValidationError> {
        check("title", validate_not_empty(&self.title, "title"))?;

        Ok(NewsForCreate {
            title: self.title.trim().to_string(),
            summary: self.summary,
            content: self.content,
            image_url: non_blank(self.image_url),
            source: non_blank(self.source),
            published_at: None,
        })
    }
}

// endregion: --- News
