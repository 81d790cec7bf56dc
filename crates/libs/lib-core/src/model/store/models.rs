//! # Entity Models
//!
//! Domain records held by the [`RecordStore`](super::RecordStore), together with
//! their `*ForCreate` inputs and, for the two mutable entities, `*ForUpdate`
//! partial patches.
//!
//! Records serialize with camelCase field names; enum values are snake_case.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default appointment length in minutes.
pub const DEFAULT_APPOINTMENT_DURATION: u32 = 30;

/// Rating assigned to doctors created without one.
pub const DEFAULT_DOCTOR_RATING: u8 = 0;

/// Highest rating a doctor can carry.
pub const MAX_DOCTOR_RATING: u8 = 5;

// region: --- Enums

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Patient,
    Doctor,
    Clinic,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Patient => write!(f, "patient"),
            UserRole::Doctor => write!(f, "doctor"),
            UserRole::Clinic => write!(f, "clinic"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "patient" => Ok(UserRole::Patient),
            "doctor" => Ok(UserRole::Doctor),
            "clinic" => Ok(UserRole::Clinic),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
    InProgress,
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "scheduled"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
            AppointmentStatus::InProgress => write!(f, "in_progress"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentType {
    InPerson,
    Telemedicine,
}

/// Lifecycle of a telemedicine call. Only ever moves forward.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Waiting,
    Active,
    Ended,
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionStatus::Waiting => write!(f, "waiting"),
            SessionStatus::Active => write!(f, "active"),
            SessionStatus::Ended => write!(f, "ended"),
        }
    }
}

// endregion: --- Enums

// region: --- User

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub avatar: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct UserForCreate {
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub avatar: Option<String>,
    pub phone: Option<String>,
}

impl UserForCreate {
    pub fn new(email: impl Into<String>, name: impl Into<String>, role: UserRole) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            role,
            avatar: None,
            phone: None,
        }
    }
}

// endregion: --- User

// region: --- Doctor

/// Weekly availability: weekday name to list of `HH:MM` slots.
pub type Availability = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: String,
    pub user_id: String,
    pub specialty: String,
    pub experience: Option<u32>,
    pub fee: Option<u32>,
    pub rating: u8,
    pub availability: Option<Availability>,
    pub clinic_id: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DoctorForCreate {
    pub user_id: String,
    pub specialty: String,
    pub experience: Option<u32>,
    pub fee: Option<u32>,
    pub rating: Option<u8>,
    pub availability: Option<Availability>,
    pub clinic_id: Option<String>,
}

// endregion: --- Doctor

// region: --- Clinic

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Clinic {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ClinicForCreate {
    pub user_id: String,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
}

// endregion: --- Clinic

// region: --- Appointment

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub patient_id: String,
    pub doctor_id: String,
    pub clinic_id: Option<String>,
    pub date: DateTime<Utc>,
    pub duration: u32,
    pub status: AppointmentStatus,
    #[serde(rename = "type")]
    pub appointment_type: AppointmentType,
    pub notes: Option<String>,
    pub session_notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct AppointmentForCreate {
    pub patient_id: String,
    pub doctor_id: String,
    pub clinic_id: Option<String>,
    pub date: DateTime<Utc>,
    pub duration: Option<u32>,
    pub status: Option<AppointmentStatus>,
    pub appointment_type: AppointmentType,
    pub notes: Option<String>,
    pub session_notes: Option<String>,
}

impl AppointmentForCreate {
    pub fn new(
        patient_id: impl Into<String>,
        doctor_id: impl Into<String>,
        date: DateTime<Utc>,
        appointment_type: AppointmentType,
    ) -> Self {
        Self {
            patient_id: patient_id.into(),
            doctor_id: doctor_id.into(),
            clinic_id: None,
            date,
            duration: None,
            status: None,
            appointment_type,
            notes: None,
            session_notes: None,
        }
    }
}

/// Partial appointment update. Only provided fields are applied.
#[derive(Debug, Clone, Default)]
pub struct AppointmentForUpdate {
    pub status: Option<AppointmentStatus>,
    pub date: Option<DateTime<Utc>>,
    pub duration: Option<u32>,
    pub notes: Option<String>,
    pub session_notes: Option<String>,
}

impl AppointmentForUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: AppointmentStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.date.is_none()
            && self.duration.is_none()
            && self.notes.is_none()
            && self.session_notes.is_none()
    }
}

// endregion: --- Appointment

// region: --- TelemedicineSession

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TelemedicineSession {
    pub id: String,
    pub appointment_id: String,
    pub room_id: String,
    pub status: SessionStatus,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default)]
pub struct SessionForCreate {
    pub appointment_id: String,
    /// Generated as `room-<uuid>` when absent
    pub room_id: Option<String>,
    pub status: Option<SessionStatus>,
}

#[derive(Debug, Clone, Default)]
pub struct SessionForUpdate {
    pub status: Option<SessionStatus>,
}

impl SessionForUpdate {
    pub fn status(status: SessionStatus) -> Self {
        Self { status: Some(status) }
    }
}

// endregion: --- TelemedicineSession

// region: --- ChatMessage

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub session_id: Option<String>,
    pub sender_id: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct ChatMessageForCreate {
    pub session_id: Option<String>,
    pub sender_id: String,
    pub message: String,
    /// Defaults to the time of insertion
    pub timestamp: Option<DateTime<Utc>>,
}

// endregion: --- ChatMessage

// region: --- MedicalNews

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MedicalNews {
    pub id: String,
    pub title: String,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub source: Option<String>,
    pub published_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct NewsForCreate {
    pub title: String,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub source: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

// endregion: --- MedicalNews

// region: --- AiConversation

/// One turn of an assistant conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AiTurn {
    pub role: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AiConversation {
    pub id: String,
    pub user_id: String,
    pub messages: Vec<AiTurn>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct AiConversationForCreate {
    pub user_id: String,
    pub messages: Vec<AiTurn>,
    pub created_at: Option<DateTime<Utc>>,
}

// endregion: --- AiConversation
