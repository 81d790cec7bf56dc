//! # Entity Plumbing
//!
//! The [`Entity`] / [`Updatable`] traits that let [`RecordStore`](super::RecordStore)
//! expose one generic `create/get/filter/update` surface over eight typed
//! tables, and the impls that carry each entity's defaults and merge rules.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use uuid::Uuid;

use super::models::*;
use crate::error::{AppError, Result};

// region: --- Table

/// Insertion-ordered table keyed by record id. Records are never removed.
#[derive(Debug)]
pub struct Table<T> {
    rows: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Entity> Table<T> {
    pub fn get(&self, id: &str) -> Option<&T> {
        self.index.get(id).map(|&i| &self.rows[i])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        match self.index.get(id) {
            Some(&i) => Some(&mut self.rows[i]),
            None => None,
        }
    }

    pub fn insert(&mut self, record: T) {
        self.index.insert(record.id().to_string(), self.rows.len());
        self.rows.push(record);
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// All entity tables. Guarded as a unit by the store's lock.
#[derive(Debug, Default)]
pub struct Tables {
    pub users: Table<User>,
    pub doctors: Table<Doctor>,
    pub clinics: Table<Clinic>,
    pub appointments: Table<Appointment>,
    pub sessions: Table<TelemedicineSession>,
    pub chat_messages: Table<ChatMessage>,
    pub news: Table<MedicalNews>,
    pub ai_conversations: Table<AiConversation>,
}

// endregion: --- Table

// region: --- Traits

/// A record type the store can hold.
pub trait Entity: Clone + Send + Sync + Sized + 'static {
    /// Input accepted by `create`
    type ForCreate: Send;

    /// Human-readable kind, used in not-found messages
    const KIND: &'static str;

    fn id(&self) -> &str;

    /// Build a complete record from its input, filling defaults.
    fn build(id: String, input: Self::ForCreate, now: DateTime<Utc>) -> Result<Self>;

    fn table(tables: &Tables) -> &Table<Self>;

    fn table_mut(tables: &mut Tables) -> &mut Table<Self>;

    /// Cross-record constraints checked under the write lock before insert.
    fn check_unique(&self, _tables: &Tables) -> Result<()> {
        Ok(())
    }
}

/// An entity that accepts partial updates.
pub trait Updatable: Entity {
    type ForUpdate: Send;

    /// Merge `patch` into `self`. On error `self` must be discarded by the caller.
    fn apply(&mut self, patch: Self::ForUpdate, now: DateTime<Utc>) -> Result<()>;
}

pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn not_found(kind: &str) -> AppError {
    AppError::NotFound(format!("{} not found", kind))
}

pub(crate) fn not_found_for<E: Entity>() -> AppError {
    not_found(E::KIND)
}

// endregion: --- Traits

// region: --- Entity impls

impl Entity for User {
    type ForCreate = UserForCreate;
    const KIND: &'static str = "User";

    fn id(&self) -> &str {
        &self.id
    }

    fn build(id: String, input: UserForCreate, now: DateTime<Utc>) -> Result<Self> {
        Ok(User {
            id,
            email: input.email,
            name: input.name,
            role: input.role,
            avatar: input.avatar,
            phone: input.phone,
            created_at: now,
        })
    }

    fn table(tables: &Tables) -> &Table<Self> {
        &tables.users
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.users
    }

    fn check_unique(&self, tables: &Tables) -> Result<()> {
        let taken = tables
            .users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(&self.email));
        if taken {
            return Err(AppError::validation("email", "Email already registered"));
        }
        Ok(())
    }
}

impl Entity for Doctor {
    type ForCreate = DoctorForCreate;
    const KIND: &'static str = "Doctor";

    fn id(&self) -> &str {
        &self.id
    }

    fn build(id: String, input: DoctorForCreate, _now: DateTime<Utc>) -> Result<Self> {
        let rating = input.rating.unwrap_or(DEFAULT_DOCTOR_RATING);
        if rating > MAX_DOCTOR_RATING {
            return Err(AppError::validation(
                "rating",
                format!("rating must be between 0 and {}", MAX_DOCTOR_RATING),
            ));
        }
        Ok(Doctor {
            id,
            user_id: input.user_id,
            specialty: input.specialty,
            experience: input.experience,
            fee: input.fee,
            rating,
            availability: input.availability,
            clinic_id: input.clinic_id,
        })
    }

    fn table(tables: &Tables) -> &Table<Self> {
        &tables.doctors
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.doctors
    }
}

impl Entity for Clinic {
    type ForCreate = ClinicForCreate;
    const KIND: &'static str = "Clinic";

    fn id(&self) -> &str {
        &self.id
    }

    fn build(id: String, input: ClinicForCreate, _now: DateTime<Utc>) -> Result<Self> {
        Ok(Clinic {
            id,
            user_id: input.user_id,
            name: input.name,
            address: input.address,
            phone: input.phone,
            description: input.description,
        })
    }

    fn table(tables: &Tables) -> &Table<Self> {
        &tables.clinics
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.clinics
    }
}

impl Entity for Appointment {
    type ForCreate = AppointmentForCreate;
    const KIND: &'static str = "Appointment";

    fn id(&self) -> &str {
        &self.id
    }

    fn build(id: String, input: AppointmentForCreate, now: DateTime<Utc>) -> Result<Self> {
        Ok(Appointment {
            id,
            patient_id: input.patient_id,
            doctor_id: input.doctor_id,
            clinic_id: input.clinic_id,
            date: input.date,
            duration: input.duration.unwrap_or(DEFAULT_APPOINTMENT_DURATION),
            status: input.status.unwrap_or_default(),
            appointment_type: input.appointment_type,
            notes: input.notes,
            session_notes: input.session_notes,
            created_at: now,
        })
    }

    fn table(tables: &Tables) -> &Table<Self> {
        &tables.appointments
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.appointments
    }
}

impl Updatable for Appointment {
    type ForUpdate = AppointmentForUpdate;

    fn apply(&mut self, patch: AppointmentForUpdate, _now: DateTime<Utc>) -> Result<()> {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        if let Some(notes) = patch.notes {
            self.notes = Some(notes);
        }
        if let Some(session_notes) = patch.session_notes {
            self.session_notes = Some(session_notes);
        }
        Ok(())
    }
}

impl TelemedicineSession {
    /// Move to `next`, stamping `started_at` / `ended_at` on the way.
    pub fn transition(&mut self, next: SessionStatus, now: DateTime<Utc>) -> Result<()> {
        if next < self.status {
            return Err(AppError::validation(
                "status",
                format!("cannot move session from {} to {}", self.status, next),
            ));
        }
        if next == self.status {
            return Ok(());
        }
        match next {
            SessionStatus::Waiting => {}
            SessionStatus::Active => {
                self.started_at.get_or_insert(now);
            }
            SessionStatus::Ended => {
                self.started_at.get_or_insert(now);
                self.ended_at = Some(now);
            }
        }
        self.status = next;
        Ok(())
    }
}

impl Entity for TelemedicineSession {
    type ForCreate = SessionForCreate;
    const KIND: &'static str = "Telemedicine session";

    fn id(&self) -> &str {
        &self.id
    }

    fn build(id: String, input: SessionForCreate, now: DateTime<Utc>) -> Result<Self> {
        let room_id = input
            .room_id
            .unwrap_or_else(|| format!("room-{}", Uuid::new_v4()));
        let mut session = TelemedicineSession {
            id,
            appointment_id: input.appointment_id,
            room_id,
            status: SessionStatus::Waiting,
            started_at: None,
            ended_at: None,
        };
        session.transition(input.status.unwrap_or_default(), now)?;
        Ok(session)
    }

    fn table(tables: &Tables) -> &Table<Self> {
        &tables.sessions
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.sessions
    }
}

impl Updatable for TelemedicineSession {
    type ForUpdate = SessionForUpdate;

    fn apply(&mut self, patch: SessionForUpdate, now: DateTime<Utc>) -> Result<()> {
        match patch.status {
            Some(status) => self.transition(status, now),
            None => Ok(()),
        }
    }
}

impl Entity for ChatMessage {
    type ForCreate = ChatMessageForCreate;
    const KIND: &'static str = "Chat message";

    fn id(&self) -> &str {
        &self.id
    }

    fn build(id: String, input: ChatMessageForCreate, now: DateTime<Utc>) -> Result<Self> {
        Ok(ChatMessage {
            id,
            session_id: input.session_id,
            sender_id: input.sender_id,
            message: input.message,
            timestamp: input.timestamp.unwrap_or(now),
        })
    }

    fn table(tables: &Tables) -> &Table<Self> {
        &tables.chat_messages
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.chat_messages
    }
}

impl Entity for MedicalNews {
    type ForCreate = NewsForCreate;
    const KIND: &'static str = "News item";

    fn id(&self) -> &str {
        &self.id
    }

    fn build(id: String, input: NewsForCreate, now: DateTime<Utc>) -> Result<Self> {
        Ok(MedicalNews {
            id,
            title: input.title,
            summary: input.summary,
            content: input.content,
            image_url: input.image_url,
            source: input.source,
            published_at: input.published_at.unwrap_or(now),
        })
    }

    fn table(tables: &Tables) -> &Table<Self> {
        &tables.news
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.news
    }
}

impl Entity for AiConversation {
    type ForCreate = AiConversationForCreate;
    const KIND: &'static str = "AI conversation";

    fn id(&self) -> &str {
        &self.id
    }

    fn build(id: String, input: AiConversationForCreate, now: DateTime<Utc>) -> Result<Self> {
        Ok(AiConversation {
            id,
            user_id: input.user_id,
            messages: input.messages,
            created_at: input.created_at.unwrap_or(now),
        })
    }

    fn table(tables: &Tables) -> &Table<Self> {
        &tables.ai_conversations
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.ai_conversations
    }
}

// endregion: --- Entity impls
