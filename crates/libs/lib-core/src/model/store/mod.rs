//! # Record Store
//!
//! Authoritative in-memory holder of every domain entity.
//!
//! All eight tables sit behind one `tokio::sync::RwLock`. Every mutation takes
//! the write lock exactly once, builds or patches a private copy, and only
//! then swaps it into the table, so callers never observe a partial record and
//! a failed create/update leaves prior state untouched.
//!
//! ## Example
//!
//! ```rust,no_run
//! # use lib_core::model::store::{RecordStore, models::*};
//! # async fn example() -> lib_core::Result<()> {
//! let store = RecordStore::new();
//! let user = store
//!     .create_user(UserForCreate::new("a@b.com", "A", UserRole::Patient))
//!     .await?;
//! assert_eq!(store.get_user(&user.id).await, Some(user));
//! # Ok(())
//! # }
//! ```

// region: --- Modules
mod entity;
pub mod models;

// endregion: --- Modules

// region: --- Re-exports
pub use entity::{Entity, Table, Tables, Updatable};
// endregion: --- Re-exports

use chrono::Duration;
use lib_utils::now_utc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::Result;
use entity::{new_id, not_found_for};
use models::*;

#[derive(Debug, Default)]
pub struct RecordStore {
    tables: RwLock<Tables>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    // region: --- Generic operations

    /// Assign an id, fill defaults and store the record.
    pub async fn create<E: Entity>(&self, input: E::ForCreate) -> Result<E> {
        let record = E::build(new_id(), input, now_utc())?;

        let mut tables = self.tables.write().await;
        record.check_unique(&tables)?;
        E::table_mut(&mut tables).insert(record.clone());

        debug!("[STORE] created {} id={}", E::KIND, record.id());
        Ok(record)
    }

    pub async fn get<E: Entity>(&self, id: &str) -> Option<E> {
        let tables = self.tables.read().await;
        E::table(&tables).get(id).cloned()
    }

    /// Linear scan in insertion order.
    pub async fn filter<E, F>(&self, predicate: F) -> Vec<E>
    where
        E: Entity,
        F: Fn(&E) -> bool,
    {
        let tables = self.tables.read().await;
        E::table(&tables)
            .iter()
            .filter(|&record| predicate(record))
            .cloned()
            .collect()
    }

    /// Merge `patch` into the record with `id`.
    pub async fn update<E: Updatable>(&self, id: &str, patch: E::ForUpdate) -> Result<E> {
        let mut tables = self.tables.write().await;
        let slot = E::table_mut(&mut tables)
            .get_mut(id)
            .ok_or_else(not_found_for::<E>)?;

        let mut updated = slot.clone();
        updated.apply(patch, now_utc())?;
        *slot = updated.clone();

        debug!("[STORE] updated {} id={}", E::KIND, id);
        Ok(updated)
    }

    pub async fn count<E: Entity>(&self) -> usize {
        let tables = self.tables.read().await;
        E::table(&tables).len()
    }

    // endregion: --- Generic operations

    // region: --- Users

    pub async fn get_user(&self, id: &str) -> Option<User> {
        self.get(id).await
    }

    pub async fn get_user_by_email(&self, email: &str) -> Option<User> {
        self.filter::<User, _>(|u| u.email.eq_ignore_ascii_case(email))
            .await
            .into_iter()
            .next()
    }

    /// Fails with a validation error when the email is already registered.
    pub async fn create_user(&self, input: UserForCreate) -> Result<User> {
        self.create(input).await
    }

    // endregion: --- Users

    // region: --- Doctors & Clinics

    pub async fn list_doctors(&self) -> Vec<Doctor> {
        self.filter(|_: &Doctor| true).await
    }

    pub async fn doctors_by_clinic(&self, clinic_id: &str) -> Vec<Doctor> {
        self.filter::<Doctor, _>(|d| d.clinic_id.as_deref() == Some(clinic_id))
            .await
    }

    pub async fn create_doctor(&self, input: DoctorForCreate) -> Result<Doctor> {
        self.create(input).await
    }

    pub async fn get_clinic(&self, id: &str) -> Option<Clinic> {
        self.get(id).await
    }

    pub async fn create_clinic(&self, input: ClinicForCreate) -> Result<Clinic> {
        self.create(input).await
    }

    // endregion: --- Doctors & Clinics

    // region: --- Appointments

    pub async fn get_appointment(&self, id: &str) -> Option<Appointment> {
        self.get(id).await
    }

    pub async fn appointments_by_patient(&self, patient_id: &str) -> Vec<Appointment> {
        self.filter::<Appointment, _>(|a| a.patient_id == patient_id)
            .await
    }

    pub async fn appointments_by_doctor(&self, doctor_id: &str) -> Vec<Appointment> {
        self.filter::<Appointment, _>(|a| a.doctor_id == doctor_id)
            .await
    }

    pub async fn create_appointment(&self, input: AppointmentForCreate) -> Result<Appointment> {
        self.create(input).await
    }

    pub async fn update_appointment(
        &self,
        id: &str,
        patch: AppointmentForUpdate,
    ) -> Result<Appointment> {
        self.update::<Appointment>(id, patch).await
    }

    // endregion: --- Appointments

    // region: --- Telemedicine

    pub async fn get_session(&self, id: &str) -> Option<TelemedicineSession> {
        self.get(id).await
    }

    pub async fn create_session(&self, input: SessionForCreate) -> Result<TelemedicineSession> {
        self.create(input).await
    }

    pub async fn update_session(
        &self,
        id: &str,
        patch: SessionForUpdate,
    ) -> Result<TelemedicineSession> {
        self.update::<TelemedicineSession>(id, patch).await
    }

    /// Messages of one session, oldest first.
    pub async fn chat_messages_by_session(&self, session_id: &str) -> Vec<ChatMessage> {
        let mut messages = self
            .filter::<ChatMessage, _>(|m| m.session_id.as_deref() == Some(session_id))
            .await;
        messages.sort_by_key(|m| m.timestamp);
        messages
    }

    pub async fn create_chat_message(&self, input: ChatMessageForCreate) -> Result<ChatMessage> {
        self.create(input).await
    }

    // endregion: --- Telemedicine

    // region: --- News

    /// All news, newest first.
    pub async fn list_news(&self) -> Vec<MedicalNews> {
        let mut news = self.filter(|_: &MedicalNews| true).await;
        news.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        news
    }

    pub async fn create_news(&self, input: NewsForCreate) -> Result<MedicalNews> {
        self.create(input).await
    }

    /// Insert the two articles shown on a fresh dashboard. No-op once any news exists.
    pub async fn seed_sample_news(&self) -> Result<()> {
        if !self.tables.read().await.news.is_empty() {
            debug!("[STORE] news already present, skipping sample seed");
            return Ok(());
        }

        let now = now_utc();
        let samples = [
            NewsForCreate {
                title: "Latest Breakthrough in Heart Disease Treatment".to_string(),
                summary: Some(
                    "Researchers have discovered a new minimally invasive procedure that significantly reduces recovery time for cardiac patients."
                        .to_string(),
                ),
                content: Some("Full article content here...".to_string()),
                image_url: Some(
                    "https://images.unsplash.com/photo-1576091160399-112ba8d25d1f?w=400&h=200&fit=crop"
                        .to_string(),
                ),
                source: Some("Medical Journal".to_string()),
                published_at: Some(now),
            },
            NewsForCreate {
                title: "New Guidelines for Diabetes Management".to_string(),
                summary: Some(
                    "Updated recommendations from the American Diabetes Association for improved patient outcomes."
                        .to_string(),
                ),
                content: Some("Full article content here...".to_string()),
                image_url: Some(
                    "https://images.unsplash.com/photo-1582750433449-648ed127bb54?w=400&h=200&fit=crop"
                        .to_string(),
                ),
                source: Some("ADA".to_string()),
                published_at: Some(now - Duration::days(1)),
            },
        ];

        let count = samples.len();
        for input in samples {
            self.create_news(input).await?;
        }

        info!("[STORE] seeded {} sample news items", count);
        Ok(())
    }

    // endregion: --- News

    // region: --- AI conversations

    /// Conversations of one user, newest first.
    pub async fn ai_conversations_by_user(&self, user_id: &str) -> Vec<AiConversation> {
        let mut conversations = self
            .filter::<AiConversation, _>(|c| c.user_id == user_id)
            .await;
        conversations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        conversations
    }

    pub async fn create_ai_conversation(
        &self,
        input: AiConversationForCreate,
    ) -> Result<AiConversation> {
        self.create(input).await
    }

    // endregion: --- AI conversations
}
