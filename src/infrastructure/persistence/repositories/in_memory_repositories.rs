use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::application::ports::{
    DocumentRepository, MeetingRepository, RepositoryError, UserRepository,
};
use crate::domain::{Document, DocumentId, Meeting, MeetingDetails, MeetingId, Tenant, User};

/// Users kept in memory, with the same unique-email rule as the `users` table.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> Result<(), RepositoryError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(RepositoryError::Duplicate(format!(
                "duplicate email {}",
                user.email
            )));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn update_profile(
        &self,
        current_email: &str,
        name: &str,
        email: &str,
        company_name: Option<&str>,
    ) -> Result<(), RepositoryError> {
        let mut users = self.users.write().await;
        if email != current_email && users.iter().any(|u| u.email == email) {
            return Err(RepositoryError::Duplicate(format!(
                "duplicate email {email}"
            )));
        }
        if let Some(user) = users.iter_mut().find(|u| u.email == current_email) {
            user.name = name.to_string();
            user.email = email.to_string();
            user.company_name = company_name.map(str::to_string);
            user.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn update_password(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<(), RepositoryError> {
        if let Some(user) = self
            .users
            .write()
            .await
            .iter_mut()
            .find(|u| u.email == email)
        {
            user.password_hash = password_hash.to_string();
            user.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn set_reset_token(
        &self,
        email: &str,
        reset_token: Option<&str>,
    ) -> Result<(), RepositoryError> {
        if let Some(user) = self
            .users
            .write()
            .await
            .iter_mut()
            .find(|u| u.email == email)
        {
            user.reset_token = reset_token.map(str::to_string);
        }
        Ok(())
    }

    async fn list_team_members(&self, owner_email: &str) -> Result<Vec<User>, RepositoryError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .filter(|u| u.owner_company_email.as_deref() == Some(owner_email))
            .cloned()
            .collect())
    }

    async fn delete(&self, email: &str) -> Result<bool, RepositoryError> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| u.email != email);
        Ok(users.len() < before)
    }
}

#[derive(Default)]
pub struct InMemoryDocumentRepository {
    documents: RwLock<Vec<Document>>,
}

impl InMemoryDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn create(&self, document: &Document) -> Result<(), RepositoryError> {
        self.documents.write().await.push(document.clone());
        Ok(())
    }

    async fn find(
        &self,
        id: DocumentId,
        owner: &Tenant,
    ) -> Result<Option<Document>, RepositoryError> {
        Ok(self
            .documents
            .read()
            .await
            .iter()
            .find(|d| d.id == id && &d.owner == owner)
            .cloned())
    }

    async fn list_by_owner(&self, owner: &Tenant) -> Result<Vec<Document>, RepositoryError> {
        Ok(self
            .documents
            .read()
            .await
            .iter()
            .filter(|d| &d.owner == owner)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: DocumentId) -> Result<bool, RepositoryError> {
        let mut documents = self.documents.write().await;
        let before = documents.len();
        documents.retain(|d| d.id != id);
        Ok(documents.len() < before)
    }
}

#[derive(Default)]
pub struct InMemoryMeetingRepository {
    meetings: RwLock<Vec<Meeting>>,
}

impl InMemoryMeetingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a meeting as-is, bypassing the service layer.
    pub async fn insert(&self, meeting: Meeting) {
        self.meetings.write().await.push(meeting);
    }
}

#[async_trait]
impl MeetingRepository for InMemoryMeetingRepository {
    async fn create(&self, meeting: &Meeting) -> Result<(), RepositoryError> {
        self.meetings.write().await.push(meeting.clone());
        Ok(())
    }

    async fn find(&self, id: MeetingId, owner: &Tenant) -> Result<Option<Meeting>, RepositoryError> {
        Ok(self
            .meetings
            .read()
            .await
            .iter()
            .find(|m| m.id == id && &m.owner == owner)
            .cloned())
    }

    async fn list_by_owner(&self, owner: &Tenant) -> Result<Vec<Meeting>, RepositoryError> {
        Ok(self
            .meetings
            .read()
            .await
            .iter()
            .filter(|m| &m.owner == owner)
            .cloned()
            .collect())
    }

    async fn attach_transcript(
        &self,
        id: MeetingId,
        owner: &Tenant,
        transcript_id: &str,
    ) -> Result<bool, RepositoryError> {
        let mut meetings = self.meetings.write().await;
        match meetings.iter_mut().find(|m| m.id == id && &m.owner == owner) {
            Some(meeting) => {
                meeting.transcript_id = Some(transcript_id.to_string());
                meeting.details = None;
                meeting.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn save_details(
        &self,
        id: MeetingId,
        details: &MeetingDetails,
    ) -> Result<(), RepositoryError> {
        if let Some(meeting) = self
            .meetings
            .write()
            .await
            .iter_mut()
            .find(|m| m.id == id)
        {
            meeting.details = Some(details.clone());
            meeting.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn delete_created_by(&self, email: &str) -> Result<u64, RepositoryError> {
        let mut meetings = self.meetings.write().await;
        let before = meetings.len();
        meetings.retain(|m| m.created_by != email);
        Ok((before - meetings.len()) as u64)
    }
}
