use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{Meeting, MeetingDetails, MeetingId, Tenant};

#[async_trait]
pub trait MeetingRepository: Send + Sync {
    async fn create(&self, meeting: &Meeting) -> Result<(), RepositoryError>;

    async fn find(&self, id: MeetingId, owner: &Tenant)
    -> Result<Option<Meeting>, RepositoryError>;

    async fn list_by_owner(&self, owner: &Tenant) -> Result<Vec<Meeting>, RepositoryError>;

    /// Returns `false` when no meeting matched.
    async fn attach_transcript(
        &self,
        id: MeetingId,
        owner: &Tenant,
        transcript_id: &str,
    ) -> Result<bool, RepositoryError>;

    async fn save_details(
        &self,
        id: MeetingId,
        details: &MeetingDetails,
    ) -> Result<(), RepositoryError>;

    /// Deletes every meeting created by `email`, returning how many were removed.
    async fn delete_created_by(&self, email: &str) -> Result<u64, RepositoryError>;
}
