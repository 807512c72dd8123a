use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{Document, DocumentId, Tenant};

#[async_trait]
pub trait DocumentRepository: Send + Sync {
    async fn create(&self, document: &Document) -> Result<(), RepositoryError>;

    async fn find(
        &self,
        id: DocumentId,
        owner: &Tenant,
    ) -> Result<Option<Document>, RepositoryError>;

    async fn list_by_owner(&self, owner: &Tenant) -> Result<Vec<Document>, RepositoryError>;

    async fn delete(&self, id: DocumentId) -> Result<bool, RepositoryError>;
}
