use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use super::pg_error::map_sqlx_error;
use crate::application::ports::{DocumentRepository, RepositoryError};
use crate::domain::{ContentType, Document, DocumentId, Tenant};

pub struct PgDocumentRepository {
    pool: PgPool,
}

impl PgDocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct DocumentRow {
    id: Uuid,
    name: String,
    content_type: String,
    owner_email: String,
    size_bytes: i64,
    created_at: DateTime<Utc>,
}

impl TryFrom<DocumentRow> for Document {
    type Error = RepositoryError;

    fn try_from(r: DocumentRow) -> Result<Self, Self::Error> {
        let content_type = ContentType::from_mime(&r.content_type).ok_or_else(|| {
            RepositoryError::CorruptRecord(format!("unknown content type {}", r.content_type))
        })?;

        Ok(Document {
            id: DocumentId::from_uuid(r.id),
            name: r.name,
            content_type,
            owner: Tenant::new(r.owner_email),
            size_bytes: r.size_bytes.max(0) as u64,
            created_at: r.created_at,
        })
    }
}

#[async_trait]
impl DocumentRepository for PgDocumentRepository {
    #[instrument(skip(self, document), fields(document_id = %document.id.as_uuid()))]
    async fn create(&self, document: &Document) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO documents (id, name, content_type, owner_email, size_bytes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(document.id.as_uuid())
        .bind(&document.name)
        .bind(document.content_type.as_mime())
        .bind(document.owner.as_str())
        .bind(document.size_bytes as i64)
        .bind(document.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    #[instrument(skip(self), fields(document_id = %id.as_uuid(), owner = %owner))]
    async fn find(
        &self,
        id: DocumentId,
        owner: &Tenant,
    ) -> Result<Option<Document>, RepositoryError> {
        let row: Option<DocumentRow> = sqlx::query_as(
            r#"
            SELECT id, name, content_type, owner_email, size_bytes, created_at
            FROM documents
            WHERE id = $1 AND owner_email = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(owner.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(Document::try_from).transpose()
    }

    #[instrument(skip(self), fields(owner = %owner))]
    async fn list_by_owner(&self, owner: &Tenant) -> Result<Vec<Document>, RepositoryError> {
        let rows: Vec<DocumentRow> = sqlx::query_as(
            r#"
            SELECT id, name, content_type, owner_email, size_bytes, created_at
            FROM documents
            WHERE owner_email = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.into_iter().map(Document::try_from).collect()
    }

    #[instrument(skip(self), fields(document_id = %id.as_uuid()))]
    async fn delete(&self, id: DocumentId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}
