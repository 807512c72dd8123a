use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::instrument;
use uuid::Uuid;

use super::pg_error::map_sqlx_error;
use crate::application::ports::{MeetingRepository, RepositoryError};
use crate::domain::{Meeting, MeetingDetails, MeetingId, Tenant};

pub struct PgMeetingRepository {
    pool: PgPool,
}

impl PgMeetingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct MeetingRow {
    id: Uuid,
    name: String,
    scheduled_at: DateTime<Utc>,
    owner_email: String,
    created_by: String,
    transcript_id: Option<String>,
    details: Option<Json<MeetingDetails>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<MeetingRow> for Meeting {
    fn from(r: MeetingRow) -> Self {
        Meeting {
            id: MeetingId::from_uuid(r.id),
            name: r.name,
            scheduled_at: r.scheduled_at,
            owner: Tenant::new(r.owner_email),
            created_by: r.created_by,
            transcript_id: r.transcript_id,
            details: r.details.map(|Json(details)| details),
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[async_trait]
impl MeetingRepository for PgMeetingRepository {
    #[instrument(skip(self, meeting), fields(meeting_id = %meeting.id))]
    async fn create(&self, meeting: &Meeting) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO meetings (id, name, scheduled_at, owner_email, created_by,
                                  transcript_id, details, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(meeting.id.as_uuid())
        .bind(&meeting.name)
        .bind(meeting.scheduled_at)
        .bind(meeting.owner.as_str())
        .bind(&meeting.created_by)
        .bind(&meeting.transcript_id)
        .bind(meeting.details.as_ref().map(Json))
        .bind(meeting.created_at)
        .bind(meeting.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    #[instrument(skip(self), fields(meeting_id = %id, owner = %owner))]
    async fn find(&self, id: MeetingId, owner: &Tenant) -> Result<Option<Meeting>, RepositoryError> {
        let row: Option<MeetingRow> = sqlx::query_as(
            r#"
            SELECT id, name, scheduled_at, owner_email, created_by, transcript_id, details,
                   created_at, updated_at
            FROM meetings
            WHERE id = $1 AND owner_email = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(owner.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(Meeting::from))
    }

    #[instrument(skip(self), fields(owner = %owner))]
    async fn list_by_owner(&self, owner: &Tenant) -> Result<Vec<Meeting>, RepositoryError> {
        let rows: Vec<MeetingRow> = sqlx::query_as(
            r#"
            SELECT id, name, scheduled_at, owner_email, created_by, transcript_id, details,
                   created_at, updated_at
            FROM meetings
            WHERE owner_email = $1
            ORDER BY scheduled_at DESC
            "#,
        )
        .bind(owner.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(Meeting::from).collect())
    }

    #[instrument(skip(self), fields(meeting_id = %id, owner = %owner))]
    async fn attach_transcript(
        &self,
        id: MeetingId,
        owner: &Tenant,
        transcript_id: &str,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE meetings
            SET transcript_id = $1, details = NULL, updated_at = $2
            WHERE id = $3 AND owner_email = $4
            "#,
        )
        .bind(transcript_id)
        .bind(Utc::now())
        .bind(id.as_uuid())
        .bind(owner.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, details), fields(meeting_id = %id))]
    async fn save_details(
        &self,
        id: MeetingId,
        details: &MeetingDetails,
    ) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE meetings SET details = $1, updated_at = $2 WHERE id = $3")
            .bind(Json(details))
            .bind(Utc::now())
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_created_by(&self, email: &str) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM meetings WHERE created_by = $1")
            .bind(email)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }
}
