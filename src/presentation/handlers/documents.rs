use std::io;

use axum::extract::{Multipart, Path, State};
use chrono::{DateTime, Utc};
use futures::{StreamExt, TryStreamExt};
use serde::{Deserialize, Serialize};

use crate::application::services::{IngestionError, StagedUpload};
use crate::domain::{Document, DocumentId, StoragePath};
use crate::presentation::error::ApiError;
use crate::presentation::extractors::{
    CallerIdentity, EffectiveTenant, JsonBody, UploadForm,
};
use crate::presentation::response::{ApiResponse, ApiResult, Flag};
use crate::presentation::state::AppState;

const FILE_FIELD: &str = "file";

#[derive(Serialize)]
pub struct AnswerResponse {
    pub answer: String,
}

#[derive(Serialize)]
pub struct UploadResponse {
    pub status: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentView {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub mime_type: &'static str,
    pub user_email: String,
    pub size_bytes: u64,
    pub created_at: DateTime<Utc>,
}

impl From<Document> for DocumentView {
    fn from(document: Document) -> Self {
        Self {
            id: document.id.as_uuid().to_string(),
            name: document.name,
            mime_type: document.content_type.as_mime(),
            user_email: document.owner.as_str().to_string(),
            size_bytes: document.size_bytes,
            created_at: document.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct DocumentsResponse {
    pub documents: Vec<DocumentView>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeleteDocumentBody {
    pub document_id: String,
}

pub async fn answer_handler(
    State(state): State<AppState>,
    scope: EffectiveTenant,
    Path(question): Path<String>,
) -> ApiResult<AnswerResponse> {
    let answer = state
        .retrieval_service
        .answer(&scope.tenant, &question)
        .await?;
    Ok(ApiResponse(AnswerResponse { answer }))
}

pub async fn punctuate_handler(
    State(state): State<AppState>,
    _caller: CallerIdentity,
    Path(phrase): Path<String>,
) -> ApiResult<AnswerResponse> {
    let answer = state.retrieval_service.punctuate(&phrase).await?;
    Ok(ApiResponse(AnswerResponse { answer }))
}

pub async fn list_documents_handler(
    State(state): State<AppState>,
    scope: EffectiveTenant,
) -> ApiResult<DocumentsResponse> {
    let documents = state.ingestion_service.list_documents(&scope.tenant).await?;
    Ok(ApiResponse(DocumentsResponse {
        documents: documents.into_iter().map(DocumentView::from).collect(),
    }))
}

#[tracing::instrument(skip(state, multipart), fields(tenant = %scope.tenant))]
pub async fn upload_single_handler(
    State(state): State<AppState>,
    scope: EffectiveTenant,
    UploadForm(mut multipart): UploadForm,
) -> ApiResult<UploadResponse> {
    let mut staged = stage_uploads(&state, &mut multipart, 1).await?;
    let upload = staged
        .pop()
        .ok_or_else(|| ApiError::validation("No file attached"))?;

    state.ingestion_service.ingest(&scope.tenant, upload).await?;
    Ok(ApiResponse(UploadResponse { status: "uploaded" }))
}

#[tracing::instrument(skip(state, multipart), fields(tenant = %scope.tenant))]
pub async fn upload_multiple_handler(
    State(state): State<AppState>,
    scope: EffectiveTenant,
    UploadForm(mut multipart): UploadForm,
) -> ApiResult<UploadResponse> {
    let staged = stage_uploads(&state, &mut multipart, state.uploads.max_files).await?;
    if staged.is_empty() {
        return Err(ApiError::validation("No file attached"));
    }

    state
        .ingestion_service
        .ingest_all(&scope.tenant, staged)
        .await?;
    Ok(ApiResponse(UploadResponse { status: "uploaded" }))
}

pub async fn delete_document_handler(
    State(state): State<AppState>,
    scope: EffectiveTenant,
    JsonBody(body): JsonBody<DeleteDocumentBody>,
) -> ApiResult<Flag> {
    let raw = body.document_id.trim();
    if raw.is_empty() {
        return Err(ApiError::validation("Document Id is required"));
    }
    // An id that is not a UUID cannot name a stored document.
    let id: DocumentId = raw.parse().map_err(|_| IngestionError::DocumentNotFound)?;

    state
        .ingestion_service
        .delete_document(&scope.tenant, id)
        .await?;
    Ok(ApiResponse(Flag::deleted()))
}

/// Streams every `file` field of the request into the staging store.
/// On failure, whatever was already staged is removed again.
async fn stage_uploads(
    state: &AppState,
    multipart: &mut Multipart,
    limit: usize,
) -> Result<Vec<StagedUpload>, ApiError> {
    let mut staged: Vec<StagedUpload> = Vec::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                discard_staged(state, &staged).await;
                return Err(ApiError::validation(format!(
                    "Failed to read multipart: {}",
                    e
                )));
            }
        };

        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        if staged.len() >= limit {
            discard_staged(state, &staged).await;
            return Err(ApiError::validation(format!(
                "At most {} files can be uploaded",
                limit
            )));
        }

        let filename = field.file_name().unwrap_or("unknown").to_string();
        let mime_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let path = StoragePath::staged(&filename);

        tracing::debug!(filename = %filename, content_type = %mime_type, "Staging upload");

        let stream = field
            .map_err(|e| io::Error::other(e.to_string()))
            .boxed();
        match state.staging_store.stage(&path, stream).await {
            Ok(size_bytes) => staged.push(StagedUpload {
                path,
                filename,
                mime_type,
                size_bytes,
            }),
            Err(e) => {
                discard_staged(state, &staged).await;
                return Err(ApiError::internal(e));
            }
        }
    }

    Ok(staged)
}

async fn discard_staged(state: &AppState, staged: &[StagedUpload]) {
    for upload in staged {
        if let Err(e) = state.staging_store.discard(&upload.path).await {
            tracing::warn!(path = %upload.path, error = %e, "Failed to discard staged upload");
        }
    }
}
