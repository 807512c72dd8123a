use axum::extract::{Path, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::services::{DemoRequest, MeetingError};
use crate::domain::{Meeting, MeetingDetails, MeetingId};
use crate::presentation::error::ApiError;
use crate::presentation::extractors::{EffectiveTenant, JsonBody};
use crate::presentation::response::{ApiResponse, ApiResult, Flag};
use crate::presentation::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingView {
    pub id: String,
    pub name: String,
    pub time: DateTime<Utc>,
    pub user_email: String,
    pub created_by: String,
    /// External transcription id, once the recording has been uploaded.
    pub meeting_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Meeting> for MeetingView {
    fn from(meeting: Meeting) -> Self {
        Self {
            id: meeting.id.to_string(),
            name: meeting.name,
            time: meeting.scheduled_at,
            user_email: meeting.owner.as_str().to_string(),
            created_by: meeting.created_by,
            meeting_id: meeting.transcript_id,
            created_at: meeting.created_at,
            updated_at: meeting.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct MeetingsResponse {
    pub meetings: Vec<MeetingView>,
}

#[derive(Serialize)]
pub struct MeetingResponse {
    pub meeting: MeetingView,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingDetailsResponse {
    pub meeting_transcription_details: MeetingDetails,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SaveMeetingBody {
    pub name: String,
    pub time: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateMeetingBody {
    pub id: String,
    pub meeting_id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScheduleDemoBody {
    pub email: String,
    pub name: String,
    pub company_name: String,
}

pub async fn list_meetings_handler(
    State(state): State<AppState>,
    scope: EffectiveTenant,
) -> ApiResult<MeetingsResponse> {
    let meetings = state.meeting_service.list(&scope.tenant).await?;
    Ok(ApiResponse(MeetingsResponse {
        meetings: meetings.into_iter().map(MeetingView::from).collect(),
    }))
}

pub async fn single_meeting_handler(
    State(state): State<AppState>,
    scope: EffectiveTenant,
    Path(id): Path<String>,
) -> ApiResult<MeetingDetailsResponse> {
    let id = parse_meeting_id(&id)?;
    let details = state
        .meeting_service
        .single_meeting(&scope.tenant, id)
        .await?;
    Ok(ApiResponse(MeetingDetailsResponse {
        meeting_transcription_details: details,
    }))
}

pub async fn save_meeting_handler(
    State(state): State<AppState>,
    scope: EffectiveTenant,
    JsonBody(body): JsonBody<SaveMeetingBody>,
) -> ApiResult<MeetingResponse> {
    let scheduled_at = body
        .time
        .ok_or_else(|| ApiError::validation("Meeting time is required"))?;

    let meeting = state
        .meeting_service
        .save(&scope.tenant, &scope.caller, &body.name, scheduled_at)
        .await?;
    Ok(ApiResponse(MeetingResponse {
        meeting: meeting.into(),
    }))
}

pub async fn update_meeting_handler(
    State(state): State<AppState>,
    scope: EffectiveTenant,
    JsonBody(body): JsonBody<UpdateMeetingBody>,
) -> ApiResult<Flag> {
    if body.id.trim().is_empty() {
        return Err(MeetingError::Validation("Meeting Id is required").into());
    }
    let id = parse_meeting_id(&body.id)?;

    state
        .meeting_service
        .attach_transcript(&scope.tenant, id, &body.meeting_id)
        .await?;
    Ok(ApiResponse(Flag::updated()))
}

pub async fn schedule_demo_handler(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<ScheduleDemoBody>,
) -> ApiResult<Flag> {
    state
        .meeting_service
        .schedule_demo(DemoRequest {
            email: body.email,
            name: body.name,
            company_name: body.company_name,
        })
        .await?;
    Ok(ApiResponse(Flag::scheduled()))
}

fn parse_meeting_id(raw: &str) -> Result<MeetingId, ApiError> {
    raw.parse::<MeetingId>()
        .map_err(|_| MeetingError::NotFound.into())
}
