use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::ports::{
    LlmClient, Mailer, MailerError, MeetingRepository, ModelError, OutgoingEmail,
    RepositoryError, TranscriptionClient, TranscriptionError,
};
use crate::domain::{
    Meeting, MeetingDetails, MeetingId, PendingState, SpeakerTurn, Tenant, TranscriptStatus,
};

/// Placeholder stored for summary and next steps when a transcript has no utterances.
pub const EMPTY_SECTION: &str = "-";

/// Lifetime of browser realtime transcription tokens.
pub const REALTIME_TOKEN_TTL_SECS: u64 = 36_000;

const SUMMARY_TEMPLATE: &str = "As an AI assistant you provide summary based on the given meeting json.

You always follow these guidelines:

-Answer should be in html markup without links and css
-Summary should be according to the json provided
-Don't add anything from your knowledge
-Make a heading only if it contains text and always complete your sentence
------------
Meeting JSON is following: {transcript}
";

const NEXT_STEPS_TEMPLATE: &str = "As an AI assistant you provide decision and follow up based on the given meeting json.

You always follow these guidelines:

-Answer should be in html markup without links and css
-Meeting decisions and follow ups should be according to the json provided
-Don't explain the meeting again just explain if anything required
-Only describe what should be done after meeting
-Don't add anything from your knowledge
-Make a heading only if it contains text and always complete your sentence
------------
Meeting JSON is following: {transcript}
";

#[derive(Debug, Clone)]
pub struct DemoRequest {
    pub email: String,
    pub name: String,
    pub company_name: String,
}

pub struct MeetingService {
    meetings: Arc<dyn MeetingRepository>,
    transcription: Arc<dyn TranscriptionClient>,
    llm_client: Arc<dyn LlmClient>,
    mailer: Arc<dyn Mailer>,
    demo_receiver: String,
}

impl MeetingService {
    pub fn new(
        meetings: Arc<dyn MeetingRepository>,
        transcription: Arc<dyn TranscriptionClient>,
        llm_client: Arc<dyn LlmClient>,
        mailer: Arc<dyn Mailer>,
        demo_receiver: String,
    ) -> Self {
        Self {
            meetings,
            transcription,
            llm_client,
            mailer,
            demo_receiver,
        }
    }

    pub async fn list(&self, owner: &Tenant) -> Result<Vec<Meeting>, MeetingError> {
        Ok(self.meetings.list_by_owner(owner).await?)
    }

    #[tracing::instrument(skip(self, name), fields(owner = %owner))]
    pub async fn save(
        &self,
        owner: &Tenant,
        created_by: &str,
        name: &str,
        scheduled_at: DateTime<Utc>,
    ) -> Result<Meeting, MeetingError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(MeetingError::Validation("Meeting name is required"));
        }

        let meeting = Meeting::new(
            name.to_string(),
            scheduled_at,
            owner.clone(),
            created_by.to_string(),
        );
        self.meetings.create(&meeting).await?;

        tracing::info!(meeting_id = %meeting.id, "Meeting saved");
        Ok(meeting)
    }

    pub async fn attach_transcript(
        &self,
        owner: &Tenant,
        id: MeetingId,
        transcript_id: &str,
    ) -> Result<(), MeetingError> {
        let transcript_id = transcript_id.trim();
        if transcript_id.is_empty() {
            return Err(MeetingError::Validation("Meeting Id is required"));
        }

        if !self
            .meetings
            .attach_transcript(id, owner, transcript_id)
            .await?
        {
            return Err(MeetingError::NotFound);
        }

        tracing::info!(meeting_id = %id, transcript_id, "Transcript attached");
        Ok(())
    }

    /// Speaker turns, summary and next steps of a meeting. Computed once, then served
    /// from the stored copy.
    #[tracing::instrument(skip(self), fields(owner = %owner, meeting_id = %id))]
    pub async fn single_meeting(
        &self,
        owner: &Tenant,
        id: MeetingId,
    ) -> Result<MeetingDetails, MeetingError> {
        let meeting = self
            .meetings
            .find(id, owner)
            .await?
            .ok_or(MeetingError::NotFound)?;

        let Some(transcript_id) = meeting.transcript_id.as_deref() else {
            return Err(match meeting.pending_state(Utc::now()) {
                PendingState::Expired => MeetingError::Expired,
                PendingState::Compiling => MeetingError::Compiling,
            });
        };

        if let Some(details) = meeting.details {
            tracing::debug!("Serving stored meeting details");
            return Ok(details);
        }

        let transcript = self
            .transcription
            .fetch_transcript(transcript_id)
            .await
            .map_err(MeetingError::Transcription)?;

        match transcript.status {
            TranscriptStatus::Queued | TranscriptStatus::Processing => {
                return Err(MeetingError::Processing);
            }
            TranscriptStatus::Error => {
                let reason = transcript
                    .error
                    .unwrap_or_else(|| "Transcription failed".to_string());
                return Err(MeetingError::TranscriptionFailed(reason));
            }
            TranscriptStatus::Completed => {}
        }

        let turns: Vec<SpeakerTurn> = transcript.utterances.iter().map(SpeakerTurn::from).collect();

        let details = if turns.is_empty() {
            MeetingDetails {
                details: turns,
                summary: EMPTY_SECTION.to_string(),
                next_steps: EMPTY_SECTION.to_string(),
            }
        } else {
            let transcript_json = serde_json::to_string(&turns)
                .map_err(|e| MeetingError::Serialization(e.to_string()))?;

            let summary = self
                .llm_client
                .complete(None, &SUMMARY_TEMPLATE.replace("{transcript}", &transcript_json))
                .await
                .map_err(MeetingError::Completion)?;
            let next_steps = self
                .llm_client
                .complete(None, &NEXT_STEPS_TEMPLATE.replace("{transcript}", &transcript_json))
                .await
                .map_err(MeetingError::Completion)?;

            MeetingDetails {
                details: turns,
                summary,
                next_steps,
            }
        };

        self.meetings.save_details(id, &details).await?;

        tracing::info!(turns = details.details.len(), "Meeting details computed");
        Ok(details)
    }

    /// Forwards a demo request to the sales inbox and confirms it to the requester.
    pub async fn schedule_demo(&self, request: DemoRequest) -> Result<(), MeetingError> {
        if request.email.trim().is_empty()
            || request.name.trim().is_empty()
            || request.company_name.trim().is_empty()
        {
            return Err(MeetingError::Validation(
                "Email, Name or Company name is required",
            ));
        }

        self.mailer
            .send(OutgoingEmail {
                to: self.demo_receiver.clone(),
                subject: "Demo Schedule Request".to_string(),
                body: format!(
                    "Hi,\n\nYou have received a demo request from {}, please see the details below.\n\nName: {}\nEmail: {}\nCompany: {}\n\nThanks\n",
                    request.company_name, request.name, request.email, request.company_name
                ),
            })
            .await?;

        self.mailer
            .send(OutgoingEmail {
                to: request.email.clone(),
                subject: "Demo Schedule".to_string(),
                body: "Hi,\n\nThank you for requesting a demo of Blitzday.ai, we're excited to show you how our solution can help you achieve your business goals.\n\nWe will get in touch with you shortly.\n\nRegards\nTeam Blitzday.ai\n".to_string(),
            })
            .await?;

        tracing::info!(company = %request.company_name, "Demo request forwarded");
        Ok(())
    }

    pub async fn realtime_token(&self) -> Result<String, MeetingError> {
        self.transcription
            .create_realtime_token(REALTIME_TOKEN_TTL_SECS)
            .await
            .map_err(MeetingError::Transcription)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MeetingError {
    #[error("{0}")]
    Validation(&'static str),
    #[error("Meeting not found")]
    NotFound,
    #[error("Meeting is expired, because the upload fails")]
    Expired,
    #[error("Meeting is compiling")]
    Compiling,
    #[error("Meeting is processing")]
    Processing,
    #[error("{0}")]
    TranscriptionFailed(String),
    #[error("transcription: {0}")]
    Transcription(TranscriptionError),
    #[error("completion: {0}")]
    Completion(ModelError),
    #[error("serialization: {0}")]
    Serialization(String),
    #[error("mailer: {0}")]
    Mailer(#[from] MailerError),
    #[error("repository: {0}")]
    Repository(#[from] RepositoryError),
}
