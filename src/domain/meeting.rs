use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{MeetingId, Tenant, Utterance};

/// Recordings that never received a transcription id within this window are considered lost.
pub const TRANSCRIPTION_GRACE_PERIOD_HOURS: i64 = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct Meeting {
    pub id: MeetingId,
    pub name: String,
    pub scheduled_at: DateTime<Utc>,
    pub owner: Tenant,
    pub created_by: String,
    pub transcript_id: Option<String>,
    pub details: Option<MeetingDetails>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// State of a meeting whose recording has not been attached to a transcription yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingState {
    Compiling,
    Expired,
}

impl Meeting {
    pub fn new(name: String, scheduled_at: DateTime<Utc>, owner: Tenant, created_by: String) -> Self {
        let now = Utc::now();
        Self {
            id: MeetingId::new(),
            name,
            scheduled_at,
            owner,
            created_by,
            transcript_id: None,
            details: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn pending_state(&self, now: DateTime<Utc>) -> PendingState {
        if now - self.scheduled_at > Duration::hours(TRANSCRIPTION_GRACE_PERIOD_HOURS) {
            PendingState::Expired
        } else {
            PendingState::Compiling
        }
    }
}

/// Derived meeting content, persisted as a JSON blob once computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingDetails {
    pub details: Vec<SpeakerTurn>,
    pub summary: String,
    pub next_steps: String,
}

/// One utterance, serialized as `{"Speaker A": "text"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    into = "BTreeMap<String, String>",
    try_from = "BTreeMap<String, String>"
)]
pub struct SpeakerTurn {
    pub speaker: String,
    pub text: String,
}

impl From<&Utterance> for SpeakerTurn {
    fn from(utterance: &Utterance) -> Self {
        Self {
            speaker: format!("Speaker {}", utterance.speaker),
            text: utterance.text.clone(),
        }
    }
}

impl From<SpeakerTurn> for BTreeMap<String, String> {
    fn from(turn: SpeakerTurn) -> Self {
        BTreeMap::from([(turn.speaker, turn.text)])
    }
}

impl TryFrom<BTreeMap<String, String>> for SpeakerTurn {
    type Error = String;

    fn try_from(map: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        if map.len() != 1 {
            return Err(format!("expected a single speaker entry, got {}", map.len()));
        }
        let (speaker, text) = map
            .into_iter()
            .next()
            .ok_or_else(|| "empty speaker entry".to_string())?;
        Ok(Self { speaker, text })
    }
}
