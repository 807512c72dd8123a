use std::fmt;
use std::str::FromStr;

/// Result of a transcription job as reported by the transcription provider.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    pub id: String,
    pub status: TranscriptStatus,
    pub utterances: Vec<Utterance>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub speaker: String,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranscriptStatus {
    Queued,
    Processing,
    Completed,
    Error,
}

impl TranscriptStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranscriptStatus::Queued => "queued",
            TranscriptStatus::Processing => "processing",
            TranscriptStatus::Completed => "completed",
            TranscriptStatus::Error => "error",
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, TranscriptStatus::Queued | TranscriptStatus::Processing)
    }
}

impl FromStr for TranscriptStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "queued" => Ok(TranscriptStatus::Queued),
            "processing" => Ok(TranscriptStatus::Processing),
            "completed" => Ok(TranscriptStatus::Completed),
            "error" => Ok(TranscriptStatus::Error),
            _ => Err(format!("Invalid transcript status: {}", s)),
        }
    }
}

impl fmt::Display for TranscriptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
