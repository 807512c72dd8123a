mod chunk;
mod document;
mod embedding;
mod ids;
mod meeting;
mod storage_path;
mod tenant;
mod transcript;
mod user;
mod user_role;

pub use chunk::Chunk;
pub use document::{ContentType, Document};
pub use embedding::Embedding;
pub use ids::{ChunkId, DocumentId, MeetingId, UserId};
pub use meeting::{
    Meeting, MeetingDetails, PendingState, SpeakerTurn, TRANSCRIPTION_GRACE_PERIOD_HOURS,
};
pub use storage_path::StoragePath;
pub use tenant::Tenant;
pub use transcript::{Transcript, TranscriptStatus, Utterance};
pub use user::User;
pub use user_role::UserRole;
