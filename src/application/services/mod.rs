mod account_service;
mod credentials;
mod ingestion_service;
mod meeting_service;
mod mmr;
mod retrieval_service;
mod tenant_resolver;

pub use account_service::{AccountError, AccountService, AuthSession, ProfileUpdate, SignUpRequest};
pub use credentials::{
    GENERATED_PASSWORD_LENGTH, RESET_TOKEN_LENGTH, generate_password, generate_reset_token,
};
pub use ingestion_service::{IngestionError, IngestionService, StagedUpload};
pub use meeting_service::{
    DemoRequest, EMPTY_SECTION, MeetingError, MeetingService, REALTIME_TOKEN_TTL_SECS,
};
pub use mmr::maximal_marginal_relevance;
pub use retrieval_service::{NO_ANSWER, RetrievalError, RetrievalOptions, RetrievalService};
pub use tenant_resolver::{TenantError, TenantResolver};
