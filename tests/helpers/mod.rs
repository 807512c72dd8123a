#![allow(dead_code)]

use std::sync::Arc;

use blitzday::application::ports::TokenService;
use blitzday::application::services::{
    AccountService, IngestionService, MeetingService, RetrievalOptions, RetrievalService,
    SignUpRequest, TenantResolver,
};
use blitzday::domain::Tenant;
use blitzday::infrastructure::auth::{BcryptHasher, JwtTokenService};
use blitzday::infrastructure::email::RecordingMailer;
use blitzday::infrastructure::llm::{MockEmbedder, MockLlmClient};
use blitzday::infrastructure::persistence::{
    ConnectionGate, InMemoryDocumentRepository, InMemoryMeetingRepository,
    InMemoryUserRepository, InMemoryVectorStore,
};
use blitzday::infrastructure::storage::InMemoryStagingStore;
use blitzday::infrastructure::text_processing::{CharacterSplitter, CompositeFileLoader};
use blitzday::infrastructure::transcription::MockTranscriptionClient;
use blitzday::presentation::AppState;
use blitzday::presentation::config::UploadSettings;

pub const TEST_JWT_SECRET: &str = "test-secret";
pub const DEMO_RECEIVER: &str = "sales@blitzday.test";
pub const LLM_ANSWER: &str = "<ul><li>Mock answer</li></ul>";

/// In-memory adapters shared by every service under test.
pub struct Harness {
    pub users: Arc<InMemoryUserRepository>,
    pub documents: Arc<InMemoryDocumentRepository>,
    pub meetings: Arc<InMemoryMeetingRepository>,
    pub vector_store: Arc<InMemoryVectorStore>,
    pub staging: Arc<InMemoryStagingStore>,
    pub llm: Arc<MockLlmClient>,
    pub transcription: Arc<MockTranscriptionClient>,
    pub mailer: Arc<RecordingMailer>,
    pub tokens: Arc<JwtTokenService>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_vector_store(InMemoryVectorStore::new())
    }

    pub fn with_vector_store(vector_store: InMemoryVectorStore) -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            documents: Arc::new(InMemoryDocumentRepository::new()),
            meetings: Arc::new(InMemoryMeetingRepository::new()),
            vector_store: Arc::new(vector_store),
            staging: Arc::new(InMemoryStagingStore::new()),
            llm: Arc::new(MockLlmClient::new(LLM_ANSWER)),
            transcription: Arc::new(MockTranscriptionClient::new()),
            mailer: Arc::new(RecordingMailer::new()),
            tokens: Arc::new(JwtTokenService::new(
                TEST_JWT_SECRET,
                chrono::Duration::hours(1),
            )),
        }
    }

    pub fn account_service(&self) -> AccountService {
        AccountService::new(
            self.users.clone(),
            self.documents.clone(),
            self.meetings.clone(),
            Arc::new(BcryptHasher::new(4)),
            self.tokens.clone(),
            self.mailer.clone(),
        )
    }

    pub fn ingestion_service(&self) -> IngestionService {
        IngestionService::new(
            Arc::new(CompositeFileLoader::with_default_loaders()),
            Arc::new(MockEmbedder),
            self.vector_store.clone(),
            Arc::new(CharacterSplitter::new(200, 20).expect("valid splitter")),
            self.documents.clone(),
            self.staging.clone(),
        )
    }

    pub fn retrieval_service(&self) -> RetrievalService {
        RetrievalService::new(
            Arc::new(MockEmbedder),
            self.llm.clone(),
            self.vector_store.clone(),
            RetrievalOptions::default(),
        )
    }

    pub fn meeting_service(&self) -> MeetingService {
        MeetingService::new(
            self.meetings.clone(),
            self.transcription.clone(),
            self.llm.clone(),
            self.mailer.clone(),
            DEMO_RECEIVER.to_string(),
        )
    }

    pub fn tenant_resolver(&self) -> TenantResolver {
        TenantResolver::new(self.users.clone())
    }

    pub fn app_state(&self) -> AppState {
        let token_service: Arc<dyn TokenService> = self.tokens.clone();
        AppState {
            account_service: Arc::new(self.account_service()),
            tenant_resolver: Arc::new(self.tenant_resolver()),
            ingestion_service: Arc::new(self.ingestion_service()),
            retrieval_service: Arc::new(self.retrieval_service()),
            meeting_service: Arc::new(self.meeting_service()),
            token_service,
            staging_store: self.staging.clone(),
            uploads: UploadSettings::default(),
        }
    }

    /// Signs up an admin and returns their session token.
    pub async fn admin(&self, email: &str) -> String {
        self.account_service()
            .sign_up(SignUpRequest {
                name: "Admin".to_string(),
                email: email.to_string(),
                password: "admin-password".to_string(),
                company_name: Some("Acme".to_string()),
            })
            .await
            .expect("sign up succeeds")
            .token
    }

    /// Returns a gate with `capacity` leases, for lease accounting tests.
    pub fn gate(capacity: usize) -> ConnectionGate {
        ConnectionGate::new(capacity)
    }
}

pub fn tenant(email: &str) -> Tenant {
    Tenant::new(email)
}
