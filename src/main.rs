use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use blitzday::application::ports::{IndexLayout, Mailer, TokenService, VectorStore};
use blitzday::application::services::{
    AccountService, IngestionService, MeetingService, RetrievalOptions, RetrievalService,
    TenantResolver,
};
use blitzday::infrastructure::auth::{BcryptHasher, JwtTokenService};
use blitzday::infrastructure::email::{LogMailer, SmtpMailer};
use blitzday::infrastructure::llm::{OpenAiClient, OpenAiEmbedder};
use blitzday::infrastructure::observability::{LogFormat, init_logging};
use blitzday::infrastructure::persistence::{
    ConnectionGate, PgDocumentRepository, PgMeetingRepository, PgUserRepository, QdrantAdapter,
    create_pool, run_migrations,
};
use blitzday::infrastructure::storage::LocalStagingStore;
use blitzday::infrastructure::text_processing::{CharacterSplitter, CompositeFileLoader};
use blitzday::infrastructure::transcription::AssemblyAiClient;
use blitzday::presentation::{AppState, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (settings, environment) = Settings::load().context("Failed to load settings")?;

    let log_format = match settings.logging.json {
        Some(true) => LogFormat::Json,
        Some(false) => LogFormat::Pretty,
        None if environment.is_production() => LogFormat::Json,
        None => LogFormat::Pretty,
    };
    init_logging(&settings.logging.level, log_format);
    tracing::info!(%environment, ?log_format, "Logging initialized");

    let pool = create_pool(
        &settings.database.url,
        settings.database.max_connections,
        settings.database.connect_retries,
    )
    .await
    .context("Failed to connect to Postgres")?;
    if settings.database.run_migrations {
        run_migrations(&pool)
            .await
            .context("Failed to run migrations")?;
    }

    let users = Arc::new(PgUserRepository::new(pool.clone()));
    let documents = Arc::new(PgDocumentRepository::new(pool.clone()));
    let meetings = Arc::new(PgMeetingRepository::new(pool));

    let vector_store = Arc::new(
        QdrantAdapter::new(
            &settings.qdrant.url,
            settings.qdrant.api_key.clone(),
            settings.qdrant.collection_name.clone(),
            ConnectionGate::new(settings.qdrant.max_connections),
        )
        .context("Failed to build Qdrant client")?,
    );
    vector_store
        .ensure_index(&IndexLayout::new(settings.qdrant.vector_dimensions))
        .await
        .context("Failed to prepare Qdrant collection")?;

    let openai = &settings.openai;
    let llm_client = Arc::new(OpenAiClient::new(
        openai.base_url.clone(),
        openai.api_key.clone(),
        openai.chat_model.clone(),
        openai.temperature,
    ));
    let embedder = Arc::new(OpenAiEmbedder::new(
        openai.base_url.clone(),
        openai.api_key.clone(),
        openai.embedding_model.clone(),
    ));

    let mailer: Arc<dyn Mailer> = if settings.email.enabled {
        Arc::new(
            SmtpMailer::new(
                &settings.email.smtp_host,
                settings.email.smtp_port,
                settings.email.username.clone(),
                settings.email.password.clone(),
                &settings.email.from,
            )
            .context("Failed to configure SMTP")?,
        )
    } else {
        tracing::warn!("SMTP disabled, outgoing email will only be logged");
        Arc::new(LogMailer)
    };

    let token_service: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(
        &settings.auth.jwt_secret,
        chrono::Duration::hours(settings.auth.token_ttl_hours),
    ));

    let staging_store = Arc::new(
        LocalStagingStore::new(PathBuf::from(&settings.uploads.staging_path))
            .context("Failed to prepare upload staging directory")?,
    );

    let text_splitter = Arc::new(
        CharacterSplitter::new(
            settings.chunking.chunk_size,
            settings.chunking.chunk_overlap,
        )
        .context("Invalid chunking settings")?,
    );

    let ingestion_service = Arc::new(IngestionService::new(
        Arc::new(CompositeFileLoader::with_default_loaders()),
        embedder.clone(),
        vector_store.clone(),
        text_splitter,
        documents.clone(),
        staging_store.clone(),
    ));

    let retrieval_service = Arc::new(RetrievalService::new(
        embedder,
        llm_client.clone(),
        vector_store,
        RetrievalOptions {
            top_k: settings.retrieval.top_k,
            fetch_k: settings.retrieval.fetch_k,
            lambda: settings.retrieval.lambda,
        },
    ));

    let meeting_service = Arc::new(MeetingService::new(
        meetings.clone(),
        Arc::new(AssemblyAiClient::new(
            settings.transcription.base_url.clone(),
            settings.transcription.api_key.clone(),
        )),
        llm_client,
        mailer.clone(),
        settings.email.demo_receiver.clone(),
    ));

    let account_service = Arc::new(AccountService::new(
        users.clone(),
        documents,
        meetings,
        Arc::new(BcryptHasher::new(settings.auth.bcrypt_cost)),
        token_service.clone(),
        mailer,
    ));

    let state = AppState {
        account_service,
        tenant_resolver: Arc::new(TenantResolver::new(users)),
        ingestion_service,
        retrieval_service,
        meeting_service,
        token_service,
        staging_store,
        uploads: settings.uploads.clone(),
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;
    tracing::info!(environment = %environment, "Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
