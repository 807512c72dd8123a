use std::sync::Arc;

use crate::application::ports::{StagingStore, TokenService};
use crate::application::services::{
    AccountService, IngestionService, MeetingService, RetrievalService, TenantResolver,
};
use crate::presentation::config::UploadSettings;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<AccountService>,
    pub tenant_resolver: Arc<TenantResolver>,
    pub ingestion_service: Arc<IngestionService>,
    pub retrieval_service: Arc<RetrievalService>,
    pub meeting_service: Arc<MeetingService>,
    pub token_service: Arc<dyn TokenService>,
    pub staging_store: Arc<dyn StagingStore>,
    pub uploads: UploadSettings,
}
