mod helpers;

use bytes::Bytes;
use futures::StreamExt;
use futures::stream;

use blitzday::application::ports::{FileLoaderError, StagingStore};
use blitzday::application::services::{IngestionError, StagedUpload};
use blitzday::domain::StoragePath;

use helpers::{Harness, tenant};

async fn stage(harness: &Harness, filename: &str, mime_type: &str, body: &str) -> StagedUpload {
    let path = StoragePath::staged(filename);
    let data = Bytes::from(body.to_string());
    let size_bytes = harness
        .staging
        .stage(&path, stream::iter(vec![Ok(data)]).boxed())
        .await
        .unwrap();

    StagedUpload {
        path,
        filename: filename.to_string(),
        mime_type: mime_type.to_string(),
        size_bytes,
    }
}

#[tokio::test]
async fn given_text_upload_when_ingesting_then_chunks_are_tagged_and_staging_is_cleared() {
    let harness = Harness::new();
    let acme = tenant("ada@acme.test");
    let upload = stage(&harness, "notes.txt", "text/plain", &"word ".repeat(90)).await;

    let document = harness
        .ingestion_service()
        .ingest(&acme, upload)
        .await
        .unwrap();

    assert_eq!(document.name, "notes.txt");
    assert_eq!(document.size_bytes, 450);

    let chunks = harness.vector_store.chunks().await;
    assert_eq!(chunks.len(), 3);
    assert_eq!(
        chunks.iter().map(|c| c.offset).collect::<Vec<_>>(),
        vec![0, 180, 360]
    );
    assert!(
        chunks
            .iter()
            .all(|c| c.document_id == document.id && c.owner == acme)
    );
    assert!(harness.staging.paths().await.is_empty());
}

#[tokio::test]
async fn given_unsupported_type_when_ingesting_then_rejected_without_registering() {
    let harness = Harness::new();
    let acme = tenant("ada@acme.test");
    let upload = stage(&harness, "logo.png", "image/png", "not really a png").await;

    let result = harness.ingestion_service().ingest(&acme, upload).await;

    assert!(matches!(
        result,
        Err(IngestionError::UnsupportedContentType(ref mime)) if mime == "image/png"
    ));
    assert!(
        harness
            .ingestion_service()
            .list_documents(&acme)
            .await
            .unwrap()
            .is_empty()
    );
    assert!(harness.staging.paths().await.is_empty());
}

#[tokio::test]
async fn given_blank_text_upload_when_ingesting_then_loading_fails_and_record_remains() {
    let harness = Harness::new();
    let acme = tenant("ada@acme.test");
    let upload = stage(&harness, "empty.txt", "text/plain", "   \n  ").await;

    let result = harness.ingestion_service().ingest(&acme, upload).await;

    assert!(matches!(
        result,
        Err(IngestionError::FileLoading(FileLoaderError::NoTextFound(_)))
    ));
    let documents = harness
        .ingestion_service()
        .list_documents(&acme)
        .await
        .unwrap();
    assert_eq!(documents.len(), 1);
    assert!(harness.vector_store.chunks().await.is_empty());
    assert!(harness.staging.paths().await.is_empty());
}

#[tokio::test]
async fn given_failure_midway_when_ingesting_batch_then_remaining_uploads_are_discarded() {
    let harness = Harness::new();
    let acme = tenant("ada@acme.test");
    let uploads = vec![
        stage(&harness, "a.txt", "text/plain", "first document").await,
        stage(&harness, "b.png", "image/png", "binary").await,
        stage(&harness, "c.txt", "text/plain", "third document").await,
    ];

    let result = harness.ingestion_service().ingest_all(&acme, uploads).await;

    assert!(result.is_err());
    assert!(harness.staging.paths().await.is_empty());
    let documents = harness
        .ingestion_service()
        .list_documents(&acme)
        .await
        .unwrap();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].name, "a.txt");
}

#[tokio::test]
async fn given_two_documents_when_deleting_one_then_only_its_chunks_are_removed() {
    let harness = Harness::new();
    let acme = tenant("ada@acme.test");
    let ingestion = harness.ingestion_service();
    let first = ingestion
        .ingest(&acme, stage(&harness, "a.txt", "text/plain", "alpha beta gamma").await)
        .await
        .unwrap();
    let second = ingestion
        .ingest(&acme, stage(&harness, "b.txt", "text/plain", "delta epsilon").await)
        .await
        .unwrap();

    ingestion.delete_document(&acme, first.id).await.unwrap();

    let chunks = harness.vector_store.chunks().await;
    assert!(!chunks.is_empty());
    assert!(chunks.iter().all(|c| c.document_id == second.id));
    let documents = ingestion.list_documents(&acme).await.unwrap();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].id, second.id);
}

#[tokio::test]
async fn given_other_tenant_when_deleting_document_then_not_found_and_nothing_removed() {
    let harness = Harness::new();
    let acme = tenant("ada@acme.test");
    let globex = tenant("zed@globex.test");
    let ingestion = harness.ingestion_service();
    let document = ingestion
        .ingest(&acme, stage(&harness, "a.txt", "text/plain", "alpha beta").await)
        .await
        .unwrap();

    let result = ingestion.delete_document(&globex, document.id).await;

    assert!(matches!(result, Err(IngestionError::DocumentNotFound)));
    assert_eq!(harness.vector_store.chunks().await.len(), 1);
    assert_eq!(ingestion.list_documents(&acme).await.unwrap().len(), 1);
}

#[tokio::test]
async fn given_documents_of_two_tenants_when_listing_then_each_sees_only_its_own() {
    let harness = Harness::new();
    let acme = tenant("ada@acme.test");
    let globex = tenant("zed@globex.test");
    let ingestion = harness.ingestion_service();
    ingestion
        .ingest(&acme, stage(&harness, "a.txt", "text/plain", "acme plans").await)
        .await
        .unwrap();
    ingestion
        .ingest(&globex, stage(&harness, "g.txt", "text/plain", "globex plans").await)
        .await
        .unwrap();

    let acme_docs = ingestion.list_documents(&acme).await.unwrap();
    let globex_docs = ingestion.list_documents(&globex).await.unwrap();

    assert_eq!(acme_docs.len(), 1);
    assert_eq!(acme_docs[0].name, "a.txt");
    assert_eq!(globex_docs.len(), 1);
    assert_eq!(globex_docs[0].name, "g.txt");
}
