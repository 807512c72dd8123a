mod helpers;

use bytes::Bytes;
use futures::StreamExt;
use futures::stream;

use blitzday::application::ports::{StagingStore, VectorStoreError};
use blitzday::application::services::{
    NO_ANSWER, RetrievalError, StagedUpload, maximal_marginal_relevance,
};
use blitzday::domain::{Embedding, StoragePath, Tenant};
use blitzday::infrastructure::persistence::InMemoryVectorStore;

use helpers::{Harness, LLM_ANSWER, tenant};

async fn ingest_text(harness: &Harness, owner: &Tenant, filename: &str, body: &str) {
    let path = StoragePath::staged(filename);
    let size_bytes = harness
        .staging
        .stage(
            &path,
            stream::iter(vec![Ok(Bytes::from(body.to_string()))]).boxed(),
        )
        .await
        .unwrap();

    harness
        .ingestion_service()
        .ingest(
            owner,
            StagedUpload {
                path,
                filename: filename.to_string(),
                mime_type: "text/plain".to_string(),
                size_bytes,
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn given_no_documents_when_answering_then_returns_dash_without_calling_model() {
    let harness = Harness::new();

    let answer = harness
        .retrieval_service()
        .answer(&tenant("ada@acme.test"), "What is our refund policy?")
        .await
        .unwrap();

    assert_eq!(answer, NO_ANSWER);
    assert_eq!(harness.llm.call_count(), 0);
}

#[tokio::test]
async fn given_documents_of_another_tenant_when_answering_then_they_are_never_used() {
    let harness = Harness::new();
    ingest_text(
        &harness,
        &tenant("zed@globex.test"),
        "policy.txt",
        "refund policy is thirty days",
    )
    .await;

    let answer = harness
        .retrieval_service()
        .answer(&tenant("ada@acme.test"), "refund policy")
        .await
        .unwrap();

    assert_eq!(answer, NO_ANSWER);
    assert_eq!(harness.llm.call_count(), 0);
}

#[tokio::test]
async fn given_tenant_documents_when_answering_then_context_goes_in_system_prompt() {
    let harness = Harness::new();
    let acme = tenant("ada@acme.test");
    ingest_text(&harness, &acme, "policy.txt", "refund policy is thirty days").await;

    let answer = harness
        .retrieval_service()
        .answer(&acme, "  What is the refund policy?  ")
        .await
        .unwrap();

    assert_eq!(answer, LLM_ANSWER);
    let prompts = harness.llm.prompts().await;
    assert_eq!(prompts.len(), 1);
    let (system, user) = &prompts[0];
    assert!(
        system
            .as_deref()
            .unwrap()
            .contains("refund policy is thirty days")
    );
    assert_eq!(user, "What is the refund policy?");
}

#[tokio::test]
async fn given_blank_question_when_answering_then_rejected() {
    let harness = Harness::new();

    let result = harness
        .retrieval_service()
        .answer(&tenant("ada@acme.test"), "   ")
        .await;

    assert!(matches!(result, Err(RetrievalError::EmptyQuestion)));
}

#[tokio::test]
async fn given_failing_store_when_answering_then_lease_is_returned() {
    let gate = Harness::gate(2);
    let harness = Harness::with_vector_store(InMemoryVectorStore::failing(gate.clone()));

    let result = harness
        .retrieval_service()
        .answer(&tenant("ada@acme.test"), "anything")
        .await;

    assert!(matches!(result, Err(RetrievalError::Search(_))));
    assert_eq!(gate.available(), gate.capacity());
    assert_eq!(harness.llm.call_count(), 0);
}

#[tokio::test]
async fn given_closed_gate_when_answering_then_search_fails_with_gate_closed() {
    let gate = Harness::gate(2);
    let harness = Harness::with_vector_store(InMemoryVectorStore::with_gate(gate.clone()));
    gate.close();

    let result = harness
        .retrieval_service()
        .answer(&tenant("ada@acme.test"), "anything")
        .await;

    assert!(matches!(
        result,
        Err(RetrievalError::Search(VectorStoreError::GateClosed))
    ));
}

#[tokio::test]
async fn given_successful_answer_when_done_then_all_leases_are_returned() {
    let gate = Harness::gate(1);
    let harness = Harness::with_vector_store(InMemoryVectorStore::with_gate(gate.clone()));
    let acme = tenant("ada@acme.test");
    ingest_text(&harness, &acme, "a.txt", "quarterly revenue grew").await;

    harness
        .retrieval_service()
        .answer(&acme, "quarterly revenue")
        .await
        .unwrap();

    assert_eq!(gate.available(), 1);
}

#[tokio::test]
async fn given_raw_phrase_when_punctuating_then_prompt_embeds_phrase() {
    let harness = Harness::new();

    let answer = harness
        .retrieval_service()
        .punctuate("hello how are you")
        .await
        .unwrap();

    assert_eq!(answer, LLM_ANSWER);
    let prompts = harness.llm.prompts().await;
    assert_eq!(prompts[0].0, None);
    assert!(prompts[0].1.ends_with("hello how are you"));
}

#[test]
fn given_near_duplicate_candidates_when_reranking_with_low_lambda_then_prefers_diversity() {
    let query = Embedding::new(vec![1.0, 0.0]);
    let candidates = vec![
        Embedding::new(vec![1.0, 0.0]),
        Embedding::new(vec![0.99, 0.01]),
        Embedding::new(vec![0.5, 0.5]),
    ];

    let picked = maximal_marginal_relevance(&query, &candidates, 0.1, 2);

    assert_eq!(picked, vec![0, 2]);
}

#[test]
fn given_lambda_one_when_reranking_then_orders_by_relevance() {
    let query = Embedding::new(vec![1.0, 0.0]);
    let candidates = vec![
        Embedding::new(vec![0.0, 1.0]),
        Embedding::new(vec![1.0, 0.0]),
        Embedding::new(vec![0.7, 0.3]),
    ];

    let picked = maximal_marginal_relevance(&query, &candidates, 1.0, 3);

    assert_eq!(picked, vec![1, 2, 0]);
}

#[test]
fn given_k_larger_than_candidates_when_reranking_then_returns_each_once() {
    let query = Embedding::new(vec![1.0, 0.0]);
    let candidates = vec![Embedding::new(vec![1.0, 0.0])];

    assert_eq!(maximal_marginal_relevance(&query, &candidates, 0.5, 4), vec![0]);
    assert!(maximal_marginal_relevance(&query, &[], 0.5, 4).is_empty());
}
