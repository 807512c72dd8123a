use std::sync::Arc;

use crate::application::ports::{
    Embedder, LlmClient, ModelError, ScoredChunk, VectorStore, VectorStoreError,
};
use crate::domain::{Chunk, Embedding, Tenant};
use crate::infrastructure::observability::sanitize_prompt;

use super::mmr::maximal_marginal_relevance;

/// Answer returned when nothing relevant was retrieved. The model is not called in that case.
pub const NO_ANSWER: &str = "-";

const SYSTEM_TEMPLATE: &str = "As an AI assistant you provide answers based on the given context, ensuring accuracy and briefness.

You always follow these guidelines:

-Answer should be in html markup unordered list, Each sentence as a single list item
-Words in list item sentences should have spaces between them
-If the answer isn't available within the context, reply with \"-\"
-Otherwise, answer to your best capability, referring to source of documents provided
-Only use examples if explicitly requested
-Do not introduce examples outside of the context
-Do not answer if context is absent
-Do not include links
-Limit responses to three or four sentences for clarity and conciseness
------------
{context}
";

const PUNCTUATION_TEMPLATE: &str = "Task: Add punctuation in following Raw Text

{phrase}
";

#[derive(Debug, Clone, Copy)]
pub struct RetrievalOptions {
    /// Chunks handed to the model.
    pub top_k: usize,
    /// Candidates fetched from the index before diversity re-ranking.
    pub fetch_k: usize,
    /// Relevance/diversity trade-off, 1.0 being pure relevance.
    pub lambda: f32,
}

impl Default for RetrievalOptions {
    fn default() -> Self {
        Self {
            top_k: 4,
            fetch_k: 20,
            lambda: 0.1,
        }
    }
}

pub struct RetrievalService {
    embedder: Arc<dyn Embedder>,
    llm_client: Arc<dyn LlmClient>,
    vector_store: Arc<dyn VectorStore>,
    options: RetrievalOptions,
}

impl RetrievalService {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        llm_client: Arc<dyn LlmClient>,
        vector_store: Arc<dyn VectorStore>,
        options: RetrievalOptions,
    ) -> Self {
        Self {
            embedder,
            llm_client,
            vector_store,
            options,
        }
    }

    #[tracing::instrument(skip(self, question), fields(owner = %owner))]
    pub async fn answer(&self, owner: &Tenant, question: &str) -> Result<String, RetrievalError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(RetrievalError::EmptyQuestion);
        }

        tracing::debug!(question = %sanitize_prompt(question), "Answering question");

        let chunks = self.retrieve(owner, question).await?;

        if chunks.is_empty() {
            tracing::info!("No relevant chunks, skipping completion");
            return Ok(NO_ANSWER.to_string());
        }

        let context = chunks
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        let system_prompt = SYSTEM_TEMPLATE.replace("{context}", &context);

        let answer = self
            .llm_client
            .complete(Some(&system_prompt), question)
            .await
            .map_err(RetrievalError::Completion)?;

        tracing::info!(chunks = chunks.len(), "Question answered");
        Ok(answer)
    }

    /// Top chunks for `question` inside `owner`, diversified with MMR.
    pub async fn retrieve(
        &self,
        owner: &Tenant,
        question: &str,
    ) -> Result<Vec<Chunk>, RetrievalError> {
        let query_embedding = self
            .embedder
            .embed(question)
            .await
            .map_err(RetrievalError::Embedding)?;

        let fetch_k = self.options.fetch_k.max(self.options.top_k);
        let candidates = self
            .vector_store
            .search(&query_embedding, owner, fetch_k)
            .await?;

        tracing::debug!(candidates = candidates.len(), "Candidates fetched");

        Ok(self.rerank(&query_embedding, candidates))
    }

    pub async fn punctuate(&self, phrase: &str) -> Result<String, RetrievalError> {
        let phrase = phrase.trim();
        if phrase.is_empty() {
            return Err(RetrievalError::EmptyQuestion);
        }

        let prompt = PUNCTUATION_TEMPLATE.replace("{phrase}", phrase);
        self.llm_client
            .complete(None, &prompt)
            .await
            .map_err(RetrievalError::Completion)
    }

    fn rerank(&self, query: &Embedding, candidates: Vec<ScoredChunk>) -> Vec<Chunk> {
        let vectors: Option<Vec<Embedding>> =
            candidates.iter().map(|c| c.embedding.clone()).collect();

        match vectors {
            Some(vectors) => {
                let order = maximal_marginal_relevance(
                    query,
                    &vectors,
                    self.options.lambda,
                    self.options.top_k,
                );
                let mut slots: Vec<Option<Chunk>> =
                    candidates.into_iter().map(|c| Some(c.chunk)).collect();
                order
                    .into_iter()
                    .filter_map(|index| slots[index].take())
                    .collect()
            }
            None => {
                tracing::warn!("Vectors missing from search results, falling back to score order");
                let mut candidates = candidates;
                candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
                candidates
                    .into_iter()
                    .take(self.options.top_k)
                    .map(|c| c.chunk)
                    .collect()
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("question is required")]
    EmptyQuestion,
    #[error("embedding: {0}")]
    Embedding(ModelError),
    #[error("search: {0}")]
    Search(#[from] VectorStoreError),
    #[error("completion: {0}")]
    Completion(ModelError),
}
