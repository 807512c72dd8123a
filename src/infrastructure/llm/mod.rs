mod mock_embedder;
mod mock_llm_client;
mod openai_client;
mod openai_embedder;
mod openai_http;

pub use mock_embedder::{MOCK_EMBEDDING_DIMENSIONS, MockEmbedder};
pub use mock_llm_client::MockLlmClient;
pub use openai_client::OpenAiClient;
pub use openai_embedder::OpenAiEmbedder;
