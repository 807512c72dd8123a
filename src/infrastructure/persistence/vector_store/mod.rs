mod connection_gate;
mod in_memory_vector_store;
mod qdrant_adapter;

pub use connection_gate::{ConnectionGate, ConnectionLease};
pub use in_memory_vector_store::InMemoryVectorStore;
pub use qdrant_adapter::QdrantAdapter;
