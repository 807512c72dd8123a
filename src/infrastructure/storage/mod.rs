mod in_memory_store;
mod local_store;

pub use in_memory_store::InMemoryStagingStore;
pub use local_store::LocalStagingStore;
