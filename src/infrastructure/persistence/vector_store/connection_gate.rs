use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::application::ports::VectorStoreError;

/// Bounds concurrent use of the vector store client. Every operation holds a
/// [`ConnectionLease`] for its whole duration.
#[derive(Debug, Clone)]
pub struct ConnectionGate {
    permits: Arc<Semaphore>,
    capacity: usize,
}

/// Access to the vector store, returned to the gate when dropped.
#[derive(Debug)]
pub struct ConnectionLease {
    _permit: OwnedSemaphorePermit,
}

impl ConnectionGate {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            permits: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    pub async fn acquire(&self) -> Result<ConnectionLease, VectorStoreError> {
        let permit = Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .map_err(|_| VectorStoreError::GateClosed)?;
        Ok(ConnectionLease { _permit: permit })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Leases currently free.
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    /// Rejects all later acquisitions. Outstanding leases stay valid.
    pub fn close(&self) {
        self.permits.close();
    }
}
