//! In-memory registration store.
//!
//! All operations are synchronous under a `parking_lot::RwLock` that is never
//! held across an `.await`. `parking_lot::RwLock` does not poison, so a
//! panicking writer cannot wedge the store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use studentreg_core::{NormalizedRegistration, RegistrationId};

use super::{PersistenceError, RegistrationStore, StoredRegistration};

/// Thread-safe, cloneable registration store backed by a `HashMap`.
#[derive(Debug, Clone, Default)]
pub struct MemoryRegistrationStore {
    records: Arc<RwLock<HashMap<RegistrationId, StoredRegistration>>>,
}

impl MemoryRegistrationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// List all stored registrations, oldest first.
    pub fn list(&self) -> Vec<StoredRegistration> {
        let mut records: Vec<_> = self.records.read().values().cloned().collect();
        records.sort_by_key(|record| record.created_at);
        records
    }

    /// Return the number of stored registrations.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl RegistrationStore for MemoryRegistrationStore {
    async fn save(
        &self,
        registration: &NormalizedRegistration,
    ) -> Result<RegistrationId, PersistenceError> {
        let id = RegistrationId::new();
        let record = StoredRegistration {
            id,
            created_at: Utc::now(),
            registration: registration.clone(),
        };
        self.records.write().insert(id, record);
        Ok(id)
    }

    async fn get(&self, id: RegistrationId) -> Result<Option<StoredRegistration>, PersistenceError> {
        Ok(self.records.read().get(&id).cloned())
    }

    fn is_durable(&self) -> bool {
        false
    }
}
