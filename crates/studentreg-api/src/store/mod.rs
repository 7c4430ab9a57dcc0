//! # Registration Storage
//!
//! The persistence collaborator invoked after a registration has passed
//! validation. The validator itself never touches storage.
//!
//! Two backends implement [`RegistrationStore`]:
//!
//! - [`memory::MemoryRegistrationStore`]: process-local, used when no
//!   `DATABASE_URL` is configured and in tests.
//! - [`crate::db::registrations::PgRegistrationStore`]: Postgres, writing the
//!   student row and its course rows in one transaction.

pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use studentreg_core::{NormalizedRegistration, RegistrationId};
use thiserror::Error;

/// A registration as held by a store.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRegistration {
    /// Identifier assigned on save.
    pub id: RegistrationId,
    /// When the registration was saved.
    pub created_at: DateTime<Utc>,
    /// The validated registration.
    #[serde(flatten)]
    pub registration: NormalizedRegistration,
}

/// Failure inside a storage backend.
///
/// `Display` carries the backend detail for logs. Clients only ever see
/// [`PersistenceError::summary`].
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// The backend could not be reached.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// A write failed and was rolled back.
    #[error("write rolled back: {0}")]
    Write(String),

    /// A query for a stored registration failed.
    #[error("read failed: {0}")]
    Read(String),

    /// A stored row could not be turned back into a registration.
    #[error("corrupt stored registration {id}: {reason}")]
    Corrupt {
        /// The registration that failed to load.
        id: RegistrationId,
        /// What was wrong with it.
        reason: String,
    },
}

impl PersistenceError {
    /// Short client-safe description of the failure.
    pub fn summary(&self) -> &'static str {
        match self {
            Self::Unavailable(_) => "the registration database is unavailable",
            Self::Write(_) => "the registration could not be saved",
            Self::Read(_) => "the registration could not be retrieved",
            Self::Corrupt { .. } => "the stored registration could not be read",
        }
    }
}

impl From<sqlx::Error> for PersistenceError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => Self::Unavailable(err.to_string()),
            other => Self::Write(other.to_string()),
        }
    }
}

impl PersistenceError {
    /// Classify a driver error raised while reading.
    ///
    /// Connection failures stay [`PersistenceError::Unavailable`]; everything
    /// else becomes [`PersistenceError::Read`].
    pub fn from_read(err: sqlx::Error) -> Self {
        match Self::from(err) {
            Self::Write(detail) => Self::Read(detail),
            other => other,
        }
    }
}

/// Storage contract for validated registrations.
#[async_trait]
pub trait RegistrationStore: Send + Sync {
    /// Persist a registration and its course selections atomically.
    ///
    /// On error nothing has been stored.
    async fn save(
        &self,
        registration: &NormalizedRegistration,
    ) -> Result<RegistrationId, PersistenceError>;

    /// Fetch a stored registration.
    ///
    /// # Returns
    /// `Some(registration)` if found, `None` if not found
    async fn get(&self, id: RegistrationId) -> Result<Option<StoredRegistration>, PersistenceError>;

    /// Whether saved registrations survive a restart.
    fn is_durable(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_hides_backend_detail() {
        let err = PersistenceError::Write("duplicate key value violates constraint students_pkey".into());
        assert!(err.to_string().contains("students_pkey"));
        assert!(!err.summary().contains("students_pkey"));
    }

    #[test]
    fn pool_timeout_is_unavailable() {
        let err = PersistenceError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, PersistenceError::Unavailable(_)));
        assert_eq!(err.summary(), "the registration database is unavailable");
    }

    #[test]
    fn row_not_found_is_write_failure() {
        let err = PersistenceError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, PersistenceError::Write(_)));
    }

    #[test]
    fn failed_read_is_not_reported_as_save() {
        let err = PersistenceError::from_read(sqlx::Error::ColumnNotFound("course_name".into()));
        assert!(matches!(err, PersistenceError::Read(_)));
        assert_eq!(err.summary(), "the registration could not be retrieved");
        assert!(!err.summary().contains("saved"));
    }

    #[test]
    fn read_during_outage_is_unavailable() {
        let err = PersistenceError::from_read(sqlx::Error::PoolClosed);
        assert!(matches!(err, PersistenceError::Unavailable(_)));
    }
}
