//! Verification store seam and its in-memory implementation.
//!
//! The gate only reads statuses; the submit/review transitions are driven by
//! the HTTP handlers after `assert_can` has passed.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use workforce_core::{DomainError, ReviewDecision, UserId, VerificationStatus};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("verification store unavailable: {0}")]
    Unavailable(String),
}

/// Current verification state for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationRecord {
    pub user_id: UserId,
    pub status: VerificationStatus,
    pub submitted_at: Option<DateTime<Utc>>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub reviewed_by: Option<UserId>,
}

impl VerificationRecord {
    pub fn draft(user_id: UserId) -> Self {
        Self {
            user_id,
            status: VerificationStatus::Draft,
            submitted_at: None,
            reviewed_at: None,
            reviewed_by: None,
        }
    }
}

#[async_trait]
pub trait VerificationStore: Send + Sync {
    /// Status for `user_id`; users without a record are in `draft`.
    async fn status(&self, user_id: UserId) -> Result<VerificationStatus, StoreError>;

    async fn get(&self, user_id: UserId) -> Result<Option<VerificationRecord>, StoreError>;

    /// Records currently in `status`, oldest submission first.
    async fn list_by_status(
        &self,
        status: VerificationStatus,
    ) -> Result<Vec<VerificationRecord>, StoreError>;

    async fn submit(&self, user_id: UserId) -> Result<VerificationRecord, StoreError>;

    async fn review(
        &self,
        user_id: UserId,
        decision: ReviewDecision,
        reviewer: UserId,
    ) -> Result<VerificationRecord, StoreError>;
}

/// Process-local store (development and tests).
#[derive(Debug, Default)]
pub struct InMemoryVerificationStore {
    records: RwLock<HashMap<UserId, VerificationRecord>>,
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Unavailable("lock poisoned".to_string())
}

impl InMemoryVerificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a record directly into `status`, bypassing the transition rules.
    pub fn seed(&self, user_id: UserId, status: VerificationStatus) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(poisoned)?;
        let record = records
            .entry(user_id)
            .or_insert_with(|| VerificationRecord::draft(user_id));
        record.status = status;
        Ok(())
    }
}

#[async_trait]
impl VerificationStore for InMemoryVerificationStore {
    async fn status(&self, user_id: UserId) -> Result<VerificationStatus, StoreError> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records
            .get(&user_id)
            .map(|r| r.status)
            .unwrap_or_default())
    }

    async fn get(&self, user_id: UserId) -> Result<Option<VerificationRecord>, StoreError> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.get(&user_id).cloned())
    }

    async fn list_by_status(
        &self,
        status: VerificationStatus,
    ) -> Result<Vec<VerificationRecord>, StoreError> {
        let records = self.records.read().map_err(poisoned)?;
        let mut matching: Vec<_> = records
            .values()
            .filter(|r| r.status == status)
            .cloned()
            .collect();
        matching.sort_by_key(|r| (r.submitted_at, *r.user_id.as_uuid()));
        Ok(matching)
    }

    async fn submit(&self, user_id: UserId) -> Result<VerificationRecord, StoreError> {
        let mut records = self.records.write().map_err(poisoned)?;
        let record = records
            .entry(user_id)
            .or_insert_with(|| VerificationRecord::draft(user_id));

        record.status = record.status.submit()?;
        record.submitted_at = Some(Utc::now());
        record.reviewed_at = None;
        record.reviewed_by = None;

        tracing::info!(%user_id, "verification submitted");
        Ok(record.clone())
    }

    async fn review(
        &self,
        user_id: UserId,
        decision: ReviewDecision,
        reviewer: UserId,
    ) -> Result<VerificationRecord, StoreError> {
        let mut records = self.records.write().map_err(poisoned)?;
        let record = records.get_mut(&user_id).ok_or(DomainError::NotFound)?;

        record.status = record.status.review(decision)?;
        record.reviewed_at = Some(Utc::now());
        record.reviewed_by = Some(reviewer);

        tracing::info!(%user_id, %reviewer, %decision, status = %record.status, "verification reviewed");
        Ok(record.clone())
    }
}
