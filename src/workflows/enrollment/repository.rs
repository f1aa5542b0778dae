use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{EnrollmentPath, FamilyTier};
use super::draft::EnrollmentDraft;
use super::quote::MembershipTier;

/// Identifier wrapper for enrollment drafts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DraftId(pub String);

/// Repository record: the draft plus submission outcome metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftRecord {
    pub id: DraftId,
    pub draft: EnrollmentDraft,
    pub receipt: Option<EnrollmentReceipt>,
    pub last_failure: Option<String>,
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait DraftRepository: Send + Sync {
    fn insert(&self, record: DraftRecord) -> Result<DraftRecord, RepositoryError>;
    fn update(&self, record: DraftRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &DraftId) -> Result<Option<DraftRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Mutex-guarded map used by the server and tests; drafts have no
/// persistence requirement.
#[derive(Default, Clone)]
pub struct InMemoryDraftRepository {
    records: Arc<Mutex<HashMap<DraftId, DraftRecord>>>,
}

impl DraftRepository for InMemoryDraftRepository {
    fn insert(&self, record: DraftRecord) -> Result<DraftRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("draft mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: DraftRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("draft mutex poisoned");
        if !guard.contains_key(&record.id) {
            return Err(RepositoryError::NotFound);
        }
        guard.insert(record.id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &DraftId) -> Result<Option<DraftRecord>, RepositoryError> {
        let guard = self.records.lock().expect("draft mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

/// Backend-bound payload created by the final submit action. Ownership of
/// the enrollment transfers to the backend once accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentRequest {
    pub employer_id: String,
    pub partner: EnrollmentPath,
    pub members: Vec<MemberEnrollment>,
    pub monthly_total: u32,
    pub payment_reference: String,
}

/// One covered employee with their membership tier mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberEnrollment {
    pub employee_id: String,
    pub membership_tier: MembershipTier,
    pub family_tier: FamilyTier,
    pub dependents: u8,
}

/// Acknowledgement returned by the enrollment backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentReceipt {
    pub confirmation_code: String,
    pub submitted_at: DateTime<Utc>,
}

/// Outbound seam to the enrollment backend.
#[async_trait::async_trait]
pub trait EnrollmentGateway: Send + Sync {
    async fn submit(&self, request: EnrollmentRequest) -> Result<EnrollmentReceipt, GatewayError>;
}

/// Submission failure surfaced back to the payment step.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("enrollment backend rejected the request: {0}")]
    Rejected(String),
    #[error("enrollment backend unavailable: {0}")]
    Transport(String),
}
