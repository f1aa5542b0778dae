use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::domain::WizardError;
use super::draft::{DraftUpdate, EnrollmentDraft};
use super::quote::{quote, QuoteBreakdown, RateCard};
use super::repository::{
    DraftId, DraftRecord, DraftRepository, EnrollmentGateway, EnrollmentRequest, GatewayError,
    MemberEnrollment, RepositoryError,
};
use crate::roster::{RosterError, RosterStore};

/// Service composing the draft repository, the employer roster, and the
/// enrollment gateway.
pub struct EnrollmentService<R, S, G> {
    drafts: Arc<R>,
    roster: Arc<S>,
    gateway: Arc<G>,
    rates: RateCard,
}

static DRAFT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_draft_id() -> DraftId {
    let id = DRAFT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    DraftId(format!("draft-{id:06}"))
}

impl<R, S, G> EnrollmentService<R, S, G>
where
    R: DraftRepository + 'static,
    S: RosterStore + 'static,
    G: EnrollmentGateway + 'static,
{
    pub fn new(drafts: Arc<R>, roster: Arc<S>, gateway: Arc<G>, rates: RateCard) -> Self {
        Self {
            drafts,
            roster,
            gateway,
            rates,
        }
    }

    /// Open a new draft at the first wizard step.
    pub fn start(&self, employer_id: &str) -> Result<DraftRecord, EnrollmentServiceError> {
        let record = DraftRecord {
            id: next_draft_id(),
            draft: EnrollmentDraft::new(employer_id),
            receipt: None,
            last_failure: None,
        };
        Ok(self.drafts.insert(record)?)
    }

    pub fn get(&self, id: &DraftId) -> Result<DraftRecord, EnrollmentServiceError> {
        let record = self.drafts.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Apply a step-scoped field update and persist the draft.
    pub fn update(
        &self,
        id: &DraftId,
        update: DraftUpdate,
    ) -> Result<DraftRecord, EnrollmentServiceError> {
        let mut record = self.get(id)?;
        record.draft.apply(update)?;
        self.drafts.update(record.clone())?;
        Ok(record)
    }

    /// Validate the current step and move the draft forward.
    pub fn advance(&self, id: &DraftId) -> Result<DraftRecord, EnrollmentServiceError> {
        let mut record = self.get(id)?;
        record.draft.advance()?;
        self.drafts.update(record.clone())?;
        Ok(record)
    }

    /// Move the draft backward; entered values are retained.
    pub fn back(&self, id: &DraftId) -> Result<DraftRecord, EnrollmentServiceError> {
        let mut record = self.get(id)?;
        record.draft.back()?;
        self.drafts.update(record.clone())?;
        Ok(record)
    }

    /// Price the draft against the employer roster.
    pub fn quote(&self, id: &DraftId) -> Result<QuoteBreakdown, EnrollmentServiceError> {
        let record = self.get(id)?;
        let schedule = record.draft.contribution_schedule()?;
        let roster = self.roster.list(record.draft.employer_id())?;
        Ok(quote(
            &roster,
            &schedule,
            record.draft.exclusions(),
            &self.rates,
        ))
    }

    /// Submit the completed draft to the enrollment backend. On success the
    /// draft reaches the terminal confirmation step; on failure it stays at
    /// the payment step with the failure recorded, and the employer retries
    /// manually.
    pub async fn submit(&self, id: &DraftId) -> Result<DraftRecord, EnrollmentServiceError> {
        let mut record = self.get(id)?;
        record.draft.ensure_ready_to_submit()?;

        let request = self.build_request(&record)?;
        match self.gateway.submit(request).await {
            Ok(receipt) => {
                record.draft.confirm();
                record.receipt = Some(receipt);
                record.last_failure = None;
                self.drafts.update(record.clone())?;
                Ok(record)
            }
            Err(error) => {
                record.last_failure = Some(error.to_string());
                self.drafts.update(record)?;
                Err(EnrollmentServiceError::Gateway(error))
            }
        }
    }

    fn build_request(&self, record: &DraftRecord) -> Result<EnrollmentRequest, EnrollmentServiceError> {
        let draft = &record.draft;
        let schedule = draft.contribution_schedule()?;
        let partner = draft
            .partner()
            .cloned()
            .ok_or(WizardError::MissingPartnerSelection)?;

        let roster = self.roster.list(draft.employer_id())?;
        let exclusions = draft.exclusions();
        let members: Vec<MemberEnrollment> = roster
            .iter()
            .filter(|employee| !exclusions.excludes(employee.category))
            .map(|employee| MemberEnrollment {
                employee_id: employee.employee_id.clone(),
                membership_tier: employee.membership_tier,
                family_tier: employee.family_tier,
                dependents: employee.dependents,
            })
            .collect();

        let breakdown = quote(&roster, &schedule, exclusions, &self.rates);

        Ok(EnrollmentRequest {
            employer_id: draft.employer_id().to_string(),
            partner,
            members,
            monthly_total: breakdown.monthly_total,
            payment_reference: draft.card().masked_reference(),
        })
    }
}

/// Error raised by the enrollment service.
#[derive(Debug, thiserror::Error)]
pub enum EnrollmentServiceError {
    #[error(transparent)]
    Wizard(#[from] WizardError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Roster(#[from] RosterError),
}
