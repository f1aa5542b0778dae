use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::Utc;
use serde_json::Value;

use crate::roster::{EmployeeRecord, InMemoryRoster, RosterStore};
use crate::workflows::enrollment::domain::{
    CoverageStructure, EmployeeCategory, EnrollmentPath, FamilyTier, PaymentCard,
};
use crate::workflows::enrollment::draft::{DraftUpdate, TierContributions};
use crate::workflows::enrollment::quote::{MembershipTier, RateCard};
use crate::workflows::enrollment::repository::{
    DraftId, DraftRepository, EnrollmentGateway, EnrollmentReceipt, EnrollmentRequest,
    GatewayError, InMemoryDraftRepository,
};
use crate::workflows::enrollment::service::EnrollmentService;

pub(super) const EMPLOYER: &str = "emp-100";

pub(super) fn employee(
    id: &str,
    category: EmployeeCategory,
    membership: MembershipTier,
    family: FamilyTier,
) -> EmployeeRecord {
    EmployeeRecord {
        employee_id: id.to_string(),
        name: format!("Employee {id}"),
        category,
        family_tier: family,
        membership_tier: membership,
        dependents: match family {
            FamilyTier::EmployeeOnly => 0,
            FamilyTier::EmployeeSpouse => 1,
            FamilyTier::Family => 3,
        },
    }
}

/// The payment-page sample scenario: 20 covered employees priced at 5000
/// per month.
pub(super) fn sample_roster() -> Vec<EmployeeRecord> {
    let mut roster = Vec::new();
    for index in 0..10 {
        roster.push(employee(
            &format!("solo-{index}"),
            EmployeeCategory::FullTime,
            MembershipTier::Basic,
            FamilyTier::EmployeeOnly,
        ));
    }
    for index in 0..10 {
        roster.push(employee(
            &format!("fam-{index}"),
            EmployeeCategory::FullTime,
            MembershipTier::Premium,
            FamilyTier::Family,
        ));
    }
    roster
}

/// Sample roster plus part-time/contract staff for exclusion tests.
pub(super) fn roster_with_noncore() -> Vec<EmployeeRecord> {
    let mut roster = sample_roster();
    roster.push(employee(
        "pt-0",
        EmployeeCategory::PartTime,
        MembershipTier::Basic,
        FamilyTier::EmployeeOnly,
    ));
    roster.push(employee(
        "ct-0",
        EmployeeCategory::Contract,
        MembershipTier::Standard,
        FamilyTier::EmployeeOnly,
    ));
    roster
}

pub(super) fn valid_card() -> PaymentCard {
    PaymentCard {
        cardholder_name: "Dana Whitfield".to_string(),
        card_number: "4242 4242 4242 4242".to_string(),
        expiry: "09/27".to_string(),
        cvv: "123".to_string(),
    }
}

pub(super) fn per_tier_contributions() -> TierContributions {
    TierContributions {
        employee_only: Some(70),
        employee_spouse: Some(150),
        family: Some(280),
    }
}

pub(super) fn provider_path() -> EnrollmentPath {
    EnrollmentPath::Provider {
        provider_id: "prov-001".to_string(),
    }
}

#[derive(Default)]
pub(super) struct RecordingGateway {
    submissions: Mutex<Vec<EnrollmentRequest>>,
}

impl RecordingGateway {
    pub(super) fn submissions(&self) -> Vec<EnrollmentRequest> {
        self.submissions
            .lock()
            .expect("gateway mutex poisoned")
            .clone()
    }
}

#[async_trait::async_trait]
impl EnrollmentGateway for RecordingGateway {
    async fn submit(&self, request: EnrollmentRequest) -> Result<EnrollmentReceipt, GatewayError> {
        let mut guard = self.submissions.lock().expect("gateway mutex poisoned");
        guard.push(request);
        Ok(EnrollmentReceipt {
            confirmation_code: format!("conf-{:04}", guard.len()),
            submitted_at: Utc::now(),
        })
    }
}

pub(super) struct RejectingGateway;

#[async_trait::async_trait]
impl EnrollmentGateway for RejectingGateway {
    async fn submit(&self, _request: EnrollmentRequest) -> Result<EnrollmentReceipt, GatewayError> {
        Err(GatewayError::Rejected(
            "selected plan is not available".to_string(),
        ))
    }
}

pub(super) fn build_service(
    roster: Vec<EmployeeRecord>,
) -> (
    EnrollmentService<InMemoryDraftRepository, InMemoryRoster, RecordingGateway>,
    Arc<InMemoryDraftRepository>,
    Arc<RecordingGateway>,
) {
    let drafts = Arc::new(InMemoryDraftRepository::default());
    let employees = Arc::new(InMemoryRoster::with_employees(EMPLOYER, roster));
    let gateway = Arc::new(RecordingGateway::default());
    let service = EnrollmentService::new(
        drafts.clone(),
        employees,
        gateway.clone(),
        RateCard::standard(),
    );
    (service, drafts, gateway)
}

pub(super) fn build_rejecting_service(
    drafts: Arc<InMemoryDraftRepository>,
    roster: Vec<EmployeeRecord>,
) -> EnrollmentService<InMemoryDraftRepository, InMemoryRoster, RejectingGateway> {
    let employees = Arc::new(InMemoryRoster::with_employees(EMPLOYER, roster));
    EnrollmentService::new(
        drafts,
        employees,
        Arc::new(RejectingGateway),
        RateCard::standard(),
    )
}

/// Walk a freshly started draft up to the payment step with the sample
/// per-tier configuration.
pub(super) fn walk_to_payment<R, S, G>(service: &EnrollmentService<R, S, G>, id: &DraftId)
where
    R: DraftRepository + 'static,
    S: RosterStore + 'static,
    G: EnrollmentGateway + 'static,
{
    service
        .update(
            id,
            DraftUpdate::CoverageStructure {
                structure: CoverageStructure::ByFamilySize,
            },
        )
        .expect("coverage structure applies");
    service.advance(id).expect("advance to contributions");

    service
        .update(
            id,
            DraftUpdate::ContributionDetails {
                flat_monthly: None,
                tiers: per_tier_contributions(),
            },
        )
        .expect("contributions apply");
    service.advance(id).expect("advance to partner selection");

    service
        .update(
            id,
            DraftUpdate::PartnerSelection {
                path: provider_path(),
            },
        )
        .expect("partner applies");
    service.advance(id).expect("advance to payment");

    service
        .update(id, DraftUpdate::Payment { card: valid_card() })
        .expect("card applies");
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
