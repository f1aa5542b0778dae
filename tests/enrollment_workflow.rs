use std::sync::{Arc, Mutex};

use chrono::Utc;
use dpc_portal::roster::{EmployeeRecord, InMemoryRoster};
use dpc_portal::workflows::enrollment::{
    CoverageStructure, DraftUpdate, EligibilityExclusions, EmployeeCategory, EnrollmentGateway,
    EnrollmentReceipt, EnrollmentRequest, EnrollmentService, EnrollmentServiceError,
    EnrollmentStep, FamilyTier, GatewayError, InMemoryDraftRepository, MembershipTier,
    PaymentCard, RateCard, TierContributions,
};

const EMPLOYER: &str = "emp-100";

fn employee(
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
        dependents: 0,
    }
}

fn roster() -> Vec<EmployeeRecord> {
    let mut roster = vec![
        employee(
            "e-1",
            EmployeeCategory::FullTime,
            MembershipTier::Standard,
            FamilyTier::EmployeeOnly,
        ),
        employee(
            "e-2",
            EmployeeCategory::FullTime,
            MembershipTier::Premium,
            FamilyTier::Family,
        ),
        employee(
            "e-3",
            EmployeeCategory::FullTime,
            MembershipTier::Basic,
            FamilyTier::EmployeeSpouse,
        ),
    ];
    roster.push(employee(
        "pt-1",
        EmployeeCategory::PartTime,
        MembershipTier::Basic,
        FamilyTier::EmployeeOnly,
    ));
    roster
}

fn card() -> PaymentCard {
    PaymentCard {
        cardholder_name: "Dana Whitfield".to_string(),
        card_number: "4242424242424242".to_string(),
        expiry: "09/27".to_string(),
        cvv: "123".to_string(),
    }
}

#[derive(Default)]
struct ScriptedGateway {
    fail_first: Mutex<bool>,
    submissions: Mutex<Vec<EnrollmentRequest>>,
}

impl ScriptedGateway {
    fn failing_once() -> Self {
        Self {
            fail_first: Mutex::new(true),
            submissions: Mutex::new(Vec::new()),
        }
    }

    fn submissions(&self) -> Vec<EnrollmentRequest> {
        self.submissions
            .lock()
            .expect("gateway mutex poisoned")
            .clone()
    }
}

#[async_trait::async_trait]
impl EnrollmentGateway for ScriptedGateway {
    async fn submit(&self, request: EnrollmentRequest) -> Result<EnrollmentReceipt, GatewayError> {
        let mut fail = self.fail_first.lock().expect("gateway mutex poisoned");
        if *fail {
            *fail = false;
            return Err(GatewayError::Transport(
                "connection reset by backend".to_string(),
            ));
        }

        let mut guard = self.submissions.lock().expect("gateway mutex poisoned");
        guard.push(request);
        Ok(EnrollmentReceipt {
            confirmation_code: format!("conf-{:04}", guard.len()),
            submitted_at: Utc::now(),
        })
    }
}

fn build_service(
    gateway: Arc<ScriptedGateway>,
) -> EnrollmentService<InMemoryDraftRepository, InMemoryRoster, ScriptedGateway> {
    EnrollmentService::new(
        Arc::new(InMemoryDraftRepository::default()),
        Arc::new(InMemoryRoster::with_employees(EMPLOYER, roster())),
        gateway,
        RateCard::standard(),
    )
}

#[tokio::test]
async fn custom_enrollment_walks_the_full_wizard_and_recovers_from_a_failed_submit() {
    let gateway = Arc::new(ScriptedGateway::failing_once());
    let service = build_service(gateway.clone());

    let record = service.start(EMPLOYER).expect("draft starts");
    let id = record.id.clone();

    service
        .update(
            &id,
            DraftUpdate::CoverageStructure {
                structure: CoverageStructure::Custom,
            },
        )
        .expect("structure applies");
    service.advance(&id).expect("advance to contributions");

    service
        .update(
            &id,
            DraftUpdate::ContributionDetails {
                flat_monthly: Some(100),
                tiers: TierContributions::default(),
            },
        )
        .expect("contribution applies");
    service.advance(&id).expect("advance to eligibility");

    service
        .update(
            &id,
            DraftUpdate::EligibilityExclusions {
                exclusions: EligibilityExclusions {
                    part_time: true,
                    temporary: false,
                    contract: false,
                },
            },
        )
        .expect("exclusions apply");
    service.advance(&id).expect("advance to partner selection");

    service
        .update(
            &id,
            DraftUpdate::PartnerSelection {
                path: dpc_portal::workflows::enrollment::EnrollmentPath::Broker {
                    broker_id: "brok-001".to_string(),
                },
            },
        )
        .expect("partner applies");
    service.advance(&id).expect("advance to payment");

    service
        .update(&id, DraftUpdate::Payment { card: card() })
        .expect("card applies");

    let breakdown = service.quote(&id).expect("quote computes");
    assert_eq!(breakdown.covered_employees, 3, "part-time staff excluded");
    assert_eq!(breakdown.excluded_employees, 1);
    assert_eq!(
        breakdown.employer_monthly + breakdown.employee_monthly,
        breakdown.monthly_total
    );

    // First submit fails; the draft must stay at the payment step.
    match service.submit(&id).await {
        Err(EnrollmentServiceError::Gateway(_)) => {}
        other => panic!("expected gateway failure, got {other:?}"),
    }
    let stored = service.get(&id).expect("record fetchable");
    assert_eq!(stored.draft.step(), EnrollmentStep::Payment);
    assert!(stored.last_failure.is_some());

    // Manual retry with the same draft succeeds.
    let confirmed = service.submit(&id).await.expect("retry succeeds");
    assert_eq!(confirmed.draft.step(), EnrollmentStep::Confirmation);
    assert!(confirmed.receipt.is_some());
    assert!(confirmed.last_failure.is_none());

    let requests = gateway.submissions();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].members.len(), 3);
    assert!(requests[0]
        .members
        .iter()
        .all(|member| member.employee_id != "pt-1"));
}

#[tokio::test]
async fn backward_navigation_resumes_without_reentry() {
    let gateway = Arc::new(ScriptedGateway::default());
    let service = build_service(gateway);

    let record = service.start(EMPLOYER).expect("draft starts");
    let id = record.id.clone();

    service
        .update(
            &id,
            DraftUpdate::CoverageStructure {
                structure: CoverageStructure::SameForAll,
            },
        )
        .expect("structure applies");
    service.advance(&id).expect("advance to contributions");
    service
        .update(
            &id,
            DraftUpdate::ContributionDetails {
                flat_monthly: Some(130),
                tiers: TierContributions::default(),
            },
        )
        .expect("contribution applies");

    let backed = service.back(&id).expect("back succeeds");
    assert_eq!(backed.draft.step(), EnrollmentStep::CoverageStructure);
    assert_eq!(backed.draft.flat_monthly(), Some(130));
    assert_eq!(
        backed.draft.coverage_structure(),
        Some(CoverageStructure::SameForAll)
    );

    // Forward again with no re-entry: the retained values satisfy each gate.
    let forward = service.advance(&id).expect("re-advance succeeds");
    assert_eq!(forward.draft.step(), EnrollmentStep::ContributionDetails);
    let forward = service.advance(&id).expect("re-advance succeeds");
    assert_eq!(forward.draft.step(), EnrollmentStep::PartnerSelection);
}
