use super::domain::{
    CoverageStructure, EligibilityExclusions, EnrollmentPath, EnrollmentStep, FamilyTier,
    PaymentCard, WizardError,
};
use super::quote::ContributionSchedule;
use serde::{Deserialize, Serialize};

/// Per-family-tier contribution amounts entered on the contribution step.
/// Fields stay `None` until the employer fills them in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierContributions {
    #[serde(default)]
    pub employee_only: Option<u32>,
    #[serde(default)]
    pub employee_spouse: Option<u32>,
    #[serde(default)]
    pub family: Option<u32>,
}

impl TierContributions {
    pub fn amount_for(&self, tier: FamilyTier) -> Option<u32> {
        match tier {
            FamilyTier::EmployeeOnly => self.employee_only,
            FamilyTier::EmployeeSpouse => self.employee_spouse,
            FamilyTier::Family => self.family,
        }
    }

    fn validate(&self) -> Result<(), WizardError> {
        for tier in FamilyTier::ordered() {
            match self.amount_for(tier) {
                None => return Err(WizardError::MissingTierContribution { tier }),
                Some(0) => return Err(WizardError::ZeroContribution),
                Some(_) => {}
            }
        }
        Ok(())
    }
}

/// Field payload for a single wizard step. Updates are only accepted for the
/// step the draft currently sits at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum DraftUpdate {
    CoverageStructure {
        structure: CoverageStructure,
    },
    ContributionDetails {
        #[serde(default)]
        flat_monthly: Option<u32>,
        #[serde(default)]
        tiers: TierContributions,
    },
    EligibilityExclusions {
        exclusions: EligibilityExclusions,
    },
    PartnerSelection {
        path: EnrollmentPath,
    },
    Payment {
        card: PaymentCard,
    },
}

impl DraftUpdate {
    pub const fn step(&self) -> EnrollmentStep {
        match self {
            DraftUpdate::CoverageStructure { .. } => EnrollmentStep::CoverageStructure,
            DraftUpdate::ContributionDetails { .. } => EnrollmentStep::ContributionDetails,
            DraftUpdate::EligibilityExclusions { .. } => EnrollmentStep::EligibilityExclusions,
            DraftUpdate::PartnerSelection { .. } => EnrollmentStep::PartnerSelection,
            DraftUpdate::Payment { .. } => EnrollmentStep::Payment,
        }
    }
}

/// Serializable snapshot of a draft for API responses. Card data is reduced
/// to a presence flag.
#[derive(Debug, Clone, Serialize)]
pub struct DraftView {
    pub employer_id: String,
    pub step: EnrollmentStep,
    pub step_label: &'static str,
    pub coverage_structure: Option<CoverageStructure>,
    pub flat_monthly: Option<u32>,
    pub tier_contributions: TierContributions,
    pub exclusions: EligibilityExclusions,
    pub partner: Option<EnrollmentPath>,
    pub card_on_file: bool,
}

/// The enrollment wizard state machine. Forward transitions validate the
/// current step; backward transitions never discard entered values, so a
/// draft can be resumed exactly where it was left.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentDraft {
    employer_id: String,
    step: EnrollmentStep,
    coverage_structure: Option<CoverageStructure>,
    flat_monthly: Option<u32>,
    tier_contributions: TierContributions,
    exclusions: EligibilityExclusions,
    partner: Option<EnrollmentPath>,
    card: PaymentCard,
}

impl EnrollmentDraft {
    pub fn new(employer_id: impl Into<String>) -> Self {
        Self {
            employer_id: employer_id.into(),
            step: EnrollmentStep::CoverageStructure,
            coverage_structure: None,
            flat_monthly: None,
            tier_contributions: TierContributions::default(),
            exclusions: EligibilityExclusions::none(),
            partner: None,
            card: PaymentCard::default(),
        }
    }

    pub fn employer_id(&self) -> &str {
        &self.employer_id
    }

    pub fn step(&self) -> EnrollmentStep {
        self.step
    }

    pub fn coverage_structure(&self) -> Option<CoverageStructure> {
        self.coverage_structure
    }

    pub fn flat_monthly(&self) -> Option<u32> {
        self.flat_monthly
    }

    pub fn tier_contributions(&self) -> &TierContributions {
        &self.tier_contributions
    }

    pub fn exclusions(&self) -> &EligibilityExclusions {
        &self.exclusions
    }

    pub fn partner(&self) -> Option<&EnrollmentPath> {
        self.partner.as_ref()
    }

    pub fn card(&self) -> &PaymentCard {
        &self.card
    }

    pub fn to_view(&self) -> DraftView {
        DraftView {
            employer_id: self.employer_id.clone(),
            step: self.step,
            step_label: self.step.label(),
            coverage_structure: self.coverage_structure,
            flat_monthly: self.flat_monthly,
            tier_contributions: self.tier_contributions,
            exclusions: self.exclusions,
            partner: self.partner.clone(),
            card_on_file: self.card != PaymentCard::default(),
        }
    }

    /// Apply a step-scoped field update. Blank contribution fields leave
    /// earlier entries in place, so switching structures and navigating back
    /// never loses what was already typed.
    pub fn apply(&mut self, update: DraftUpdate) -> Result<(), WizardError> {
        if self.step == EnrollmentStep::Confirmation {
            return Err(WizardError::AlreadyConfirmed);
        }
        if update.step() != self.step {
            return Err(WizardError::StepMismatch {
                current: self.step,
                submitted: update.step(),
            });
        }

        match update {
            DraftUpdate::CoverageStructure { structure } => {
                self.coverage_structure = Some(structure);
            }
            DraftUpdate::ContributionDetails {
                flat_monthly,
                tiers,
            } => {
                if let Some(amount) = flat_monthly {
                    self.flat_monthly = Some(amount);
                }
                if let Some(amount) = tiers.employee_only {
                    self.tier_contributions.employee_only = Some(amount);
                }
                if let Some(amount) = tiers.employee_spouse {
                    self.tier_contributions.employee_spouse = Some(amount);
                }
                if let Some(amount) = tiers.family {
                    self.tier_contributions.family = Some(amount);
                }
            }
            DraftUpdate::EligibilityExclusions { exclusions } => {
                self.exclusions = exclusions;
            }
            DraftUpdate::PartnerSelection { path } => {
                self.partner = Some(path);
            }
            DraftUpdate::Payment { card } => {
                self.card = card;
            }
        }

        Ok(())
    }

    /// Validate the current step and move forward. The payment step is left
    /// through submission, not `advance`.
    pub fn advance(&mut self) -> Result<EnrollmentStep, WizardError> {
        self.validate_current()?;

        let next = match self.step {
            EnrollmentStep::CoverageStructure => EnrollmentStep::ContributionDetails,
            EnrollmentStep::ContributionDetails => {
                if self.coverage_structure == Some(CoverageStructure::Custom) {
                    EnrollmentStep::EligibilityExclusions
                } else {
                    EnrollmentStep::PartnerSelection
                }
            }
            EnrollmentStep::EligibilityExclusions => EnrollmentStep::PartnerSelection,
            EnrollmentStep::PartnerSelection => EnrollmentStep::Payment,
            EnrollmentStep::Payment => return Err(WizardError::NotReadyToSubmit),
            EnrollmentStep::Confirmation => return Err(WizardError::AlreadyConfirmed),
        };

        self.step = next;
        Ok(next)
    }

    /// Step backward without discarding any entered values.
    pub fn back(&mut self) -> Result<EnrollmentStep, WizardError> {
        let previous = match self.step {
            EnrollmentStep::CoverageStructure => return Err(WizardError::NoEarlierStep),
            EnrollmentStep::ContributionDetails => EnrollmentStep::CoverageStructure,
            EnrollmentStep::EligibilityExclusions => EnrollmentStep::ContributionDetails,
            EnrollmentStep::PartnerSelection => {
                if self.coverage_structure == Some(CoverageStructure::Custom) {
                    EnrollmentStep::EligibilityExclusions
                } else {
                    EnrollmentStep::ContributionDetails
                }
            }
            EnrollmentStep::Payment => EnrollmentStep::PartnerSelection,
            EnrollmentStep::Confirmation => return Err(WizardError::AlreadyConfirmed),
        };

        self.step = previous;
        Ok(previous)
    }

    /// Checks run before the final submit is handed to the gateway.
    pub fn ensure_ready_to_submit(&self) -> Result<(), WizardError> {
        if self.step != EnrollmentStep::Payment {
            return Err(WizardError::NotReadyToSubmit);
        }
        if self.partner.is_none() {
            return Err(WizardError::MissingPartnerSelection);
        }
        self.contribution_inputs_valid()?;
        self.card.validate()
    }

    /// Transition to the terminal confirmation state after a successful
    /// gateway submission.
    pub fn confirm(&mut self) {
        self.step = EnrollmentStep::Confirmation;
    }

    fn validate_current(&self) -> Result<(), WizardError> {
        match self.step {
            EnrollmentStep::CoverageStructure => {
                if self.coverage_structure.is_none() {
                    return Err(WizardError::MissingCoverageStructure);
                }
                Ok(())
            }
            EnrollmentStep::ContributionDetails => self.contribution_inputs_valid(),
            EnrollmentStep::EligibilityExclusions => Ok(()),
            EnrollmentStep::PartnerSelection => {
                if self.partner.is_none() {
                    return Err(WizardError::MissingPartnerSelection);
                }
                Ok(())
            }
            EnrollmentStep::Payment => self.card.validate(),
            EnrollmentStep::Confirmation => Ok(()),
        }
    }

    /// Assemble the validated contribution configuration. The custom
    /// structure prices with the flat amount; its exclusions only change who
    /// is covered.
    pub fn contribution_schedule(&self) -> Result<ContributionSchedule, WizardError> {
        self.contribution_inputs_valid()?;
        match self.coverage_structure {
            None => Err(WizardError::MissingCoverageStructure),
            Some(CoverageStructure::SameForAll) | Some(CoverageStructure::Custom) => {
                Ok(ContributionSchedule::Flat {
                    monthly: self.flat_monthly.ok_or(WizardError::MissingContribution)?,
                })
            }
            Some(CoverageStructure::ByFamilySize) => Ok(ContributionSchedule::PerTier {
                employee_only: self
                    .tier_contributions
                    .employee_only
                    .ok_or(WizardError::MissingTierContribution {
                        tier: FamilyTier::EmployeeOnly,
                    })?,
                employee_spouse: self.tier_contributions.employee_spouse.ok_or(
                    WizardError::MissingTierContribution {
                        tier: FamilyTier::EmployeeSpouse,
                    },
                )?,
                family: self.tier_contributions.family.ok_or(
                    WizardError::MissingTierContribution {
                        tier: FamilyTier::Family,
                    },
                )?,
            }),
        }
    }

    fn contribution_inputs_valid(&self) -> Result<(), WizardError> {
        match self.coverage_structure {
            None => Err(WizardError::MissingCoverageStructure),
            Some(CoverageStructure::ByFamilySize) => self.tier_contributions.validate(),
            Some(CoverageStructure::SameForAll) | Some(CoverageStructure::Custom) => {
                match self.flat_monthly {
                    None => Err(WizardError::MissingContribution),
                    Some(0) => Err(WizardError::ZeroContribution),
                    Some(_) => Ok(()),
                }
            }
        }
    }
}
