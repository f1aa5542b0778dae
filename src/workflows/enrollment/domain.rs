use serde::{Deserialize, Serialize};

/// Steps of the employer enrollment wizard, in walk order. The eligibility
/// step is only visited when the coverage structure is `Custom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStep {
    CoverageStructure,
    ContributionDetails,
    EligibilityExclusions,
    PartnerSelection,
    Payment,
    Confirmation,
}

impl EnrollmentStep {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::CoverageStructure,
            Self::ContributionDetails,
            Self::EligibilityExclusions,
            Self::PartnerSelection,
            Self::Payment,
            Self::Confirmation,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::CoverageStructure => "Coverage Structure",
            Self::ContributionDetails => "Contribution Details",
            Self::EligibilityExclusions => "Employee Eligibility",
            Self::PartnerSelection => "Provider & Broker Selection",
            Self::Payment => "Payment",
            Self::Confirmation => "Confirmation",
        }
    }
}

/// How the employer contribution is structured across the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageStructure {
    SameForAll,
    ByFamilySize,
    Custom,
}

impl CoverageStructure {
    pub const fn label(self) -> &'static str {
        match self {
            Self::SameForAll => "Same for All Employees",
            Self::ByFamilySize => "By Family Size",
            Self::Custom => "Custom",
        }
    }
}

/// Household coverage level an employee enrolls at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FamilyTier {
    EmployeeOnly,
    EmployeeSpouse,
    Family,
}

impl FamilyTier {
    pub const fn ordered() -> [Self; 3] {
        [Self::EmployeeOnly, Self::EmployeeSpouse, Self::Family]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::EmployeeOnly => "Employee Only",
            Self::EmployeeSpouse => "Employee + Spouse",
            Self::Family => "Family",
        }
    }
}

/// Employment categories the eligibility step can exclude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeCategory {
    FullTime,
    PartTime,
    Temporary,
    Contract,
}

impl EmployeeCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::FullTime => "Full-Time",
            Self::PartTime => "Part-Time",
            Self::Temporary => "Temporary",
            Self::Contract => "Contract",
        }
    }
}

/// Flags collected on the eligibility step. Full-time employees are always
/// covered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityExclusions {
    #[serde(default)]
    pub part_time: bool,
    #[serde(default)]
    pub temporary: bool,
    #[serde(default)]
    pub contract: bool,
}

impl EligibilityExclusions {
    pub const fn none() -> Self {
        Self {
            part_time: false,
            temporary: false,
            contract: false,
        }
    }

    pub fn excludes(&self, category: EmployeeCategory) -> bool {
        match category {
            EmployeeCategory::FullTime => false,
            EmployeeCategory::PartTime => self.part_time,
            EmployeeCategory::Temporary => self.temporary,
            EmployeeCategory::Contract => self.contract,
        }
    }
}

/// Which partner the employer enrolls through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EnrollmentPath {
    Provider { provider_id: String },
    Broker { broker_id: String },
}

impl EnrollmentPath {
    pub fn partner_id(&self) -> &str {
        match self {
            EnrollmentPath::Provider { provider_id } => provider_id,
            EnrollmentPath::Broker { broker_id } => broker_id,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            EnrollmentPath::Provider { .. } => "Provider",
            EnrollmentPath::Broker { .. } => "Broker",
        }
    }
}

/// Card fields collected on the payment step. Charging happens downstream;
/// only shape checks are applied here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentCard {
    #[serde(default)]
    pub cardholder_name: String,
    #[serde(default)]
    pub card_number: String,
    #[serde(default)]
    pub expiry: String,
    #[serde(default)]
    pub cvv: String,
}

impl PaymentCard {
    pub fn validate(&self) -> Result<(), WizardError> {
        if self.cardholder_name.trim().is_empty() {
            return Err(WizardError::InvalidCardField {
                field: "cardholder_name",
            });
        }

        let digits = self.normalized_number();
        if digits.len() < 13 || digits.len() > 19 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(WizardError::InvalidCardField {
                field: "card_number",
            });
        }

        if !expiry_is_valid(&self.expiry) {
            return Err(WizardError::InvalidCardField { field: "expiry" });
        }

        let cvv = self.cvv.trim();
        if !(cvv.len() == 3 || cvv.len() == 4) || !cvv.chars().all(|c| c.is_ascii_digit()) {
            return Err(WizardError::InvalidCardField { field: "cvv" });
        }

        Ok(())
    }

    /// Last-four reference included in the backend request instead of raw
    /// card data.
    pub fn masked_reference(&self) -> String {
        let digits = self.normalized_number();
        let last_four = if digits.len() >= 4 {
            &digits[digits.len() - 4..]
        } else {
            digits.as_str()
        };
        format!("card-{last_four}")
    }

    fn normalized_number(&self) -> String {
        self.card_number
            .chars()
            .filter(|c| !c.is_ascii_whitespace() && *c != '-')
            .collect()
    }
}

fn expiry_is_valid(expiry: &str) -> bool {
    let trimmed = expiry.trim();
    let Some((month, year)) = trimmed.split_once('/') else {
        return false;
    };
    if month.len() != 2 || year.len() != 2 {
        return false;
    }
    let Ok(month) = month.parse::<u8>() else {
        return false;
    };
    (1..=12).contains(&month) && year.chars().all(|c| c.is_ascii_digit())
}

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("no coverage structure selected")]
    MissingCoverageStructure,
    #[error("a monthly contribution amount is required")]
    MissingContribution,
    #[error("a contribution for the {} tier is required", .tier.label())]
    MissingTierContribution { tier: FamilyTier },
    #[error("contribution amounts must be greater than zero")]
    ZeroContribution,
    #[error("no provider or broker selected")]
    MissingPartnerSelection,
    #[error("payment card field '{field}' is missing or malformed")]
    InvalidCardField { field: &'static str },
    #[error("update targets the '{}' step but the draft is at '{}'", .submitted.label(), .current.label())]
    StepMismatch {
        current: EnrollmentStep,
        submitted: EnrollmentStep,
    },
    #[error("the coverage structure step has no earlier step")]
    NoEarlierStep,
    #[error("a confirmed enrollment cannot be reopened")]
    AlreadyConfirmed,
    #[error("the payment step is completed by submitting the enrollment")]
    NotReadyToSubmit,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> PaymentCard {
        PaymentCard {
            cardholder_name: "Dana Whitfield".to_string(),
            card_number: "4242 4242 4242 4242".to_string(),
            expiry: "09/27".to_string(),
            cvv: "123".to_string(),
        }
    }

    #[test]
    fn valid_card_passes_shape_checks() {
        assert!(card().validate().is_ok());
    }

    #[test]
    fn card_validation_names_the_failing_field() {
        let mut missing_name = card();
        missing_name.cardholder_name = "  ".to_string();
        match missing_name.validate() {
            Err(WizardError::InvalidCardField { field }) => assert_eq!(field, "cardholder_name"),
            other => panic!("expected card field error, got {other:?}"),
        }

        let mut short_number = card();
        short_number.card_number = "4242".to_string();
        assert!(matches!(
            short_number.validate(),
            Err(WizardError::InvalidCardField {
                field: "card_number"
            })
        ));

        let mut bad_expiry = card();
        bad_expiry.expiry = "13/27".to_string();
        assert!(matches!(
            bad_expiry.validate(),
            Err(WizardError::InvalidCardField { field: "expiry" })
        ));

        let mut bad_cvv = card();
        bad_cvv.cvv = "12".to_string();
        assert!(matches!(
            bad_cvv.validate(),
            Err(WizardError::InvalidCardField { field: "cvv" })
        ));
    }

    #[test]
    fn masked_reference_keeps_last_four_digits_only() {
        assert_eq!(card().masked_reference(), "card-4242");
    }

    #[test]
    fn exclusions_never_apply_to_full_time() {
        let exclusions = EligibilityExclusions {
            part_time: true,
            temporary: true,
            contract: true,
        };
        assert!(!exclusions.excludes(EmployeeCategory::FullTime));
        assert!(exclusions.excludes(EmployeeCategory::PartTime));
        assert!(exclusions.excludes(EmployeeCategory::Temporary));
        assert!(exclusions.excludes(EmployeeCategory::Contract));
    }
}
