use super::domain::{EligibilityExclusions, FamilyTier};
use crate::roster::EmployeeRecord;
use serde::{Deserialize, Serialize};

/// Named pricing/service level offered by a partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipTier {
    Basic,
    Standard,
    Premium,
}

impl MembershipTier {
    pub const fn ordered() -> [Self; 3] {
        [Self::Basic, Self::Standard, Self::Premium]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Standard => "Standard",
            Self::Premium => "Premium",
        }
    }
}

/// Published monthly pricing: a base rate per membership tier plus a
/// surcharge for covered household members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateCard {
    pub basic_monthly: u32,
    pub standard_monthly: u32,
    pub premium_monthly: u32,
    pub spouse_surcharge: u32,
    pub family_surcharge: u32,
}

impl RateCard {
    pub fn standard() -> Self {
        Self {
            basic_monthly: 100,
            standard_monthly: 150,
            premium_monthly: 250,
            spouse_surcharge: 50,
            family_surcharge: 150,
        }
    }

    pub fn monthly(&self, membership: MembershipTier, family: FamilyTier) -> u32 {
        let base = match membership {
            MembershipTier::Basic => self.basic_monthly,
            MembershipTier::Standard => self.standard_monthly,
            MembershipTier::Premium => self.premium_monthly,
        };
        let surcharge = match family {
            FamilyTier::EmployeeOnly => 0,
            FamilyTier::EmployeeSpouse => self.spouse_surcharge,
            FamilyTier::Family => self.family_surcharge,
        };
        base + surcharge
    }
}

/// The validated contribution configuration assembled from a completed draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "structure", rename_all = "snake_case")]
pub enum ContributionSchedule {
    Flat {
        monthly: u32,
    },
    PerTier {
        employee_only: u32,
        employee_spouse: u32,
        family: u32,
    },
}

impl ContributionSchedule {
    pub fn employer_share_for(&self, tier: FamilyTier) -> u32 {
        match self {
            ContributionSchedule::Flat { monthly } => *monthly,
            ContributionSchedule::PerTier {
                employee_only,
                employee_spouse,
                family,
            } => match tier {
                FamilyTier::EmployeeOnly => *employee_only,
                FamilyTier::EmployeeSpouse => *employee_spouse,
                FamilyTier::Family => *family,
            },
        }
    }
}

/// Cost summary shown on the payment step. The employer and employee shares
/// always sum to the monthly total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuoteBreakdown {
    pub covered_employees: usize,
    pub excluded_employees: usize,
    pub monthly_total: u32,
    pub employer_monthly: u32,
    pub employee_monthly: u32,
    pub annual_total: u32,
}

/// Price the roster against the rate card. The employer share per employee
/// is capped at that employee's cost, and the employee share is the
/// remainder, so the split invariant holds by construction.
pub fn quote(
    roster: &[EmployeeRecord],
    schedule: &ContributionSchedule,
    exclusions: &EligibilityExclusions,
    rates: &RateCard,
) -> QuoteBreakdown {
    let mut covered_employees = 0;
    let mut excluded_employees = 0;
    let mut monthly_total = 0u32;
    let mut employer_monthly = 0u32;

    for employee in roster {
        if exclusions.excludes(employee.category) {
            excluded_employees += 1;
            continue;
        }

        covered_employees += 1;
        let cost = rates.monthly(employee.membership_tier, employee.family_tier);
        monthly_total += cost;
        employer_monthly += schedule.employer_share_for(employee.family_tier).min(cost);
    }

    QuoteBreakdown {
        covered_employees,
        excluded_employees,
        monthly_total,
        employer_monthly,
        employee_monthly: monthly_total - employer_monthly,
        annual_total: monthly_total * 12,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::EmployeeRecord;
    use crate::workflows::enrollment::domain::EmployeeCategory;

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
            dependents: match family {
                FamilyTier::EmployeeOnly => 0,
                FamilyTier::EmployeeSpouse => 1,
                FamilyTier::Family => 3,
            },
        }
    }

    fn sample_roster() -> Vec<EmployeeRecord> {
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

    #[test]
    fn sample_scenario_splits_employer_and_employee_shares() {
        let schedule = ContributionSchedule::PerTier {
            employee_only: 70,
            employee_spouse: 150,
            family: 280,
        };

        let breakdown = quote(
            &sample_roster(),
            &schedule,
            &EligibilityExclusions::none(),
            &RateCard::standard(),
        );

        assert_eq!(breakdown.covered_employees, 20);
        assert_eq!(breakdown.monthly_total, 5000);
        assert_eq!(breakdown.employer_monthly, 3500);
        assert_eq!(breakdown.employee_monthly, 1500);
        assert_eq!(breakdown.annual_total, 60000);
    }

    #[test]
    fn employer_plus_employee_always_equals_total() {
        let schedule = ContributionSchedule::Flat { monthly: 120 };
        let breakdown = quote(
            &sample_roster(),
            &schedule,
            &EligibilityExclusions::none(),
            &RateCard::standard(),
        );
        assert_eq!(
            breakdown.employer_monthly + breakdown.employee_monthly,
            breakdown.monthly_total
        );
    }

    #[test]
    fn flat_contribution_is_capped_at_the_employee_cost() {
        let roster = vec![employee(
            "solo-0",
            EmployeeCategory::FullTime,
            MembershipTier::Basic,
            FamilyTier::EmployeeOnly,
        )];
        let schedule = ContributionSchedule::Flat { monthly: 500 };

        let breakdown = quote(
            &roster,
            &schedule,
            &EligibilityExclusions::none(),
            &RateCard::standard(),
        );

        assert_eq!(breakdown.monthly_total, 100);
        assert_eq!(breakdown.employer_monthly, 100);
        assert_eq!(breakdown.employee_monthly, 0);
    }

    #[test]
    fn exclusions_remove_employees_from_the_quote() {
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

        let exclusions = EligibilityExclusions {
            part_time: true,
            temporary: false,
            contract: true,
        };
        let schedule = ContributionSchedule::Flat { monthly: 100 };

        let breakdown = quote(&roster, &schedule, &exclusions, &RateCard::standard());

        assert_eq!(breakdown.covered_employees, 20);
        assert_eq!(breakdown.excluded_employees, 2);
        assert_eq!(breakdown.monthly_total, 5000);
    }
}
