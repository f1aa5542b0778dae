use serde::{Deserialize, Serialize};

use crate::workflows::enrollment::{EmployeeCategory, FamilyTier, MembershipTier};

/// One row of an employer's employee roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub employee_id: String,
    pub name: String,
    pub category: EmployeeCategory,
    pub family_tier: FamilyTier,
    pub membership_tier: MembershipTier,
    #[serde(default)]
    pub dependents: u8,
}

/// Error enumeration for roster storage failures.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("employee {0} is already on the roster")]
    Duplicate(String),
    #[error("no employee with id {0}")]
    UnknownEmployee(String),
    #[error("roster unavailable: {0}")]
    Unavailable(String),
}
