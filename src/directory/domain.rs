use serde::{Deserialize, Serialize};

use crate::workflows::enrollment::MembershipTier;

/// A DPC provider as shown in the provider directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderListing {
    pub id: String,
    pub name: String,
    pub practice_name: String,
    pub specialty: String,
    pub location: String,
    pub accepting_patients: bool,
    pub tiers: Vec<MembershipTier>,
}

/// A benefits broker as shown in the broker directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokerListing {
    pub id: String,
    pub name: String,
    pub company: String,
    pub location: String,
    pub licensed_states: Vec<String>,
}
