use super::domain::{BrokerListing, ProviderListing};
use super::search::filter;
use crate::workflows::enrollment::MembershipTier;

/// In-memory directory the portal serves search requests from.
#[derive(Debug, Clone, Default)]
pub struct DirectoryCatalog {
    providers: Vec<ProviderListing>,
    brokers: Vec<BrokerListing>,
}

impl DirectoryCatalog {
    pub fn new(providers: Vec<ProviderListing>, brokers: Vec<BrokerListing>) -> Self {
        Self { providers, brokers }
    }

    /// Directory contents used by the demo server.
    pub fn seeded() -> Self {
        Self::new(seed_providers(), seed_brokers())
    }

    pub fn providers(&self, query: &str) -> Vec<ProviderListing> {
        filter(&self.providers, query).into_iter().cloned().collect()
    }

    pub fn brokers(&self, query: &str) -> Vec<BrokerListing> {
        filter(&self.brokers, query).into_iter().cloned().collect()
    }

    pub fn provider(&self, id: &str) -> Option<&ProviderListing> {
        self.providers.iter().find(|listing| listing.id == id)
    }

    pub fn broker(&self, id: &str) -> Option<&BrokerListing> {
        self.brokers.iter().find(|listing| listing.id == id)
    }
}

fn seed_providers() -> Vec<ProviderListing> {
    vec![
        ProviderListing {
            id: "prov-001".to_string(),
            name: "Dr. Maya Singh".to_string(),
            practice_name: "Lakeside Direct Care".to_string(),
            specialty: "Family Medicine".to_string(),
            location: "Des Moines, IA".to_string(),
            accepting_patients: true,
            tiers: vec![
                MembershipTier::Basic,
                MembershipTier::Standard,
                MembershipTier::Premium,
            ],
        },
        ProviderListing {
            id: "prov-002".to_string(),
            name: "Dr. Elena Park".to_string(),
            practice_name: "Park Pediatrics DPC".to_string(),
            specialty: "Pediatrics".to_string(),
            location: "Cedar Rapids, IA".to_string(),
            accepting_patients: true,
            tiers: vec![MembershipTier::Standard, MembershipTier::Premium],
        },
        ProviderListing {
            id: "prov-003".to_string(),
            name: "Dr. Omar Haddad".to_string(),
            practice_name: "Haddad Internal Medicine".to_string(),
            specialty: "Internal Medicine".to_string(),
            location: "Omaha, NE".to_string(),
            accepting_patients: false,
            tiers: vec![MembershipTier::Standard],
        },
        ProviderListing {
            id: "prov-004".to_string(),
            name: "Dr. Priya Raman".to_string(),
            practice_name: "Raman Family Health".to_string(),
            specialty: "Family Medicine".to_string(),
            location: "Iowa City, IA".to_string(),
            accepting_patients: true,
            tiers: vec![MembershipTier::Basic, MembershipTier::Standard],
        },
    ]
}

fn seed_brokers() -> Vec<BrokerListing> {
    vec![
        BrokerListing {
            id: "brok-001".to_string(),
            name: "Alex Morrow".to_string(),
            company: "Heartland Benefits Group".to_string(),
            location: "Des Moines, IA".to_string(),
            licensed_states: vec!["IA".to_string(), "NE".to_string()],
        },
        BrokerListing {
            id: "brok-002".to_string(),
            name: "Jamie Castellanos".to_string(),
            company: "Prairie Benefit Advisors".to_string(),
            location: "Lincoln, NE".to_string(),
            licensed_states: vec!["NE".to_string(), "KS".to_string()],
        },
        BrokerListing {
            id: "brok-003".to_string(),
            name: "Morgan Leigh".to_string(),
            company: "Leigh & Associates".to_string(),
            location: "Kansas City, MO".to_string(),
            licensed_states: vec!["MO".to_string(), "KS".to_string(), "IA".to_string()],
        },
    ]
}
