use super::domain::{BrokerListing, ProviderListing};

/// Fields a directory entry exposes to free-text search.
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;
}

impl Searchable for ProviderListing {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            &self.name,
            &self.practice_name,
            &self.specialty,
            &self.location,
        ]
    }
}

impl Searchable for BrokerListing {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.company, &self.location]
    }
}

/// Case-insensitive substring match OR-ed across an entry's search fields.
/// An empty or whitespace-only query returns the full list unchanged.
pub fn filter<'a, T: Searchable>(entries: &'a [T], query: &str) -> Vec<&'a T> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return entries.iter().collect();
    }

    entries
        .iter()
        .filter(|entry| {
            entry
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::enrollment::MembershipTier;

    fn providers() -> Vec<ProviderListing> {
        vec![
            ProviderListing {
                id: "prov-001".to_string(),
                name: "Dr. Maya Singh".to_string(),
                practice_name: "Lakeside Direct Care".to_string(),
                specialty: "Family Medicine".to_string(),
                location: "Des Moines, IA".to_string(),
                accepting_patients: true,
                tiers: vec![MembershipTier::Basic, MembershipTier::Standard],
            },
            ProviderListing {
                id: "prov-002".to_string(),
                name: "Dr. Elena Park".to_string(),
                practice_name: "Park Pediatrics DPC".to_string(),
                specialty: "Pediatrics".to_string(),
                location: "Cedar Rapids, IA".to_string(),
                accepting_patients: true,
                tiers: vec![MembershipTier::Premium],
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
        ]
    }

    #[test]
    fn empty_query_returns_the_full_list() {
        let list = providers();
        assert_eq!(filter(&list, "").len(), list.len());
        assert_eq!(filter(&list, "   ").len(), list.len());
    }

    #[test]
    fn matches_are_case_insensitive_substrings() {
        let list = providers();
        let matched = filter(&list, "pedia");
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, "prov-002");

        let matched = filter(&list, "LAKESIDE");
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, "prov-001");
    }

    #[test]
    fn query_matches_any_designated_field() {
        let list = providers();
        // Location-only hit.
        let matched = filter(&list, "omaha");
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, "prov-003");

        // Specialty hit across two entries.
        let matched = filter(&list, "medicine");
        assert_eq!(matched.len(), 2);
    }

    #[test]
    fn returns_exactly_the_matching_subset() {
        let list = providers();
        let matched = filter(&list, "ia");
        let expected: Vec<&ProviderListing> = list
            .iter()
            .filter(|entry| {
                entry
                    .search_fields()
                    .iter()
                    .any(|field| field.to_lowercase().contains("ia"))
            })
            .collect();
        assert_eq!(matched, expected);
    }

    #[test]
    fn no_match_yields_an_empty_list() {
        let list = providers();
        assert!(filter(&list, "dermatology").is_empty());
    }
}
