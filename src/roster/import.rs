use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::domain::EmployeeRecord;
use crate::workflows::enrollment::{EmployeeCategory, FamilyTier, MembershipTier};

/// Error enumeration for roster CSV imports. Row numbers count from the
/// line under the header.
#[derive(Debug, thiserror::Error)]
pub enum RosterImportError {
    #[error("failed to read roster csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: employee id is required")]
    MissingEmployeeId { row: usize },
    #[error("row {row}: unknown employment category '{value}'")]
    UnknownCategory { row: usize, value: String },
    #[error("row {row}: unknown family tier '{value}'")]
    UnknownFamilyTier { row: usize, value: String },
    #[error("row {row}: unknown membership tier '{value}'")]
    UnknownMembershipTier { row: usize, value: String },
}

/// Parse a roster export in the portal's template format.
pub fn parse_roster<R: Read>(reader: R) -> Result<Vec<EmployeeRecord>, RosterImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (index, row) in csv_reader.deserialize::<RosterRow>().enumerate() {
        let row = row?;
        records.push(row.into_record(index + 1)?);
    }

    Ok(records)
}

pub fn from_path(path: impl AsRef<Path>) -> Result<Vec<EmployeeRecord>, RosterImportError> {
    let file = File::open(path.as_ref()).map_err(csv::Error::from)?;
    parse_roster(file)
}

/// Render the downloadable roster template: the expected header plus one
/// illustrative row.
pub fn roster_template() -> String {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record([
            "Employee ID",
            "Name",
            "Category",
            "Family Tier",
            "Membership Tier",
            "Dependents",
        ])
        .expect("template header serializes");
    writer
        .write_record(["e-1001", "Jordan Avery", "full_time", "employee_only", "standard", "0"])
        .expect("template row serializes");

    let bytes = writer.into_inner().expect("template buffer flushes");
    String::from_utf8(bytes).expect("template is utf-8")
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(rename = "Employee ID")]
    employee_id: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Family Tier")]
    family_tier: String,
    #[serde(rename = "Membership Tier")]
    membership_tier: String,
    #[serde(rename = "Dependents", default, deserialize_with = "empty_as_none")]
    dependents: Option<u8>,
}

impl RosterRow {
    fn into_record(self, row: usize) -> Result<EmployeeRecord, RosterImportError> {
        if self.employee_id.is_empty() {
            return Err(RosterImportError::MissingEmployeeId { row });
        }

        let category = parse_category(&self.category).ok_or_else(|| {
            RosterImportError::UnknownCategory {
                row,
                value: self.category.clone(),
            }
        })?;
        let family_tier = parse_family_tier(&self.family_tier).ok_or_else(|| {
            RosterImportError::UnknownFamilyTier {
                row,
                value: self.family_tier.clone(),
            }
        })?;
        let membership_tier = parse_membership_tier(&self.membership_tier).ok_or_else(|| {
            RosterImportError::UnknownMembershipTier {
                row,
                value: self.membership_tier.clone(),
            }
        })?;

        Ok(EmployeeRecord {
            employee_id: self.employee_id,
            name: self.name,
            category,
            family_tier,
            membership_tier,
            dependents: self.dependents.unwrap_or(0),
        })
    }
}

fn normalize(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase()
}

fn parse_category(value: &str) -> Option<EmployeeCategory> {
    match normalize(value).as_str() {
        "fulltime" => Some(EmployeeCategory::FullTime),
        "parttime" => Some(EmployeeCategory::PartTime),
        "temporary" | "temp" => Some(EmployeeCategory::Temporary),
        "contract" | "contractor" => Some(EmployeeCategory::Contract),
        _ => None,
    }
}

fn parse_family_tier(value: &str) -> Option<FamilyTier> {
    match normalize(value).as_str() {
        "employeeonly" | "employee" | "single" => Some(FamilyTier::EmployeeOnly),
        "employeespouse" | "spouse" => Some(FamilyTier::EmployeeSpouse),
        "family" => Some(FamilyTier::Family),
        _ => None,
    }
}

fn parse_membership_tier(value: &str) -> Option<MembershipTier> {
    match normalize(value).as_str() {
        "basic" => Some(MembershipTier::Basic),
        "standard" => Some(MembershipTier::Standard),
        "premium" => Some(MembershipTier::Premium),
        _ => None,
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => raw
            .parse::<u8>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}
