//! Employer roster management: repository contract, CSV import, and the
//! downloadable template.

pub mod domain;
pub mod import;
pub mod repository;
pub mod router;

pub use domain::{EmployeeRecord, RosterError};
pub use import::{from_path, parse_roster, roster_template, RosterImportError};
pub use repository::{InMemoryRoster, RosterStore};
pub use router::roster_router;
