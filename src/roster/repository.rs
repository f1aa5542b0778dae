use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::domain::{EmployeeRecord, RosterError};

/// Storage abstraction over employer rosters.
pub trait RosterStore: Send + Sync {
    fn list(&self, employer_id: &str) -> Result<Vec<EmployeeRecord>, RosterError>;
    fn get(
        &self,
        employer_id: &str,
        employee_id: &str,
    ) -> Result<Option<EmployeeRecord>, RosterError>;
    fn create(
        &self,
        employer_id: &str,
        record: EmployeeRecord,
    ) -> Result<EmployeeRecord, RosterError>;
    fn update(&self, employer_id: &str, record: EmployeeRecord) -> Result<(), RosterError>;
}

/// Mutex-guarded roster map keyed by employer. An employer with no entry
/// simply has an empty roster.
#[derive(Default, Clone)]
pub struct InMemoryRoster {
    employees: Arc<Mutex<HashMap<String, Vec<EmployeeRecord>>>>,
}

impl InMemoryRoster {
    pub fn with_employees(employer_id: &str, records: Vec<EmployeeRecord>) -> Self {
        let store = Self::default();
        {
            let mut guard = store.employees.lock().expect("roster mutex poisoned");
            guard.insert(employer_id.to_string(), records);
        }
        store
    }
}

impl RosterStore for InMemoryRoster {
    fn list(&self, employer_id: &str) -> Result<Vec<EmployeeRecord>, RosterError> {
        let guard = self.employees.lock().expect("roster mutex poisoned");
        Ok(guard.get(employer_id).cloned().unwrap_or_default())
    }

    fn get(
        &self,
        employer_id: &str,
        employee_id: &str,
    ) -> Result<Option<EmployeeRecord>, RosterError> {
        let guard = self.employees.lock().expect("roster mutex poisoned");
        Ok(guard.get(employer_id).and_then(|roster| {
            roster
                .iter()
                .find(|record| record.employee_id == employee_id)
                .cloned()
        }))
    }

    fn create(
        &self,
        employer_id: &str,
        record: EmployeeRecord,
    ) -> Result<EmployeeRecord, RosterError> {
        let mut guard = self.employees.lock().expect("roster mutex poisoned");
        let roster = guard.entry(employer_id.to_string()).or_default();
        if roster
            .iter()
            .any(|existing| existing.employee_id == record.employee_id)
        {
            return Err(RosterError::Duplicate(record.employee_id));
        }
        roster.push(record.clone());
        Ok(record)
    }

    fn update(&self, employer_id: &str, record: EmployeeRecord) -> Result<(), RosterError> {
        let mut guard = self.employees.lock().expect("roster mutex poisoned");
        let roster = guard
            .get_mut(employer_id)
            .ok_or_else(|| RosterError::UnknownEmployee(record.employee_id.clone()))?;
        let existing = roster
            .iter_mut()
            .find(|existing| existing.employee_id == record.employee_id)
            .ok_or_else(|| RosterError::UnknownEmployee(record.employee_id.clone()))?;
        *existing = record;
        Ok(())
    }
}
