use std::io::Cursor;

use dpc_portal::roster::{
    parse_roster, roster_template, InMemoryRoster, RosterImportError, RosterStore,
};
use dpc_portal::workflows::enrollment::{EmployeeCategory, FamilyTier, MembershipTier};

#[test]
fn the_downloadable_template_imports_cleanly() {
    let template = roster_template();
    let records = parse_roster(Cursor::new(template)).expect("template parses");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].employee_id, "e-1001");
    assert_eq!(records[0].category, EmployeeCategory::FullTime);
    assert_eq!(records[0].family_tier, FamilyTier::EmployeeOnly);
    assert_eq!(records[0].membership_tier, MembershipTier::Standard);
}

#[test]
fn a_filled_in_template_loads_into_the_roster_store() {
    let csv = "Employee ID,Name,Category,Family Tier,Membership Tier,Dependents\n\
               e-1,Jordan Avery,full_time,employee_only,standard,0\n\
               e-2,Riley Chen,Part-Time,Employee + Spouse,premium,1\n\
               e-3,Sam Ortiz,contract,family,basic,3\n";
    let records = parse_roster(Cursor::new(csv)).expect("roster parses");
    assert_eq!(records.len(), 3);
    assert_eq!(records[1].category, EmployeeCategory::PartTime);
    assert_eq!(records[1].family_tier, FamilyTier::EmployeeSpouse);

    let store = InMemoryRoster::default();
    for record in records {
        store.create("emp-100", record).expect("record loads");
    }
    assert_eq!(store.list("emp-100").expect("list").len(), 3);
}

#[test]
fn malformed_rows_report_their_position() {
    let csv = "Employee ID,Name,Category,Family Tier,Membership Tier,Dependents\n\
               e-1,Jordan Avery,full_time,employee_only,standard,0\n\
               e-2,Riley Chen,full_time,employee_only,platinum,0\n";
    match parse_roster(Cursor::new(csv)) {
        Err(RosterImportError::UnknownMembershipTier { row, value }) => {
            assert_eq!(row, 2);
            assert_eq!(value, "platinum");
        }
        other => panic!("expected unknown membership tier, got {other:?}"),
    }

    let csv = "Employee ID,Name,Category,Family Tier,Membership Tier,Dependents\n\
               ,Jordan Avery,full_time,employee_only,standard,0\n";
    match parse_roster(Cursor::new(csv)) {
        Err(RosterImportError::MissingEmployeeId { row }) => assert_eq!(row, 1),
        other => panic!("expected missing employee id, got {other:?}"),
    }
}
