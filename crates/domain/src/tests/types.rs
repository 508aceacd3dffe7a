// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    ApprovalAction, Department, DocumentKind, LedgerRole, ReceivingReportStatus, Role,
    ServiceCategory, format_document_number, normalize_department,
};

#[test]
fn test_normalize_department_strips_suffix_and_case() {
    assert_eq!(normalize_department("IT"), "it");
    assert_eq!(normalize_department("IT Department"), "it");
    assert_eq!(normalize_department("  it department  "), "it");
    assert_eq!(normalize_department("General Services Department"), "general services");
}

#[test]
fn test_department_equivalence_after_canonicalization() {
    assert_eq!(Department::canonical("IT Department"), Department::It);
    assert_eq!(Department::canonical("it"), Department::It);
    assert_eq!(Department::canonical("FINANCE"), Department::Finance);
    assert_eq!(
        Department::canonical("Legal Department"),
        Department::canonical("legal")
    );
}

#[test]
fn test_department_parse_rejects_blank() {
    assert!(Department::parse("   ").is_err());
    assert!(Department::parse("Department").is_err());
    assert_eq!(Department::parse("Purchasing").unwrap(), Department::Purchasing);
}

#[test]
fn test_department_serializes_as_label() {
    let json: String = serde_json::to_string(&Department::GeneralServices).unwrap();
    assert_eq!(json, "\"General Services\"");

    let parsed: Department = serde_json::from_str("\"IT Department\"").unwrap();
    assert_eq!(parsed, Department::It);
}

#[test]
fn test_category_table() {
    assert_eq!(
        ServiceCategory::TechnicalSupport.handling_department(),
        Department::It
    );
    assert_eq!(
        ServiceCategory::FacilityMaintenance.handling_department(),
        Department::Maintenance
    );
    assert_eq!(
        ServiceCategory::AccountBillingInquiry.handling_department(),
        Department::Accounting
    );
    assert_eq!(
        ServiceCategory::GeneralInquiry.handling_department(),
        Department::GeneralServices
    );
    assert_eq!(
        ServiceCategory::Other.handling_department(),
        Department::Operations
    );
}

#[test]
fn test_president_authorized_for_every_category() {
    for category in [
        ServiceCategory::TechnicalSupport,
        ServiceCategory::FacilityMaintenance,
        ServiceCategory::AccountBillingInquiry,
        ServiceCategory::GeneralInquiry,
        ServiceCategory::Other,
    ] {
        assert!(Department::President.is_authorized_for(category));
    }
    assert!(!Department::Finance.is_authorized_for(ServiceCategory::TechnicalSupport));
}

#[test]
fn test_category_parses_form_labels() {
    assert_eq!(
        "Technical Support".parse::<ServiceCategory>().unwrap(),
        ServiceCategory::TechnicalSupport
    );
    assert_eq!(
        "account/billing inquiry".parse::<ServiceCategory>().unwrap(),
        ServiceCategory::AccountBillingInquiry
    );
    assert!("Plumbing".parse::<ServiceCategory>().is_err());
}

#[test]
fn test_role_parsing() {
    assert_eq!("super_admin".parse::<Role>().unwrap(), Role::SuperAdmin);
    assert_eq!("Super Admin".parse::<Role>().unwrap(), Role::SuperAdmin);
    assert_eq!("APPROVER".parse::<Role>().unwrap(), Role::Approver);
    assert!("OPERATOR".parse::<Role>().is_err());
    assert!(Role::Admin.is_admin());
    assert!(!Role::Management.is_admin());
}

#[test]
fn test_ledger_role_accepts_president_alias() {
    assert_eq!(
        "PRESIDENT".parse::<LedgerRole>().unwrap(),
        LedgerRole::Management
    );
    assert_eq!(
        "department head".parse::<LedgerRole>().unwrap(),
        LedgerRole::DepartmentHead
    );
}

#[test]
fn test_approval_action_parsing() {
    assert_eq!(
        "budget_approved".parse::<ApprovalAction>().unwrap(),
        ApprovalAction::BudgetApproved
    );
    assert!(ApprovalAction::Noted.is_budget_action());
    assert!(!ApprovalAction::Approved.is_budget_action());
}

#[test]
fn test_document_number_format() {
    assert_eq!(
        format_document_number(DocumentKind::ServiceRequest, 2025, 1),
        "SR-2025-0001"
    );
    assert_eq!(
        format_document_number(DocumentKind::ReceivingReport, 2026, 123),
        "RR-2026-0123"
    );
}

#[test]
fn test_receiving_report_moves_forward_only() {
    assert!(
        ReceivingReportStatus::Draft
            .validate_transition(ReceivingReportStatus::Submitted)
            .is_ok()
    );
    assert!(
        ReceivingReportStatus::Submitted
            .validate_transition(ReceivingReportStatus::Completed)
            .is_ok()
    );
    assert!(
        ReceivingReportStatus::Draft
            .validate_transition(ReceivingReportStatus::Completed)
            .is_err()
    );
    assert!(
        ReceivingReportStatus::Completed
            .validate_transition(ReceivingReportStatus::Draft)
            .is_err()
    );
}
