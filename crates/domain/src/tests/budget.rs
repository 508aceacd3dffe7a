// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::material;
use crate::{
    DomainError, PurchaseOrderItem, budget_estimate, canvass_total, purchase_order_subtotal,
    purchase_order_total, validate_amount, validate_materials, validate_purchase_order_items,
};
use rust_decimal::Decimal;

fn po_item(quantity: i64, unit_price: i64) -> PurchaseOrderItem {
    PurchaseOrderItem {
        description: String::from("Cable"),
        quantity: Decimal::from(quantity),
        unit: String::from("m"),
        unit_price: Decimal::from(unit_price),
        supplier_name: None,
        supplier_contact: None,
        delivery_date: None,
    }
}

#[test]
fn test_budget_estimate_multiplies_quantity() {
    let materials = vec![material("Toner", 2, 100)];
    assert_eq!(budget_estimate(&materials, None).unwrap(), Decimal::from(200));
}

#[test]
fn test_budget_estimate_adds_outsource_price() {
    let materials = vec![material("Toner", 2, 100), material("Paper", 3, 10)];
    assert_eq!(
        budget_estimate(&materials, Some(Decimal::from(500))).unwrap(),
        Decimal::from(730)
    );
    assert_eq!(
        budget_estimate(&[], Some(Decimal::from(50))).unwrap(),
        Decimal::from(50)
    );
}

#[test]
fn test_canvass_total_does_not_multiply_quantity() {
    let materials = vec![material("Toner", 2, 100), material("Paper", 3, 10)];
    assert_eq!(canvass_total(&materials).unwrap(), Decimal::from(110));
    assert_ne!(
        canvass_total(&materials).unwrap(),
        budget_estimate(&materials, None).unwrap()
    );
}

#[test]
fn test_purchase_order_totals() {
    let items = vec![po_item(2, 100)];
    let subtotal: Decimal = purchase_order_subtotal(&items).unwrap();
    assert_eq!(subtotal, Decimal::from(200));
    assert_eq!(
        purchase_order_total(subtotal, Decimal::from(20)).unwrap(),
        Decimal::from(220)
    );
}

#[test]
fn test_negative_amounts_rejected() {
    assert!(validate_amount("tax_amount", Decimal::ZERO).is_ok());
    assert!(matches!(
        validate_amount("tax_amount", Decimal::from(-1)),
        Err(DomainError::InvalidAmount { field: "tax_amount", .. })
    ));
    assert!(validate_materials(&[material("Toner", -2, 100)]).is_err());
    assert!(validate_materials(&[material(" ", 2, 100)]).is_err());
}

#[test]
fn test_purchase_order_needs_items() {
    assert!(matches!(
        validate_purchase_order_items(&[]),
        Err(DomainError::EmptyField("items"))
    ));
    assert!(validate_purchase_order_items(&[po_item(1, -5)]).is_err());
    assert!(validate_purchase_order_items(&[po_item(1, 5)]).is_ok());
}

#[test]
fn test_totals_report_overflow_instead_of_panicking() {
    let mut huge = material("Server rack", 2, 0);
    huge.estimated_cost = Decimal::MAX;
    assert!(matches!(
        budget_estimate(std::slice::from_ref(&huge), None),
        Err(DomainError::InvalidAmount { reason, .. }) if reason == "overflow"
    ));
    assert!(canvass_total(&[huge.clone(), huge]).is_err());

    let mut line = po_item(2, 0);
    line.unit_price = Decimal::MAX;
    assert!(matches!(
        purchase_order_subtotal(&[line]),
        Err(DomainError::InvalidAmount { field: "subtotal", .. })
    ));
    assert!(matches!(
        purchase_order_total(Decimal::MAX, Decimal::ONE),
        Err(DomainError::InvalidAmount { field: "total_amount", .. })
    ));
}
