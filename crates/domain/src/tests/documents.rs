// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::test_time;
use crate::{
    ApprovalLedger, Document, DocumentKind, PurchaseOrder, PurchaseOrderItem, PurchaseOrderStatus,
    SupplierInfo, UNKNOWN_SUPPLIER,
};
use rust_decimal::Decimal;

fn item(description: &str, supplier: Option<&str>) -> PurchaseOrderItem {
    PurchaseOrderItem {
        description: description.to_string(),
        quantity: Decimal::ONE,
        unit: String::from("pcs"),
        unit_price: Decimal::from(10),
        supplier_name: supplier.map(str::to_string),
        supplier_contact: None,
        delivery_date: None,
    }
}

fn purchase_order(items: Vec<PurchaseOrderItem>, supplier: Option<&str>) -> PurchaseOrder {
    PurchaseOrder {
        id: String::from("po-1"),
        number: String::from("PO-2025-0001"),
        job_order_id: String::from("jo-1"),
        job_order_number: String::from("JO-2025-0001"),
        items,
        supplier: SupplierInfo {
            name: supplier.map(str::to_string),
            address: None,
            contact: None,
        },
        subtotal: Decimal::from(10),
        tax_amount: Decimal::ZERO,
        total_amount: Decimal::from(10),
        status: PurchaseOrderStatus::Received,
        received_at: Some(test_time()),
        approvals: ApprovalLedger::new(),
        created_at: test_time(),
        updated_at: test_time(),
    }
}

#[test]
fn test_supplier_prefers_item_then_order_then_unknown() {
    let po = purchase_order(
        vec![item("Toner", Some("Acme")), item("Paper", None), item("Ink", Some("  "))],
        Some("Globex"),
    );
    assert_eq!(po.supplier_for(po.item_by_description("toner")), "Acme");
    assert_eq!(po.supplier_for(po.item_by_description("Paper")), "Globex");
    assert_eq!(po.supplier_for(po.item_by_description("Ink")), "Globex");

    let bare = purchase_order(vec![item("Toner", None)], None);
    assert_eq!(bare.supplier_for(bare.item_by_description("Toner")), UNKNOWN_SUPPLIER);
    assert_eq!(bare.supplier_for(None), UNKNOWN_SUPPLIER);
}

#[test]
fn test_document_trait_exposes_parent() {
    let po = purchase_order(vec![item("Toner", None)], None);
    assert_eq!(PurchaseOrder::KIND, DocumentKind::PurchaseOrder);
    assert_eq!(po.parent_id(), Some("jo-1"));
    assert_eq!(po.number(), "PO-2025-0001");
}

#[test]
fn test_purchase_order_json_shape() {
    let po = purchase_order(vec![item("Toner", None)], Some("Acme"));
    let json: serde_json::Value = serde_json::to_value(&po).unwrap();
    assert_eq!(json["status"], "RECEIVED");
    assert_eq!(json["supplier"]["name"], "Acme");
    assert_eq!(json["total_amount"], "10");

    let back: PurchaseOrder = serde_json::from_value(json).unwrap();
    assert_eq!(back, po);
}
