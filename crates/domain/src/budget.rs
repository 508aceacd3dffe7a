// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cost calculations for job orders and purchase orders.
//!
//! The budget estimate and the canvass total are deliberately different
//! computations: the estimate multiplies each material's cost by its
//! quantity and adds the outsourcing price, while the canvass total sums
//! the canvassed per-item costs as entered.

use crate::documents::{MaterialItem, PurchaseOrderItem};
use crate::error::DomainError;
use rust_decimal::Decimal;

fn overflow(field: &'static str) -> DomainError {
    DomainError::InvalidAmount {
        field,
        reason: String::from("overflow"),
    }
}

fn checked_sum<I>(field: &'static str, amounts: I) -> Result<Decimal, DomainError>
where
    I: IntoIterator<Item = Option<Decimal>>,
{
    amounts.into_iter().try_fold(Decimal::ZERO, |acc, amount| {
        amount
            .and_then(|amount| acc.checked_add(amount))
            .ok_or_else(|| overflow(field))
    })
}

/// `Σ(estimated_cost × quantity) + outsource_price`.
///
/// # Errors
///
/// Returns `DomainError::InvalidAmount` if the total overflows.
pub fn budget_estimate(
    materials: &[MaterialItem],
    outsource_price: Option<Decimal>,
) -> Result<Decimal, DomainError> {
    let materials_total: Decimal = checked_sum(
        "budget.estimated_total_cost",
        materials
            .iter()
            .map(|m| m.estimated_cost.checked_mul(m.quantity)),
    )?;
    materials_total
        .checked_add(outsource_price.unwrap_or(Decimal::ZERO))
        .ok_or_else(|| overflow("budget.estimated_total_cost"))
}

/// `Σ estimated_cost`, as priced by Purchasing during canvass.
///
/// # Errors
///
/// Returns `DomainError::InvalidAmount` if the total overflows.
pub fn canvass_total(materials: &[MaterialItem]) -> Result<Decimal, DomainError> {
    checked_sum(
        "budget.estimated_total_cost",
        materials.iter().map(|m| Some(m.estimated_cost)),
    )
}

/// `Σ(quantity × unit_price)` over purchase order lines.
///
/// # Errors
///
/// Returns `DomainError::InvalidAmount` if the subtotal overflows.
pub fn purchase_order_subtotal(items: &[PurchaseOrderItem]) -> Result<Decimal, DomainError> {
    checked_sum(
        "subtotal",
        items.iter().map(|i| i.quantity.checked_mul(i.unit_price)),
    )
}

/// `subtotal + tax_amount`.
///
/// # Errors
///
/// Returns `DomainError::InvalidAmount` if the total overflows.
pub fn purchase_order_total(subtotal: Decimal, tax_amount: Decimal) -> Result<Decimal, DomainError> {
    subtotal
        .checked_add(tax_amount)
        .ok_or_else(|| overflow("total_amount"))
}

/// Validates that an amount is not negative.
///
/// # Errors
///
/// Returns `DomainError::InvalidAmount` if `value` is negative.
pub fn validate_amount(field: &'static str, value: Decimal) -> Result<(), DomainError> {
    if value < Decimal::ZERO {
        return Err(DomainError::InvalidAmount {
            field,
            reason: format!("{value} is negative"),
        });
    }
    Ok(())
}

/// Validates every quantity and cost on a material list.
///
/// # Errors
///
/// Returns the first validation failure found.
pub fn validate_materials(materials: &[MaterialItem]) -> Result<(), DomainError> {
    for item in materials {
        if item.description.trim().is_empty() {
            return Err(DomainError::EmptyField("materials.description"));
        }
        validate_amount("materials.quantity", item.quantity)?;
        validate_amount("materials.estimated_cost", item.estimated_cost)?;
    }
    Ok(())
}

/// Validates every quantity and price on a purchase order.
///
/// # Errors
///
/// Returns the first validation failure found.
pub fn validate_purchase_order_items(items: &[PurchaseOrderItem]) -> Result<(), DomainError> {
    if items.is_empty() {
        return Err(DomainError::EmptyField("items"));
    }
    for item in items {
        if item.description.trim().is_empty() {
            return Err(DomainError::EmptyField("items.description"));
        }
        validate_amount("items.quantity", item.quantity)?;
        validate_amount("items.unit_price", item.unit_price)?;
    }
    Ok(())
}
