// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ApprovalAction, ApprovalRecord, LedgerRole, MaterialItem};
use rust_decimal::Decimal;
use time::OffsetDateTime;
use time::macros::datetime;

pub const fn test_time() -> OffsetDateTime {
    datetime!(2025-03-01 09:00 UTC)
}

pub fn record(role: LedgerRole, user_id: &str, action: ApprovalAction) -> ApprovalRecord {
    ApprovalRecord {
        role,
        user_id: user_id.to_string(),
        user_name: format!("User {user_id}"),
        action,
        timestamp: test_time(),
        comments: None,
    }
}

pub fn material(description: &str, quantity: i64, estimated_cost: i64) -> MaterialItem {
    MaterialItem {
        description: description.to_string(),
        quantity: Decimal::from(quantity),
        unit: String::from("pcs"),
        estimated_cost: Decimal::from(estimated_cost),
        supplier: None,
    }
}
