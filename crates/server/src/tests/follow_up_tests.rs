// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::http::StatusCode;
use procura::FollowUp;

use crate::run_follow_ups;
use crate::tests::helpers::create_test_state;

fn advance(job_order_id: &str) -> FollowUp {
    FollowUp::AdvanceJobOrderOnReceipt {
        job_order_id: job_order_id.to_string(),
        purchase_order_number: String::from("PO-2025-0001"),
    }
}

#[tokio::test]
async fn test_no_follow_ups_succeeds() {
    let (app_state, sink) = create_test_state();
    assert!(run_follow_ups(&app_state, &[]).await.is_ok());
    assert!(sink.events().is_empty());
}

#[tokio::test]
async fn test_failed_final_follow_up_is_internal_error() {
    let (app_state, _sink) = create_test_state();

    let err = run_follow_ups(&app_state, &[advance("jo-missing")])
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(err.message.contains("jo-missing"));
}

#[tokio::test]
async fn test_only_final_follow_up_failure_is_reported() {
    let (app_state, _sink) = create_test_state();

    let err = run_follow_ups(&app_state, &[advance("jo-first"), advance("jo-second")])
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(err.message.contains("jo-second"));
    assert!(!err.message.contains("jo-first"));
}
