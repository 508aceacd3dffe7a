// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use procura::WorkflowConfig;
use procura_api::RecordingNotificationSink;
use procura_persistence::Persistence;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower::ServiceExt;

use crate::session::{
    ACTOR_DEPARTMENT_HEADER, ACTOR_ID_HEADER, ACTOR_NAME_HEADER, ACTOR_ROLE_HEADER,
};
use crate::{AppState, build_router};

/// Caller identity sent as headers: (id, role, department).
pub type Caller = (&'static str, &'static str, &'static str);

pub const REQUESTER: Caller = ("req-1", "REQUESTER", "IT");
pub const IT_HEAD: Caller = ("head-1", "APPROVER", "IT Department");
pub const FINANCE: Caller = ("fin-1", "APPROVER", "Finance");
pub const PRESIDENT: Caller = ("pres-1", "MANAGEMENT", "Office of the President");
pub const BUYER: Caller = ("buyer-1", "APPROVER", "Purchasing");

/// Creates application state over an in-memory store, returning the sink too.
pub fn create_test_state() -> (AppState, Arc<RecordingNotificationSink>) {
    let persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    let sink: Arc<RecordingNotificationSink> = Arc::new(RecordingNotificationSink::new());
    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        config: WorkflowConfig::default(),
        sink: sink.clone(),
    };
    (app_state, sink)
}

/// Creates a router over an in-memory store, returning the sink too.
pub fn create_test_app() -> (Router, Arc<RecordingNotificationSink>) {
    let (app_state, sink) = create_test_state();
    (build_router(app_state), sink)
}

/// Sends one request and returns the status and JSON body.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    caller: Option<Caller>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some((id, role, department)) = caller {
        builder = builder
            .header(ACTOR_ID_HEADER, id)
            .header(ACTOR_NAME_HEADER, format!("User {id}"))
            .header(ACTOR_ROLE_HEADER, role)
            .header(ACTOR_DEPARTMENT_HEADER, department);
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status: StatusCode = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// The id of the document in a workflow response.
pub fn document_id(body: &Value) -> String {
    body["document"]["id"].as_str().unwrap().to_string()
}
