// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod directory;
mod session;

#[cfg(test)]
mod tests;

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use clap::Parser;
use procura::{CanvassPolicy, FollowUp, WorkflowConfig, WorkflowContext};
use procura_api::{
    AcceptanceRequest, ApiError, ApiResult, ApprovalRequest, CanvassRequest,
    CreateJobOrderRequest, CreatePurchaseOrderRequest, CreateReceivingReportRequest,
    CreateServiceRequestRequest, EditServiceRequestRequest, ExecutionRequest,
    MaterialTransferRequest, NotificationSink, StatusChangeRequest, UpdateBudgetRequest,
    UpdateJobOrderRequest, WorkflowResponse,
};
use procura_domain::{Document, JobOrder, PurchaseOrder, ReceivingReport, ServiceRequest};
use procura_persistence::{Persistence, PersistenceError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::directory::{DirectoryNotificationSink, LogNotificationSink};
use crate::session::SessionActor;

/// Procura Server - HTTP server for the procurement approval workflow
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// How material requisitions reach the canvass step
    /// (strict, enter-on-creation, allow-from-draft)
    #[arg(long, default_value_t = CanvassPolicy::Strict)]
    canvass_policy: CanvassPolicy,

    /// JSON file mapping notification recipients to addresses
    #[arg(long)]
    directory: Option<String>,
}

/// Application state shared across handlers.
///
/// The persistence handle sits behind one async mutex. Handlers hold it
/// for a single document write and release it before running follow-ups.
#[derive(Clone)]
struct AppState {
    /// The document store.
    persistence: Arc<Mutex<Persistence>>,
    /// Workflow behaviour selected at startup.
    config: WorkflowConfig,
    /// Where notifications go.
    sink: Arc<dyn NotificationSink>,
}

impl AppState {
    /// A context stamped with the time the request is handled.
    fn context(&self) -> WorkflowContext {
        WorkflowContext::now_utc(self.config)
    }
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// Health response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HealthResponse {
    status: String,
    #[serde(with = "time::serde::rfc3339")]
    time: OffsetDateTime,
}

/// HTTP error wrapper that implements `IntoResponse`.
pub struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::DomainRuleViolation { .. } | ApiError::InvalidInput { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<PersistenceError> for HttpError {
    fn from(err: PersistenceError) -> Self {
        error!(error = %err, "Persistence error");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("Persistence error: {err}"),
        }
    }
}

type HttpResult<D> = Result<Json<WorkflowResponse<D>>, HttpError>;

/// Runs follow-ups one at a time, each under its own lock.
///
/// A failing step is logged and the next one still runs. A failure of the
/// last step is reported as an internal error; the primary write stands
/// either way.
async fn run_follow_ups(app_state: &AppState, follow_ups: &[FollowUp]) -> Result<(), HttpError> {
    let ctx: WorkflowContext = app_state.context();
    let mut last: Result<(), ApiError> = Ok(());

    for follow_up in follow_ups {
        let mut persistence = app_state.persistence.lock().await;
        last = procura_api::execute_follow_up(&mut persistence, &*app_state.sink, &ctx, follow_up)
            .map(|_| ());
        drop(persistence);

        if let Err(e) = &last {
            warn!(error = %e, ?follow_up, "Follow-up step failed");
        }
    }

    // The primary write has already committed.
    last.map_err(|e| {
        HttpError::from(ApiError::Internal {
            message: format!("Follow-up failed after the change was saved: {e}"),
        })
    })
}

/// Finishes a write: runs any follow-ups, then returns the primary response.
async fn respond<D>(app_state: &AppState, result: ApiResult<D>) -> HttpResult<D> {
    run_follow_ups(app_state, &result.follow_ups).await?;
    Ok(Json(result.response))
}

// ============================================================================
// Service requests
// ============================================================================

/// Handler for POST `/service-requests` endpoint.
async fn handle_create_service_request(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Json(req): Json<CreateServiceRequestRequest>,
) -> HttpResult<ServiceRequest> {
    info!(actor_id = %actor.id, category = %req.category, "Handling create_service_request request");

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<ServiceRequest> = procura_api::create_service_request(
        &mut persistence,
        &*app_state.sink,
        &app_state.context(),
        &actor,
        req,
    )?;
    drop(persistence);

    respond(&app_state, result).await
}

/// Handler for POST `/service-requests/{id}/submit` endpoint.
async fn handle_submit_service_request(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(id): Path<String>,
) -> HttpResult<ServiceRequest> {
    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<ServiceRequest> = procura_api::submit_service_request(
        &mut persistence,
        &*app_state.sink,
        &app_state.context(),
        &actor,
        &id,
    )?;
    drop(persistence);

    respond(&app_state, result).await
}

/// Handler for PATCH `/service-requests/{id}` endpoint.
async fn handle_edit_service_request(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(id): Path<String>,
    Json(req): Json<EditServiceRequestRequest>,
) -> HttpResult<ServiceRequest> {
    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<ServiceRequest> = procura_api::edit_service_request(
        &mut persistence,
        &*app_state.sink,
        &app_state.context(),
        &actor,
        &id,
        req,
    )?;
    drop(persistence);

    respond(&app_state, result).await
}

/// Handler for POST `/service-requests/{id}/approval` endpoint.
async fn handle_decide_service_request(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(id): Path<String>,
    Json(req): Json<ApprovalRequest>,
) -> HttpResult<ServiceRequest> {
    info!(actor_id = %actor.id, sr_id = %id, action = %req.action, "Handling service request approval");

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<ServiceRequest> = procura_api::decide_service_request(
        &mut persistence,
        &*app_state.sink,
        &app_state.context(),
        &actor,
        &id,
        req,
    )?;
    drop(persistence);

    respond(&app_state, result).await
}

// ============================================================================
// Job orders
// ============================================================================

/// Handler for POST `/job-orders` endpoint.
async fn handle_create_job_order(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Json(req): Json<CreateJobOrderRequest>,
) -> HttpResult<JobOrder> {
    info!(
        actor_id = %actor.id,
        sr_id = %req.service_request_id,
        job_type = %req.job_type,
        "Handling create_job_order request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<JobOrder> = procura_api::create_job_order(
        &mut persistence,
        &*app_state.sink,
        &app_state.context(),
        &actor,
        req,
    )?;
    drop(persistence);

    respond(&app_state, result).await
}

/// Handler for POST `/job-orders/{id}/approval` endpoint.
async fn handle_approve_job_order(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(id): Path<String>,
    Json(req): Json<ApprovalRequest>,
) -> HttpResult<JobOrder> {
    info!(actor_id = %actor.id, jo_id = %id, action = %req.action, "Handling job order approval");

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<JobOrder> = procura_api::approve_job_order(
        &mut persistence,
        &*app_state.sink,
        &app_state.context(),
        &actor,
        &id,
        req,
    )?;
    drop(persistence);

    respond(&app_state, result).await
}

/// Handler for PUT `/job-orders/{id}/budget` endpoint.
async fn handle_update_job_order_budget(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(id): Path<String>,
    Json(req): Json<UpdateBudgetRequest>,
) -> HttpResult<JobOrder> {
    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<JobOrder> = procura_api::update_job_order_budget(
        &mut persistence,
        &*app_state.sink,
        &app_state.context(),
        &actor,
        &id,
        req,
    )?;
    drop(persistence);

    respond(&app_state, result).await
}

/// Handler for POST `/job-orders/{id}/canvass` endpoint.
async fn handle_submit_canvass(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(id): Path<String>,
    Json(req): Json<CanvassRequest>,
) -> HttpResult<JobOrder> {
    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<JobOrder> = procura_api::submit_canvass(
        &mut persistence,
        &*app_state.sink,
        &app_state.context(),
        &actor,
        &id,
        req,
    )?;
    drop(persistence);

    respond(&app_state, result).await
}

/// Handler for PATCH `/job-orders/{id}` endpoint.
async fn handle_update_job_order_details(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(id): Path<String>,
    Json(req): Json<UpdateJobOrderRequest>,
) -> HttpResult<JobOrder> {
    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<JobOrder> = procura_api::update_job_order_details(
        &mut persistence,
        &*app_state.sink,
        &app_state.context(),
        &actor,
        &id,
        req,
    )?;
    drop(persistence);

    respond(&app_state, result).await
}

/// Handler for POST `/job-orders/{id}/execution` endpoint.
async fn handle_execute_job_order(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(id): Path<String>,
    Json(req): Json<ExecutionRequest>,
) -> HttpResult<JobOrder> {
    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<JobOrder> = procura_api::execute_job_order(
        &mut persistence,
        &*app_state.sink,
        &app_state.context(),
        &actor,
        &id,
        req,
    )?;
    drop(persistence);

    respond(&app_state, result).await
}

/// Handler for POST `/job-orders/{id}/acceptance` endpoint.
async fn handle_accept_job_order(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(id): Path<String>,
    Json(req): Json<AcceptanceRequest>,
) -> HttpResult<JobOrder> {
    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<JobOrder> = procura_api::accept_job_order(
        &mut persistence,
        &*app_state.sink,
        &app_state.context(),
        &actor,
        &id,
        req,
    )?;
    drop(persistence);

    respond(&app_state, result).await
}

/// Handler for PUT `/job-orders/{id}/status` endpoint.
async fn handle_change_job_order_status(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(id): Path<String>,
    Json(req): Json<StatusChangeRequest>,
) -> HttpResult<JobOrder> {
    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<JobOrder> = procura_api::change_job_order_status(
        &mut persistence,
        &*app_state.sink,
        &app_state.context(),
        &actor,
        &id,
        req,
    )?;
    drop(persistence);

    respond(&app_state, result).await
}

/// Handler for POST `/job-orders/{id}/transfer` endpoint.
async fn handle_transfer_materials(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(id): Path<String>,
    Json(req): Json<MaterialTransferRequest>,
) -> HttpResult<JobOrder> {
    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<JobOrder> = procura_api::transfer_materials(
        &mut persistence,
        &*app_state.sink,
        &app_state.context(),
        &actor,
        &id,
        req,
    )?;
    drop(persistence);

    respond(&app_state, result).await
}

// ============================================================================
// Purchase orders and receiving reports
// ============================================================================

/// Handler for POST `/purchase-orders` endpoint.
async fn handle_create_purchase_order(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Json(req): Json<CreatePurchaseOrderRequest>,
) -> HttpResult<PurchaseOrder> {
    info!(actor_id = %actor.id, jo_id = %req.job_order_id, "Handling create_purchase_order request");

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<PurchaseOrder> = procura_api::create_purchase_order(
        &mut persistence,
        &*app_state.sink,
        &app_state.context(),
        &actor,
        req,
    )?;
    drop(persistence);

    respond(&app_state, result).await
}

/// Handler for POST `/purchase-orders/{id}/approval` endpoint.
async fn handle_decide_purchase_order(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(id): Path<String>,
    Json(req): Json<ApprovalRequest>,
) -> HttpResult<PurchaseOrder> {
    info!(actor_id = %actor.id, po_id = %id, action = %req.action, "Handling purchase order approval");

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<PurchaseOrder> = procura_api::decide_purchase_order(
        &mut persistence,
        &*app_state.sink,
        &app_state.context(),
        &actor,
        &id,
        req,
    )?;
    drop(persistence);

    respond(&app_state, result).await
}

/// Handler for PUT `/purchase-orders/{id}/status` endpoint.
///
/// RECEIVED advances the job order as a follow-up, after the purchase
/// order itself is stored.
async fn handle_change_purchase_order_status(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(id): Path<String>,
    Json(req): Json<StatusChangeRequest>,
) -> HttpResult<PurchaseOrder> {
    info!(actor_id = %actor.id, po_id = %id, status = %req.status, "Handling purchase order status change");

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<PurchaseOrder> = procura_api::change_purchase_order_status(
        &mut persistence,
        &*app_state.sink,
        &app_state.context(),
        &actor,
        &id,
        req,
    )?;
    drop(persistence);

    respond(&app_state, result).await
}

/// Handler for POST `/receiving-reports` endpoint.
async fn handle_create_receiving_report(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Json(req): Json<CreateReceivingReportRequest>,
) -> HttpResult<ReceivingReport> {
    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<ReceivingReport> = procura_api::create_receiving_report(
        &mut persistence,
        &*app_state.sink,
        &app_state.context(),
        &actor,
        req,
    )?;
    drop(persistence);

    respond(&app_state, result).await
}

/// Handler for PUT `/receiving-reports/{id}/status` endpoint.
async fn handle_change_receiving_report_status(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(id): Path<String>,
    Json(req): Json<StatusChangeRequest>,
) -> HttpResult<ReceivingReport> {
    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<ReceivingReport> = procura_api::change_receiving_report_status(
        &mut persistence,
        &*app_state.sink,
        &app_state.context(),
        &actor,
        &id,
        req,
    )?;
    drop(persistence);

    respond(&app_state, result).await
}

// ============================================================================
// Reads
// ============================================================================

/// Handler for GET `/{kind}/{id}` endpoints.
async fn handle_get_document<D: Document + Send + 'static>(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
) -> Result<Json<D>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let document: D = procura_api::get_document(&mut persistence, &id)?;
    drop(persistence);

    Ok(Json(document))
}

/// Handler for GET `/{kind}` endpoints.
async fn handle_list_documents<D: Document + Send + 'static>(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<D>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let documents: Vec<D> = procura_api::list_documents(&mut persistence)?;
    drop(persistence);

    Ok(Json(documents))
}

/// Handler for GET `/health` endpoint.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
        time: OffsetDateTime::now_utc(),
    })
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route(
            "/service-requests",
            post(handle_create_service_request).get(handle_list_documents::<ServiceRequest>),
        )
        .route(
            "/service-requests/{id}",
            get(handle_get_document::<ServiceRequest>).patch(handle_edit_service_request),
        )
        .route(
            "/service-requests/{id}/submit",
            post(handle_submit_service_request),
        )
        .route(
            "/service-requests/{id}/approval",
            post(handle_decide_service_request),
        )
        .route(
            "/job-orders",
            post(handle_create_job_order).get(handle_list_documents::<JobOrder>),
        )
        .route(
            "/job-orders/{id}",
            get(handle_get_document::<JobOrder>).patch(handle_update_job_order_details),
        )
        .route("/job-orders/{id}/approval", post(handle_approve_job_order))
        .route("/job-orders/{id}/budget", put(handle_update_job_order_budget))
        .route("/job-orders/{id}/canvass", post(handle_submit_canvass))
        .route("/job-orders/{id}/execution", post(handle_execute_job_order))
        .route("/job-orders/{id}/acceptance", post(handle_accept_job_order))
        .route("/job-orders/{id}/status", put(handle_change_job_order_status))
        .route("/job-orders/{id}/transfer", post(handle_transfer_materials))
        .route(
            "/purchase-orders",
            post(handle_create_purchase_order).get(handle_list_documents::<PurchaseOrder>),
        )
        .route(
            "/purchase-orders/{id}",
            get(handle_get_document::<PurchaseOrder>),
        )
        .route(
            "/purchase-orders/{id}/approval",
            post(handle_decide_purchase_order),
        )
        .route(
            "/purchase-orders/{id}/status",
            put(handle_change_purchase_order_status),
        )
        .route(
            "/receiving-reports",
            post(handle_create_receiving_report).get(handle_list_documents::<ReceivingReport>),
        )
        .route(
            "/receiving-reports/{id}",
            get(handle_get_document::<ReceivingReport>),
        )
        .route(
            "/receiving-reports/{id}/status",
            put(handle_change_receiving_report_status),
        )
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Procura Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let sink: Arc<dyn NotificationSink> = if let Some(path) = &args.directory {
        info!("Loading recipient directory from: {}", path);
        Arc::new(DirectoryNotificationSink::from_file(path)?)
    } else {
        info!("No recipient directory configured; notifications are logged only");
        Arc::new(LogNotificationSink)
    };

    info!(canvass_policy = %args.canvass_policy, "Workflow configuration");
    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        config: WorkflowConfig {
            canvass_policy: args.canvass_policy,
        },
        sink,
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
