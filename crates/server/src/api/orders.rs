//! Order board API handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use kitchen_core::{
    available_actions, format_clock, format_elapsed, format_order_number, status_display,
    BoardCounts, BoardSnapshot, DisplayError, OrderError, OrderStatus, OrderTicket, StatusAction,
    StatusCategory,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing orders
#[derive(Debug, Deserialize)]
pub struct ListOrdersParams {
    /// Restrict to one view (pending, preparing, completed)
    pub status: Option<String>,
}

/// Request body for selecting an order
#[derive(Debug, Deserialize)]
pub struct SelectOrderBody {
    pub order_id: String,
}

/// One order as rendered on the board
#[derive(Debug, Clone, Serialize)]
pub struct OrderView {
    pub id: String,
    pub order_number: u32,
    /// e.g. "#101"
    pub order_label: String,
    pub meal: String,
    pub steps: Vec<String>,
    pub status: OrderStatus,
    pub status_label: &'static str,
    pub category: StatusCategory,
    pub timestamp: String,
    /// Creation time of day, "HH:MM"
    pub clock: String,
    /// Age, e.g. "7m"
    pub elapsed: String,
    /// Controls offered for this order (none once completed)
    pub actions: Vec<StatusAction>,
}

impl OrderView {
    pub fn from_ticket(ticket: &OrderTicket, now: DateTime<Utc>) -> Self {
        let display = status_display(ticket.status);
        Self {
            id: ticket.id.clone(),
            order_number: ticket.order_number,
            order_label: format_order_number(ticket.order_number),
            meal: ticket.recipe.meal.clone(),
            steps: ticket.recipe.steps.clone(),
            status: ticket.status,
            status_label: display.label,
            category: display.category,
            timestamp: ticket.timestamp.to_rfc3339(),
            clock: format_clock(ticket.timestamp),
            elapsed: format_elapsed(ticket.timestamp, now),
            actions: available_actions(ticket.status).to_vec(),
        }
    }
}

/// Response for the full board
#[derive(Debug, Serialize)]
pub struct BoardResponse {
    pub pending: Vec<OrderView>,
    pub preparing: Vec<OrderView>,
    pub completed: Vec<OrderView>,
    pub counts: BoardCounts,
}

impl BoardResponse {
    fn from_snapshot(snapshot: &BoardSnapshot, now: DateTime<Utc>) -> Self {
        let views = |status| render(snapshot.board.group(status), now);
        Self {
            pending: views(OrderStatus::Pending),
            preparing: views(OrderStatus::Preparing),
            completed: views(OrderStatus::Completed),
            counts: snapshot.board.counts(),
        }
    }
}

/// Response for a single view
#[derive(Debug, Serialize)]
pub struct OrderListResponse {
    pub orders: Vec<OrderView>,
}

/// Response for a staff action
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub order: OrderView,
    pub from: OrderStatus,
    pub to: OrderStatus,
}

/// Response for the current selection
#[derive(Debug, Serialize)]
pub struct SelectionResponse {
    pub selected: Option<OrderView>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct OrderErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<OrderErrorResponse>);

fn api_error(status: StatusCode, error: impl Into<String>) -> ApiError {
    (
        status,
        Json(OrderErrorResponse {
            error: error.into(),
        }),
    )
}

impl From<DisplayError> for OrderErrorResponse {
    fn from(e: DisplayError) -> Self {
        Self {
            error: e.to_string(),
        }
    }
}

fn display_error(e: DisplayError) -> ApiError {
    let status = match e {
        DisplayError::Order(OrderError::NotFound(_)) => StatusCode::NOT_FOUND,
        DisplayError::Closed => StatusCode::SERVICE_UNAVAILABLE,
    };
    (status, Json(OrderErrorResponse::from(e)))
}

fn render(tickets: &[OrderTicket], now: DateTime<Utc>) -> Vec<OrderView> {
    tickets
        .iter()
        .map(|t| OrderView::from_ticket(t, now))
        .collect()
}

// ============================================================================
// Handlers
// ============================================================================

/// List orders: the whole board, or one view with `?status=`
pub async fn list_orders(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListOrdersParams>,
) -> Result<Response, ApiError> {
    let snapshot = state.display().snapshot().await.map_err(display_error)?;
    let now = Utc::now();

    match params.status.as_deref() {
        None => Ok(Json(BoardResponse::from_snapshot(&snapshot, now)).into_response()),
        Some(raw) => {
            let status = OrderStatus::parse(raw).ok_or_else(|| {
                api_error(
                    StatusCode::BAD_REQUEST,
                    format!("Unknown order status: {}", raw),
                )
            })?;
            let orders = render(snapshot.board.group(status), now);
            Ok(Json(OrderListResponse { orders }).into_response())
        }
    }
}

/// Get an order by ID
pub async fn get_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<OrderView>, ApiError> {
    let snapshot = state.display().snapshot().await.map_err(display_error)?;
    snapshot
        .board
        .find(&id)
        .map(|t| Json(OrderView::from_ticket(t, Utc::now())))
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("Order not found: {}", id)))
}

async fn apply_action(
    state: &AppState,
    id: String,
    action: StatusAction,
) -> Result<Json<ActionResponse>, ApiError> {
    let outcome = state
        .display()
        .apply(id, action)
        .await
        .map_err(display_error)?;

    Ok(Json(ActionResponse {
        order: OrderView::from_ticket(&outcome.ticket, Utc::now()),
        from: outcome.transition.from,
        to: outcome.transition.to,
    }))
}

/// Start cooking (pending -> preparing)
pub async fn start_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ActionResponse>, ApiError> {
    apply_action(&state, id, StatusAction::StartCooking).await
}

/// Pause (preparing -> pending)
pub async fn pause_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ActionResponse>, ApiError> {
    apply_action(&state, id, StatusAction::Pause).await
}

/// Toggle between pending and preparing
pub async fn toggle_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ActionResponse>, ApiError> {
    apply_action(&state, id, StatusAction::Toggle).await
}

/// Mark complete
pub async fn complete_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ActionResponse>, ApiError> {
    apply_action(&state, id, StatusAction::Complete).await
}

/// Get the selected order (detail view)
pub async fn get_selection(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SelectionResponse>, ApiError> {
    let snapshot = state.display().snapshot().await.map_err(display_error)?;
    Ok(Json(SelectionResponse {
        selected: snapshot
            .selected
            .as_ref()
            .map(|t| OrderView::from_ticket(t, Utc::now())),
    }))
}

/// Select an order
pub async fn set_selection(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SelectOrderBody>,
) -> Result<StatusCode, ApiError> {
    state
        .display()
        .select(body.order_id)
        .await
        .map_err(display_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Clear the selection
pub async fn clear_selection(
    State(state): State<Arc<AppState>>,
) -> Result<StatusCode, ApiError> {
    state
        .display()
        .clear_selection()
        .await
        .map_err(display_error)?;
    Ok(StatusCode::NO_CONTENT)
}
