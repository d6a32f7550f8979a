//! Ticket API handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use atelier_core::{ClientStatus, InternalStatus, TicketId, WorkflowEngine};

use crate::error::AppError;
use crate::models::{CreateTicketInput, StatusChange, Ticket, TicketFilter};
use crate::services::{TicketServiceError, TransitionRequest};
use crate::state::AppState;

const MAX_LIST_LIMIT: i64 = 500;

/// Build the ticket router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/tickets", get(list_tickets).post(create_ticket))
        .route("/api/tickets/{id}", get(show_ticket))
        .route("/api/tickets/{id}/history", get(ticket_history))
        .route("/api/tickets/{id}/status", post(transition_ticket))
}

/// A ticket with its client-facing status and the moves open to it.
#[derive(Debug, Serialize)]
pub struct TicketResponse {
    #[serde(flatten)]
    pub ticket: Ticket,
    pub client_status: ClientStatus,
    pub next_statuses: Vec<InternalStatus>,
}

impl TicketResponse {
    fn new(engine: &WorkflowEngine, ticket: Ticket) -> Self {
        Self {
            client_status: engine.client_status(ticket.status),
            next_statuses: engine.next_statuses(ticket.status),
            ticket,
        }
    }
}

/// Query parameters for the ticket list.
#[derive(Debug, Default, Deserialize)]
pub struct ListTicketsQuery {
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Request body for creating a ticket.
#[derive(Debug, Deserialize)]
pub struct CreateTicketRequest {
    #[serde(flatten)]
    pub input: CreateTicketInput,
    pub created_by: Option<String>,
}

/// Request body for a status change.
#[derive(Debug, Deserialize)]
pub struct TransitionBody {
    pub status: String,
    pub expected_status: Option<String>,
    pub changed_by: Option<String>,
    pub note: Option<String>,
}

fn parse_status(slug: &str) -> Result<InternalStatus, TicketServiceError> {
    InternalStatus::from_slug(slug)
        .ok_or_else(|| TicketServiceError::UnknownStatus(slug.to_string()))
}

impl TryFrom<TransitionBody> for TransitionRequest {
    type Error = TicketServiceError;

    fn try_from(body: TransitionBody) -> Result<Self, Self::Error> {
        Ok(Self {
            status: parse_status(&body.status)?,
            expected_status: body.expected_status.as_deref().map(parse_status).transpose()?,
            changed_by: body.changed_by,
            note: body.note,
        })
    }
}

impl TryFrom<ListTicketsQuery> for TicketFilter {
    type Error = AppError;

    fn try_from(query: ListTicketsQuery) -> Result<Self, Self::Error> {
        let status = query.status.as_deref().map(parse_status).transpose()?;
        if query.limit.is_some_and(|l| !(1..=MAX_LIST_LIMIT).contains(&l)) {
            return Err(AppError::BadRequest(format!(
                "limit must be between 1 and {MAX_LIST_LIMIT}"
            )));
        }
        if query.offset.is_some_and(i64::is_negative) {
            return Err(AppError::BadRequest("offset must not be negative".to_string()));
        }
        Ok(Self {
            status,
            limit: query.limit,
            offset: query.offset,
        })
    }
}

/// List tickets, optionally filtered by status.
///
/// # Errors
///
/// Returns `BadRequest` for an unknown status or out-of-range paging.
pub async fn list_tickets(
    State(state): State<AppState>,
    Query(query): Query<ListTicketsQuery>,
) -> Result<Json<Vec<TicketResponse>>, AppError> {
    let filter = TicketFilter::try_from(query)?;
    let tickets = state.tickets().list_tickets(&filter).await?;
    let engine = state.engine();
    Ok(Json(
        tickets
            .into_iter()
            .map(|t| TicketResponse::new(engine, t))
            .collect(),
    ))
}

/// Create a ticket in `pending`.
///
/// # Errors
///
/// Returns `BadRequest` for blank required fields.
pub async fn create_ticket(
    State(state): State<AppState>,
    Json(body): Json<CreateTicketRequest>,
) -> Result<(StatusCode, Json<TicketResponse>), AppError> {
    let ticket = state
        .tickets()
        .create_ticket(&body.input, body.created_by.as_deref())
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(TicketResponse::new(state.engine(), ticket)),
    ))
}

/// Fetch a ticket.
///
/// # Errors
///
/// Returns `NotFound` for a missing ticket.
pub async fn show_ticket(
    State(state): State<AppState>,
    Path(id): Path<TicketId>,
) -> Result<Json<TicketResponse>, AppError> {
    let ticket = state.tickets().get_ticket(id).await?;
    Ok(Json(TicketResponse::new(state.engine(), ticket)))
}

/// Status audit log of a ticket.
///
/// # Errors
///
/// Returns `NotFound` for a missing ticket.
pub async fn ticket_history(
    State(state): State<AppState>,
    Path(id): Path<TicketId>,
) -> Result<Json<Vec<StatusChange>>, AppError> {
    Ok(Json(state.tickets().history(id).await?))
}

/// Move a ticket to a new status.
///
/// # Errors
///
/// - `400` for unknown status slugs
/// - `404` for a missing ticket
/// - `409` when `expected_status` is stale or another change won the race
/// - `422` when the workflow forbids the move
pub async fn transition_ticket(
    State(state): State<AppState>,
    Path(id): Path<TicketId>,
    Json(body): Json<TransitionBody>,
) -> Result<Json<TicketResponse>, AppError> {
    let request = TransitionRequest::try_from(body)?;
    let ticket = state.tickets().transition_status(id, request).await?;
    Ok(Json(TicketResponse::new(state.engine(), ticket)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_body_parses_slugs() {
        let body: TransitionBody = serde_json::from_str(
            r#"{"status": "polishing", "expected_status": "casting", "changed_by": "maya"}"#,
        )
        .unwrap();
        let request = TransitionRequest::try_from(body).unwrap();
        assert_eq!(request.status, InternalStatus::Polishing);
        assert_eq!(request.expected_status, Some(InternalStatus::Casting));
        assert_eq!(request.changed_by.as_deref(), Some("maya"));
        assert!(request.note.is_none());
    }

    #[test]
    fn test_transition_body_unknown_status() {
        let body: TransitionBody = serde_json::from_str(r#"{"status": "melted"}"#).unwrap();
        let err = TransitionRequest::try_from(body).unwrap_err();
        assert!(matches!(err, TicketServiceError::UnknownStatus(s) if s == "melted"));
    }

    #[test]
    fn test_list_query_validation() {
        let filter = TicketFilter::try_from(ListTicketsQuery {
            status: Some("casting".to_string()),
            limit: Some(20),
            offset: None,
        })
        .unwrap();
        assert_eq!(filter.status, Some(InternalStatus::Casting));
        assert_eq!(filter.limit, Some(20));

        let bad_limit = ListTicketsQuery {
            limit: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            TicketFilter::try_from(bad_limit),
            Err(AppError::BadRequest(_))
        ));

        let bad_status = ListTicketsQuery {
            status: Some("nope".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            TicketFilter::try_from(bad_status),
            Err(AppError::Ticket(TicketServiceError::UnknownStatus(_)))
        ));
    }

    #[test]
    fn test_create_request_flattens_input() {
        let body: CreateTicketRequest = serde_json::from_str(
            r#"{"title": "Signet ring", "customer_name": "Ana", "created_by": "front-desk"}"#,
        )
        .unwrap();
        assert_eq!(body.input.title, "Signet ring");
        assert!(body.input.customer_email.is_none());
        assert_eq!(body.created_by.as_deref(), Some("front-desk"));
    }
}
