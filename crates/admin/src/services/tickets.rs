//! Ticket service: status changes guarded by the workflow engine.
//!
//! Every status change goes through [`TicketService::transition_status`],
//! which checks the move against the transition resolver and then performs a
//! compare-and-swap update so two concurrent edits cannot both win.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{info, instrument, warn};

use atelier_core::{InternalStatus, TicketId, WorkflowEngine};

use crate::db::{RepositoryError, TicketStore};
use crate::models::{CreateTicketInput, StatusChange, StatusUpdate, Ticket, TicketFilter};

/// Actor recorded when the caller does not say who made a change.
pub const DEFAULT_ACTOR: &str = "system";

/// Errors from ticket operations.
#[derive(Debug, Error)]
pub enum TicketServiceError {
    /// No ticket with this ID.
    #[error("ticket {0} not found")]
    NotFound(TicketId),

    /// A status slug that is not in the catalog.
    #[error("unknown status: {0}")]
    UnknownStatus(String),

    /// Input failed validation.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The workflow does not allow this move.
    #[error("cannot move from {from} to {to}")]
    InvalidTransition {
        from: InternalStatus,
        to: InternalStatus,
    },

    /// The ticket's status changed since the caller last looked.
    #[error("ticket status is {actual}, expected {expected}")]
    StaleStatus {
        expected: InternalStatus,
        actual: InternalStatus,
    },

    /// Storage failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// A requested status change.
#[derive(Debug, Clone)]
pub struct TransitionRequest {
    /// Target status.
    pub status: InternalStatus,
    /// Status the caller believes the ticket is in.
    pub expected_status: Option<InternalStatus>,
    /// Who is making the change.
    pub changed_by: Option<String>,
    /// Optional staff note for the audit log.
    pub note: Option<String>,
}

impl TransitionRequest {
    /// Request a move to `status` with no precondition.
    #[must_use]
    pub const fn to(status: InternalStatus) -> Self {
        Self {
            status,
            expected_status: None,
            changed_by: None,
            note: None,
        }
    }
}

/// Ticket operations over any [`TicketStore`].
pub struct TicketService<S> {
    store: S,
    engine: Arc<WorkflowEngine>,
}

impl<S: TicketStore> TicketService<S> {
    /// Create a new ticket service.
    #[must_use]
    pub const fn new(store: S, engine: Arc<WorkflowEngine>) -> Self {
        Self { store, engine }
    }

    /// The workflow engine used to validate transitions.
    #[must_use]
    pub fn engine(&self) -> &WorkflowEngine {
        &self.engine
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Create a ticket in `pending`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the title or customer name is blank, or
    /// `Repository` if the insert fails.
    #[instrument(skip(self, input))]
    pub async fn create_ticket(
        &self,
        input: &CreateTicketInput,
        actor: Option<&str>,
    ) -> Result<Ticket, TicketServiceError> {
        if input.title.trim().is_empty() {
            return Err(TicketServiceError::InvalidInput(
                "title must not be empty".to_string(),
            ));
        }
        if input.customer_name.trim().is_empty() {
            return Err(TicketServiceError::InvalidInput(
                "customer_name must not be empty".to_string(),
            ));
        }

        let ticket = self
            .store
            .create(input, actor.unwrap_or(DEFAULT_ACTOR))
            .await?;

        info!(ticket_id = %ticket.id, "Created ticket");
        Ok(ticket)
    }

    /// Fetch a ticket.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the ticket does not exist.
    pub async fn get_ticket(&self, id: TicketId) -> Result<Ticket, TicketServiceError> {
        self.store
            .get(id)
            .await?
            .ok_or(TicketServiceError::NotFound(id))
    }

    /// List tickets, most recently updated first.
    ///
    /// # Errors
    ///
    /// Returns `Repository` if the query fails.
    pub async fn list_tickets(
        &self,
        filter: &TicketFilter,
    ) -> Result<Vec<Ticket>, TicketServiceError> {
        Ok(self.store.list(filter).await?)
    }

    /// Audit log of a ticket, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the ticket does not exist.
    pub async fn history(&self, id: TicketId) -> Result<Vec<StatusChange>, TicketServiceError> {
        self.get_ticket(id).await?;
        Ok(self.store.history(id).await?)
    }

    /// Check whether a ticket may move to `to` from its stored status.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing ticket and `InvalidTransition` when
    /// the workflow forbids the move.
    pub async fn validate_status_transition(
        &self,
        id: TicketId,
        to: InternalStatus,
    ) -> Result<Ticket, TicketServiceError> {
        let ticket = self.get_ticket(id).await?;
        self.check(ticket.status, to)?;
        Ok(ticket)
    }

    /// Move a ticket to a new status.
    ///
    /// The move is validated against `request.expected_status` when given,
    /// otherwise against the stored status. The write only lands if the
    /// stored status is still the one validated against.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the ticket does not exist
    /// - `StaleStatus` if the stored status differs from the expected one,
    ///   including when another writer got there first
    /// - `InvalidTransition` if the workflow forbids the move
    #[instrument(skip(self, request), fields(to = %request.status))]
    pub async fn transition_status(
        &self,
        id: TicketId,
        request: TransitionRequest,
    ) -> Result<Ticket, TicketServiceError> {
        let current = self.get_ticket(id).await?;
        let from = request.expected_status.unwrap_or(current.status);

        if from != current.status {
            warn!(ticket_id = %id, expected = %from, actual = %current.status, "Stale status");
            return Err(TicketServiceError::StaleStatus {
                expected: from,
                actual: current.status,
            });
        }

        self.check(from, request.status)?;

        let update = StatusUpdate {
            ticket_id: id,
            from,
            to: request.status,
            changed_by: request
                .changed_by
                .unwrap_or_else(|| DEFAULT_ACTOR.to_string()),
            note: request.note,
            at: Utc::now(),
        };

        if let Some(ticket) = self.store.update_status_if_current(&update).await? {
            info!(ticket_id = %id, from = %from, to = %ticket.status, "Ticket status changed");
            return Ok(ticket);
        }

        // Lost the race: report what the ticket moved to instead.
        let latest = self.get_ticket(id).await?;
        warn!(
            ticket_id = %id,
            expected = %from,
            actual = %latest.status,
            "Concurrent status change"
        );
        Err(TicketServiceError::StaleStatus {
            expected: from,
            actual: latest.status,
        })
    }

    fn check(&self, from: InternalStatus, to: InternalStatus) -> Result<(), TicketServiceError> {
        if self.engine.can_transition(from, to) {
            Ok(())
        } else {
            warn!(from = %from, to = %to, "Rejected status transition");
            Err(TicketServiceError::InvalidTransition { from, to })
        }
    }
}
