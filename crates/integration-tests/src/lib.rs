//! Integration test support for Atelier.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p atelier-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `workflow_properties` - Engine invariants over the whole catalog
//! - `ticket_transitions` - Ticket service behavior against [`MemoryTicketStore`]

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use uuid::Uuid;

use atelier_admin::db::{RepositoryError, TicketStore};
use atelier_admin::models::{CreateTicketInput, StatusChange, StatusUpdate, Ticket, TicketFilter};
use atelier_core::{InternalStatus, TicketId};

#[derive(Default)]
struct Inner {
    next_id: i32,
    tickets: HashMap<TicketId, Ticket>,
    history: Vec<StatusChange>,
    races: HashMap<TicketId, InternalStatus>,
}

/// In-memory [`TicketStore`] with the same compare-and-swap semantics as the
/// Postgres repository.
#[derive(Default)]
pub struct MemoryTicketStore {
    inner: Mutex<Inner>,
}

impl MemoryTicketStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Simulate another writer: just before the next status update of `id`
    /// is applied, the stored status is silently replaced with `status`.
    pub fn race_next_update(&self, id: TicketId, status: InternalStatus) {
        self.lock().races.insert(id, status);
    }

    /// Number of audit entries across all tickets.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.lock().history.len()
    }
}

impl TicketStore for MemoryTicketStore {
    async fn create(
        &self,
        input: &CreateTicketInput,
        changed_by: &str,
    ) -> Result<Ticket, RepositoryError> {
        let now = Utc::now();
        let mut inner = self.lock();
        inner.next_id += 1;
        let id = TicketId::new(inner.next_id);

        let ticket = Ticket {
            id,
            title: input.title.clone(),
            customer_name: input.customer_name.clone(),
            customer_email: input.customer_email.clone(),
            description: input.description.clone(),
            status: InternalStatus::Pending,
            created_at: now,
            updated_at: now,
            started_at: None,
            completed_at: None,
            cancelled_at: None,
        };
        inner.tickets.insert(id, ticket.clone());
        inner.history.push(StatusChange {
            id: Uuid::new_v4(),
            ticket_id: id,
            from_status: None,
            to_status: InternalStatus::Pending,
            changed_by: changed_by.to_owned(),
            note: None,
            created_at: now,
        });
        Ok(ticket)
    }

    async fn get(&self, id: TicketId) -> Result<Option<Ticket>, RepositoryError> {
        Ok(self.lock().tickets.get(&id).cloned())
    }

    async fn list(&self, filter: &TicketFilter) -> Result<Vec<Ticket>, RepositoryError> {
        let inner = self.lock();
        let mut tickets: Vec<Ticket> = inner
            .tickets
            .values()
            .filter(|t| filter.status.is_none_or(|s| t.status == s))
            .cloned()
            .collect();
        tickets.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));

        let offset = usize::try_from(filter.offset.unwrap_or(0)).unwrap_or(0);
        let limit = usize::try_from(filter.limit.unwrap_or(100)).unwrap_or(usize::MAX);
        Ok(tickets.into_iter().skip(offset).take(limit).collect())
    }

    async fn history(&self, id: TicketId) -> Result<Vec<StatusChange>, RepositoryError> {
        Ok(self
            .lock()
            .history
            .iter()
            .filter(|c| c.ticket_id == id)
            .cloned()
            .collect())
    }

    async fn update_status_if_current(
        &self,
        update: &StatusUpdate,
    ) -> Result<Option<Ticket>, RepositoryError> {
        let mut inner = self.lock();
        if let Some(raced) = inner.races.remove(&update.ticket_id)
            && let Some(ticket) = inner.tickets.get_mut(&update.ticket_id)
        {
            ticket.status = raced;
        }

        let Some(ticket) = inner.tickets.get_mut(&update.ticket_id) else {
            return Ok(None);
        };
        if ticket.status != update.from {
            return Ok(None);
        }

        ticket.apply(update);
        let ticket = ticket.clone();
        inner.history.push(update.audit_entry());
        Ok(Some(ticket))
    }
}
