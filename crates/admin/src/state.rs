//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use atelier_core::WorkflowEngine;
use atelier_core::workflow::DefinitionError;

use crate::db::TicketRepository;
use crate::services::TicketService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pool: PgPool,
    engine: Arc<WorkflowEngine>,
    tickets: TicketService<TicketRepository>,
}

impl AppState {
    /// Build state around the standard workflow.
    ///
    /// # Errors
    ///
    /// Returns `DefinitionError` if the workflow definition is inconsistent.
    pub fn new(pool: PgPool) -> Result<Self, DefinitionError> {
        let engine = Arc::new(WorkflowEngine::new(atelier_core::WorkflowDefinition::standard())?);
        Ok(Self::with_engine(pool, engine))
    }

    /// Build state around a custom workflow engine.
    #[must_use]
    pub fn with_engine(pool: PgPool, engine: Arc<WorkflowEngine>) -> Self {
        let tickets = TicketService::new(TicketRepository::new(pool.clone()), Arc::clone(&engine));
        Self {
            inner: Arc::new(AppStateInner {
                pool,
                engine,
                tickets,
            }),
        }
    }

    /// Database pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Workflow engine.
    #[must_use]
    pub fn engine(&self) -> &WorkflowEngine {
        &self.inner.engine
    }

    /// Ticket service.
    #[must_use]
    pub fn tickets(&self) -> &TicketService<TicketRepository> {
        &self.inner.tickets
    }
}
