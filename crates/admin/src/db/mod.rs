//! Database operations for admin `PostgreSQL`.
//!
//! ## Tables
//!
//! - `admin.tickets` - Custom and repair tickets with their current status
//! - `admin.ticket_status_history` - Append-only status audit log
//!
//! # Migrations
//!
//! Migrations are stored in `crates/admin/migrations/` and run via:
//! ```bash
//! cargo run -p atelier-cli -- migrate
//! ```

pub mod tickets;

use std::future::Future;
use std::time::Duration;

use atelier_core::TicketId;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use crate::models::{CreateTicketInput, StatusChange, StatusUpdate, Ticket, TicketFilter};

pub use tickets::TicketRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Persistence seam for tickets.
///
/// The ticket service only talks to storage through this trait, which lets
/// tests swap the Postgres repository for an in-memory store.
pub trait TicketStore: Send + Sync {
    /// Insert a ticket in `pending` and record the creation audit entry.
    fn create(
        &self,
        input: &CreateTicketInput,
        changed_by: &str,
    ) -> impl Future<Output = Result<Ticket, RepositoryError>> + Send;

    /// Fetch a ticket by ID.
    fn get(
        &self,
        id: TicketId,
    ) -> impl Future<Output = Result<Option<Ticket>, RepositoryError>> + Send;

    /// List tickets, most recently updated first.
    fn list(
        &self,
        filter: &TicketFilter,
    ) -> impl Future<Output = Result<Vec<Ticket>, RepositoryError>> + Send;

    /// Audit log of a ticket, oldest first.
    fn history(
        &self,
        id: TicketId,
    ) -> impl Future<Output = Result<Vec<StatusChange>, RepositoryError>> + Send;

    /// Apply `update` only if the stored status still equals `update.from`.
    ///
    /// The status change, milestone stamps and audit entry are written
    /// atomically. Returns `Ok(None)` when the ticket is missing or its status
    /// has moved on.
    fn update_status_if_current(
        &self,
        update: &StatusUpdate,
    ) -> impl Future<Output = Result<Option<Ticket>, RepositoryError>> + Send;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
