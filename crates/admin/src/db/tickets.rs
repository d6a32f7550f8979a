//! Ticket repository for database operations.
//!
//! Statuses are stored as their kebab-case slugs in `TEXT` columns and parsed
//! back into [`InternalStatus`] on read.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use atelier_core::{InternalStatus, TicketId};

use super::{RepositoryError, TicketStore};
use crate::models::{CreateTicketInput, StatusChange, StatusUpdate, Ticket, TicketFilter};

const DEFAULT_LIST_LIMIT: i64 = 100;

const TICKET_COLUMNS: &str = "id, title, customer_name, customer_email, description, status, \
     created_at, updated_at, started_at, completed_at, cancelled_at";

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` ticket queries.
#[derive(Debug, sqlx::FromRow)]
struct TicketRow {
    id: i32,
    title: String,
    customer_name: String,
    customer_email: Option<String>,
    description: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    cancelled_at: Option<DateTime<Utc>>,
}

fn parse_status(slug: &str) -> Result<InternalStatus, RepositoryError> {
    slug.parse()
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid status in database: {e}")))
}

impl TryFrom<TicketRow> for Ticket {
    type Error = RepositoryError;

    fn try_from(row: TicketRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: TicketId::new(row.id),
            title: row.title,
            customer_name: row.customer_name,
            customer_email: row.customer_email,
            description: row.description,
            status: parse_status(&row.status)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
            started_at: row.started_at,
            completed_at: row.completed_at,
            cancelled_at: row.cancelled_at,
        })
    }
}

/// Internal row type for `PostgreSQL` status history queries.
#[derive(Debug, sqlx::FromRow)]
struct StatusChangeRow {
    id: Uuid,
    ticket_id: i32,
    from_status: Option<String>,
    to_status: String,
    changed_by: String,
    note: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<StatusChangeRow> for StatusChange {
    type Error = RepositoryError;

    fn try_from(row: StatusChangeRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            ticket_id: TicketId::new(row.ticket_id),
            from_status: row.from_status.as_deref().map(parse_status).transpose()?,
            to_status: parse_status(&row.to_status)?,
            changed_by: row.changed_by,
            note: row.note,
            created_at: row.created_at,
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// `PostgreSQL`-backed [`TicketStore`].
#[derive(Debug, Clone)]
pub struct TicketRepository {
    pool: PgPool,
}

impl TicketRepository {
    /// Create a new ticket repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_change(
        tx: &mut Transaction<'_, Postgres>,
        change: &StatusChange,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO admin.ticket_status_history
                (id, ticket_id, from_status, to_status, changed_by, note, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(change.id)
        .bind(change.ticket_id.as_i32())
        .bind(change.from_status.map(InternalStatus::as_str))
        .bind(change.to_status.as_str())
        .bind(&change.changed_by)
        .bind(&change.note)
        .bind(change.created_at)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}

impl TicketStore for TicketRepository {
    async fn create(
        &self,
        input: &CreateTicketInput,
        changed_by: &str,
    ) -> Result<Ticket, RepositoryError> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, TicketRow>(&format!(
            r"
            INSERT INTO admin.tickets
                (title, customer_name, customer_email, description, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING {TICKET_COLUMNS}
            "
        ))
        .bind(&input.title)
        .bind(&input.customer_name)
        .bind(&input.customer_email)
        .bind(&input.description)
        .bind(InternalStatus::Pending.as_str())
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        let ticket = Ticket::try_from(row)?;

        let change = StatusChange {
            id: Uuid::new_v4(),
            ticket_id: ticket.id,
            from_status: None,
            to_status: ticket.status,
            changed_by: changed_by.to_owned(),
            note: None,
            created_at: now,
        };
        Self::insert_change(&mut tx, &change).await?;

        tx.commit().await?;
        Ok(ticket)
    }

    async fn get(&self, id: TicketId) -> Result<Option<Ticket>, RepositoryError> {
        let row = sqlx::query_as::<_, TicketRow>(&format!(
            "SELECT {TICKET_COLUMNS} FROM admin.tickets WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(&self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn list(&self, filter: &TicketFilter) -> Result<Vec<Ticket>, RepositoryError> {
        let rows = sqlx::query_as::<_, TicketRow>(&format!(
            r"
            SELECT {TICKET_COLUMNS}
            FROM admin.tickets
            WHERE ($1::text IS NULL OR status = $1)
            ORDER BY updated_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "
        ))
        .bind(filter.status.map(InternalStatus::as_str))
        .bind(filter.limit.unwrap_or(DEFAULT_LIST_LIMIT))
        .bind(filter.offset.unwrap_or(0))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn history(&self, id: TicketId) -> Result<Vec<StatusChange>, RepositoryError> {
        let rows = sqlx::query_as::<_, StatusChangeRow>(
            r"
            SELECT id, ticket_id, from_status, to_status, changed_by, note, created_at
            FROM admin.ticket_status_history
            WHERE ticket_id = $1
            ORDER BY created_at ASC, id ASC
            ",
        )
        .bind(id.as_i32())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn update_status_if_current(
        &self,
        update: &StatusUpdate,
    ) -> Result<Option<Ticket>, RepositoryError> {
        let stamps = update.stamps();
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, TicketRow>(&format!(
            r"
            UPDATE admin.tickets
            SET status = $3,
                started_at = COALESCE(started_at, $4),
                completed_at = COALESCE($5, completed_at),
                cancelled_at = COALESCE($6, cancelled_at),
                updated_at = $7
            WHERE id = $1 AND status = $2
            RETURNING {TICKET_COLUMNS}
            "
        ))
        .bind(update.ticket_id.as_i32())
        .bind(update.from.as_str())
        .bind(update.to.as_str())
        .bind(stamps.started_at)
        .bind(stamps.completed_at)
        .bind(stamps.cancelled_at)
        .bind(update.at)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            tx.rollback().await?;
            return Ok(None);
        };
        let ticket = Ticket::try_from(row)?;

        Self::insert_change(&mut tx, &update.audit_entry()).await?;

        tx.commit().await?;
        Ok(Some(ticket))
    }
}
