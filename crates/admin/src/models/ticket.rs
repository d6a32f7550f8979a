//! Custom ticket domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use atelier_core::{InternalStatus, TicketId};

/// A repair or custom-jewelry ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Unique ticket ID.
    pub id: TicketId,
    /// Short summary of the job.
    pub title: String,
    /// Customer display name.
    pub customer_name: String,
    /// Customer contact email.
    pub customer_email: Option<String>,
    /// Free-form request details.
    pub description: Option<String>,
    /// Current internal workflow status.
    pub status: InternalStatus,
    /// When the ticket was created.
    pub created_at: DateTime<Utc>,
    /// When the ticket was last updated.
    pub updated_at: DateTime<Utc>,
    /// First time the ticket entered production.
    pub started_at: Option<DateTime<Utc>>,
    /// When the ticket was completed.
    pub completed_at: Option<DateTime<Utc>>,
    /// When the ticket was cancelled.
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl Ticket {
    /// Apply an accepted status update in place.
    ///
    /// Mirrors the column updates performed by the Postgres store so that
    /// other stores stamp milestones identically.
    pub fn apply(&mut self, update: &StatusUpdate) {
        let stamps = update.stamps();
        self.status = update.to;
        self.updated_at = update.at;
        self.started_at = self.started_at.or(stamps.started_at);
        self.completed_at = stamps.completed_at.or(self.completed_at);
        self.cancelled_at = stamps.cancelled_at.or(self.cancelled_at);
    }
}

/// One entry of a ticket's append-only status audit log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    /// Unique entry ID.
    pub id: Uuid,
    /// Ticket this entry belongs to.
    pub ticket_id: TicketId,
    /// Previous status (`None` for the creation entry).
    pub from_status: Option<InternalStatus>,
    /// New status.
    pub to_status: InternalStatus,
    /// Who made the change.
    pub changed_by: String,
    /// Optional staff note.
    pub note: Option<String>,
    /// When the change happened.
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new ticket.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTicketInput {
    /// Short summary of the job.
    pub title: String,
    /// Customer display name.
    pub customer_name: String,
    /// Customer contact email.
    pub customer_email: Option<String>,
    /// Free-form request details.
    pub description: Option<String>,
}

/// Filter criteria for listing tickets.
#[derive(Debug, Clone, Default)]
pub struct TicketFilter {
    /// Only tickets currently in this status.
    pub status: Option<InternalStatus>,
    /// Maximum number of results.
    pub limit: Option<i64>,
    /// Number of results to skip.
    pub offset: Option<i64>,
}

/// Timestamp column stamped when a ticket enters a particular status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Milestone {
    /// `in-production` sets `started_at` (first entry only).
    Started,
    /// `completed` sets `completed_at`.
    Completed,
    /// `cancelled` sets `cancelled_at`.
    Cancelled,
}

impl Milestone {
    /// Milestone stamped by entering `status`, if any.
    #[must_use]
    pub const fn for_status(status: InternalStatus) -> Option<Self> {
        match status {
            InternalStatus::InProduction => Some(Self::Started),
            InternalStatus::Completed => Some(Self::Completed),
            InternalStatus::Cancelled => Some(Self::Cancelled),
            _ => None,
        }
    }
}

/// Milestone timestamps to write alongside a status change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MilestoneStamps {
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

/// A validated compare-and-swap status update.
///
/// Stores apply it only if the ticket's stored status still equals `from`.
#[derive(Debug, Clone)]
pub struct StatusUpdate {
    /// Ticket to update.
    pub ticket_id: TicketId,
    /// Status the transition was validated against.
    pub from: InternalStatus,
    /// New status.
    pub to: InternalStatus,
    /// Who made the change.
    pub changed_by: String,
    /// Optional staff note.
    pub note: Option<String>,
    /// Time of the change.
    pub at: DateTime<Utc>,
}

impl StatusUpdate {
    /// Timestamps this update stamps on the ticket.
    #[must_use]
    pub fn stamps(&self) -> MilestoneStamps {
        let mut stamps = MilestoneStamps::default();
        match Milestone::for_status(self.to) {
            Some(Milestone::Started) => stamps.started_at = Some(self.at),
            Some(Milestone::Completed) => stamps.completed_at = Some(self.at),
            Some(Milestone::Cancelled) => stamps.cancelled_at = Some(self.at),
            None => {}
        }
        stamps
    }

    /// The audit log entry recording this update.
    #[must_use]
    pub fn audit_entry(&self) -> StatusChange {
        StatusChange {
            id: Uuid::new_v4(),
            ticket_id: self.ticket_id,
            from_status: Some(self.from),
            to_status: self.to,
            changed_by: self.changed_by.clone(),
            note: self.note.clone(),
            created_at: self.at,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn ticket() -> Ticket {
        let created = Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap();
        Ticket {
            id: TicketId::new(1),
            title: "Engagement ring".to_string(),
            customer_name: "Sam Rivera".to_string(),
            customer_email: None,
            description: None,
            status: InternalStatus::MaterialsReceived,
            created_at: created,
            updated_at: created,
            started_at: None,
            completed_at: None,
            cancelled_at: None,
        }
    }

    fn update(from: InternalStatus, to: InternalStatus, day: u32) -> StatusUpdate {
        StatusUpdate {
            ticket_id: TicketId::new(1),
            from,
            to,
            changed_by: "bench".to_string(),
            note: None,
            at: Utc.with_ymd_and_hms(2026, 1, day, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_milestone_for_status() {
        assert_eq!(
            Milestone::for_status(InternalStatus::InProduction),
            Some(Milestone::Started)
        );
        assert_eq!(
            Milestone::for_status(InternalStatus::Completed),
            Some(Milestone::Completed)
        );
        assert_eq!(
            Milestone::for_status(InternalStatus::Cancelled),
            Some(Milestone::Cancelled)
        );
        assert_eq!(Milestone::for_status(InternalStatus::Casting), None);
    }

    #[test]
    fn test_apply_stamps_started_once() {
        let mut ticket = ticket();
        let first = update(InternalStatus::MaterialsReceived, InternalStatus::InProduction, 6);
        ticket.apply(&first);
        assert_eq!(ticket.status, InternalStatus::InProduction);
        assert_eq!(ticket.started_at, Some(first.at));

        ticket.apply(&update(InternalStatus::InProduction, InternalStatus::OnHold, 7));
        let again = update(InternalStatus::OnHold, InternalStatus::InProduction, 8);
        ticket.apply(&again);
        assert_eq!(ticket.started_at, Some(first.at));
        assert_eq!(ticket.updated_at, again.at);
    }

    #[test]
    fn test_apply_stamps_cancelled() {
        let mut ticket = ticket();
        let cancel = update(InternalStatus::MaterialsReceived, InternalStatus::Cancelled, 9);
        ticket.apply(&cancel);
        assert_eq!(ticket.cancelled_at, Some(cancel.at));
        assert_eq!(ticket.completed_at, None);
    }

    #[test]
    fn test_audit_entry() {
        let update = update(InternalStatus::Casting, InternalStatus::Polishing, 10);
        let entry = update.audit_entry();
        assert_eq!(entry.from_status, Some(InternalStatus::Casting));
        assert_eq!(entry.to_status, InternalStatus::Polishing);
        assert_eq!(entry.created_at, update.at);
    }
}
