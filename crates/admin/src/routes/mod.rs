//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Liveness check
//! GET  /health/ready                    - Database readiness check
//!
//! # Status catalog
//! GET  /api/statuses                    - All internal and client statuses
//! GET  /api/statuses/action-required    - Statuses that need staff action
//! GET  /api/statuses/category/{cat}     - Internal statuses of one phase
//! GET  /api/statuses/{status}           - Display info for one status
//! GET  /api/statuses/{status}/next      - Statuses reachable from one status
//! GET  /api/transitions/check           - Validate ?from=&to=
//!
//! # Tickets
//! GET  /api/tickets                     - List tickets (?status=&limit=&offset=)
//! POST /api/tickets                     - Create ticket
//! GET  /api/tickets/{id}                - Ticket detail
//! GET  /api/tickets/{id}/history        - Status audit log
//! POST /api/tickets/{id}/status         - Change status
//! ```

pub mod statuses;
pub mod tickets;

use axum::Router;

use crate::state::AppState;

/// Build the complete API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(statuses::router())
        .merge(tickets::router())
}
