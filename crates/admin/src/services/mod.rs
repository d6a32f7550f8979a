//! Business logic services for admin.
//!
//! # Services
//!
//! - `tickets` - Ticket lifecycle guarded by the workflow engine

pub mod tickets;

pub use tickets::{DEFAULT_ACTOR, TicketService, TicketServiceError, TransitionRequest};
