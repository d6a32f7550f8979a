//! Domain models for admin.

pub mod ticket;

pub use ticket::{
    CreateTicketInput, Milestone, MilestoneStamps, StatusChange, StatusUpdate, Ticket,
    TicketFilter,
};
