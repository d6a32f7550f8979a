//! Atelier admin library.
//!
//! Ticket persistence, the ticket service and the JSON API, built on the
//! workflow engine in `atelier-core`. The binary in `main.rs` wires these
//! together; integration tests drive the service through an in-memory
//! [`db::TicketStore`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
