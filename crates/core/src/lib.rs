//! Atelier Core - ticket workflow engine and shared types.
//!
//! This crate is used by:
//! - `admin` - ticket service and JSON API
//! - `cli` - migrations and workflow inspection
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP. The workflow engine holds no mutable state and
//! is safe to share across any number of request handlers.
//!
//! # Modules
//!
//! - [`types`] - Ticket IDs and the status vocabulary
//! - [`workflow`] - Status catalog, client mapping, transition resolution

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;
pub mod workflow;

pub use types::*;
pub use workflow::{StatusDisplayInfo, WorkflowDefinition, WorkflowEngine};
