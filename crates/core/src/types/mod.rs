//! Core types for Atelier.
//!
//! This module provides type-safe wrappers for ticket identifiers and the
//! status vocabulary shared by the workflow engine and the admin service.

pub mod id;
pub mod status;

pub use id::*;
pub use status::*;
