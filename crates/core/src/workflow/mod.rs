//! Custom-ticket status workflow.
//!
//! - [`catalog`] - display metadata for every status
//! - [`mapping`] - internal → client status mapping
//! - [`graph`] - strict transition edges and phase progression
//! - [`definition`] - the immutable tables an engine runs on
//! - [`engine`] - transition resolution and validation
//!
//! # Example
//!
//! ```rust
//! use atelier_core::{ClientStatus, InternalStatus, WorkflowEngine};
//!
//! let engine = WorkflowEngine::standard();
//!
//! assert!(engine.is_valid_transition("quality-check", "polishing"));
//! assert!(!engine.is_valid_transition("pending", "completed"));
//! assert_eq!(engine.client_status(InternalStatus::Casting), ClientStatus::InProduction);
//! assert!(engine.next_possible_statuses("completed").is_empty());
//! ```

pub mod catalog;
pub mod definition;
pub mod engine;
pub mod graph;
pub mod mapping;

pub use catalog::StatusDisplayInfo;
pub use definition::{DefinitionError, WorkflowDefinition};
pub use engine::WorkflowEngine;
pub use graph::{PhaseProgression, TransitionGraph};
pub use mapping::FALLBACK_CLIENT_STATUS;
