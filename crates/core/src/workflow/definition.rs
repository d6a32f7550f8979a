//! The immutable data a [`WorkflowEngine`](super::WorkflowEngine) runs on.

use std::collections::HashMap;

use thiserror::Error;

use super::catalog::{StatusDisplayInfo, standard_client_info, standard_internal_info};
use super::graph::{PhaseProgression, TransitionGraph};
use super::mapping::standard_client_mapping;
use crate::types::{ClientStatus, InternalStatus, StatusCategory};

/// A workflow definition violates one of its structural invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    #[error("internal status {0} has no display info")]
    MissingDisplayInfo(InternalStatus),

    #[error("client status {0} has no display info")]
    MissingClientDisplayInfo(ClientStatus),

    #[error("display info for {status} declares category {declared}, expected {expected}")]
    CategoryMismatch {
        status: InternalStatus,
        declared: StatusCategory,
        expected: StatusCategory,
    },

    #[error("non-terminal status {0} has no outgoing transitions")]
    NoOutgoingEdges(InternalStatus),

    #[error("terminal status {0} has outgoing transitions")]
    TerminalHasEdges(InternalStatus),

    #[error("status {0} transitions to itself")]
    SelfLoop(InternalStatus),

    #[error("phase {0} is referenced by the phase tables but has no entry point")]
    MissingEntryPoint(StatusCategory),

    #[error("entry point {status} of phase {category} belongs to phase {actual}")]
    EntryPointOutsidePhase {
        category: StatusCategory,
        status: InternalStatus,
        actual: StatusCategory,
    },
}

/// Static tables describing a ticket workflow.
///
/// Built once at startup and handed to the engine; nothing here is mutated
/// afterwards.
#[derive(Debug, Clone)]
pub struct WorkflowDefinition {
    /// Display metadata per internal status.
    pub internal_info: HashMap<InternalStatus, StatusDisplayInfo>,
    /// Display metadata per client status.
    pub client_info: HashMap<ClientStatus, StatusDisplayInfo>,
    /// Internal → client mapping.
    pub client_mapping: HashMap<InternalStatus, ClientStatus>,
    /// Hand-authored transitions.
    pub graph: TransitionGraph,
    /// Phase adjacency and entry points.
    pub phases: PhaseProgression,
    /// Statuses reachable from anywhere outside the `special` phase.
    pub general_statuses: Vec<InternalStatus>,
    /// Statuses with no way out.
    pub terminal_statuses: Vec<InternalStatus>,
}

impl WorkflowDefinition {
    /// The built-in custom-jewelry workflow.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            internal_info: standard_internal_info(),
            client_info: standard_client_info(),
            client_mapping: standard_client_mapping(),
            graph: TransitionGraph::standard(),
            phases: PhaseProgression::standard(),
            general_statuses: vec![
                InternalStatus::AwaitingClientInfo,
                InternalStatus::OnHold,
                InternalStatus::Cancelled,
            ],
            terminal_statuses: vec![InternalStatus::Completed, InternalStatus::Refunded],
        }
    }

    /// Whether `status` is terminal.
    #[must_use]
    pub fn is_terminal(&self, status: InternalStatus) -> bool {
        self.terminal_statuses.contains(&status)
    }

    /// Check the structural invariants of the definition.
    ///
    /// # Errors
    ///
    /// Returns the first [`DefinitionError`] found.
    pub fn validate(&self) -> Result<(), DefinitionError> {
        for status in InternalStatus::ALL {
            let info = self
                .internal_info
                .get(&status)
                .ok_or(DefinitionError::MissingDisplayInfo(status))?;
            if info.category != status.category() {
                return Err(DefinitionError::CategoryMismatch {
                    status,
                    declared: info.category,
                    expected: status.category(),
                });
            }

            let edges = self.graph.edges_from(status);
            if self.is_terminal(status) {
                if !edges.is_empty() {
                    return Err(DefinitionError::TerminalHasEdges(status));
                }
            } else if edges.is_empty() {
                return Err(DefinitionError::NoOutgoingEdges(status));
            }
            if edges.contains(&status) {
                return Err(DefinitionError::SelfLoop(status));
            }
        }

        for status in ClientStatus::ALL {
            if !self.client_info.contains_key(&status) {
                return Err(DefinitionError::MissingClientDisplayInfo(status));
            }
        }

        for category in self.phases.referenced_phases() {
            if self.phases.entry_point(category).is_none() {
                return Err(DefinitionError::MissingEntryPoint(category));
            }
        }

        for (category, status) in self.phases.entry_points() {
            if status.category() != category {
                return Err(DefinitionError::EntryPointOutsidePhase {
                    category,
                    status,
                    actual: status.category(),
                });
            }
        }

        Ok(())
    }
}

impl Default for WorkflowDefinition {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_definition_is_valid() {
        assert_eq!(WorkflowDefinition::standard().validate(), Ok(()));
    }

    #[test]
    fn test_missing_display_info_rejected() {
        let mut definition = WorkflowDefinition::standard();
        definition.internal_info.remove(&InternalStatus::Casting);
        assert_eq!(
            definition.validate(),
            Err(DefinitionError::MissingDisplayInfo(InternalStatus::Casting))
        );
    }

    #[test]
    fn test_dead_end_rejected() {
        let mut definition = WorkflowDefinition::standard();
        definition.graph = TransitionGraph::new();
        assert_eq!(
            definition.validate(),
            Err(DefinitionError::NoOutgoingEdges(InternalStatus::Pending))
        );
    }

    #[test]
    fn test_terminal_with_edges_rejected() {
        let mut definition = WorkflowDefinition::standard();
        definition
            .graph
            .add_edge(InternalStatus::Completed, InternalStatus::Pending);
        assert_eq!(
            definition.validate(),
            Err(DefinitionError::TerminalHasEdges(InternalStatus::Completed))
        );
    }

    #[test]
    fn test_self_loop_rejected() {
        let mut definition = WorkflowDefinition::standard();
        definition
            .graph
            .add_edge(InternalStatus::Casting, InternalStatus::Casting);
        assert_eq!(
            definition.validate(),
            Err(DefinitionError::SelfLoop(InternalStatus::Casting))
        );
    }

    #[test]
    fn test_entry_point_outside_phase_rejected() {
        let mut definition = WorkflowDefinition::standard();
        definition.phases = definition
            .phases
            .with_entry_point(StatusCategory::Design, InternalStatus::Casting);
        assert!(matches!(
            definition.validate(),
            Err(DefinitionError::EntryPointOutsidePhase {
                category: StatusCategory::Design,
                ..
            })
        ));
    }
}
