//! Transition resolution and validation.
//!
//! # Resolution
//!
//! [`WorkflowEngine::next_statuses`] expands the strict transition graph into
//! the set of statuses an admin may actually pick:
//!
//! 1. strict graph edges
//! 2. every other status in the same phase
//! 3. the general statuses (`awaiting-client-info`, `on-hold`, `cancelled`)
//! 4. entry points of the adjacent forward phases
//! 5. entry points of the adjacent backward phases
//!
//! Terminal statuses resolve to nothing. Statuses in the `special` phase use
//! the strict graph only, so a cancelled ticket can only move on to
//! `refunded`. The result never contains the current status and is sorted by
//! phase order, then label.
//!
//! Every lookup is total: unknown strings produce `None`, an empty list, or
//! the fallback client status.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::LazyLock;

use super::catalog::StatusDisplayInfo;
use super::definition::{DefinitionError, WorkflowDefinition};
use super::mapping::FALLBACK_CLIENT_STATUS;
use crate::types::{ClientStatus, InternalStatus, StatusCategory};

static STANDARD: LazyLock<WorkflowEngine> =
    LazyLock::new(|| WorkflowEngine::build(WorkflowDefinition::standard()));

/// Pure, stateless query surface over a [`WorkflowDefinition`].
#[derive(Debug, Clone)]
pub struct WorkflowEngine {
    definition: WorkflowDefinition,
    by_category: HashMap<StatusCategory, Vec<InternalStatus>>,
}

impl WorkflowEngine {
    /// Create an engine from a definition after validating it.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError`] if the definition is structurally invalid.
    pub fn new(definition: WorkflowDefinition) -> Result<Self, DefinitionError> {
        definition.validate()?;
        Ok(Self::build(definition))
    }

    /// Shared engine over the built-in definition.
    #[must_use]
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    fn build(definition: WorkflowDefinition) -> Self {
        let mut by_category: HashMap<StatusCategory, Vec<InternalStatus>> = HashMap::new();
        for status in InternalStatus::ALL {
            by_category.entry(status.category()).or_default().push(status);
        }
        Self {
            definition,
            by_category,
        }
    }

    /// The definition this engine was built from.
    #[must_use]
    pub const fn definition(&self) -> &WorkflowDefinition {
        &self.definition
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Display info for a status slug from either namespace.
    ///
    /// `_is_internal` is accepted for API compatibility and ignored: the
    /// internal table is searched first, then the client table, so slugs that
    /// exist in both namespaces resolve to the internal entry.
    #[must_use]
    pub fn display_info(&self, status: &str, _is_internal: bool) -> Option<&StatusDisplayInfo> {
        InternalStatus::from_slug(status)
            .and_then(|s| self.internal_info(s))
            .or_else(|| ClientStatus::from_slug(status).and_then(|s| self.client_info(s)))
    }

    /// Display info for an internal status.
    #[must_use]
    pub fn internal_info(&self, status: InternalStatus) -> Option<&StatusDisplayInfo> {
        self.definition.internal_info.get(&status)
    }

    /// Display info for a client status.
    #[must_use]
    pub fn client_info(&self, status: ClientStatus) -> Option<&StatusDisplayInfo> {
        self.definition.client_info.get(&status)
    }

    /// Every internal status, in catalog order.
    #[must_use]
    pub const fn all_internal_statuses(&self) -> &'static [InternalStatus] {
        &InternalStatus::ALL
    }

    /// Every client status, in catalog order.
    #[must_use]
    pub const fn all_client_statuses(&self) -> &'static [ClientStatus] {
        &ClientStatus::ALL
    }

    /// Internal statuses belonging to `category`, in catalog order.
    #[must_use]
    pub fn statuses_in(&self, category: StatusCategory) -> &[InternalStatus] {
        self.by_category.get(&category).map_or(&[], Vec::as_slice)
    }

    /// Internal statuses belonging to the category named by `category`.
    ///
    /// Unknown category names produce an empty list.
    #[must_use]
    pub fn statuses_by_category(&self, category: &str) -> Vec<InternalStatus> {
        category
            .parse::<StatusCategory>()
            .map(|c| self.statuses_in(c).to_vec())
            .unwrap_or_default()
    }

    /// Internal statuses whose display info has `requires_action` set.
    #[must_use]
    pub fn action_required_statuses(&self) -> Vec<InternalStatus> {
        InternalStatus::ALL
            .into_iter()
            .filter(|s| self.internal_info(*s).is_some_and(|info| info.requires_action))
            .collect()
    }

    // =========================================================================
    // Mapping
    // =========================================================================

    /// Client-facing status for an internal status.
    #[must_use]
    pub fn client_status(&self, status: InternalStatus) -> ClientStatus {
        self.definition
            .client_mapping
            .get(&status)
            .copied()
            .unwrap_or(FALLBACK_CLIENT_STATUS)
    }

    /// Client-facing status for a slug; unknown slugs map to `pending-review`.
    #[must_use]
    pub fn client_status_for(&self, status: &str) -> ClientStatus {
        InternalStatus::from_slug(status).map_or(FALLBACK_CLIENT_STATUS, |s| self.client_status(s))
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Whether `status` has no way out.
    #[must_use]
    pub fn is_terminal(&self, status: InternalStatus) -> bool {
        self.definition.is_terminal(status)
    }

    /// Statuses a ticket currently in `current` may move to.
    #[must_use]
    pub fn next_statuses(&self, current: InternalStatus) -> Vec<InternalStatus> {
        if self.is_terminal(current) {
            return Vec::new();
        }

        let category = current.category();
        let mut next = Vec::new();
        let mut offer = |status: InternalStatus| {
            if status != current && !next.contains(&status) {
                next.push(status);
            }
        };

        for &status in self.definition.graph.edges_from(current) {
            offer(status);
        }

        if category != StatusCategory::Special {
            for &sibling in self.statuses_in(category) {
                offer(sibling);
            }
            for &general in &self.definition.general_statuses {
                offer(general);
            }
            let phases = &self.definition.phases;
            for &phase in phases.forward(category).iter().chain(phases.backward(category)) {
                if let Some(entry) = phases.entry_point(phase) {
                    offer(entry);
                }
            }
        }

        next.sort_by(|a, b| self.compare(*a, *b));
        next
    }

    /// Slug-based variant of [`Self::next_statuses`]; unknown input yields an
    /// empty list.
    #[must_use]
    pub fn next_possible_statuses(&self, current: &str) -> Vec<InternalStatus> {
        InternalStatus::from_slug(current)
            .map(|s| self.next_statuses(s))
            .unwrap_or_default()
    }

    /// Whether a ticket in `from` may move to `to`.
    #[must_use]
    pub fn can_transition(&self, from: InternalStatus, to: InternalStatus) -> bool {
        self.next_statuses(from).contains(&to)
    }

    /// Slug-based variant of [`Self::can_transition`].
    #[must_use]
    pub fn is_valid_transition(&self, from: &str, to: &str) -> bool {
        InternalStatus::from_slug(to)
            .is_some_and(|to| self.next_possible_statuses(from).contains(&to))
    }

    fn label(&self, status: InternalStatus) -> &str {
        self.internal_info(status).map_or("", |info| info.label)
    }

    fn compare(&self, a: InternalStatus, b: InternalStatus) -> Ordering {
        a.category()
            .cmp(&b.category())
            .then_with(|| self.label(a).cmp(self.label(b)))
            .then_with(|| a.as_str().cmp(b.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::TransitionGraph;
    use InternalStatus as I;

    fn engine() -> &'static WorkflowEngine {
        WorkflowEngine::standard()
    }

    #[test]
    fn test_new_validates() {
        let mut definition = WorkflowDefinition::standard();
        definition.graph = TransitionGraph::new();
        assert!(WorkflowEngine::new(definition).is_err());
        assert!(WorkflowEngine::new(WorkflowDefinition::standard()).is_ok());
    }

    #[test]
    fn test_pending_next_statuses() {
        let next = engine().next_possible_statuses("pending");
        for expected in [
            I::ReviewingRequest,
            I::InConsultation,
            I::Cancelled,
            I::AwaitingClientInfo,
            I::OnHold,
            I::Sketching,
            I::PreparingQuote,
        ] {
            assert!(next.contains(&expected), "missing {expected}");
        }
        assert!(!next.contains(&I::Completed));
        assert!(!next.contains(&I::Pending));
    }

    #[test]
    fn test_pending_next_statuses_exact_order() {
        assert_eq!(
            engine().next_statuses(I::Pending),
            vec![
                I::AwaitingClientInfo,
                I::InConsultation,
                I::ReviewingRequest,
                I::Sketching,
                I::PreparingQuote,
                I::Cancelled,
                I::OnHold,
            ]
        );
    }

    #[test]
    fn test_quality_check_back_to_polishing() {
        assert!(engine().is_valid_transition("quality-check", "polishing"));
    }

    #[test]
    fn test_production_offers_entry_points_both_ways() {
        let next = engine().next_statuses(I::Casting);
        assert!(next.contains(&I::ReadyForPickup));
        assert!(next.contains(&I::OrderingMaterials));
        assert!(!next.contains(&I::DepositInvoiceSent));
    }

    #[test]
    fn test_unknown_status() {
        assert!(engine().next_possible_statuses("unknown-garbage-status").is_empty());
        assert!(!engine().is_valid_transition("unknown-garbage-status", "pending"));
        assert!(!engine().is_valid_transition("pending", "unknown-garbage-status"));
        assert_eq!(engine().display_info("unknown-garbage-status", true), None);
        assert_eq!(
            engine().client_status_for("unknown-garbage-status"),
            ClientStatus::PendingReview
        );
    }

    #[test]
    fn test_terminal_statuses_resolve_to_nothing() {
        assert!(engine().next_possible_statuses("completed").is_empty());
        assert!(engine().next_possible_statuses("refunded").is_empty());
    }

    #[test]
    fn test_cancelled_only_refunds() {
        assert_eq!(engine().next_statuses(I::Cancelled), vec![I::Refunded]);
    }

    #[test]
    fn test_on_hold_uses_strict_edges() {
        let next = engine().next_statuses(I::OnHold);
        assert!(next.contains(&I::InProduction));
        assert!(next.contains(&I::Cancelled));
        assert!(!next.contains(&I::Refunded));
    }

    #[test]
    fn test_client_status() {
        assert_eq!(engine().client_status_for("casting"), ClientStatus::InProduction);
        assert_eq!(engine().client_status(I::Refunded), ClientStatus::Cancelled);
    }

    #[test]
    fn test_client_status_fallback_for_unmapped() {
        let mut definition = WorkflowDefinition::standard();
        definition.client_mapping.remove(&I::Casting);
        let engine = WorkflowEngine::new(definition).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(engine.client_status(I::Casting), ClientStatus::PendingReview);
    }

    #[test]
    fn test_display_info_ignores_namespace_flag() {
        let internal = engine().display_info("casting", true);
        let flagged_client = engine().display_info("casting", false);
        assert_eq!(internal, flagged_client);
        assert_eq!(internal.map(|i| i.label), Some("Casting"));

        // client-only slugs still resolve
        let client = engine().display_info("pending-review", true);
        assert_eq!(client.map(|i| i.label), Some("Pending Review"));
    }

    #[test]
    fn test_statuses_by_category() {
        assert_eq!(
            engine().statuses_by_category("quote"),
            vec![I::PreparingQuote, I::QuoteSent, I::QuoteRevision, I::QuoteApproved]
        );
        assert!(engine().statuses_by_category("nope").is_empty());
    }

    #[test]
    fn test_action_required_statuses() {
        let statuses = engine().action_required_statuses();
        assert!(statuses.contains(&I::Pending));
        assert!(statuses.contains(&I::OnHold));
        assert!(!statuses.contains(&I::QuoteSent));
        assert!(!statuses.contains(&I::Completed));
    }
}
