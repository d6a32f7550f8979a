//! Hand-authored transition edges and phase progression tables.

use std::collections::HashMap;

use crate::types::{InternalStatus, StatusCategory};

/// Strict adjacency list of allowed internal-status transitions.
///
/// Each edge list is an ordered set. Statuses absent from the map have no
/// outgoing edges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionGraph {
    edges: HashMap<InternalStatus, Vec<InternalStatus>>,
}

impl TransitionGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an edge, ignoring duplicates.
    pub fn add_edge(&mut self, from: InternalStatus, to: InternalStatus) {
        let targets = self.edges.entry(from).or_default();
        if !targets.contains(&to) {
            targets.push(to);
        }
    }

    /// Builder-style variant of [`Self::add_edge`] for several targets.
    #[must_use]
    pub fn with_edges(mut self, from: InternalStatus, targets: &[InternalStatus]) -> Self {
        for &to in targets {
            self.add_edge(from, to);
        }
        self
    }

    /// Outgoing edges of `from`, in authored order.
    #[must_use]
    pub fn edges_from(&self, from: InternalStatus) -> &[InternalStatus] {
        self.edges.get(&from).map_or(&[], Vec::as_slice)
    }

    /// Whether `from → to` is a strict edge.
    #[must_use]
    pub fn has_edge(&self, from: InternalStatus, to: InternalStatus) -> bool {
        self.edges_from(from).contains(&to)
    }

    /// The built-in jewelry workflow.
    #[must_use]
    pub fn standard() -> Self {
        use InternalStatus::*;

        Self::new()
            // Initial
            .with_edges(Pending, &[ReviewingRequest, InConsultation, Cancelled])
            .with_edges(
                ReviewingRequest,
                &[InConsultation, AwaitingClientInfo, Sketching, PreparingQuote, Cancelled],
            )
            .with_edges(
                InConsultation,
                &[Sketching, PreparingQuote, AwaitingClientInfo, Cancelled],
            )
            .with_edges(
                AwaitingClientInfo,
                &[ReviewingRequest, InConsultation, OnHold, Cancelled],
            )
            // Design
            .with_edges(Sketching, &[SketchReview, OnHold])
            .with_edges(SketchReview, &[SketchApproved, SketchRevision])
            .with_edges(SketchRevision, &[SketchReview])
            .with_edges(SketchApproved, &[CreatingCad, PreparingQuote])
            .with_edges(CreatingCad, &[CadReview])
            .with_edges(CadReview, &[CadApproved, CadRevision])
            .with_edges(CadRevision, &[CadReview])
            .with_edges(CadApproved, &[PreparingQuote, DepositInvoiceSent])
            // Quote
            .with_edges(PreparingQuote, &[QuoteSent])
            .with_edges(QuoteSent, &[QuoteApproved, QuoteRevision, Cancelled])
            .with_edges(QuoteRevision, &[QuoteSent])
            .with_edges(QuoteApproved, &[DepositInvoiceSent])
            // Payment
            .with_edges(DepositInvoiceSent, &[DepositReceived, Cancelled])
            .with_edges(DepositReceived, &[OrderingMaterials, InProduction])
            .with_edges(FinalInvoiceSent, &[PaymentReceived])
            .with_edges(PaymentReceived, &[ReadyForPickup, Shipped])
            // Preparation
            .with_edges(OrderingMaterials, &[AwaitingMaterials, SourcingStones])
            .with_edges(AwaitingMaterials, &[MaterialsReceived])
            .with_edges(SourcingStones, &[MaterialsReceived])
            .with_edges(MaterialsReceived, &[InProduction])
            // Production
            .with_edges(InProduction, &[WaxPrinting, Casting])
            .with_edges(WaxPrinting, &[Casting])
            .with_edges(Casting, &[StoneSetting, Polishing])
            .with_edges(StoneSetting, &[Engraving, Polishing])
            .with_edges(Engraving, &[Polishing])
            .with_edges(Polishing, &[Plating, QualityCheck])
            .with_edges(Plating, &[QualityCheck])
            .with_edges(QualityCheck, &[Polishing, FinalInvoiceSent, ReadyForPickup])
            // Completion
            .with_edges(ReadyForPickup, &[Completed])
            .with_edges(Shipped, &[Delivered])
            .with_edges(Delivered, &[Completed])
            // Special
            .with_edges(
                OnHold,
                &[
                    ReviewingRequest,
                    Sketching,
                    PreparingQuote,
                    InProduction,
                    AwaitingClientInfo,
                    Cancelled,
                ],
            )
            .with_edges(Cancelled, &[Refunded])
    }
}

/// Adjacent-phase lookup used to offer entry points of neighbouring phases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhaseProgression {
    forward: HashMap<StatusCategory, Vec<StatusCategory>>,
    backward: HashMap<StatusCategory, Vec<StatusCategory>>,
    entry_points: HashMap<StatusCategory, InternalStatus>,
}

impl PhaseProgression {
    /// Phases reachable by moving forward from `category`.
    #[must_use]
    pub fn forward(&self, category: StatusCategory) -> &[StatusCategory] {
        self.forward.get(&category).map_or(&[], Vec::as_slice)
    }

    /// Phases reachable by stepping back from `category`.
    #[must_use]
    pub fn backward(&self, category: StatusCategory) -> &[StatusCategory] {
        self.backward.get(&category).map_or(&[], Vec::as_slice)
    }

    /// Canonical status representing "entering" `category`.
    #[must_use]
    pub fn entry_point(&self, category: StatusCategory) -> Option<InternalStatus> {
        self.entry_points.get(&category).copied()
    }

    /// All configured entry points.
    pub fn entry_points(&self) -> impl Iterator<Item = (StatusCategory, InternalStatus)> + '_ {
        self.entry_points.iter().map(|(&category, &status)| (category, status))
    }

    /// Every phase referenced from the forward or backward tables.
    pub fn referenced_phases(&self) -> impl Iterator<Item = StatusCategory> + '_ {
        self.forward
            .values()
            .chain(self.backward.values())
            .flatten()
            .copied()
    }

    /// Set the phases reachable forward from `category`.
    #[must_use]
    pub fn with_forward(mut self, category: StatusCategory, next: &[StatusCategory]) -> Self {
        self.forward.insert(category, next.to_vec());
        self
    }

    /// Set the phases reachable backward from `category`.
    #[must_use]
    pub fn with_backward(mut self, category: StatusCategory, prev: &[StatusCategory]) -> Self {
        self.backward.insert(category, prev.to_vec());
        self
    }

    /// Set the entry point of `category`.
    #[must_use]
    pub fn with_entry_point(mut self, category: StatusCategory, status: InternalStatus) -> Self {
        self.entry_points.insert(category, status);
        self
    }

    /// The built-in phase tables.
    #[must_use]
    pub fn standard() -> Self {
        use InternalStatus as I;
        use StatusCategory::*;

        Self::default()
            .with_forward(Initial, &[Design, Quote])
            .with_forward(Design, &[Quote, Payment])
            .with_forward(Quote, &[Payment, Preparation])
            .with_forward(Payment, &[Preparation, Production])
            .with_forward(Preparation, &[Production])
            .with_forward(Production, &[Completion])
            .with_forward(Completion, &[])
            .with_forward(Special, &[])
            .with_backward(Design, &[Initial])
            .with_backward(Quote, &[Initial, Design])
            .with_backward(Payment, &[Quote])
            .with_backward(Preparation, &[Payment])
            .with_backward(Production, &[Preparation])
            .with_backward(Completion, &[Production])
            .with_entry_point(Initial, I::Pending)
            .with_entry_point(Design, I::Sketching)
            .with_entry_point(Quote, I::PreparingQuote)
            .with_entry_point(Payment, I::DepositInvoiceSent)
            .with_entry_point(Preparation, I::OrderingMaterials)
            .with_entry_point(Production, I::InProduction)
            .with_entry_point(Completion, I::ReadyForPickup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_edge_ignores_duplicates() {
        let mut graph = TransitionGraph::new();
        graph.add_edge(InternalStatus::Pending, InternalStatus::Cancelled);
        graph.add_edge(InternalStatus::Pending, InternalStatus::Cancelled);
        assert_eq!(graph.edges_from(InternalStatus::Pending), &[InternalStatus::Cancelled]);
    }

    #[test]
    fn test_edges_keep_authored_order() {
        let graph = TransitionGraph::standard();
        assert_eq!(
            graph.edges_from(InternalStatus::Pending),
            &[
                InternalStatus::ReviewingRequest,
                InternalStatus::InConsultation,
                InternalStatus::Cancelled
            ]
        );
    }

    #[test]
    fn test_terminal_statuses_have_no_edges() {
        let graph = TransitionGraph::standard();
        assert!(graph.edges_from(InternalStatus::Completed).is_empty());
        assert!(graph.edges_from(InternalStatus::Refunded).is_empty());
    }

    #[test]
    fn test_graph_allows_cycles() {
        let graph = TransitionGraph::standard();
        assert!(graph.has_edge(InternalStatus::Polishing, InternalStatus::QualityCheck));
        assert!(graph.has_edge(InternalStatus::QualityCheck, InternalStatus::Polishing));
    }

    #[test]
    fn test_standard_entry_points_sit_in_their_phase() {
        let phases = PhaseProgression::standard();
        for (category, status) in phases.entry_points() {
            assert_eq!(status.category(), category);
        }
        assert_eq!(phases.entry_point(StatusCategory::Special), None);
    }

    #[test]
    fn test_backward_mirrors_forward() {
        let phases = PhaseProgression::standard();
        for category in StatusCategory::ALL {
            for &prev in phases.backward(category) {
                assert!(
                    phases.forward(prev).contains(&category),
                    "{prev} -> {category} missing from forward table"
                );
            }
        }
    }
}
