//! Display metadata for every internal and client status.
//!
//! The tables here are plain data; nothing in this module makes decisions.

use std::collections::HashMap;

use serde::Serialize;

use crate::types::{ClientStatus, InternalStatus, StatusCategory, StatusColor};

use ClientStatus as K;
use InternalStatus as I;
use StatusCategory as C;
use StatusColor as Color;

/// Rendering metadata attached to a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusDisplayInfo {
    /// Short human-readable name.
    pub label: &'static str,
    /// One-sentence explanation shown in tooltips.
    pub description: &'static str,
    /// Chip color.
    pub color: StatusColor,
    /// Material icon glyph name.
    pub icon: &'static str,
    /// Workflow phase.
    pub category: StatusCategory,
    /// Whether staff must act to move the ticket on. Always `false` for
    /// client statuses.
    pub requires_action: bool,
}

impl StatusDisplayInfo {
    /// Construct display info.
    #[must_use]
    pub const fn new(
        label: &'static str,
        description: &'static str,
        color: StatusColor,
        icon: &'static str,
        category: StatusCategory,
        requires_action: bool,
    ) -> Self {
        Self {
            label,
            description,
            color,
            icon,
            category,
            requires_action,
        }
    }
}

const fn staff(
    label: &'static str,
    description: &'static str,
    color: StatusColor,
    icon: &'static str,
    category: StatusCategory,
) -> StatusDisplayInfo {
    StatusDisplayInfo::new(label, description, color, icon, category, true)
}

const fn waiting(
    label: &'static str,
    description: &'static str,
    color: StatusColor,
    icon: &'static str,
    category: StatusCategory,
) -> StatusDisplayInfo {
    StatusDisplayInfo::new(label, description, color, icon, category, false)
}

const INTERNAL_DISPLAY_INFO: [(InternalStatus, StatusDisplayInfo); 39] = [
    (
        I::Pending,
        staff(
            "Pending",
            "New request waiting to be picked up",
            Color::Default,
            "schedule",
            C::Initial,
        ),
    ),
    (
        I::ReviewingRequest,
        staff(
            "Reviewing Request",
            "Staff are reviewing the request details",
            Color::Info,
            "search",
            C::Initial,
        ),
    ),
    (
        I::InConsultation,
        staff(
            "In Consultation",
            "Consultation with the client is under way",
            Color::Info,
            "forum",
            C::Initial,
        ),
    ),
    (
        I::AwaitingClientInfo,
        waiting(
            "Awaiting Client Info",
            "Waiting for the client to answer questions",
            Color::Warning,
            "help",
            C::Initial,
        ),
    ),
    (
        I::Sketching,
        staff(
            "Sketching",
            "Designer is drawing concept sketches",
            Color::Primary,
            "brush",
            C::Design,
        ),
    ),
    (
        I::SketchReview,
        waiting(
            "Sketch Review",
            "Sketches sent to the client for review",
            Color::Warning,
            "rate_review",
            C::Design,
        ),
    ),
    (
        I::SketchRevision,
        staff(
            "Sketch Revision",
            "Reworking sketches from client feedback",
            Color::Primary,
            "edit",
            C::Design,
        ),
    ),
    (
        I::SketchApproved,
        staff(
            "Sketch Approved",
            "Client approved the sketch",
            Color::Success,
            "check_circle",
            C::Design,
        ),
    ),
    (
        I::CreatingCad,
        staff(
            "Creating CAD",
            "Building the 3D CAD model",
            Color::Primary,
            "view_in_ar",
            C::Design,
        ),
    ),
    (
        I::CadReview,
        waiting(
            "CAD Review",
            "CAD renders sent to the client for review",
            Color::Warning,
            "rate_review",
            C::Design,
        ),
    ),
    (
        I::CadRevision,
        staff(
            "CAD Revision",
            "Reworking the CAD model from client feedback",
            Color::Primary,
            "edit",
            C::Design,
        ),
    ),
    (
        I::CadApproved,
        staff(
            "CAD Approved",
            "Client approved the CAD model",
            Color::Success,
            "check_circle",
            C::Design,
        ),
    ),
    (
        I::PreparingQuote,
        staff(
            "Preparing Quote",
            "Pricing materials and labor",
            Color::Primary,
            "calculate",
            C::Quote,
        ),
    ),
    (
        I::QuoteSent,
        waiting(
            "Quote Sent",
            "Quote delivered, waiting on the client",
            Color::Warning,
            "request_quote",
            C::Quote,
        ),
    ),
    (
        I::QuoteRevision,
        staff(
            "Quote Revision",
            "Adjusting the quote at the client's request",
            Color::Primary,
            "edit",
            C::Quote,
        ),
    ),
    (
        I::QuoteApproved,
        staff(
            "Quote Approved",
            "Client accepted the quote",
            Color::Success,
            "thumb_up",
            C::Quote,
        ),
    ),
    (
        I::DepositInvoiceSent,
        waiting(
            "Deposit Invoice Sent",
            "Deposit invoice issued, awaiting payment",
            Color::Warning,
            "receipt",
            C::Payment,
        ),
    ),
    (
        I::DepositReceived,
        staff(
            "Deposit Received",
            "Deposit paid, work can begin",
            Color::Success,
            "payments",
            C::Payment,
        ),
    ),
    (
        I::FinalInvoiceSent,
        waiting(
            "Final Invoice Sent",
            "Balance invoice issued, awaiting payment",
            Color::Warning,
            "receipt_long",
            C::Payment,
        ),
    ),
    (
        I::PaymentReceived,
        staff(
            "Payment Received",
            "Balance paid in full",
            Color::Success,
            "paid",
            C::Payment,
        ),
    ),
    (
        I::OrderingMaterials,
        staff(
            "Ordering Materials",
            "Placing orders for metal and findings",
            Color::Primary,
            "shopping_cart",
            C::Preparation,
        ),
    ),
    (
        I::AwaitingMaterials,
        waiting(
            "Awaiting Materials",
            "Waiting for supplier deliveries",
            Color::Warning,
            "local_shipping",
            C::Preparation,
        ),
    ),
    (
        I::SourcingStones,
        staff(
            "Sourcing Stones",
            "Selecting and purchasing gemstones",
            Color::Primary,
            "diamond",
            C::Preparation,
        ),
    ),
    (
        I::MaterialsReceived,
        staff(
            "Materials Received",
            "All materials on the bench",
            Color::Success,
            "inventory",
            C::Preparation,
        ),
    ),
    (
        I::InProduction,
        staff(
            "In Production",
            "Piece is being made",
            Color::Primary,
            "build",
            C::Production,
        ),
    ),
    (
        I::WaxPrinting,
        staff(
            "Wax Printing",
            "Printing the wax model for casting",
            Color::Primary,
            "print",
            C::Production,
        ),
    ),
    (
        I::Casting,
        staff(
            "Casting",
            "Casting the piece in metal",
            Color::Primary,
            "local_fire_department",
            C::Production,
        ),
    ),
    (
        I::StoneSetting,
        staff(
            "Stone Setting",
            "Setting stones into the piece",
            Color::Primary,
            "diamond",
            C::Production,
        ),
    ),
    (
        I::Engraving,
        staff(
            "Engraving",
            "Engraving details or lettering",
            Color::Primary,
            "draw",
            C::Production,
        ),
    ),
    (
        I::Polishing,
        staff(
            "Polishing",
            "Finishing and polishing the metal",
            Color::Primary,
            "auto_awesome",
            C::Production,
        ),
    ),
    (
        I::Plating,
        staff(
            "Plating",
            "Applying rhodium or gold plating",
            Color::Primary,
            "layers",
            C::Production,
        ),
    ),
    (
        I::QualityCheck,
        staff(
            "Quality Check",
            "Final inspection before release",
            Color::Info,
            "fact_check",
            C::Production,
        ),
    ),
    (
        I::ReadyForPickup,
        waiting(
            "Ready for Pickup",
            "Finished piece waiting for the client",
            Color::Success,
            "store",
            C::Completion,
        ),
    ),
    (
        I::Shipped,
        waiting(
            "Shipped",
            "Piece is in transit to the client",
            Color::Info,
            "local_shipping",
            C::Completion,
        ),
    ),
    (
        I::Delivered,
        staff(
            "Delivered",
            "Client received the piece, close out the ticket",
            Color::Success,
            "home",
            C::Completion,
        ),
    ),
    (
        I::Completed,
        waiting(
            "Completed",
            "Ticket closed",
            Color::Success,
            "task_alt",
            C::Completion,
        ),
    ),
    (
        I::OnHold,
        staff(
            "On Hold",
            "Work paused, needs a decision to resume",
            Color::Warning,
            "pause_circle",
            C::Special,
        ),
    ),
    (
        I::Cancelled,
        waiting(
            "Cancelled",
            "Ticket cancelled",
            Color::Error,
            "cancel",
            C::Special,
        ),
    ),
    (
        I::Refunded,
        waiting(
            "Refunded",
            "Payments returned to the client",
            Color::Error,
            "currency_exchange",
            C::Special,
        ),
    ),
];

const CLIENT_DISPLAY_INFO: [(ClientStatus, StatusDisplayInfo); 12] = [
    (
        K::PendingReview,
        waiting(
            "Pending Review",
            "We're reviewing your request",
            Color::Default,
            "schedule",
            C::Initial,
        ),
    ),
    (
        K::AwaitingYourInput,
        waiting(
            "Awaiting Your Input",
            "We need a few details from you",
            Color::Warning,
            "help",
            C::Initial,
        ),
    ),
    (
        K::InDesign,
        waiting(
            "In Design",
            "Our designers are working on your piece",
            Color::Primary,
            "brush",
            C::Design,
        ),
    ),
    (
        K::AwaitingApproval,
        waiting(
            "Awaiting Your Approval",
            "A design is ready for your review",
            Color::Warning,
            "rate_review",
            C::Design,
        ),
    ),
    (
        K::QuoteReady,
        waiting(
            "Quote Ready",
            "Your quote is ready",
            Color::Info,
            "request_quote",
            C::Quote,
        ),
    ),
    (
        K::PaymentRequired,
        waiting(
            "Payment Required",
            "An invoice is waiting for payment",
            Color::Warning,
            "receipt",
            C::Payment,
        ),
    ),
    (
        K::InProduction,
        waiting(
            "In Production",
            "Your piece is being made",
            Color::Primary,
            "build",
            C::Production,
        ),
    ),
    (
        K::ReadyForPickup,
        waiting(
            "Ready for Pickup",
            "Your piece is ready to collect",
            Color::Success,
            "store",
            C::Completion,
        ),
    ),
    (
        K::Shipped,
        waiting(
            "Shipped",
            "Your piece is on its way",
            Color::Info,
            "local_shipping",
            C::Completion,
        ),
    ),
    (
        K::Completed,
        waiting(
            "Completed",
            "Enjoy your piece",
            Color::Success,
            "task_alt",
            C::Completion,
        ),
    ),
    (
        K::OnHold,
        waiting(
            "On Hold",
            "Work is paused for now",
            Color::Warning,
            "pause_circle",
            C::Special,
        ),
    ),
    (
        K::Cancelled,
        waiting(
            "Cancelled",
            "This request was cancelled",
            Color::Error,
            "cancel",
            C::Special,
        ),
    ),
];

/// Built-in display table for internal statuses.
#[must_use]
pub fn standard_internal_info() -> HashMap<InternalStatus, StatusDisplayInfo> {
    INTERNAL_DISPLAY_INFO.into_iter().collect()
}

/// Built-in display table for client statuses.
#[must_use]
pub fn standard_client_info() -> HashMap<ClientStatus, StatusDisplayInfo> {
    CLIENT_DISPLAY_INFO.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_internal_status_has_info() {
        let table = standard_internal_info();
        for status in InternalStatus::ALL {
            assert!(table.contains_key(&status), "missing info for {status}");
        }
    }

    #[test]
    fn test_every_client_status_has_info() {
        let table = standard_client_info();
        for status in ClientStatus::ALL {
            assert!(table.contains_key(&status), "missing info for {status}");
        }
    }

    #[test]
    fn test_internal_info_category_matches_status() {
        for (status, info) in INTERNAL_DISPLAY_INFO {
            assert_eq!(info.category, status.category(), "{status}");
        }
    }

    #[test]
    fn test_client_statuses_never_require_action() {
        assert!(CLIENT_DISPLAY_INFO.iter().all(|(_, info)| !info.requires_action));
    }
}
