//! Internal → client status mapping.

use std::collections::HashMap;

use crate::types::{ClientStatus, InternalStatus};

/// Client status used for any internal status without a mapping entry.
pub const FALLBACK_CLIENT_STATUS: ClientStatus = ClientStatus::PendingReview;

const CLIENT_MAPPING: [(InternalStatus, ClientStatus); 39] = {
    use ClientStatus as K;
    use InternalStatus as I;

    [
        (I::Pending, K::PendingReview),
        (I::ReviewingRequest, K::PendingReview),
        (I::InConsultation, K::PendingReview),
        (I::AwaitingClientInfo, K::AwaitingYourInput),
        (I::Sketching, K::InDesign),
        (I::SketchReview, K::AwaitingApproval),
        (I::SketchRevision, K::InDesign),
        (I::SketchApproved, K::InDesign),
        (I::CreatingCad, K::InDesign),
        (I::CadReview, K::AwaitingApproval),
        (I::CadRevision, K::InDesign),
        (I::CadApproved, K::InDesign),
        (I::PreparingQuote, K::PendingReview),
        (I::QuoteSent, K::QuoteReady),
        (I::QuoteRevision, K::PendingReview),
        (I::QuoteApproved, K::QuoteReady),
        (I::DepositInvoiceSent, K::PaymentRequired),
        (I::DepositReceived, K::InProduction),
        (I::FinalInvoiceSent, K::PaymentRequired),
        (I::PaymentReceived, K::InProduction),
        (I::OrderingMaterials, K::InProduction),
        (I::AwaitingMaterials, K::InProduction),
        (I::SourcingStones, K::InProduction),
        (I::MaterialsReceived, K::InProduction),
        (I::InProduction, K::InProduction),
        (I::WaxPrinting, K::InProduction),
        (I::Casting, K::InProduction),
        (I::StoneSetting, K::InProduction),
        (I::Engraving, K::InProduction),
        (I::Polishing, K::InProduction),
        (I::Plating, K::InProduction),
        (I::QualityCheck, K::InProduction),
        (I::ReadyForPickup, K::ReadyForPickup),
        (I::Shipped, K::Shipped),
        (I::Delivered, K::Completed),
        (I::Completed, K::Completed),
        (I::OnHold, K::OnHold),
        (I::Cancelled, K::Cancelled),
        (I::Refunded, K::Cancelled),
    ]
};

/// Built-in internal → client mapping.
#[must_use]
pub fn standard_client_mapping() -> HashMap<InternalStatus, ClientStatus> {
    CLIENT_MAPPING.into_iter().collect()
}
