//! Status vocabulary for custom tickets.
//!
//! Two disjoint namespaces exist:
//!
//! - [`InternalStatus`] - fine-grained workflow states tracked by staff
//! - [`ClientStatus`] - coarse states shown to the customer
//!
//! Every internal status belongs to exactly one [`StatusCategory`] (phase).
//! The wire form of every status is its kebab-case slug, e.g. `"quality-check"`.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a string is not a known status or category slug.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseStatusError {
    /// Not an internal status slug.
    #[error("unknown internal status: {0}")]
    UnknownInternal(String),
    /// Not a client status slug.
    #[error("unknown client status: {0}")]
    UnknownClient(String),
    /// Not a category slug.
    #[error("unknown status category: {0}")]
    UnknownCategory(String),
}

/// Workflow phase grouping related internal statuses.
///
/// The declaration order is the fixed order used when sorting statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusCategory {
    Initial,
    Design,
    Quote,
    Payment,
    Preparation,
    Production,
    Completion,
    Special,
}

impl StatusCategory {
    /// All categories in workflow order.
    pub const ALL: [Self; 8] = [
        Self::Initial,
        Self::Design,
        Self::Quote,
        Self::Payment,
        Self::Preparation,
        Self::Production,
        Self::Completion,
        Self::Special,
    ];

    /// Returns the slug for this category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::Design => "design",
            Self::Quote => "quote",
            Self::Payment => "payment",
            Self::Preparation => "preparation",
            Self::Production => "production",
            Self::Completion => "completion",
            Self::Special => "special",
        }
    }
}

impl fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusCategory {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| ParseStatusError::UnknownCategory(s.to_string()))
    }
}

/// Chip color used when rendering a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StatusColor {
    #[default]
    Default,
    Primary,
    Success,
    Warning,
    Error,
    Info,
}

/// Fine-grained workflow status of a custom ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum InternalStatus {
    // Initial
    #[default]
    Pending,
    ReviewingRequest,
    InConsultation,
    AwaitingClientInfo,

    // Design
    Sketching,
    SketchReview,
    SketchRevision,
    SketchApproved,
    CreatingCad,
    CadReview,
    CadRevision,
    CadApproved,

    // Quote
    PreparingQuote,
    QuoteSent,
    QuoteRevision,
    QuoteApproved,

    // Payment
    DepositInvoiceSent,
    DepositReceived,
    FinalInvoiceSent,
    PaymentReceived,

    // Preparation
    OrderingMaterials,
    AwaitingMaterials,
    SourcingStones,
    MaterialsReceived,

    // Production
    InProduction,
    WaxPrinting,
    Casting,
    StoneSetting,
    Engraving,
    Polishing,
    Plating,
    QualityCheck,

    // Completion
    ReadyForPickup,
    Shipped,
    Delivered,
    Completed,

    // Special
    OnHold,
    Cancelled,
    Refunded,
}

impl InternalStatus {
    /// Every internal status in catalog order.
    pub const ALL: [Self; 39] = [
        Self::Pending,
        Self::ReviewingRequest,
        Self::InConsultation,
        Self::AwaitingClientInfo,
        Self::Sketching,
        Self::SketchReview,
        Self::SketchRevision,
        Self::SketchApproved,
        Self::CreatingCad,
        Self::CadReview,
        Self::CadRevision,
        Self::CadApproved,
        Self::PreparingQuote,
        Self::QuoteSent,
        Self::QuoteRevision,
        Self::QuoteApproved,
        Self::DepositInvoiceSent,
        Self::DepositReceived,
        Self::FinalInvoiceSent,
        Self::PaymentReceived,
        Self::OrderingMaterials,
        Self::AwaitingMaterials,
        Self::SourcingStones,
        Self::MaterialsReceived,
        Self::InProduction,
        Self::WaxPrinting,
        Self::Casting,
        Self::StoneSetting,
        Self::Engraving,
        Self::Polishing,
        Self::Plating,
        Self::QualityCheck,
        Self::ReadyForPickup,
        Self::Shipped,
        Self::Delivered,
        Self::Completed,
        Self::OnHold,
        Self::Cancelled,
        Self::Refunded,
    ];

    /// Returns the slug for this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::ReviewingRequest => "reviewing-request",
            Self::InConsultation => "in-consultation",
            Self::AwaitingClientInfo => "awaiting-client-info",
            Self::Sketching => "sketching",
            Self::SketchReview => "sketch-review",
            Self::SketchRevision => "sketch-revision",
            Self::SketchApproved => "sketch-approved",
            Self::CreatingCad => "creating-cad",
            Self::CadReview => "cad-review",
            Self::CadRevision => "cad-revision",
            Self::CadApproved => "cad-approved",
            Self::PreparingQuote => "preparing-quote",
            Self::QuoteSent => "quote-sent",
            Self::QuoteRevision => "quote-revision",
            Self::QuoteApproved => "quote-approved",
            Self::DepositInvoiceSent => "deposit-invoice-sent",
            Self::DepositReceived => "deposit-received",
            Self::FinalInvoiceSent => "final-invoice-sent",
            Self::PaymentReceived => "payment-received",
            Self::OrderingMaterials => "ordering-materials",
            Self::AwaitingMaterials => "awaiting-materials",
            Self::SourcingStones => "sourcing-stones",
            Self::MaterialsReceived => "materials-received",
            Self::InProduction => "in-production",
            Self::WaxPrinting => "wax-printing",
            Self::Casting => "casting",
            Self::StoneSetting => "stone-setting",
            Self::Engraving => "engraving",
            Self::Polishing => "polishing",
            Self::Plating => "plating",
            Self::QualityCheck => "quality-check",
            Self::ReadyForPickup => "ready-for-pickup",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Completed => "completed",
            Self::OnHold => "on-hold",
            Self::Cancelled => "cancelled",
            Self::Refunded => "refunded",
        }
    }

    /// Returns the phase this status belongs to.
    #[must_use]
    pub const fn category(self) -> StatusCategory {
        match self {
            Self::Pending
            | Self::ReviewingRequest
            | Self::InConsultation
            | Self::AwaitingClientInfo => StatusCategory::Initial,
            Self::Sketching
            | Self::SketchReview
            | Self::SketchRevision
            | Self::SketchApproved
            | Self::CreatingCad
            | Self::CadReview
            | Self::CadRevision
            | Self::CadApproved => StatusCategory::Design,
            Self::PreparingQuote | Self::QuoteSent | Self::QuoteRevision | Self::QuoteApproved => {
                StatusCategory::Quote
            }
            Self::DepositInvoiceSent
            | Self::DepositReceived
            | Self::FinalInvoiceSent
            | Self::PaymentReceived => StatusCategory::Payment,
            Self::OrderingMaterials
            | Self::AwaitingMaterials
            | Self::SourcingStones
            | Self::MaterialsReceived => StatusCategory::Preparation,
            Self::InProduction
            | Self::WaxPrinting
            | Self::Casting
            | Self::StoneSetting
            | Self::Engraving
            | Self::Polishing
            | Self::Plating
            | Self::QualityCheck => StatusCategory::Production,
            Self::ReadyForPickup | Self::Shipped | Self::Delivered | Self::Completed => {
                StatusCategory::Completion
            }
            Self::OnHold | Self::Cancelled | Self::Refunded => StatusCategory::Special,
        }
    }

    /// Parse a slug, returning `None` for unknown input.
    #[must_use]
    pub fn from_slug(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }
}

impl fmt::Display for InternalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InternalStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slug(s).ok_or_else(|| ParseStatusError::UnknownInternal(s.to_string()))
    }
}

/// Customer-facing status, derived many-to-one from [`InternalStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ClientStatus {
    #[default]
    PendingReview,
    AwaitingYourInput,
    InDesign,
    AwaitingApproval,
    QuoteReady,
    PaymentRequired,
    InProduction,
    ReadyForPickup,
    Shipped,
    Completed,
    OnHold,
    Cancelled,
}

impl ClientStatus {
    /// Every client status in catalog order.
    pub const ALL: [Self; 12] = [
        Self::PendingReview,
        Self::AwaitingYourInput,
        Self::InDesign,
        Self::AwaitingApproval,
        Self::QuoteReady,
        Self::PaymentRequired,
        Self::InProduction,
        Self::ReadyForPickup,
        Self::Shipped,
        Self::Completed,
        Self::OnHold,
        Self::Cancelled,
    ];

    /// Returns the slug for this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PendingReview => "pending-review",
            Self::AwaitingYourInput => "awaiting-your-input",
            Self::InDesign => "in-design",
            Self::AwaitingApproval => "awaiting-approval",
            Self::QuoteReady => "quote-ready",
            Self::PaymentRequired => "payment-required",
            Self::InProduction => "in-production",
            Self::ReadyForPickup => "ready-for-pickup",
            Self::Shipped => "shipped",
            Self::Completed => "completed",
            Self::OnHold => "on-hold",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parse a slug, returning `None` for unknown input.
    #[must_use]
    pub fn from_slug(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }
}

impl fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClientStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slug(s).ok_or_else(|| ParseStatusError::UnknownClient(s.to_string()))
    }
}
