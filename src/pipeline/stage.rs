//! Pipeline stage enumerations
//!
//! Stages are closed, ordered sets. A move whose target index is lower
//! than its source index is a regression and needs explicit confirmation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

/// An ordered, closed stage set.
pub trait StageOrder: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    /// Every stage, in pipeline order.
    const ALL: &'static [Self];

    /// Canonical slug used on the wire and in responses.
    fn slug(&self) -> &'static str;

    /// Position of this stage in pipeline order.
    fn index(&self) -> usize {
        Self::ALL
            .iter()
            .position(|stage| stage == self)
            .expect("stage present in ALL")
    }

    /// Parse a wire slug back into a stage.
    fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|stage| stage.slug() == slug)
    }
}

/// Stages of the per-team marketing board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MarketingStage {
    /// Lead has been contacted
    Contacted,
    /// Lead has not been contacted yet
    NotContacted,
    /// Deal closed
    Closed,
    /// Deal lost
    Lost,
}

impl StageOrder for MarketingStage {
    const ALL: &'static [Self] = &[
        MarketingStage::Contacted,
        MarketingStage::NotContacted,
        MarketingStage::Closed,
        MarketingStage::Lost,
    ];

    fn slug(&self) -> &'static str {
        match self {
            MarketingStage::Contacted => "contacted",
            MarketingStage::NotContacted => "notContacted",
            MarketingStage::Closed => "closed",
            MarketingStage::Lost => "lost",
        }
    }
}

/// Stages of the cross-department pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PipelineStage {
    /// Lead generation
    Marketing,
    /// Technical evaluation
    Technical,
    /// Solution design
    Solutions,
    /// Quotation
    Quotation,
    /// Payment collection
    Payments,
}

impl StageOrder for PipelineStage {
    const ALL: &'static [Self] = &[
        PipelineStage::Marketing,
        PipelineStage::Technical,
        PipelineStage::Solutions,
        PipelineStage::Quotation,
        PipelineStage::Payments,
    ];

    fn slug(&self) -> &'static str {
        match self {
            PipelineStage::Marketing => "marketing",
            PipelineStage::Technical => "technical",
            PipelineStage::Solutions => "solutions",
            PipelineStage::Quotation => "quotation",
            PipelineStage::Payments => "payments",
        }
    }
}

impl fmt::Display for MarketingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}
