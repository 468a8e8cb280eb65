//! Team slug type definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical short identifier for an organizational sub-team.
///
/// A closed set: derived from identity text, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TeamSlug {
    /// Tele-marketing team
    Tele,
    /// Field-marketing team
    Field,
    /// Associate-marketing team
    Associate,
    /// Corporate-marketing team
    Corporate,
    /// Technical department
    Technical,
    /// Solutions department
    Solution,
    /// Quotation team
    QuotationTeam,
    /// Payments team
    PaymentsTeam,
    /// Organization head tier
    Ipqshead,
}

impl TeamSlug {
    /// All slugs, in pipeline display order.
    pub const ALL: [TeamSlug; 9] = [
        TeamSlug::Tele,
        TeamSlug::Field,
        TeamSlug::Associate,
        TeamSlug::Corporate,
        TeamSlug::Technical,
        TeamSlug::Solution,
        TeamSlug::QuotationTeam,
        TeamSlug::PaymentsTeam,
        TeamSlug::Ipqshead,
    ];

    /// Parse a canonical slug string.
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.as_str() == slug)
    }

    /// Canonical string form of the slug.
    pub fn as_str(&self) -> &'static str {
        match self {
            TeamSlug::Tele => "tele",
            TeamSlug::Field => "field",
            TeamSlug::Associate => "associate",
            TeamSlug::Corporate => "corporate",
            TeamSlug::Technical => "technical",
            TeamSlug::Solution => "solution",
            TeamSlug::QuotationTeam => "quotation-team",
            TeamSlug::PaymentsTeam => "payments-team",
            TeamSlug::Ipqshead => "ipqshead",
        }
    }
}

impl fmt::Display for TeamSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
