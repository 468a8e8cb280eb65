//! Team resolution cascade
//!
//! Maps a (department, role) pair onto the canonical team slug. The
//! cascade is ordered and first-match-wins: exact department name, then
//! department fragments, then role fragments, then the fixed default.

use super::types::TeamSlug;
use crate::auth::normalize::normalize;
use tracing::warn;

/// Default slug when neither department nor role resolves.
pub const DEFAULT_SLUG: TeamSlug = TeamSlug::Tele;

/// Exact matches for canonical normalized department names.
const EXACT: &[(&str, TeamSlug)] = &[
    ("tele-marketing", TeamSlug::Tele),
    ("field-marketing", TeamSlug::Field),
    ("associate-marketing", TeamSlug::Associate),
    ("corporate-marketing", TeamSlug::Corporate),
    ("technical", TeamSlug::Technical),
    ("solutions", TeamSlug::Solution),
    ("solution", TeamSlug::Solution),
    ("quotation-team", TeamSlug::QuotationTeam),
    ("payments-team", TeamSlug::PaymentsTeam),
    ("ipqshead", TeamSlug::Ipqshead),
];

/// Substring fragments tolerating misspellings and partial names.
///
/// The order is load-bearing: earlier fragments win when a name contains
/// several. "tele" sits last because longer names often embed it.
const FRAGMENTS: &[(&str, TeamSlug)] = &[
    ("assoicate", TeamSlug::Associate), // recurring misspelling in historical records
    ("associate", TeamSlug::Associate),
    ("assoc", TeamSlug::Associate),
    ("field", TeamSlug::Field),
    ("corporate", TeamSlug::Corporate),
    ("corp", TeamSlug::Corporate),
    ("quotation", TeamSlug::QuotationTeam),
    ("quote", TeamSlug::QuotationTeam),
    ("payment", TeamSlug::PaymentsTeam),
    ("technical", TeamSlug::Technical),
    ("tech", TeamSlug::Technical),
    ("solution", TeamSlug::Solution),
    ("ipqs", TeamSlug::Ipqshead),
    ("tele", TeamSlug::Tele),
];

fn exact_match(normalized: &str) -> Option<TeamSlug> {
    EXACT
        .iter()
        .find(|(name, _)| *name == normalized)
        .map(|(_, slug)| *slug)
}

fn fragment_match(normalized: &str) -> Option<TeamSlug> {
    if normalized.is_empty() {
        return None;
    }
    FRAGMENTS
        .iter()
        .find(|(fragment, _)| normalized.contains(fragment))
        .map(|(_, slug)| *slug)
}

/// Resolve a (department, role) pair to its canonical team slug.
///
/// Pure and total: never fails, always returns a valid slug. An
/// unresolvable pair degrades to [`DEFAULT_SLUG`] and is logged as a
/// data-quality signal.
pub fn resolve_team_slug(department: &str, role: &str) -> TeamSlug {
    let department = normalize(department);

    if let Some(slug) = exact_match(&department) {
        return slug;
    }
    if let Some(slug) = fragment_match(&department) {
        return slug;
    }

    let role = normalize(role);
    if let Some(slug) = fragment_match(&role) {
        return slug;
    }

    warn!(
        department = %department,
        role = %role,
        "unresolved department/role, falling back to default team"
    );
    DEFAULT_SLUG
}

/// True iff department and role both normalize to the org-head marker.
pub fn is_org_head(department: &str, role: &str) -> bool {
    normalize(department) == "ipqshead" && normalize(role) == "ipqshead"
}

/// True iff the normalized role carries the team-head suffix fragment.
pub fn is_team_head(role: &str) -> bool {
    normalize(role).contains("-head")
}
