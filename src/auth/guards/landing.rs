//! Navigation path constants and default landing resolution
//!
//! External bookmarks depend on these paths; they are part of the contract
//! and must not drift.

use crate::auth::team::TeamSlug;

/// Signed-out landing page.
pub const SIGNED_OUT_PATH: &str = "/signin";

/// Super-admin area root.
pub const SUPER_ADMIN_ROOT: &str = "/superadmin";

/// Employee area root.
pub const EMPLOYEE_ROOT: &str = "/employee";

/// Default landing path for a resolved team slug.
///
/// Two teams land on a specific sub-page rather than the generic
/// dashboard; the org-head tier lands on the bare area root.
pub fn default_landing(slug: TeamSlug) -> &'static str {
    match slug {
        TeamSlug::Tele => "/employee/tele/dashboard",
        TeamSlug::Field => "/employee/field/dashboard",
        TeamSlug::Associate => "/employee/associate/dashboard",
        TeamSlug::Corporate => "/employee/corporate/dashboard",
        TeamSlug::Technical => "/employee/technical/dashboard",
        TeamSlug::Solution => "/employee/solution/dashboard",
        TeamSlug::QuotationTeam => "/employee/quotation-team/quotations",
        TeamSlug::PaymentsTeam => "/employee/payments-team/payments",
        TeamSlug::Ipqshead => EMPLOYEE_ROOT,
    }
}
