//! Composable route gates
//!
//! Each gate is a pure predicate over the session and the identity it
//! carries. Gates compose as an ordered chain evaluated short-circuit: the
//! first redirect is final for that navigation attempt. Client-side gating
//! mirrors the backend's authorization for UX only; it is advisory, not a
//! security boundary.

use crate::auth::guards::landing::{SIGNED_OUT_PATH, SUPER_ADMIN_ROOT, default_landing};
use crate::auth::identity::Identity;
use crate::auth::session::Session;
use crate::auth::team::TeamSlug;
use crate::config::SessionConfig;
use serde::Serialize;

/// Terminal outcome of a gate chain for one navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GateResult {
    /// Navigation proceeds
    Allow,
    /// Navigation is redirected, immediately and finally
    Redirect {
        /// Target path
        to: String,
    },
}

impl GateResult {
    /// True iff the outcome allows navigation.
    pub fn is_allow(&self) -> bool {
        matches!(self, GateResult::Allow)
    }

    fn redirect<S: Into<String>>(to: S) -> Self {
        GateResult::Redirect { to: to.into() }
    }
}

/// Everything a gate is allowed to look at.
///
/// Session and identity are passed in explicitly so gates stay pure and
/// unit-testable in isolation.
#[derive(Debug, Clone, Copy)]
pub struct GateContext<'a> {
    /// Session snapshot for this navigation attempt
    pub session: &'a Session,
    /// Identity read out of the session, when one could be read
    pub identity: Option<&'a Identity>,
    /// Session configuration (store keys, super-admin tag)
    pub config: &'a SessionConfig,
}

impl<'a> GateContext<'a> {
    /// The identity's own default landing path; signed-out when no
    /// identity could be read.
    fn own_landing(&self) -> &'static str {
        match self.identity {
            Some(identity) => default_landing(identity.team_slug()),
            None => SIGNED_OUT_PATH,
        }
    }
}

/// A single gate predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Gate {
    /// Require a bearer credential to be present (decodable or not)
    Authenticated,
    /// Keep the employee area employee-only
    NonSuperAdmin,
    /// Keep the super-admin area super-admin-only
    SuperAdmin,
    /// Require the identity's team to match, org head bypasses
    DeptAccess(TeamSlug),
    /// Require an elevated head role; redirect elsewhere to the
    /// caller-supplied fallback (typically the team's own dashboard)
    Head {
        /// Redirect target for non-heads
        fallback: String,
    },
}

impl Gate {
    /// Evaluate this gate against a navigation context.
    pub fn evaluate(&self, ctx: &GateContext<'_>) -> GateResult {
        match self {
            Gate::Authenticated => {
                if ctx.session.is_authenticated() {
                    GateResult::Allow
                } else {
                    GateResult::redirect(SIGNED_OUT_PATH)
                }
            }
            Gate::NonSuperAdmin => {
                if ctx.session.is_super_admin(ctx.config) {
                    GateResult::redirect(SUPER_ADMIN_ROOT)
                } else {
                    GateResult::Allow
                }
            }
            Gate::SuperAdmin => {
                if ctx.session.is_super_admin(ctx.config) {
                    GateResult::Allow
                } else {
                    GateResult::redirect(ctx.own_landing())
                }
            }
            Gate::DeptAccess(target) => match ctx.identity {
                // Org head bypasses every department gate
                Some(identity) if identity.is_org_head() => GateResult::Allow,
                Some(identity) if identity.team_slug() == *target => GateResult::Allow,
                Some(identity) => GateResult::redirect(default_landing(identity.team_slug())),
                None => GateResult::redirect(SIGNED_OUT_PATH),
            },
            Gate::Head { fallback } => match ctx.identity {
                Some(identity) if identity.is_org_head() || identity.is_team_head() => {
                    GateResult::Allow
                }
                _ => GateResult::redirect(fallback.clone()),
            },
        }
    }
}

/// Evaluate an ordered gate chain short-circuit.
///
/// An outer gate's `Allow` is the precondition for evaluating an inner
/// gate; the first redirect wins and is final.
pub fn evaluate_chain(gates: &[Gate], ctx: &GateContext<'_>) -> GateResult {
    for gate in gates {
        match gate.evaluate(ctx) {
            GateResult::Allow => continue,
            redirect => return redirect,
        }
    }
    GateResult::Allow
}
