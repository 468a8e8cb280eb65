//! Helper functions for middleware

use crate::auth::guards::{Gate, default_landing};
use crate::auth::session::Session;
use crate::auth::team::TeamSlug;
use actix_web::http::header::HeaderMap;

/// Assemble the session snapshot from request headers.
///
/// The three session keys travel with the request: the bearer credential
/// in `Authorization`, the role tag in `X-Role-Tag`, and the serialized
/// identity record in `X-Identity`. A `session` cookie is honored as an
/// alternative credential carrier.
pub fn session_from_headers(headers: &HeaderMap) -> Session {
    let mut token = None;

    if let Some(auth_header) = headers.get("authorization") {
        if let Ok(auth_str) = auth_header.to_str() {
            if let Some(stripped) = auth_str.strip_prefix("Bearer ") {
                token = Some(stripped.to_string());
            }
        }
    }

    if token.is_none() {
        if let Some(cookie_header) = headers.get("cookie") {
            if let Ok(cookie_str) = cookie_header.to_str() {
                for cookie in cookie_str.split(';') {
                    if let Some(stripped) = cookie.trim().strip_prefix("session=") {
                        token = Some(stripped.to_string());
                        break;
                    }
                }
            }
        }
    }

    let role_tag = headers
        .get("x-role-tag")
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string());

    let identity_record = headers
        .get("x-identity")
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string());

    Session {
        token,
        role_tag,
        identity_record,
    }
}

/// Check if a route is public (no gates evaluated)
pub fn is_public_route(path: &str) -> bool {
    const PUBLIC_ROUTES: &[&str] = &["/health", "/signin", "/v1/navigate"];

    PUBLIC_ROUTES.iter().any(|&route| path.starts_with(route))
}

/// Resolve the gate chain guarding a path.
///
/// The table is ordered and prefix-based; the first matching rule wins.
/// Head-gated sub-pages add the elevated-role gate with the team's own
/// dashboard as fallback.
pub fn gates_for_path(path: &str) -> Vec<Gate> {
    if is_public_route(path) {
        return vec![];
    }

    if path.starts_with("/superadmin") || path.starts_with("/v1/admin") {
        return vec![Gate::Authenticated, Gate::SuperAdmin];
    }

    let team_scoped = path
        .strip_prefix("/employee/")
        .or_else(|| path.strip_prefix("/v1/pipeline/"))
        .or_else(|| path.strip_prefix("/v1/marketing/"));

    if let Some(rest) = team_scoped {
        let mut segments = rest.split('/');
        if let Some(slug) = segments.next().and_then(TeamSlug::from_slug) {
            let mut gates = vec![
                Gate::Authenticated,
                Gate::NonSuperAdmin,
                Gate::DeptAccess(slug),
            ];
            if segments.any(|segment| segment == "reports") {
                gates.push(Gate::Head {
                    fallback: default_landing(slug).to_string(),
                });
            }
            return gates;
        }
    }

    // Everything else is employee-area chrome
    vec![Gate::Authenticated, Gate::NonSuperAdmin]
}
