//! Identity and navigation endpoints

use crate::auth::guards::{GateContext, SIGNED_OUT_PATH, default_landing, evaluate_chain};
use crate::auth::identity::Identity;
use crate::auth::team::TeamSlug;
use crate::server::middleware::{gates_for_path, session_from_headers};
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::CrmError;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configure identity routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/v1/identity")
            .route("/me", web::get().to(whoami))
            .route("/landing", web::get().to(landing)),
    )
    .route("/v1/navigate", web::post().to(navigate));
}

/// Identity as presented to clients, with the derived designations.
#[derive(Debug, Serialize)]
struct IdentityView {
    #[serde(flatten)]
    identity: Identity,
    team_slug: TeamSlug,
    org_head: bool,
    team_head: bool,
}

fn read_identity(req: &HttpRequest) -> Result<Identity, CrmError> {
    let session = session_from_headers(req.headers());
    session
        .read_identity()
        .ok_or_else(|| CrmError::session("no identity in session"))
}

/// The authenticated identity with its derived team designation
async fn whoami(req: HttpRequest) -> Result<HttpResponse, CrmError> {
    let identity = read_identity(&req)?;
    let view = IdentityView {
        team_slug: identity.team_slug(),
        org_head: identity.is_org_head(),
        team_head: identity.is_team_head(),
        identity,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(view)))
}

/// Landing payload
#[derive(Debug, Serialize)]
struct LandingView {
    path: String,
}

/// The identity's default landing path
async fn landing(req: HttpRequest) -> Result<HttpResponse, CrmError> {
    let session = session_from_headers(req.headers());
    let path = match session.read_identity() {
        Some(identity) => default_landing(identity.team_slug()).to_string(),
        None => SIGNED_OUT_PATH.to_string(),
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(LandingView { path })))
}

/// Navigation pre-flight request
#[derive(Debug, Deserialize)]
struct NavigateRequest {
    path: String,
}

/// Evaluate the gate chain for an arbitrary path.
///
/// Lets external shells pre-flight navigation; the decision mirrors what
/// the guard middleware would do for the same request.
async fn navigate(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<NavigateRequest>,
) -> Result<HttpResponse, CrmError> {
    let session = session_from_headers(req.headers());
    let identity = session.read_identity();
    let ctx = GateContext {
        session: &session,
        identity: identity.as_ref(),
        config: state.config.session(),
    };

    let gates = gates_for_path(&body.path);
    let result = evaluate_chain(&gates, &ctx);
    debug!(path = %body.path, allowed = result.is_allow(), "navigation pre-flight");

    Ok(HttpResponse::Ok().json(ApiResponse::success(result)))
}

#[cfg(test)]
mod tests {
    use crate::auth::guards::GateResult;

    #[test]
    fn test_gate_result_wire_shape() {
        let allow = serde_json::to_value(GateResult::Allow).unwrap();
        assert_eq!(allow["outcome"], "allow");

        let redirect = serde_json::to_value(GateResult::Redirect {
            to: "/signin".to_string(),
        })
        .unwrap();
        assert_eq!(redirect["outcome"], "redirect");
        assert_eq!(redirect["to"], "/signin");
    }
}
