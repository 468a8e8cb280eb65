//! Pipeline board and transition endpoints

use crate::auth::team::TeamSlug;
use crate::pipeline::{
    AssignmentSlot, Board, Employee, EmployeeId, Lead, LeadId, MarketingStage, PipelineStage,
};
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::{CrmError, Result};
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Configure pipeline routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/v1/pipeline/{team}")
            .route("/board", web::get().to(stage_board))
            .route("/refresh", web::post().to(refresh))
            .route("/leads/{lead_id}/stage", web::post().to(change_stage))
            .route("/leads/{lead_id}/revert", web::post().to(revert))
            .route("/leads/{lead_id}/assign", web::post().to(assign))
            .route("/assignments", web::get().to(assignment_board))
            .route("/assignments/batch", web::post().to(assign_batch))
            .route("/employees", web::get().to(employees)),
    )
    .service(
        web::scope("/v1/marketing/{team}")
            .route("/board", web::get().to(marketing_board))
            .route("/refresh", web::post().to(marketing_refresh))
            .route("/leads/{lead_id}/move", web::post().to(marketing_move)),
    );
}

fn parse_team(team: &str) -> Result<TeamSlug> {
    TeamSlug::from_slug(team)
        .ok_or_else(|| CrmError::bad_request(format!("unknown team slug: {}", team)))
}

/// One bucket of a board, as presented to clients.
#[derive(Debug, Serialize)]
struct BucketView<K> {
    key: K,
    leads: Vec<Lead>,
}

fn board_view<K: Clone + Eq + Serialize>(board: &Board<K>) -> Vec<BucketView<K>> {
    board
        .keys()
        .map(|key| BucketView {
            key: key.clone(),
            leads: board.bucket(key).unwrap_or_default().to_vec(),
        })
        .collect()
}

/// The cross-department stage board for a team
async fn stage_board(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let team = parse_team(&path)?;
    let engine = state.pipeline.stage_engine(team).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(board_view(&engine.board()))))
}

/// Rebuild a team's boards from the backend
async fn refresh(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse> {
    let team = parse_team(&path)?;
    let engine = state.pipeline.stage_engine(team).await?;
    engine.refresh().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(board_view(&engine.board()))))
}

/// Stage change request body
#[derive(Debug, Deserialize)]
struct StageChangeBody {
    to: PipelineStage,
    reason: String,
    #[serde(default)]
    confirmed: bool,
}

/// Move a lead to another pipeline stage
async fn change_stage(
    state: web::Data<AppState>,
    path: web::Path<(String, Uuid)>,
    body: web::Json<StageChangeBody>,
) -> Result<HttpResponse> {
    let (team, lead_id) = path.into_inner();
    let team = parse_team(&team)?;
    let engine = state.pipeline.stage_engine(team).await?;

    engine
        .change_stage(LeadId(lead_id), body.to, &body.reason, body.confirmed)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(board_view(&engine.board()))))
}

/// Revert request body
#[derive(Debug, Deserialize)]
struct RevertBody {
    reason: String,
}

/// Move a lead back to the stage before its current one
async fn revert(
    state: web::Data<AppState>,
    path: web::Path<(String, Uuid)>,
    body: web::Json<RevertBody>,
) -> Result<HttpResponse> {
    let (team, lead_id) = path.into_inner();
    let team = parse_team(&team)?;
    let engine = state.pipeline.stage_engine(team).await?;

    engine.revert(LeadId(lead_id), &body.reason).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(board_view(&engine.board()))))
}

/// Assignment request body; a missing assignee unassigns.
#[derive(Debug, Deserialize)]
struct AssignBody {
    #[serde(default)]
    assignee: Option<EmployeeId>,
    #[serde(default)]
    confirmed: bool,
}

/// Mutate a lead's assignment
async fn assign(
    state: web::Data<AppState>,
    path: web::Path<(String, Uuid)>,
    body: web::Json<AssignBody>,
) -> Result<HttpResponse> {
    let (team, lead_id) = path.into_inner();
    let team = parse_team(&team)?;
    let engine = state.pipeline.assignment_engine(team).await?;

    engine
        .assign(
            LeadId(lead_id),
            AssignmentSlot::from(body.assignee),
            body.confirmed,
        )
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(board_view(&engine.board()))))
}

/// The assignment board for a team
async fn assignment_board(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let team = parse_team(&path)?;
    let engine = state.pipeline.assignment_engine(team).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(board_view(&engine.board()))))
}

/// Batch assignment request body
#[derive(Debug, Deserialize)]
struct BatchAssignBody {
    lead_ids: Vec<LeadId>,
    assignee: EmployeeId,
}

/// Assignment targets for a team
async fn employees(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse> {
    let team = parse_team(&path)?;
    let engine = state.pipeline.assignment_engine(team).await?;
    let employees: Vec<Employee> = engine.employees();
    Ok(HttpResponse::Ok().json(ApiResponse::success(employees)))
}

/// Assign several leads to one employee in a single action.
///
/// Per-item outcomes come back in the response; succeeded calls stay
/// applied even when others fail.
async fn assign_batch(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<BatchAssignBody>,
) -> Result<HttpResponse> {
    let team = parse_team(&path)?;
    let engine = state.pipeline.assignment_engine(team).await?;

    let outcome = engine.assign_many(&body.lead_ids, body.assignee).await;
    Ok(HttpResponse::Ok().json(ApiResponse::success(outcome)))
}

/// The local marketing board for a team
async fn marketing_board(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let team = parse_team(&path)?;
    let controller = state.pipeline.marketing_board(team).await?;
    let view = board_view(controller.lock().board());
    Ok(HttpResponse::Ok().json(ApiResponse::success(view)))
}

/// Drop the cached marketing board so the next read rebuilds it
async fn marketing_refresh(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let team = parse_team(&path)?;
    state.pipeline.reset_marketing_board(team);
    let controller = state.pipeline.marketing_board(team).await?;
    let view = board_view(controller.lock().board());
    Ok(HttpResponse::Ok().json(ApiResponse::success(view)))
}

/// Local move request body
#[derive(Debug, Deserialize)]
struct MarketingMoveBody {
    to: MarketingStage,
    #[serde(default)]
    confirmed: bool,
}

/// Move a lead on the local marketing board.
///
/// Forward moves apply immediately; regressions come back as
/// `CONFIRMATION_REQUIRED` until the client re-posts with `confirmed`.
async fn marketing_move(
    state: web::Data<AppState>,
    path: web::Path<(String, Uuid)>,
    body: web::Json<MarketingMoveBody>,
) -> Result<HttpResponse> {
    let (team, lead_id) = path.into_inner();
    let team = parse_team(&team)?;
    let controller = state.pipeline.marketing_board(team).await?;

    let view = {
        let mut controller = controller.lock();
        controller.move_lead(LeadId(lead_id), body.to, body.confirmed)?;
        board_view(controller.board())
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(view)))
}
