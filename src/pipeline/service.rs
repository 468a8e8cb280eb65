//! Per-team engine registry
//!
//! Boards are owned by one page controller per screen; this registry
//! hands the HTTP layer the engine for a team, loading it from the
//! backend on first use.

use crate::auth::team::TeamSlug;
use crate::pipeline::backend::LeadBackend;
use crate::pipeline::board::Board;
use crate::pipeline::engine::{AssignmentEngine, BoardController, StageEngine};
use crate::pipeline::lead::Lead;
use crate::pipeline::stage::{MarketingStage, StageOrder};
use crate::utils::error::Result;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::warn;

/// Registry of per-team boards and engines.
pub struct PipelineService<B: LeadBackend + 'static> {
    backend: Arc<B>,
    stage_engines: DashMap<TeamSlug, Arc<StageEngine<B>>>,
    assignment_engines: DashMap<TeamSlug, Arc<AssignmentEngine<B>>>,
    marketing_boards: DashMap<TeamSlug, Arc<Mutex<BoardController<MarketingStage>>>>,
}

impl<B: LeadBackend + 'static> PipelineService<B> {
    /// Create a registry over a backend client.
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            stage_engines: DashMap::new(),
            assignment_engines: DashMap::new(),
            marketing_boards: DashMap::new(),
        }
    }

    /// The stage engine for a team, loading its board on first use.
    pub async fn stage_engine(&self, team: TeamSlug) -> Result<Arc<StageEngine<B>>> {
        if let Some(engine) = self.stage_engines.get(&team) {
            return Ok(engine.clone());
        }
        let engine = Arc::new(StageEngine::load(team, self.backend.clone()).await?);
        Ok(self.stage_engines.entry(team).or_insert(engine).clone())
    }

    /// The assignment engine for a team, loading its board on first use.
    pub async fn assignment_engine(&self, team: TeamSlug) -> Result<Arc<AssignmentEngine<B>>> {
        if let Some(engine) = self.assignment_engines.get(&team) {
            return Ok(engine.clone());
        }
        let engine = Arc::new(AssignmentEngine::load(team, self.backend.clone()).await?);
        Ok(self
            .assignment_engines
            .entry(team)
            .or_insert(engine)
            .clone())
    }

    /// The local marketing board for a team, loading it on first use.
    pub async fn marketing_board(
        &self,
        team: TeamSlug,
    ) -> Result<Arc<Mutex<BoardController<MarketingStage>>>> {
        if let Some(board) = self.marketing_boards.get(&team) {
            return Ok(board.clone());
        }

        let records = self.backend.fetch_leads(team).await?;
        let mut board = Board::new(MarketingStage::ALL.iter().copied());
        for record in records {
            let stage = MarketingStage::from_slug(&record.stage).unwrap_or_else(|| {
                warn!(lead = %record.id, stage = %record.stage, "unknown marketing stage, bucketing under contacted");
                MarketingStage::Contacted
            });
            let lead = Lead::from(record);
            if let Err(e) = board.insert(&stage, lead) {
                warn!(error = %e, "dropping duplicate lead from backend payload");
            }
        }

        let controller = Arc::new(Mutex::new(BoardController::new(board)));
        Ok(self
            .marketing_boards
            .entry(team)
            .or_insert(controller)
            .clone())
    }

    /// Drop a team's cached marketing board so the next access rebuilds it.
    pub fn reset_marketing_board(&self, team: TeamSlug) {
        self.marketing_boards.remove(&team);
    }
}
