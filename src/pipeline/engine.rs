//! Pipeline transition engine
//!
//! Two families of transition:
//!
//! - **Local board moves** (drag-and-drop): forward moves apply
//!   immediately; regressions produce a [`PendingMove`] that touches
//!   nothing until confirmed. Cancelling is dropping the pending value.
//! - **Backend-synchronized moves** (stage change, revert, assignment):
//!   a two-phase protocol. Optimistic local mutation first, backend call
//!   second. Rejection reverses exactly the optimistic mutation via the
//!   paired undo command and surfaces a recoverable error.
//!
//! At most one operation per lead id may await reconciliation; a second
//! one fails fast with `TransitionInFlight`.

use crate::auth::team::TeamSlug;
use crate::pipeline::backend::{LeadBackend, LeadRecord};
use crate::pipeline::board::Board;
use crate::pipeline::command::MoveCommand;
use crate::pipeline::lead::{AssignmentSlot, Employee, EmployeeId, Lead, LeadId};
use crate::pipeline::stage::{PipelineStage, StageOrder};
use crate::utils::error::{CrmError, Result};
use futures::future::join_all;
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// Direction of a stage move relative to pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// Target index ≥ source index: applies without confirmation
    Forward,
    /// Target index < source index: requires explicit confirmation
    Regression,
}

/// Classify a move between two stages.
pub fn move_kind<S: StageOrder>(from: S, to: S) -> MoveKind {
    if to.index() >= from.index() {
        MoveKind::Forward
    } else {
        MoveKind::Regression
    }
}

/// A regression awaiting explicit confirmation. Holds the move; the board
/// is untouched until [`BoardController::confirm`] runs.
#[derive(Debug, Clone)]
pub struct PendingMove<S> {
    command: MoveCommand<S>,
}

impl<S: Copy> PendingMove<S> {
    /// The move awaiting confirmation.
    pub fn command(&self) -> &MoveCommand<S> {
        &self.command
    }
}

/// Outcome of a local move request.
#[derive(Debug)]
pub enum MoveOutcome<S> {
    /// Forward move, already applied; carries the undo command
    Applied(MoveCommand<S>),
    /// Regression; nothing happened yet
    ConfirmationRequired(PendingMove<S>),
}

/// Controller for a local-only visual board.
///
/// Owns its board for the lifetime of one screen; rebuilt from the
/// backend on every full refresh.
#[derive(Debug)]
pub struct BoardController<S: StageOrder> {
    board: Board<S>,
}

impl<S: StageOrder> BoardController<S> {
    /// Wrap an existing board.
    pub fn new(board: Board<S>) -> Self {
        Self { board }
    }

    /// Current board state.
    pub fn board(&self) -> &Board<S> {
        &self.board
    }

    /// Request a move. Forward moves apply immediately; regressions come
    /// back as a pending confirmation without mutating the board.
    pub fn request_move(&mut self, lead_id: LeadId, to: S) -> Result<MoveOutcome<S>> {
        let from = *self
            .board
            .bucket_of(lead_id)
            .ok_or_else(|| CrmError::not_found(format!("lead {} is not on the board", lead_id)))?;
        let command = MoveCommand::new(lead_id, from, to);

        match move_kind(from, to) {
            MoveKind::Forward => {
                let undo = self.board.apply(&command)?;
                Ok(MoveOutcome::Applied(undo))
            }
            MoveKind::Regression => Ok(MoveOutcome::ConfirmationRequired(PendingMove { command })),
        }
    }

    /// Apply a confirmed regression. Validates the lead is still where the
    /// pending move left it.
    pub fn confirm(&mut self, pending: PendingMove<S>) -> Result<MoveCommand<S>> {
        self.board.apply(&pending.command)
    }

    /// One-shot convenience over [`request_move`]/[`confirm`] for callers
    /// that carry the confirmation as a flag.
    ///
    /// [`request_move`]: Self::request_move
    /// [`confirm`]: Self::confirm
    pub fn move_lead(&mut self, lead_id: LeadId, to: S, confirmed: bool) -> Result<MoveCommand<S>> {
        match self.request_move(lead_id, to)? {
            MoveOutcome::Applied(undo) => Ok(undo),
            MoveOutcome::ConfirmationRequired(pending) if confirmed => self.confirm(pending),
            MoveOutcome::ConfirmationRequired(pending) => Err(CrmError::ConfirmationRequired(
                format!(
                    "moving lead {} back to {:?} requires confirmation",
                    lead_id,
                    pending.command().to
                ),
            )),
        }
    }
}

/// Per-lead-id in-flight set.
///
/// At most one optimistic mutation per lead awaits reconciliation at a
/// time; a second request on the same lead fails fast.
#[derive(Debug, Default)]
pub struct PendingOps {
    in_flight: Mutex<HashSet<LeadId>>,
}

impl PendingOps {
    /// Claim a lead for one operation.
    pub fn begin(&self, lead_id: LeadId) -> Result<()> {
        if !self.in_flight.lock().insert(lead_id) {
            return Err(CrmError::TransitionInFlight(format!(
                "lead {} has an operation awaiting reconciliation",
                lead_id
            )));
        }
        Ok(())
    }

    /// Release a lead after reconciliation or rollback.
    pub fn finish(&self, lead_id: LeadId) {
        self.in_flight.lock().remove(&lead_id);
    }

    /// True iff an operation for this lead is still in flight.
    pub fn is_pending(&self, lead_id: LeadId) -> bool {
        self.in_flight.lock().contains(&lead_id)
    }
}

/// Per-item outcome of a multi-lead assignment.
///
/// The batch is an unordered set of independent calls: failures are
/// reported, successes are never rolled back.
#[derive(Debug, Default, Serialize)]
pub struct BatchOutcome {
    /// Leads whose backend call succeeded
    pub succeeded: Vec<LeadId>,
    /// Leads whose backend call failed, with the surfaced error
    pub failed: Vec<BatchFailure>,
}

/// One failed item of a batch.
#[derive(Debug, Serialize)]
pub struct BatchFailure {
    /// Lead the call was for
    pub lead_id: LeadId,
    /// Surfaced error text
    pub error: String,
}

impl BatchOutcome {
    /// True iff no item failed.
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

fn validate_reason(reason: &str) -> Result<()> {
    if reason.trim().is_empty() {
        return Err(CrmError::validation(
            "a human-readable reason is required for stage changes",
        ));
    }
    Ok(())
}

fn build_stage_board(records: Vec<LeadRecord>) -> Board<PipelineStage> {
    let mut board = Board::new(PipelineStage::ALL.iter().copied());
    for record in records {
        let stage = PipelineStage::from_slug(&record.stage).unwrap_or_else(|| {
            warn!(lead = %record.id, stage = %record.stage, "unknown stage slug, bucketing under marketing");
            PipelineStage::Marketing
        });
        let lead = Lead::from(record);
        if let Err(e) = board.insert(&stage, lead) {
            warn!(error = %e, "dropping duplicate lead from backend payload");
        }
    }
    board
}

/// Backend-synchronized engine for cross-department stage moves.
pub struct StageEngine<B> {
    team: TeamSlug,
    board: RwLock<Board<PipelineStage>>,
    pending: PendingOps,
    backend: Arc<B>,
}

impl<B: LeadBackend> StageEngine<B> {
    /// Load a team's board from the backend.
    pub async fn load(team: TeamSlug, backend: Arc<B>) -> Result<Self> {
        let records = backend.fetch_leads(team).await?;
        Ok(Self {
            team,
            board: RwLock::new(build_stage_board(records)),
            pending: PendingOps::default(),
            backend,
        })
    }

    /// The team this board belongs to.
    pub fn team(&self) -> TeamSlug {
        self.team
    }

    /// Snapshot of the current board.
    pub fn board(&self) -> Board<PipelineStage> {
        self.board.read().clone()
    }

    /// Rebuild the board from the backend.
    pub async fn refresh(&self) -> Result<()> {
        let records = self.backend.fetch_leads(self.team).await?;
        *self.board.write() = build_stage_board(records);
        debug!(team = %self.team, "board refreshed from backend");
        Ok(())
    }

    /// Move a lead to another pipeline stage.
    ///
    /// Regressions must arrive confirmed; the check happens before the
    /// optimistic mutation and before any backend call.
    pub async fn change_stage(
        &self,
        lead_id: LeadId,
        to: PipelineStage,
        reason: &str,
        confirmed: bool,
    ) -> Result<()> {
        validate_reason(reason)?;

        let from = *self
            .board
            .read()
            .bucket_of(lead_id)
            .ok_or_else(|| CrmError::not_found(format!("lead {} is not on the board", lead_id)))?;

        if from == to {
            debug!(lead = %lead_id, stage = %to, "stage unchanged, nothing to do");
            return Ok(());
        }

        if move_kind(from, to) == MoveKind::Regression && !confirmed {
            return Err(CrmError::ConfirmationRequired(format!(
                "moving lead {} back from {} to {} requires confirmation",
                lead_id, from, to
            )));
        }

        self.pending.begin(lead_id)?;

        let command = MoveCommand::new(lead_id, from, to);
        let undo = match self.board.write().apply(&command) {
            Ok(undo) => undo,
            Err(e) => {
                self.pending.finish(lead_id);
                return Err(e);
            }
        };

        match self.backend.change_stage(lead_id, to.slug(), reason).await {
            Ok(()) => {
                self.pending.finish(lead_id);
                debug!(lead = %lead_id, from = %from, to = %to, "stage change reconciled");
                Ok(())
            }
            Err(e) => {
                warn!(lead = %lead_id, error = %e, "stage change rejected, rolling back");
                let rollback = self.board.write().apply(&undo);
                self.pending.finish(lead_id);
                rollback?;
                Err(e)
            }
        }
    }

    /// Move a lead back to the stage preceding its current one.
    ///
    /// The mandatory reason is the confirmation artifact for this
    /// regression; the backend owns the actual stage bookkeeping.
    pub async fn revert(&self, lead_id: LeadId, reason: &str) -> Result<()> {
        validate_reason(reason)?;

        let from = *self
            .board
            .read()
            .bucket_of(lead_id)
            .ok_or_else(|| CrmError::not_found(format!("lead {} is not on the board", lead_id)))?;

        let index = from.index();
        if index == 0 {
            return Err(CrmError::bad_request(format!(
                "lead {} is already at the first pipeline stage",
                lead_id
            )));
        }
        let to = PipelineStage::ALL[index - 1];

        self.pending.begin(lead_id)?;

        let command = MoveCommand::new(lead_id, from, to);
        let undo = match self.board.write().apply(&command) {
            Ok(undo) => undo,
            Err(e) => {
                self.pending.finish(lead_id);
                return Err(e);
            }
        };

        match self.backend.revert(lead_id, reason).await {
            Ok(()) => {
                self.pending.finish(lead_id);
                debug!(lead = %lead_id, from = %from, to = %to, "revert reconciled");
                Ok(())
            }
            Err(e) => {
                warn!(lead = %lead_id, error = %e, "revert rejected, rolling back");
                let rollback = self.board.write().apply(&undo);
                self.pending.finish(lead_id);
                rollback?;
                Err(e)
            }
        }
    }
}

fn apply_assignment(
    board: &mut Board<AssignmentSlot>,
    command: &MoveCommand<AssignmentSlot>,
) -> Result<MoveCommand<AssignmentSlot>> {
    board.ensure_bucket(command.to);
    let undo = board.apply(command)?;
    board.update_lead(command.lead_id, |lead| {
        lead.assigned_employee_id = command.to.employee_id();
    })?;
    Ok(undo)
}

/// Backend-synchronized engine for the assignment board: one bucket per
/// employee plus the unassigned bucket.
pub struct AssignmentEngine<B> {
    team: TeamSlug,
    board: RwLock<Board<AssignmentSlot>>,
    employees: RwLock<Vec<Employee>>,
    pending: PendingOps,
    backend: Arc<B>,
}

impl<B: LeadBackend> AssignmentEngine<B> {
    /// Load a team's assignment board from the backend.
    pub async fn load(team: TeamSlug, backend: Arc<B>) -> Result<Self> {
        let employees = backend.fetch_employees(team).await?;
        let records = backend.fetch_leads(team).await?;
        Ok(Self {
            team,
            board: RwLock::new(Self::build_board(&employees, records)),
            employees: RwLock::new(employees),
            pending: PendingOps::default(),
            backend,
        })
    }

    fn build_board(employees: &[Employee], records: Vec<LeadRecord>) -> Board<AssignmentSlot> {
        let mut board = Board::new(
            std::iter::once(AssignmentSlot::Unassigned).chain(
                employees
                    .iter()
                    .map(|employee| AssignmentSlot::Employee(employee.id)),
            ),
        );
        for record in records {
            let slot = AssignmentSlot::from(record.assigned_employee_id);
            // Assignees missing from the employee list still get a bucket:
            // the one-bucket invariant is unconditional
            board.ensure_bucket(slot);
            let lead = Lead::from(record);
            if let Err(e) = board.insert(&slot, lead) {
                warn!(error = %e, "dropping duplicate lead from backend payload");
            }
        }
        board
    }

    /// The team this board belongs to.
    pub fn team(&self) -> TeamSlug {
        self.team
    }

    /// Snapshot of the current board.
    pub fn board(&self) -> Board<AssignmentSlot> {
        self.board.read().clone()
    }

    /// Assignment targets, as last fetched.
    pub fn employees(&self) -> Vec<Employee> {
        self.employees.read().clone()
    }

    /// Rebuild the board and employee list from the backend.
    pub async fn refresh(&self) -> Result<()> {
        let employees = self.backend.fetch_employees(self.team).await?;
        let records = self.backend.fetch_leads(self.team).await?;
        *self.board.write() = Self::build_board(&employees, records);
        *self.employees.write() = employees;
        debug!(team = %self.team, "assignment board refreshed from backend");
        Ok(())
    }

    /// Move a lead to another assignment slot.
    ///
    /// Moving from an employee bucket back to the unassigned bucket is a
    /// regression and must arrive confirmed before either the optimistic
    /// mutation or the backend call happens.
    pub async fn assign(
        &self,
        lead_id: LeadId,
        target: AssignmentSlot,
        confirmed: bool,
    ) -> Result<()> {
        let from = *self
            .board
            .read()
            .bucket_of(lead_id)
            .ok_or_else(|| CrmError::not_found(format!("lead {} is not on the board", lead_id)))?;

        if from == target {
            debug!(lead = %lead_id, "assignment unchanged, nothing to do");
            return Ok(());
        }

        let regression = matches!(target, AssignmentSlot::Unassigned)
            && matches!(from, AssignmentSlot::Employee(_));
        if regression && !confirmed {
            return Err(CrmError::ConfirmationRequired(format!(
                "unassigning lead {} requires confirmation",
                lead_id
            )));
        }

        self.pending.begin(lead_id)?;

        let command = MoveCommand::new(lead_id, from, target);
        let undo = match apply_assignment(&mut self.board.write(), &command) {
            Ok(undo) => undo,
            Err(e) => {
                self.pending.finish(lead_id);
                return Err(e);
            }
        };

        match self.backend.assign(lead_id, target.employee_id()).await {
            Ok(()) => {
                self.pending.finish(lead_id);
                debug!(lead = %lead_id, target = %target, "assignment reconciled");
                Ok(())
            }
            Err(e) => {
                warn!(lead = %lead_id, error = %e, "assignment rejected, rolling back");
                let rollback = apply_assignment(&mut self.board.write(), &undo);
                self.pending.finish(lead_id);
                rollback?;
                Err(e)
            }
        }
    }

    /// Assign several leads to one employee in a single user action.
    ///
    /// An unordered batch of independent backend calls: per-item outcomes
    /// are reported, and calls that already succeeded stay applied when a
    /// later one fails. There is no cross-call atomicity.
    pub async fn assign_many(&self, lead_ids: &[LeadId], assignee: EmployeeId) -> BatchOutcome {
        let tasks = lead_ids.iter().copied().map(|lead_id| async move {
            let result = self
                .assign(lead_id, AssignmentSlot::Employee(assignee), false)
                .await;
            (lead_id, result)
        });

        let mut outcome = BatchOutcome::default();
        for (lead_id, result) in join_all(tasks).await {
            match result {
                Ok(()) => outcome.succeeded.push(lead_id),
                Err(e) => outcome.failed.push(BatchFailure {
                    lead_id,
                    error: e.to_string(),
                }),
            }
        }

        if !outcome.all_succeeded() {
            warn!(
                succeeded = outcome.succeeded.len(),
                failed = outcome.failed.len(),
                "batch assignment partially failed"
            );
        }
        outcome
    }
}
