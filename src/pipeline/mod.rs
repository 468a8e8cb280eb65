//! Pipeline transition engine
//!
//! Lead boards, move commands, the confirmation policy, and the
//! optimistic two-phase protocol against the REST backend.

pub mod backend;
pub mod board;
pub mod command;
pub mod engine;
pub mod lead;
pub mod service;
pub mod stage;

// Re-export commonly used types
pub use backend::{HttpLeadBackend, LeadBackend, LeadRecord, UNASSIGNED_SENTINEL};
pub use board::Board;
pub use command::MoveCommand;
pub use engine::{
    AssignmentEngine, BatchFailure, BatchOutcome, BoardController, MoveKind, MoveOutcome,
    PendingMove, PendingOps, StageEngine, move_kind,
};
pub use lead::{AssignmentSlot, Employee, EmployeeId, Lead, LeadId};
pub use service::PipelineService;
pub use stage::{MarketingStage, PipelineStage, StageOrder};
