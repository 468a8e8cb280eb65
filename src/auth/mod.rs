//! Access control core
//!
//! Identity normalization, team resolution, session reading, and the
//! composable route guards built from them.

pub mod guards;
pub mod identity;
pub mod normalize;
pub mod session;
pub mod team;

// Re-export commonly used types
pub use guards::{Gate, GateContext, GateResult, default_landing, evaluate_chain};
pub use identity::{Identity, SessionClaims};
pub use normalize::{normalize, normalize_opt};
pub use session::{MemorySessionStore, Session, SessionStore};
pub use team::{TeamSlug, resolve_team_slug};
