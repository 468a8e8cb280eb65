//! Session boundary
//!
//! Reads the opaque session store and extracts the authenticated identity.

pub mod reader;
pub mod store;

// Re-export public types
pub use reader::Session;
pub use store::{MemorySessionStore, SessionStore};
