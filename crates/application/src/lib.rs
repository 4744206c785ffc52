pub mod loader;
pub mod session;

pub use loader::RosterLoader;
pub use session::{AssignmentSession, RosterSnapshot, SessionState, SlotSelection};
