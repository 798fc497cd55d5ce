//! Shared HTTP plumbing: application state and the system router.

mod health;
pub mod router;
pub mod state;

pub use health::mark_started;
pub use state::{ApiState, ApiStateBuilder, ApiStateError};
