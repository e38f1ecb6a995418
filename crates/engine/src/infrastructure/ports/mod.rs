//! Port traits at the engine's infrastructure boundary.
//!
//! Use cases depend only on these traits:
//! - storage of workflows, control values and preferences
//! - the clock

mod clock;
mod error;
mod repos;

pub use clock::ClockPort;
pub use error::RepoError;
pub use repos::{ControlValuesQuery, ControlValuesRepo, PreferencesRepo, WorkflowRepo};

// Mocks exist only in test builds
#[cfg(test)]
pub use clock::MockClockPort;
#[cfg(test)]
pub use repos::{MockControlValuesRepo, MockPreferencesRepo, MockWorkflowRepo};
