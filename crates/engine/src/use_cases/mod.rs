//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.
//! Use cases orchestrate across repository ports to fulfill user stories.

pub mod preferences;
pub mod session;
pub mod validation;
pub mod workflow;

// Re-export main types
pub use preferences::PreferencesUseCases;
pub use session::UserSession;
pub use workflow::WorkflowUseCases;
