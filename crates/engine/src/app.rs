//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    ports::{ClockPort, ControlValuesRepo, PreferencesRepo, WorkflowRepo},
    sqlite::SqliteStore,
};
use crate::use_cases;

/// Main application state.
///
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
}

/// Port implementations the use cases are built from.
pub struct Repositories {
    pub workflow: Arc<dyn WorkflowRepo>,
    pub control_values: Arc<dyn ControlValuesRepo>,
    pub preferences: Arc<dyn PreferencesRepo>,
}

impl Repositories {
    pub fn sqlite(store: &SqliteStore) -> Self {
        Self {
            workflow: Arc::new(store.workflows()),
            control_values: Arc::new(store.control_values()),
            preferences: Arc::new(store.preferences()),
        }
    }
}

/// Container for all use cases.
pub struct UseCases {
    pub workflow: use_cases::WorkflowUseCases,
    pub preferences: use_cases::PreferencesUseCases,
}

impl App {
    pub fn new(repositories: Repositories, clock: Arc<dyn ClockPort>) -> Self {
        let get_preferences = Arc::new(use_cases::preferences::GetPreferences::new(
            repositories.preferences.clone(),
        ));

        let workflow = use_cases::WorkflowUseCases::new(
            Arc::new(use_cases::workflow::GetWorkflow::new(
                repositories.workflow.clone(),
                repositories.control_values.clone(),
                get_preferences.clone(),
            )),
            Arc::new(use_cases::workflow::CreateWorkflow::new(
                repositories.workflow.clone(),
                clock.clone(),
            )),
            Arc::new(use_cases::workflow::UpdateWorkflow::new(
                repositories.workflow.clone(),
                clock,
            )),
        );

        Self {
            repositories,
            use_cases: UseCases {
                workflow,
                preferences: use_cases::PreferencesUseCases::new(get_preferences),
            },
        }
    }
}
