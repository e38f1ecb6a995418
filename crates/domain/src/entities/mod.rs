//! Domain entities - Core business objects with identity

mod control_values;
mod preferences;
mod step;
mod workflow;

pub use control_values::{ControlValues, ControlValuesLevel};
pub use preferences::{
    AllChannelsPreference, ChannelPreference, ChannelPreferences, PreferencesSnapshot,
    PreferencesSource, WorkflowPreferences,
};
pub use step::{MessageFilter, StepControl, StepType, StepVariant, WorkflowStep};
pub use workflow::{Workflow, WorkflowOrigin, WorkflowType};
