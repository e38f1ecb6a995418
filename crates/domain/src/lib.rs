//! Notiflow domain - core types shared by the engine and the player.
//!
//! ## Structure
//!
//! - `ids` - UUID-backed identifier newtypes
//! - `entities` - workflows, steps, control values and preferences
//! - `value_objects` - validated names and descriptions
//! - `billing` - subscription tiers, intervals and plan constants

extern crate self as notiflow_domain;

pub mod billing;
pub mod common;
pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use entities::{
    AllChannelsPreference, ChannelPreference, ChannelPreferences, ControlValues,
    ControlValuesLevel, MessageFilter, PreferencesSnapshot, PreferencesSource, StepControl,
    StepType, StepVariant, Workflow, WorkflowOrigin, WorkflowPreferences, WorkflowStep,
    WorkflowType,
};

pub use billing::{ApiServiceLevel, BillingInterval, SubscriptionContext, TrialInfo};
pub use common::slugify;
pub use error::DomainError;
pub use ids::{
    ControlValuesId, EnvironmentId, NotificationGroupId, OrganizationId, StepTemplateId, UserId,
    WorkflowId,
};
pub use value_objects::{Description, WorkflowName};
