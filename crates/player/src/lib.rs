//! Notiflow Player - billing plan header.
//!
//! ## Structure
//!
//! - `ports` - Outbound boundaries (billing backend, navigation, toasts, analytics)
//! - `application` - Plan header state machine, controller and view model
//! - `infrastructure` - reqwest billing client and platform adapters
//! - `ui` - Dioxus `PlanHeader` component

pub mod application;
pub mod infrastructure;
pub mod ports;
pub mod ui;

pub use application::billing::{BillingController, FeatureFlags, PlanHeaderState, PlanHeaderView};
pub use ui::{PlanHeader, PlanHeaderServices};
