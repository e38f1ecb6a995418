//! Dioxus components.

mod plan_header;

pub use plan_header::{PlanHeader, PlanHeaderServices};
