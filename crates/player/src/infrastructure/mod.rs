//! Adapters for the billing ports.

mod analytics;
mod billing_api;
mod navigator;
mod toasts;

pub use analytics::TracingAnalytics;
pub use billing_api::{BillingApiConfig, ReqwestBillingApi};
pub use navigator::LocationNavigator;
pub use toasts::{Toast, ToastKind, ToastQueue};
