//! Billing plan header: subscription state, checkout, portal and plan display.

mod controller;
mod flags;
mod state;
mod view;

pub use controller::BillingController;
pub use flags::{CheckoutMode, FeatureFlags};
pub use state::{
    CheckoutOutcome, MountOutcome, PlanHeaderState, SubscriptionPhase, UNEXPECTED_ERROR,
};
pub use view::{ButtonVariant, EmbeddedCheckoutView, PlanAction, PlanColumn, PlanHeaderView};

/// Analytics event for the business column's manage button.
pub const MANAGE_SUBSCRIPTION_EVENT: &str = "Manage Subscription Clicked - Plans List";

/// Analytics event for the enterprise column's contact-sales button.
pub const CONTACT_SALES_EVENT: &str = "Pricing Enterprise Contact Us Clicked - Plans List";

pub const CHECKOUT_SESSION_PATH: &str = "/v1/billing/checkout-session";
pub const CHECKOUT_PATH: &str = "/v1/billing/checkout";
pub const PORTAL_PATH: &str = "/v1/billing/portal";
