//! Outbound ports used by the billing plan header.
//!
//! The subscription context is not a port: it is pushed into the controller
//! as a read-only snapshot.

mod analytics;
mod billing_api;
mod error;
mod navigator;
mod notifier;

pub use analytics::AnalyticsPort;
pub use billing_api::BillingApiPort;
pub use error::BillingError;
pub use navigator::NavigatorPort;
pub use notifier::NotifierPort;

#[cfg(any(test, feature = "testing"))]
pub use analytics::MockAnalyticsPort;
#[cfg(any(test, feature = "testing"))]
pub use billing_api::MockBillingApiPort;
#[cfg(any(test, feature = "testing"))]
pub use navigator::MockNavigatorPort;
#[cfg(any(test, feature = "testing"))]
pub use notifier::MockNotifierPort;
