//! Billing backend port.

use notiflow_shared::{CheckoutRequest, CheckoutResponse};

use super::BillingError;

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait::async_trait]
pub trait BillingApiPort: Send + Sync {
    /// `POST` a checkout request to `path`.
    async fn checkout(
        &self,
        path: &str,
        request: CheckoutRequest,
    ) -> Result<CheckoutResponse, BillingError>;

    /// `GET /v1/billing/portal`: URL of the subscription management portal.
    async fn portal_url(&self) -> Result<String, BillingError>;
}
