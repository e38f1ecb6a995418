//! Billing backend payloads used by the plan header.

use notiflow_domain::{ApiServiceLevel, BillingInterval};
use serde::{Deserialize, Serialize};

/// Body of `POST /v1/billing/checkout` and `/v1/billing/checkout-session`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub billing_interval: BillingInterval,
    pub api_service_level: ApiServiceLevel,
}

/// Checkout result: either a hosted page to redirect to, or a client secret
/// for the embedded payment form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CheckoutResponse {
    Redirect {
        #[serde(rename = "stripeCheckoutUrl", alias = "redirectUrl")]
        stripe_checkout_url: String,
    },
    ClientSecret {
        #[serde(rename = "clientSecret")]
        client_secret: String,
    },
}
