//! Feature flags read by the plan header.

use super::{CHECKOUT_PATH, CHECKOUT_SESSION_PATH};

/// How checkout is completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutMode {
    /// The backend returns a hosted checkout page to navigate to.
    HostedRedirect,
    /// The backend returns a client secret for the in-page payment form.
    EmbeddedSecret,
}

/// Flags supplied once when the header is constructed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureFlags {
    pub stripe_checkout_enabled: bool,
    pub improved_billing_enabled: bool,
}

impl FeatureFlags {
    pub fn checkout_mode(&self) -> CheckoutMode {
        if self.stripe_checkout_enabled {
            CheckoutMode::HostedRedirect
        } else {
            CheckoutMode::EmbeddedSecret
        }
    }

    pub fn checkout_path(&self) -> &'static str {
        match self.checkout_mode() {
            CheckoutMode::HostedRedirect => CHECKOUT_SESSION_PATH,
            CheckoutMode::EmbeddedSecret => CHECKOUT_PATH,
        }
    }
}
