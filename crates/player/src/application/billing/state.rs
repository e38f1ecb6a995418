//! Plan header state machine.
//!
//! Pure state: every transition returns what the caller has to do next
//! (issue a request, navigate, show a toast) instead of doing it. The
//! current tier is a two-source merge of the remote subscription snapshot
//! and an optimistic local tier set after a successful checkout. A refresh
//! that differs from the stored snapshot drops the optimistic tier, so the
//! remote side always wins eventually.

use notiflow_domain::{ApiServiceLevel, BillingInterval, SubscriptionContext};
use notiflow_shared::{CheckoutRequest, CheckoutResponse};

use super::CheckoutMode;
use crate::ports::BillingError;

/// Fallback toast text when an error carries no message.
pub const UNEXPECTED_ERROR: &str = "Unexpected error";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionPhase {
    Loading,
    Free,
    TrialActive,
    BusinessActive,
    EnterpriseActive,
}

/// What to do with a checkout response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Leave the page for the hosted checkout.
    Redirect(String),
    /// The embedded payment form is open with a fresh intent secret.
    EmbeddedReady,
    /// The interval changed while the request was in flight. The response
    /// was discarded and this request has to be sent instead.
    Reissue(CheckoutRequest),
}

/// Outcome of reading `?result=` after a hosted checkout redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountOutcome {
    Succeeded,
    Canceled,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanHeaderState {
    remote: Option<SubscriptionContext>,
    optimistic: Option<ApiServiceLevel>,
    billing_interval: BillingInterval,
    interval_chosen: bool,
    /// Interval the in-flight checkout request was issued for.
    checkout_interval: Option<BillingInterval>,
    portal_in_flight: bool,
    intent_secret: Option<String>,
    upgrade_open: bool,
    contact_sales: Option<ApiServiceLevel>,
    mount_reconciled: bool,
}

impl PlanHeaderState {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Subscription state
    // =========================================================================

    /// Merge a subscription snapshot. Snapshots still loading are ignored.
    ///
    /// The optimistic tier survives the first snapshot and repeats of the
    /// stored one; only a changed snapshot replaces it.
    pub fn apply_subscription(&mut self, subscription: SubscriptionContext) {
        if subscription.is_loading {
            return;
        }
        if !self.interval_chosen {
            self.billing_interval = subscription.billing_interval.unwrap_or_default();
            self.interval_chosen = true;
        }
        if self.remote.is_some_and(|stored| stored != subscription) {
            self.optimistic = None;
        }
        self.remote = Some(subscription);
    }

    /// Effective tier: optimistic first, then remote, then free.
    pub fn tier(&self) -> ApiServiceLevel {
        self.optimistic
            .or(self.remote.map(|s| s.api_service_level))
            .unwrap_or_default()
    }

    pub fn phase(&self) -> SubscriptionPhase {
        if let Some(tier) = self.optimistic {
            return phase_for_tier(tier);
        }
        match self.remote {
            None => SubscriptionPhase::Loading,
            Some(s) if s.api_service_level == ApiServiceLevel::Enterprise => {
                SubscriptionPhase::EnterpriseActive
            }
            Some(s) if s.trial.is_active => SubscriptionPhase::TrialActive,
            Some(s) => phase_for_tier(s.api_service_level),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase() == SubscriptionPhase::Loading
    }

    /// A paid plan is active and not in trial. An optimistic upgrade counts.
    pub fn is_paid_subscription_active(&self) -> bool {
        if self.optimistic.is_some_and(|tier| tier.is_paid()) {
            return true;
        }
        self.remote.is_some_and(|s| {
            s.is_active && !s.trial.is_active && s.api_service_level.is_paid()
        })
    }

    pub fn trial_active(&self) -> bool {
        self.optimistic.is_none() && self.remote.is_some_and(|s| s.trial.is_active)
    }

    pub fn has_payment_method(&self) -> bool {
        self.remote.is_some_and(|s| s.has_payment_method)
    }

    pub fn billing_interval(&self) -> BillingInterval {
        self.billing_interval
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Start a business checkout. `None` while another checkout is in flight.
    pub fn begin_checkout(&mut self) -> Option<CheckoutRequest> {
        if self.checkout_interval.is_some() {
            return None;
        }
        self.checkout_interval = Some(self.billing_interval);
        Some(CheckoutRequest {
            billing_interval: self.billing_interval,
            api_service_level: ApiServiceLevel::Business,
        })
    }

    /// Apply a checkout response received in `mode`.
    ///
    /// A response of the other mode's shape is an error and leaves the page
    /// untouched. A response for an interval the user has since changed is
    /// discarded in favour of a new request.
    pub fn checkout_succeeded(
        &mut self,
        mode: CheckoutMode,
        response: CheckoutResponse,
    ) -> Result<CheckoutOutcome, BillingError> {
        let issued_for = self.checkout_interval.take();
        match (mode, response) {
            (
                CheckoutMode::HostedRedirect,
                CheckoutResponse::Redirect {
                    stripe_checkout_url,
                },
            ) => Ok(match self.reissue_if_stale(issued_for) {
                Some(request) => CheckoutOutcome::Reissue(request),
                None => CheckoutOutcome::Redirect(stripe_checkout_url),
            }),
            (CheckoutMode::EmbeddedSecret, CheckoutResponse::ClientSecret { client_secret }) => {
                if let Some(request) = self.reissue_if_stale(issued_for) {
                    return Ok(CheckoutOutcome::Reissue(request));
                }
                self.intent_secret = Some(client_secret);
                self.upgrade_open = true;
                Ok(CheckoutOutcome::EmbeddedReady)
            }
            (CheckoutMode::HostedRedirect, CheckoutResponse::ClientSecret { .. }) => Err(
                BillingError::InvalidResponse("expected a checkout URL, got a client secret".into()),
            ),
            (CheckoutMode::EmbeddedSecret, CheckoutResponse::Redirect { .. }) => Err(
                BillingError::InvalidResponse("expected a client secret, got a checkout URL".into()),
            ),
        }
    }

    fn reissue_if_stale(
        &mut self,
        issued_for: Option<BillingInterval>,
    ) -> Option<CheckoutRequest> {
        match issued_for {
            Some(interval) if interval != self.billing_interval => self.begin_checkout(),
            _ => None,
        }
    }

    /// Returns the toast text for the failure.
    pub fn checkout_failed(&mut self, error: &BillingError) -> String {
        self.checkout_interval = None;
        toast_message(error)
    }

    /// The embedded payment form reported success.
    pub fn complete_embedded_checkout(&mut self) {
        self.optimistic = Some(ApiServiceLevel::Business);
        self.upgrade_open = false;
    }

    pub fn close_upgrade_modal(&mut self) {
        self.upgrade_open = false;
    }

    /// Change the local billing interval.
    ///
    /// When an embedded intent already exists the secret is tied to the old
    /// interval, so a new checkout request is returned to refresh it. If a
    /// request is already in flight its response is reissued on arrival.
    pub fn set_billing_interval(&mut self, interval: BillingInterval) -> Option<CheckoutRequest> {
        let changed = self.billing_interval != interval;
        self.billing_interval = interval;
        self.interval_chosen = true;
        if changed && self.intent_secret.is_some() {
            self.begin_checkout()
        } else {
            None
        }
    }

    /// Read the redirect result once per header instance.
    pub fn reconcile_mount(&mut self, result: Option<&str>) -> Option<MountOutcome> {
        if self.mount_reconciled {
            return None;
        }
        self.mount_reconciled = true;
        match result {
            Some("success") => {
                self.optimistic = Some(ApiServiceLevel::Business);
                Some(MountOutcome::Succeeded)
            }
            Some("canceled") => Some(MountOutcome::Canceled),
            _ => None,
        }
    }

    pub fn is_checkout_in_flight(&self) -> bool {
        self.checkout_interval.is_some()
    }

    pub fn intent_secret(&self) -> Option<&str> {
        self.intent_secret.as_deref()
    }

    pub fn is_upgrade_open(&self) -> bool {
        self.upgrade_open
    }

    // =========================================================================
    // Portal
    // =========================================================================

    /// `false` while a portal request is already in flight.
    pub fn begin_portal(&mut self) -> bool {
        if self.portal_in_flight {
            return false;
        }
        self.portal_in_flight = true;
        true
    }

    pub fn portal_finished(&mut self) {
        self.portal_in_flight = false;
    }

    pub fn is_portal_in_flight(&self) -> bool {
        self.portal_in_flight
    }

    // =========================================================================
    // Contact sales
    // =========================================================================

    /// Open the contact-sales modal for `intended`. Opening it from the
    /// upgrade modal closes the latter.
    pub fn open_contact_sales(&mut self, intended: ApiServiceLevel) {
        self.upgrade_open = false;
        self.contact_sales = Some(intended);
    }

    pub fn close_contact_sales(&mut self) {
        self.contact_sales = None;
    }

    pub fn contact_sales(&self) -> Option<ApiServiceLevel> {
        self.contact_sales
    }
}

fn phase_for_tier(tier: ApiServiceLevel) -> SubscriptionPhase {
    match tier {
        ApiServiceLevel::Free => SubscriptionPhase::Free,
        ApiServiceLevel::Business => SubscriptionPhase::BusinessActive,
        ApiServiceLevel::Enterprise => SubscriptionPhase::EnterpriseActive,
    }
}

/// Toast text for a billing failure.
pub(crate) fn toast_message(error: &BillingError) -> String {
    error.user_message().unwrap_or(UNEXPECTED_ERROR).to_string()
}
