//! Billing controller: runs plan header transitions against the ports.
//!
//! The state lock is only taken around pure transitions; every network
//! call happens with the lock released. Actions that hit the network come
//! in two steps (`begin_*` then `run_*`) so a caller can render the
//! in-flight state between them; the one-shot forms chain both.

use std::sync::Arc;

use futures_util::lock::Mutex;
use notiflow_domain::{ApiServiceLevel, BillingInterval, SubscriptionContext};
use notiflow_shared::CheckoutRequest;

use super::state::{toast_message, CheckoutOutcome, MountOutcome, PlanHeaderState};
use super::view::PlanHeaderView;
use super::{FeatureFlags, CONTACT_SALES_EVENT, MANAGE_SUBSCRIPTION_EVENT};
use crate::ports::{AnalyticsPort, BillingApiPort, NavigatorPort, NotifierPort};

const PAYMENT_SUCCESSFUL: &str = "Payment was successful.";
const ORDER_CANCELED: &str = "Order canceled.";

pub struct BillingController {
    flags: FeatureFlags,
    api: Arc<dyn BillingApiPort>,
    navigator: Arc<dyn NavigatorPort>,
    notifier: Arc<dyn NotifierPort>,
    analytics: Arc<dyn AnalyticsPort>,
    state: Mutex<PlanHeaderState>,
}

impl BillingController {
    pub fn new(
        flags: FeatureFlags,
        api: Arc<dyn BillingApiPort>,
        navigator: Arc<dyn NavigatorPort>,
        notifier: Arc<dyn NotifierPort>,
        analytics: Arc<dyn AnalyticsPort>,
    ) -> Self {
        Self {
            flags,
            api,
            navigator,
            notifier,
            analytics,
            state: Mutex::new(PlanHeaderState::new()),
        }
    }

    pub fn flags(&self) -> FeatureFlags {
        self.flags
    }

    pub async fn snapshot(&self) -> PlanHeaderState {
        self.state.lock().await.clone()
    }

    pub async fn view(&self) -> PlanHeaderView {
        let state = self.state.lock().await;
        PlanHeaderView::from_state(&state, &self.flags)
    }

    /// Feed a subscription refresh into the header.
    pub async fn on_subscription(&self, subscription: SubscriptionContext) {
        self.state.lock().await.apply_subscription(subscription);
    }

    /// Reconcile the `result` query parameter left by a hosted checkout.
    pub async fn on_mount(&self) {
        let result = self.navigator.query_param("result");
        let outcome = self.state.lock().await.reconcile_mount(result.as_deref());
        match outcome {
            Some(MountOutcome::Succeeded) => {
                tracing::info!("Hosted checkout completed");
                self.notifier.success(PAYMENT_SUCCESSFUL);
            }
            Some(MountOutcome::Canceled) => {
                tracing::info!("Hosted checkout canceled");
                self.notifier.error(ORDER_CANCELED);
            }
            None => {}
        }
    }

    /// Upgrade click on the business column.
    pub async fn start_checkout(&self) {
        if let Some(request) = self.begin_checkout().await {
            self.run_checkout(request).await;
        }
    }

    /// Mark a checkout as in flight. `None` when one already is.
    pub async fn begin_checkout(&self) -> Option<CheckoutRequest> {
        let request = self.state.lock().await.begin_checkout();
        if request.is_none() {
            tracing::debug!("Checkout already in flight, ignoring click");
        }
        request
    }

    /// Send `request`, then any follow-up the state asks for, and act on
    /// the final response.
    pub async fn run_checkout(&self, mut request: CheckoutRequest) {
        let mode = self.flags.checkout_mode();
        let path = self.flags.checkout_path();

        loop {
            tracing::debug!(path, interval = %request.billing_interval, "Starting checkout");
            let result = self.api.checkout(path, request).await;

            let mut state = self.state.lock().await;
            let outcome = result.and_then(|response| state.checkout_succeeded(mode, response));
            match outcome {
                Ok(CheckoutOutcome::Redirect(url)) => {
                    drop(state);
                    self.navigator.navigate(&url);
                    return;
                }
                Ok(CheckoutOutcome::EmbeddedReady) => return,
                Ok(CheckoutOutcome::Reissue(next)) => {
                    drop(state);
                    tracing::debug!(
                        interval = %next.billing_interval,
                        "Interval changed mid-request, reissuing checkout"
                    );
                    request = next;
                }
                Err(e) => {
                    let message = state.checkout_failed(&e);
                    drop(state);
                    tracing::warn!(error = %e, "Checkout failed");
                    self.notifier.error(&message);
                    return;
                }
            }
        }
    }

    pub async fn set_billing_interval(&self, interval: BillingInterval) {
        if let Some(request) = self.change_billing_interval(interval).await {
            self.run_checkout(request).await;
        }
    }

    /// Apply the interval locally. Returns the checkout request that
    /// refreshes an existing payment intent, if one is needed now.
    pub async fn change_billing_interval(
        &self,
        interval: BillingInterval,
    ) -> Option<CheckoutRequest> {
        let request = self.state.lock().await.set_billing_interval(interval);
        if request.is_some() {
            tracing::debug!(interval = %interval, "Refreshing payment intent");
        }
        request
    }

    /// The embedded payment form reported success.
    pub async fn complete_embedded_checkout(&self) {
        self.state.lock().await.complete_embedded_checkout();
    }

    pub async fn close_upgrade_modal(&self) {
        self.state.lock().await.close_upgrade_modal();
    }

    /// Business column "Manage subscription".
    pub async fn manage_subscription(&self) {
        if self.begin_manage_subscription().await {
            self.run_portal().await;
        }
    }

    /// Track the click and mark the portal request as in flight.
    pub async fn begin_manage_subscription(&self) -> bool {
        self.analytics.track(MANAGE_SUBSCRIPTION_EVENT);
        self.begin_portal().await
    }

    pub async fn open_portal(&self) {
        if self.begin_portal().await {
            self.run_portal().await;
        }
    }

    /// `false` when a portal request is already in flight.
    pub async fn begin_portal(&self) -> bool {
        let started = self.state.lock().await.begin_portal();
        if !started {
            tracing::debug!("Portal request already in flight, ignoring click");
        }
        started
    }

    /// Fetch the portal URL and leave the page for it.
    pub async fn run_portal(&self) {
        let result = self.api.portal_url().await;
        self.state.lock().await.portal_finished();

        match result {
            Ok(url) => self.navigator.navigate(&url),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to open billing portal");
                self.notifier.error(&toast_message(&e));
            }
        }
    }

    /// Enterprise column "Contact sales".
    pub async fn contact_sales(&self) {
        self.analytics.track(CONTACT_SALES_EVENT);
        self.state
            .lock()
            .await
            .open_contact_sales(ApiServiceLevel::Enterprise);
    }

    /// "Contact sales" from inside the upgrade modal.
    pub async fn contact_sales_from_upgrade(&self) {
        self.state
            .lock()
            .await
            .open_contact_sales(ApiServiceLevel::Business);
    }

    pub async fn close_contact_sales(&self) {
        self.state.lock().await.close_contact_sales();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::billing::{
        PlanAction, SubscriptionPhase, CHECKOUT_PATH, CHECKOUT_SESSION_PATH,
    };
    use crate::ports::{
        BillingError, MockAnalyticsPort, MockBillingApiPort, MockNavigatorPort, MockNotifierPort,
    };
    use mockall::predicate::eq;
    use notiflow_shared::CheckoutResponse;

    struct Mocks {
        api: MockBillingApiPort,
        navigator: MockNavigatorPort,
        notifier: MockNotifierPort,
        analytics: MockAnalyticsPort,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                api: MockBillingApiPort::new(),
                navigator: MockNavigatorPort::new(),
                notifier: MockNotifierPort::new(),
                analytics: MockAnalyticsPort::new(),
            }
        }

        fn build(self, flags: FeatureFlags) -> BillingController {
            BillingController::new(
                flags,
                Arc::new(self.api),
                Arc::new(self.navigator),
                Arc::new(self.notifier),
                Arc::new(self.analytics),
            )
        }
    }

    fn hosted() -> FeatureFlags {
        FeatureFlags {
            stripe_checkout_enabled: true,
            improved_billing_enabled: false,
        }
    }

    fn embedded() -> FeatureFlags {
        FeatureFlags::default()
    }

    #[tokio::test]
    async fn hosted_checkout_navigates_to_checkout_url() {
        let mut mocks = Mocks::new();
        mocks
            .api
            .expect_checkout()
            .withf(|path, request| {
                path == CHECKOUT_SESSION_PATH
                    && request.api_service_level == ApiServiceLevel::Business
                    && request.billing_interval == BillingInterval::Month
            })
            .times(1)
            .returning(|_, _| {
                Ok(CheckoutResponse::Redirect {
                    stripe_checkout_url: "https://checkout.example/s1".into(),
                })
            });
        mocks
            .navigator
            .expect_navigate()
            .with(eq("https://checkout.example/s1"))
            .times(1)
            .return_const(());

        let controller = mocks.build(hosted());
        controller.start_checkout().await;

        let state = controller.snapshot().await;
        assert!(!state.is_checkout_in_flight());
        assert!(!state.is_upgrade_open());
    }

    #[tokio::test]
    async fn embedded_checkout_opens_modal_without_navigating() {
        let mut mocks = Mocks::new();
        mocks
            .api
            .expect_checkout()
            .withf(|path, _| path == CHECKOUT_PATH)
            .times(1)
            .returning(|_, _| {
                Ok(CheckoutResponse::ClientSecret {
                    client_secret: "pi_secret".into(),
                })
            });
        mocks.navigator.expect_navigate().never();

        let controller = mocks.build(embedded());
        controller.start_checkout().await;

        let state = controller.snapshot().await;
        assert!(state.is_upgrade_open());
        assert_eq!(state.intent_secret(), Some("pi_secret"));

        controller.complete_embedded_checkout().await;
        let state = controller.snapshot().await;
        assert!(!state.is_upgrade_open());
        assert_eq!(state.phase(), SubscriptionPhase::BusinessActive);
    }

    #[tokio::test]
    async fn checkout_failure_shows_server_message() {
        let mut mocks = Mocks::new();
        mocks.api.expect_checkout().times(1).returning(|_, _| {
            Err(BillingError::Http {
                status: 400,
                message: Some("Organization has no customer".into()),
            })
        });
        mocks
            .notifier
            .expect_error()
            .with(eq("Organization has no customer"))
            .times(1)
            .return_const(());

        let controller = mocks.build(hosted());
        controller.start_checkout().await;

        assert!(!controller.snapshot().await.is_checkout_in_flight());
    }

    #[tokio::test]
    async fn checkout_failure_without_message_shows_fallback() {
        let mut mocks = Mocks::new();
        mocks
            .api
            .expect_checkout()
            .returning(|_, _| Err(BillingError::InvalidResponse("eof".into())));
        mocks
            .notifier
            .expect_error()
            .with(eq("Unexpected error"))
            .times(1)
            .return_const(());

        mocks.build(embedded()).start_checkout().await;
    }

    #[tokio::test]
    async fn hosted_mode_never_opens_modal_for_client_secret() {
        let mut mocks = Mocks::new();
        mocks.api.expect_checkout().times(1).returning(|_, _| {
            Ok(CheckoutResponse::ClientSecret {
                client_secret: "pi_x".into(),
            })
        });
        mocks.navigator.expect_navigate().never();
        mocks
            .notifier
            .expect_error()
            .with(eq("Unexpected error"))
            .times(1)
            .return_const(());

        let controller = mocks.build(hosted());
        controller.start_checkout().await;

        let state = controller.snapshot().await;
        assert!(!state.is_upgrade_open());
        assert_eq!(state.intent_secret(), None);
        assert!(!state.is_checkout_in_flight());
    }

    #[tokio::test]
    async fn embedded_mode_never_navigates_for_checkout_url() {
        let mut mocks = Mocks::new();
        mocks.api.expect_checkout().times(1).returning(|_, _| {
            Ok(CheckoutResponse::Redirect {
                stripe_checkout_url: "https://checkout.example/s1".into(),
            })
        });
        mocks.navigator.expect_navigate().never();
        mocks
            .notifier
            .expect_error()
            .with(eq("Unexpected error"))
            .times(1)
            .return_const(());

        let controller = mocks.build(embedded());
        controller.start_checkout().await;

        assert!(!controller.snapshot().await.is_upgrade_open());
    }

    #[tokio::test]
    async fn begin_steps_expose_loading_before_the_request() {
        let mut mocks = Mocks::new();
        mocks.analytics.expect_track().return_const(());
        mocks.api.expect_checkout().never();
        mocks.api.expect_portal_url().never();

        let controller = mocks.build(hosted());
        assert!(controller.begin_checkout().await.is_some());
        assert!(matches!(
            controller.view().await.business_action,
            PlanAction::Upgrade { loading: true, .. }
        ));
        assert!(controller.begin_checkout().await.is_none());

        controller
            .on_subscription(SubscriptionContext {
                api_service_level: ApiServiceLevel::Business,
                is_active: true,
                ..SubscriptionContext::default()
            })
            .await;
        assert!(controller.begin_manage_subscription().await);
        assert_eq!(
            controller.view().await.business_action,
            PlanAction::ManageSubscription { loading: true }
        );
        assert!(!controller.begin_portal().await);
    }

    #[tokio::test]
    async fn interval_toggled_mid_request_reissues_checkout() {
        let mut mocks = Mocks::new();
        let mut seq = mockall::Sequence::new();
        mocks
            .api
            .expect_checkout()
            .withf(|_, request| request.billing_interval == BillingInterval::Month)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| {
                Ok(CheckoutResponse::ClientSecret {
                    client_secret: "pi_month".into(),
                })
            });
        mocks
            .api
            .expect_checkout()
            .withf(|_, request| request.billing_interval == BillingInterval::Year)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| {
                Ok(CheckoutResponse::ClientSecret {
                    client_secret: "pi_year".into(),
                })
            });

        let controller = mocks.build(embedded());
        let request = controller.begin_checkout().await.unwrap();
        // The user picks yearly before the monthly response lands.
        assert!(controller
            .change_billing_interval(BillingInterval::Year)
            .await
            .is_none());
        controller.run_checkout(request).await;

        let state = controller.snapshot().await;
        assert_eq!(state.intent_secret(), Some("pi_year"));
        assert_eq!(state.billing_interval(), BillingInterval::Year);
        assert!(!state.is_checkout_in_flight());
    }

    #[tokio::test]
    async fn click_while_in_flight_is_ignored() {
        let mut mocks = Mocks::new();
        mocks.api.expect_checkout().never();

        let controller = mocks.build(hosted());
        // Simulate a request already on the wire.
        controller.state.lock().await.begin_checkout();

        controller.start_checkout().await;
    }

    #[tokio::test]
    async fn interval_change_refreshes_embedded_intent() {
        let mut mocks = Mocks::new();
        let mut seq = mockall::Sequence::new();
        mocks
            .api
            .expect_checkout()
            .withf(|_, request| request.billing_interval == BillingInterval::Month)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| {
                Ok(CheckoutResponse::ClientSecret {
                    client_secret: "pi_month".into(),
                })
            });
        mocks
            .api
            .expect_checkout()
            .withf(|_, request| request.billing_interval == BillingInterval::Year)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| {
                Ok(CheckoutResponse::ClientSecret {
                    client_secret: "pi_year".into(),
                })
            });

        let controller = mocks.build(embedded());
        controller.start_checkout().await;
        controller.set_billing_interval(BillingInterval::Year).await;

        let state = controller.snapshot().await;
        assert_eq!(state.intent_secret(), Some("pi_year"));
        assert_eq!(state.billing_interval(), BillingInterval::Year);
    }

    #[tokio::test]
    async fn interval_change_without_intent_is_local() {
        let mut mocks = Mocks::new();
        mocks.api.expect_checkout().never();

        let controller = mocks.build(embedded());
        controller.set_billing_interval(BillingInterval::Year).await;

        assert_eq!(
            controller.snapshot().await.billing_interval(),
            BillingInterval::Year
        );
    }

    #[tokio::test]
    async fn mount_success_notifies_once_and_sets_business() {
        let mut mocks = Mocks::new();
        mocks
            .navigator
            .expect_query_param()
            .with(eq("result"))
            .returning(|_| Some("success".into()));
        mocks
            .notifier
            .expect_success()
            .with(eq("Payment was successful."))
            .times(1)
            .return_const(());

        let controller = mocks.build(hosted());
        controller.on_mount().await;
        controller.on_mount().await;

        assert_eq!(
            controller.snapshot().await.phase(),
            SubscriptionPhase::BusinessActive
        );
    }

    #[tokio::test]
    async fn mount_canceled_shows_error_and_keeps_tier() {
        let mut mocks = Mocks::new();
        mocks
            .navigator
            .expect_query_param()
            .returning(|_| Some("canceled".into()));
        mocks
            .notifier
            .expect_error()
            .with(eq("Order canceled."))
            .times(1)
            .return_const(());

        let controller = mocks.build(hosted());
        controller
            .on_subscription(SubscriptionContext::default())
            .await;
        controller.on_mount().await;

        assert_eq!(controller.snapshot().await.phase(), SubscriptionPhase::Free);
    }

    fn returning_from_hosted_checkout() -> Mocks {
        let mut mocks = Mocks::new();
        mocks
            .navigator
            .expect_query_param()
            .returning(|_| Some("success".into()));
        mocks.notifier.expect_success().return_const(());
        mocks
    }

    #[tokio::test]
    async fn mount_success_survives_subscription_fed_first() {
        let controller = returning_from_hosted_checkout().build(hosted());

        // Same order as the component: subscription effect, then mount.
        controller
            .on_subscription(SubscriptionContext::default())
            .await;
        controller.on_mount().await;

        assert_eq!(
            controller.snapshot().await.phase(),
            SubscriptionPhase::BusinessActive
        );
    }

    #[tokio::test]
    async fn changed_refresh_wins_over_optimistic_tier() {
        let controller = returning_from_hosted_checkout().build(hosted());
        controller.on_mount().await;
        controller
            .on_subscription(SubscriptionContext::default())
            .await;
        assert_eq!(controller.snapshot().await.tier(), ApiServiceLevel::Business);

        controller
            .on_subscription(SubscriptionContext {
                has_payment_method: true,
                ..SubscriptionContext::default()
            })
            .await;
        assert_eq!(controller.snapshot().await.tier(), ApiServiceLevel::Free);
    }

    #[tokio::test]
    async fn manage_subscription_tracks_and_navigates_to_portal() {
        let mut mocks = Mocks::new();
        mocks
            .analytics
            .expect_track()
            .with(eq(MANAGE_SUBSCRIPTION_EVENT))
            .times(1)
            .return_const(());
        mocks
            .api
            .expect_portal_url()
            .times(1)
            .returning(|| Ok("https://portal.example/p1".into()));
        mocks
            .navigator
            .expect_navigate()
            .with(eq("https://portal.example/p1"))
            .times(1)
            .return_const(());

        let controller = mocks.build(hosted());
        controller.manage_subscription().await;

        assert!(!controller.snapshot().await.is_portal_in_flight());
    }

    #[tokio::test]
    async fn portal_failure_shows_error_without_navigation() {
        let mut mocks = Mocks::new();
        mocks
            .api
            .expect_portal_url()
            .times(1)
            .returning(|| Err(BillingError::Network("connection refused".into())));
        mocks.navigator.expect_navigate().never();
        mocks
            .notifier
            .expect_error()
            .with(eq("connection refused"))
            .times(1)
            .return_const(());

        mocks.build(hosted()).open_portal().await;
    }

    #[tokio::test]
    async fn contact_sales_tracks_and_remembers_enterprise() {
        let mut mocks = Mocks::new();
        mocks
            .analytics
            .expect_track()
            .with(eq(CONTACT_SALES_EVENT))
            .times(1)
            .return_const(());

        let controller = mocks.build(hosted());
        controller.contact_sales().await;
        assert_eq!(
            controller.snapshot().await.contact_sales(),
            Some(ApiServiceLevel::Enterprise)
        );

        controller.close_contact_sales().await;
        assert_eq!(controller.snapshot().await.contact_sales(), None);
    }
}
