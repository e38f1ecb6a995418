//! Plan header - plan columns, upgrade and portal buttons, billing modals

use std::future::Future;
use std::sync::Arc;

use dioxus::prelude::*;
use notiflow_domain::{BillingInterval, SubscriptionContext};

use crate::application::billing::{
    BillingController, ButtonVariant, FeatureFlags, PlanAction, PlanColumn, PlanHeaderView,
};
use crate::infrastructure::{Toast, ToastKind, ToastQueue};
use crate::ports::{AnalyticsPort, BillingApiPort, NavigatorPort};

/// Controller plus the toast queue it reports into.
#[derive(Clone)]
pub struct PlanHeaderServices {
    controller: Arc<BillingController>,
    toasts: Arc<ToastQueue>,
}

impl PlanHeaderServices {
    pub fn new(
        flags: FeatureFlags,
        api: Arc<dyn BillingApiPort>,
        navigator: Arc<dyn NavigatorPort>,
        analytics: Arc<dyn AnalyticsPort>,
    ) -> Self {
        let toasts = Arc::new(ToastQueue::new());
        let controller = Arc::new(BillingController::new(
            flags,
            api,
            navigator,
            toasts.clone(),
            analytics,
        ));
        Self { controller, toasts }
    }

    pub fn controller(&self) -> &Arc<BillingController> {
        &self.controller
    }
}

impl PartialEq for PlanHeaderServices {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.controller, &other.controller)
    }
}

/// Re-render from the controller and collect toasts it queued.
async fn sync(
    services: &PlanHeaderServices,
    mut view: Signal<Option<PlanHeaderView>>,
    mut toasts: Signal<Vec<Toast>>,
) {
    view.set(Some(services.controller.view().await));
    let fresh = services.toasts.drain();
    if !fresh.is_empty() {
        toasts.write().extend(fresh);
    }
}

/// Run a controller action in the background, then sync.
fn dispatch<F, Fut>(
    services: &PlanHeaderServices,
    view: Signal<Option<PlanHeaderView>>,
    toasts: Signal<Vec<Toast>>,
    action: F,
) where
    F: FnOnce(Arc<BillingController>) -> Fut + 'static,
    Fut: Future<Output = ()> + 'static,
{
    let services = services.clone();
    spawn(async move {
        action(services.controller.clone()).await;
        sync(&services, view, toasts).await;
    });
}

/// Run a two-step controller action, syncing after each step so the
/// in-flight state renders while the request is out.
fn dispatch_staged<B, BFut, T, R, RFut>(
    services: &PlanHeaderServices,
    view: Signal<Option<PlanHeaderView>>,
    toasts: Signal<Vec<Toast>>,
    begin: B,
    run: R,
) where
    B: FnOnce(Arc<BillingController>) -> BFut + 'static,
    BFut: Future<Output = Option<T>> + 'static,
    T: 'static,
    R: FnOnce(Arc<BillingController>, T) -> RFut + 'static,
    RFut: Future<Output = ()> + 'static,
{
    let services = services.clone();
    spawn(async move {
        let staged = begin(services.controller.clone()).await;
        sync(&services, view, toasts).await;
        if let Some(staged) = staged {
            run(services.controller.clone(), staged).await;
            sync(&services, view, toasts).await;
        }
    });
}

#[component]
pub fn PlanHeader(services: PlanHeaderServices, subscription: SubscriptionContext) -> Element {
    let view: Signal<Option<PlanHeaderView>> = use_signal(|| None);
    let mut toasts: Signal<Vec<Toast>> = use_signal(Vec::new);

    // Feed every subscription refresh into the controller
    {
        let services = services.clone();
        use_effect(use_reactive((&subscription,), move |(subscription,)| {
            dispatch(&services, view, toasts, move |c| async move {
                c.on_subscription(subscription).await
            });
        }));
    }

    // Reconcile the hosted checkout result once, after the first snapshot
    {
        let services = services.clone();
        use_effect(move || {
            dispatch(&services, view, toasts, |c| async move { c.on_mount().await });
        });
    }

    let Some(current) = view.read().clone() else {
        return rsx! {
            div {
                class: "plan-header p-6 text-gray-500 text-sm",
                "Loading plans..."
            }
        };
    };

    let on_action = |action: PlanAction| -> EventHandler<MouseEvent> {
        let services = services.clone();
        EventHandler::new(move |_: MouseEvent| match &action {
            PlanAction::Upgrade { .. } => dispatch_staged(
                &services,
                view,
                toasts,
                |c| async move { c.begin_checkout().await },
                |c, request| async move { c.run_checkout(request).await },
            ),
            PlanAction::ManageSubscription { .. } => dispatch_staged(
                &services,
                view,
                toasts,
                |c| async move { c.begin_manage_subscription().await.then_some(()) },
                |c, ()| async move { c.run_portal().await },
            ),
            PlanAction::ContactSales { .. } => {
                dispatch(&services, view, toasts, |c| async move { c.contact_sales().await })
            }
        })
    };

    let set_interval = |interval: BillingInterval| -> EventHandler<MouseEvent> {
        let services = services.clone();
        EventHandler::new(move |_: MouseEvent| {
            dispatch_staged(
                &services,
                view,
                toasts,
                move |c| async move { c.change_billing_interval(interval).await },
                |c, request| async move { c.run_checkout(request).await },
            )
        })
    };

    let business_action = current.business_action.clone();
    let enterprise_action = current.enterprise_action.clone();
    let business_test_id = match business_action {
        PlanAction::ManageSubscription { .. } => "plan-business-manage",
        _ => "plan-business-upgrade",
    };
    let enterprise_test_id = match enterprise_action {
        PlanAction::ManageSubscription { .. } => "plan-enterprise-manage",
        _ => "plan-enterprise-contact-sales",
    };

    rsx! {
        div {
            class: "plan-header flex",

            div {
                class: "p-6 w-48 bg-gray-100 dark:bg-gray-800",
                span { "data-test-id": "plan-title", class: "font-bold", "Plans" }
            }

            // Free
            div {
                class: "p-6 w-60",
                ColumnTitle { column: current.free.clone() }
                p { class: "text-xs", "{current.free.price}" }
                if let Some(quota) = current.free.quota.clone() {
                    p { class: "text-xs text-gray-500", "{quota}" }
                }
            }

            // Business
            div {
                class: "p-6 w-72 flex flex-col justify-between",
                div {
                    ColumnTitle { column: current.business.clone() }
                    if current.show_interval_control {
                        IntervalControl {
                            value: current.billing_interval,
                            on_month: set_interval(BillingInterval::Month),
                            on_year: set_interval(BillingInterval::Year),
                        }
                    }
                    p {
                        "data-test-id": "billing-interval-price",
                        class: "text-xs",
                        "{current.business.price}"
                    }
                    if let Some(quota) = current.business.quota.clone() {
                        p { class: "text-xs text-gray-500", "{quota}" }
                    }
                }
                ActionButton {
                    test_id: business_test_id,
                    action: business_action.clone(),
                    onclick: on_action(business_action),
                }
            }

            // Enterprise
            div {
                class: "p-6 w-72 flex flex-col justify-between",
                div {
                    ColumnTitle { column: current.enterprise.clone() }
                    p { class: "text-gray-500", "{current.enterprise.price}" }
                }
                ActionButton {
                    test_id: enterprise_test_id,
                    action: enterprise_action.clone(),
                    onclick: on_action(enterprise_action),
                }
            }
        }

        if let Some(checkout) = current.embedded_checkout.clone().filter(|c| c.open) {
            div {
                class: "fixed inset-0 bg-black bg-opacity-60 flex items-center justify-center z-50",
                div {
                    class: "bg-white dark:bg-gray-900 rounded-lg p-6 w-[480px]",
                    h2 { class: "font-bold mb-3", "Upgrade to Business" }
                    IntervalControl {
                        value: current.billing_interval,
                        on_month: set_interval(BillingInterval::Month),
                        on_year: set_interval(BillingInterval::Year),
                    }
                    p { class: "text-xs mb-3", "{current.business.price}" }
                    // Payment provider form mounts here
                    div {
                        id: "payment-element",
                        "data-client-secret": checkout.client_secret.clone().unwrap_or_default(),
                        class: "min-h-32 mb-3",
                    }
                    div {
                        class: "flex gap-2 justify-end",
                        button {
                            class: "px-3 py-1 text-sm text-gray-500",
                            onclick: {
                                let services = services.clone();
                                move |_| dispatch(&services, view, toasts, |c| async move {
                                    c.contact_sales_from_upgrade().await
                                })
                            },
                            "Contact sales"
                        }
                        button {
                            class: "px-3 py-1 text-sm border rounded",
                            onclick: {
                                let services = services.clone();
                                move |_| dispatch(&services, view, toasts, |c| async move {
                                    c.close_upgrade_modal().await
                                })
                            },
                            "Close"
                        }
                        button {
                            class: "px-3 py-1 text-sm rounded bg-gradient-to-r from-red-500 to-pink-500 text-white",
                            disabled: checkout.loading || checkout.client_secret.is_none(),
                            onclick: {
                                let services = services.clone();
                                move |_| dispatch(&services, view, toasts, |c| async move {
                                    c.complete_embedded_checkout().await
                                })
                            },
                            if checkout.loading { "Processing..." } else { "Upgrade now" }
                        }
                    }
                }
            }
        }

        if let Some(tier) = current.contact_sales {
            div {
                class: "fixed inset-0 bg-black bg-opacity-60 flex items-center justify-center z-50",
                div {
                    class: "bg-white dark:bg-gray-900 rounded-lg p-6 w-[420px]",
                    h2 { class: "font-bold mb-3", "Contact sales" }
                    p {
                        class: "text-sm mb-4",
                        "Tell us about your needs for the "
                        {tier.display_name()}
                        " plan and our team will reach out."
                    }
                    button {
                        class: "px-3 py-1 text-sm border rounded",
                        onclick: {
                            let services = services.clone();
                            move |_| dispatch(&services, view, toasts, |c| async move {
                                c.close_contact_sales().await
                            })
                        },
                        "Close"
                    }
                }
            }
        }

        div {
            class: "fixed bottom-4 right-4 flex flex-col gap-2 z-50",
            for (index, toast) in toasts.read().iter().cloned().enumerate() {
                {
                    let toast_class = match toast.kind {
                        ToastKind::Error => "px-4 py-2 rounded text-sm bg-red-500 text-white cursor-pointer",
                        ToastKind::Success => "px-4 py-2 rounded text-sm bg-green-600 text-white cursor-pointer",
                    };
                    rsx! {
                        div {
                            key: "{index}",
                            class: "{toast_class}",
                            onclick: move |_| {
                                let mut list = toasts.write();
                                if index < list.len() {
                                    list.remove(index);
                                }
                            },
                            "{toast.message}"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ColumnTitle(column: PlanColumn) -> Element {
    let tier = column.tier.as_str();
    rsx! {
        div {
            class: "flex gap-1 mb-3 items-baseline",
            span { class: "font-bold", "{column.title}" }
            if column.is_current {
                span {
                    "data-test-id": "plan-{tier}-current",
                    class: "text-xs bg-gradient-to-r from-red-500 to-pink-500 bg-clip-text text-transparent",
                    "Current"
                }
            }
        }
    }
}

#[component]
fn IntervalControl(
    value: BillingInterval,
    on_month: EventHandler<MouseEvent>,
    on_year: EventHandler<MouseEvent>,
) -> Element {
    let class_for = |interval: BillingInterval| {
        if value == interval {
            "px-2 py-1 text-xs rounded bg-gray-700 text-white"
        } else {
            "px-2 py-1 text-xs rounded bg-transparent text-gray-500"
        }
    };

    rsx! {
        div {
            class: "flex gap-1 mb-3",
            button {
                class: class_for(BillingInterval::Month),
                onclick: move |e| on_month.call(e),
                "Monthly"
            }
            button {
                class: class_for(BillingInterval::Year),
                onclick: move |e| on_year.call(e),
                "Yearly"
            }
        }
    }
}

#[component]
fn ActionButton(
    test_id: &'static str,
    action: PlanAction,
    onclick: EventHandler<MouseEvent>,
) -> Element {
    let (label, loading, gradient) = match &action {
        PlanAction::Upgrade { label, loading } => (*label, *loading, false),
        PlanAction::ManageSubscription { loading } => ("Manage subscription", *loading, false),
        PlanAction::ContactSales { variant } => {
            ("Contact sales", false, *variant == ButtonVariant::Gradient)
        }
    };
    let class = if gradient {
        "w-full px-3 py-2 rounded text-sm text-white bg-gradient-to-r from-red-500 to-pink-500"
    } else {
        "w-full px-3 py-2 rounded text-sm border border-gray-400"
    };

    rsx! {
        button {
            "data-test-id": test_id,
            class,
            disabled: loading,
            onclick: move |e| onclick.call(e),
            if loading { "Loading..." } else { "{label}" }
        }
    }
}
