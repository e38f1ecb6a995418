//! Plan header view model.

use notiflow_domain::{ApiServiceLevel, BillingInterval};

use super::flags::{CheckoutMode, FeatureFlags};
use super::state::{PlanHeaderState, SubscriptionPhase};

const ENTERPRISE_PITCH: &str = "Custom pricing, billing, and extended services.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonVariant {
    Outline,
    Gradient,
}

/// Button shown at the bottom of a plan column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanAction {
    Upgrade { label: &'static str, loading: bool },
    ManageSubscription { loading: bool },
    ContactSales { variant: ButtonVariant },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanColumn {
    pub tier: ApiServiceLevel,
    pub title: &'static str,
    pub is_current: bool,
    pub price: String,
    pub quota: Option<String>,
}

/// In-page payment form, present only in embedded checkout mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedCheckoutView {
    pub open: bool,
    pub client_secret: Option<String>,
    pub loading: bool,
}

/// Everything the plan header renders, derived from state and flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanHeaderView {
    pub phase: SubscriptionPhase,
    pub billing_interval: BillingInterval,
    pub show_interval_control: bool,
    pub free: PlanColumn,
    pub business: PlanColumn,
    pub enterprise: PlanColumn,
    pub business_action: PlanAction,
    pub enterprise_action: PlanAction,
    pub embedded_checkout: Option<EmbeddedCheckoutView>,
    pub contact_sales: Option<ApiServiceLevel>,
}

impl PlanHeaderView {
    pub fn from_state(state: &PlanHeaderState, flags: &FeatureFlags) -> Self {
        let phase = state.phase();
        let tier = state.tier();
        let interval = state.billing_interval();
        let paid_active = state.is_paid_subscription_active();
        let is_current = |column: ApiServiceLevel| phase != SubscriptionPhase::Loading && tier == column;

        let free = PlanColumn {
            tier: ApiServiceLevel::Free,
            title: ApiServiceLevel::Free.display_name(),
            is_current: is_current(ApiServiceLevel::Free),
            price: "$0 free package".to_string(),
            quota: Some(quota_text(ApiServiceLevel::Free)),
        };
        let business = PlanColumn {
            tier: ApiServiceLevel::Business,
            title: ApiServiceLevel::Business.display_name(),
            is_current: is_current(ApiServiceLevel::Business),
            price: business_price_text(interval),
            quota: Some(quota_text(ApiServiceLevel::Business)),
        };
        let enterprise = PlanColumn {
            tier: ApiServiceLevel::Enterprise,
            title: ApiServiceLevel::Enterprise.display_name(),
            is_current: is_current(ApiServiceLevel::Enterprise),
            price: ENTERPRISE_PITCH.to_string(),
            quota: None,
        };

        let business_action = if paid_active {
            PlanAction::ManageSubscription {
                loading: state.is_portal_in_flight(),
            }
        } else {
            PlanAction::Upgrade {
                label: upgrade_label(state, flags),
                loading: state.is_checkout_in_flight(),
            }
        };

        let enterprise_action = if tier == ApiServiceLevel::Enterprise {
            PlanAction::ManageSubscription {
                loading: state.is_portal_in_flight(),
            }
        } else {
            let variant = if tier == ApiServiceLevel::Business {
                ButtonVariant::Gradient
            } else {
                ButtonVariant::Outline
            };
            PlanAction::ContactSales { variant }
        };

        let embedded_checkout = match flags.checkout_mode() {
            CheckoutMode::HostedRedirect => None,
            CheckoutMode::EmbeddedSecret => Some(EmbeddedCheckoutView {
                open: state.is_upgrade_open(),
                client_secret: state.intent_secret().map(str::to_string),
                loading: state.is_checkout_in_flight(),
            }),
        };

        Self {
            phase,
            billing_interval: interval,
            show_interval_control: !paid_active,
            free,
            business,
            enterprise,
            business_action,
            enterprise_action,
            embedded_checkout,
            contact_sales: state.contact_sales(),
        }
    }

    pub fn columns(&self) -> [&PlanColumn; 3] {
        [&self.free, &self.business, &self.enterprise]
    }
}

fn upgrade_label(state: &PlanHeaderState, flags: &FeatureFlags) -> &'static str {
    if flags.improved_billing_enabled || !state.trial_active() {
        "Upgrade"
    } else if state.has_payment_method() {
        "Update payment method"
    } else {
        "Add payment method"
    }
}

fn business_price_text(interval: BillingInterval) -> String {
    let price = format_thousands(u64::from(interval.business_price_usd()));
    match interval {
        BillingInterval::Month => format!("${} month package / billed monthly", price),
        BillingInterval::Year => format!("${} year package / billed annually", price),
    }
}

fn quota_text(tier: ApiServiceLevel) -> String {
    format!(
        "{} events per month included",
        format_thousands(tier.included_event_quota())
    )
}

/// `1234567` -> `"1,234,567"`.
fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
