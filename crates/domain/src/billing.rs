//! Subscription tiers, billing intervals and plan constants.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Monthly price of the business plan, in whole dollars.
pub const BUSINESS_MONTHLY_PRICE_USD: u32 = 250;

/// Yearly price of the business plan, in whole dollars.
pub const BUSINESS_YEARLY_PRICE_USD: u32 = 2_700;

/// Subscription tier of an organization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiServiceLevel {
    #[default]
    Free,
    Business,
    Enterprise,
}

impl ApiServiceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Business => "business",
            Self::Enterprise => "enterprise",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Business => "Business",
            Self::Enterprise => "Enterprise",
        }
    }

    /// Events per month included in the tier.
    pub fn included_event_quota(&self) -> u64 {
        match self {
            Self::Free => 30_000,
            Self::Business => 250_000,
            Self::Enterprise => 5_000_000,
        }
    }

    pub fn is_paid(&self) -> bool {
        !matches!(self, Self::Free)
    }
}

impl fmt::Display for ApiServiceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiServiceLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(Self::Free),
            "business" => Ok(Self::Business),
            "enterprise" => Ok(Self::Enterprise),
            other => Err(DomainError::parse(format!("Unknown service level: {}", other))),
        }
    }
}

/// How often a subscription is charged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingInterval {
    #[default]
    Month,
    Year,
}

impl BillingInterval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    /// Business plan price for this interval.
    pub fn business_price_usd(&self) -> u32 {
        match self {
            Self::Month => BUSINESS_MONTHLY_PRICE_USD,
            Self::Year => BUSINESS_YEARLY_PRICE_USD,
        }
    }
}

impl fmt::Display for BillingInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BillingInterval {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            other => Err(DomainError::parse(format!("Unknown billing interval: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialInfo {
    pub is_active: bool,
    #[serde(default)]
    pub days_left: u32,
}

/// Snapshot of the organization's subscription as reported by the billing backend.
///
/// Read-only to consumers; a poller replaces it wholesale on every refresh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionContext {
    pub api_service_level: ApiServiceLevel,
    pub is_active: bool,
    #[serde(default)]
    pub trial: TrialInfo,
    #[serde(default)]
    pub has_payment_method: bool,
    #[serde(default)]
    pub billing_interval: Option<BillingInterval>,
    #[serde(default)]
    pub is_loading: bool,
}

impl SubscriptionContext {
    /// Placeholder used before the first refresh completes.
    pub fn loading() -> Self {
        Self {
            is_loading: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotas_grow_with_tier() {
        assert_eq!(ApiServiceLevel::Free.included_event_quota(), 30_000);
        assert_eq!(ApiServiceLevel::Business.included_event_quota(), 250_000);
        assert_eq!(ApiServiceLevel::Enterprise.included_event_quota(), 5_000_000);
    }

    #[test]
    fn business_price_depends_on_interval() {
        assert_eq!(BillingInterval::Month.business_price_usd(), 250);
        assert_eq!(BillingInterval::Year.business_price_usd(), 2_700);
    }

    #[test]
    fn subscription_context_deserializes_camel_case() {
        let json = serde_json::json!({
            "apiServiceLevel": "business",
            "isActive": true,
            "trial": { "isActive": true, "daysLeft": 7 },
            "hasPaymentMethod": false,
            "billingInterval": "year"
        });
        let ctx: SubscriptionContext = serde_json::from_value(json).expect("deserialize");
        assert_eq!(ctx.api_service_level, ApiServiceLevel::Business);
        assert!(ctx.trial.is_active);
        assert_eq!(ctx.trial.days_left, 7);
        assert_eq!(ctx.billing_interval, Some(BillingInterval::Year));
        assert!(!ctx.is_loading);
    }
}
