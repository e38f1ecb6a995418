//! Product analytics.

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait AnalyticsPort: Send + Sync {
    fn track(&self, event: &str);
}
