//! Analytics sink that records events in the trace log.

use crate::ports::AnalyticsPort;

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAnalytics;

impl AnalyticsPort for TracingAnalytics {
    fn track(&self, event: &str) {
        tracing::info!(target: "notiflow_player::analytics", event, "Analytics event");
    }
}
