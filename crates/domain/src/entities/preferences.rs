//! Tenant-level channel preferences.

use serde::{Deserialize, Serialize};

/// Enablement of a single delivery channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelPreference {
    pub enabled: bool,
}

impl Default for ChannelPreference {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Master switch applied on top of the per-channel settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllChannelsPreference {
    pub enabled: bool,
    #[serde(default)]
    pub read_only: bool,
}

impl Default for AllChannelsPreference {
    fn default() -> Self {
        Self {
            enabled: true,
            read_only: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ChannelPreferences {
    #[serde(default)]
    pub in_app: ChannelPreference,
    #[serde(default)]
    pub email: ChannelPreference,
    #[serde(default)]
    pub sms: ChannelPreference,
    #[serde(default)]
    pub chat: ChannelPreference,
    #[serde(default)]
    pub push: ChannelPreference,
}

/// Channel configuration for one environment/organization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowPreferences {
    #[serde(default)]
    pub all: AllChannelsPreference,
    #[serde(default)]
    pub channels: ChannelPreferences,
}

/// Where a preferences snapshot came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferencesSource {
    #[default]
    Default,
    Stored,
}

/// Preferences as resolved for a single request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferencesSnapshot {
    pub source: PreferencesSource,
    pub preferences: WorkflowPreferences,
}

impl PreferencesSnapshot {
    pub fn stored(preferences: WorkflowPreferences) -> Self {
        Self {
            source: PreferencesSource::Stored,
            preferences,
        }
    }

    pub fn is_default(&self) -> bool {
        self.source == PreferencesSource::Default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_snapshot_enables_everything() {
        let snapshot = PreferencesSnapshot::default();
        assert!(snapshot.is_default());
        assert!(snapshot.preferences.all.enabled);
        assert!(!snapshot.preferences.all.read_only);
        assert!(snapshot.preferences.channels.email.enabled);
        assert!(snapshot.preferences.channels.push.enabled);
    }

    #[test]
    fn partial_json_fills_missing_channels() {
        let json = serde_json::json!({ "channels": { "sms": { "enabled": false } } });
        let prefs: WorkflowPreferences = serde_json::from_value(json).expect("deserialize");
        assert!(!prefs.channels.sms.enabled);
        assert!(prefs.channels.email.enabled);
        assert!(prefs.all.enabled);
    }
}
