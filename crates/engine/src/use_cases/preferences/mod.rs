//! Preferences use cases.

mod get_preferences;

use std::sync::Arc;

pub use get_preferences::{GetPreferences, PreferencesError};

/// Container for preferences use cases.
pub struct PreferencesUseCases {
    pub get: Arc<GetPreferences>,
}

impl PreferencesUseCases {
    pub fn new(get: Arc<GetPreferences>) -> Self {
        Self { get }
    }
}
