//! Engine configuration read from the process environment.

/// Runtime settings for the engine binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    /// Comma-separated origins, or `*`. CORS is disabled when unset.
    pub cors_allowed_origins: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:notiflow.db?mode=rwc".to_string(),
            server_host: "0.0.0.0".to_string(),
            server_port: 3000,
            cors_allowed_origins: None,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source; unknown or unparsable values
    /// fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let server_port = lookup("SERVER_PORT")
            .or_else(|| lookup("PORT"))
            .and_then(|port| port.trim().parse().ok())
            .unwrap_or(defaults.server_port);

        Self {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            server_host: lookup("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port,
            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
