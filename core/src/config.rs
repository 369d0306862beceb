//! Client configuration.

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_USER_AGENT: &str = concat!("rest-client/", env!("CARGO_PKG_VERSION"));

pub const ENV_BASE_URL: &str = "REST_CLIENT_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "REST_CLIENT_TIMEOUT_SECS";
pub const ENV_USER_AGENT: &str = "REST_CLIENT_USER_AGENT";

/// Settings used by `RestClient::from_config`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Whole-call timeout handed to the transport. `None` waits forever.
    pub timeout: Option<Duration>,
    /// Sent as `user-agent` unless an option overrides it.
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Some(DEFAULT_TIMEOUT),
            user_agent: Some(DEFAULT_USER_AGENT.to_string()),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Defaults overridden by `REST_CLIENT_*` environment variables.
    ///
    /// A timeout of `0` disables the timeout; unparsable values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(url) = lookup(ENV_BASE_URL) {
            config.base_url = url;
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            match secs.trim().parse::<u64>() {
                Ok(0) => config.timeout = None,
                Ok(secs) => config.timeout = Some(Duration::from_secs(secs)),
                Err(_) => tracing::warn!(value = %secs, "ignoring invalid {ENV_TIMEOUT_SECS}"),
            }
        }
        if let Some(agent) = lookup(ENV_USER_AGENT) {
            config.user_agent = if agent.is_empty() { None } else { Some(agent) };
        }
        config
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn no_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn no_user_agent(mut self) -> Self {
        self.user_agent = None;
        self
    }
}
