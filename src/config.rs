use std::time::Duration;

/// Deployment environment of the remote gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Test,
    Production,
}

impl Environment {
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Test => "TEST",
            Environment::Production => "PRODUCTION",
        }
    }
}

/// Acquisition channel the processing account is configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Channel {
    #[default]
    CardNotPresent,
    CardPresent,
}

impl Channel {
    pub fn as_str(self) -> &'static str {
        match self {
            Channel::CardNotPresent => "CNP",
            Channel::CardPresent => "CP",
        }
    }
}

/// Static context used to construct a `GatewayClient`.
///
/// Credential acquisition and transport configuration live outside this crate;
/// the client only threads these values into each request it dispatches.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub app_id: String,
    pub app_key: String,
    pub environment: Environment,
    pub channel: Channel,
    /// ISO 3166-1 alpha-2 merchant country.
    pub country: String,
    /// Processing account the gateway should route transactions through.
    pub processing_account: Option<String>,
    /// Interval to wait between obtaining a rate quote and consuming it,
    /// covering the gateway's quote-propagation latency. Zero under test
    /// doubles.
    pub settle_delay: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            app_key: String::new(),
            environment: Environment::Test,
            channel: Channel::CardNotPresent,
            country: "GB".to_string(),
            processing_account: None,
            settle_delay: Duration::from_secs(2),
        }
    }
}

impl GatewayConfig {
    /// Ready-made context for the in-process sandbox gateway: authenticated,
    /// DCC processing account, no settling wait.
    pub fn sandbox() -> Self {
        Self {
            app_id: "sandbox-app".to_string(),
            app_key: "sandbox-key".to_string(),
            processing_account: Some("dcc".to_string()),
            settle_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}
