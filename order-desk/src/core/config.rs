use shared::SERVICE_FEE;
use shop_client::ClientConfig;
use shop_client::config::DEFAULT_BASE_URL;
use std::time::Duration;

/// Desk configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | SHOP_API_URL | https://grokart-2.onrender.com/api/v1 | Shop API base URL |
/// | SHOP_API_TOKEN | - | Session token from the login flow |
/// | POLL_INTERVAL_SECS | 10 | Order sync period |
/// | REQUEST_TIMEOUT_SECS | 15 | Per-request timeout |
/// | SERVICE_FEE | 22 | Fee subtracted from displayed totals |
/// | LOG_LEVEL | info | Default log filter (RUST_LOG wins) |
/// | LOG_DIR | - | Directory for daily rolling log files |
///
/// # Example
///
/// ```ignore
/// SHOP_API_TOKEN=eyJ... POLL_INTERVAL_SECS=5 cargo run -p order-desk
/// ```
#[derive(Debug, Clone)]
pub struct DeskConfig {
    pub api_url: String,
    pub api_token: Option<String>,
    pub poll_interval_secs: u64,
    pub request_timeout_secs: u64,
    pub service_fee: f64,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl DeskConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            api_url: non_empty("SHOP_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into()),
            api_token: non_empty("SHOP_API_TOKEN"),
            // A zero period would spin the sync loop
            poll_interval_secs: non_empty("POLL_INTERVAL_SECS")
                .and_then(|v| v.trim().parse().ok())
                .filter(|&secs: &u64| secs > 0)
                .unwrap_or(10),
            request_timeout_secs: non_empty("REQUEST_TIMEOUT_SECS")
                .and_then(|v| v.trim().parse().ok())
                .filter(|&secs: &u64| secs > 0)
                .unwrap_or(15),
            service_fee: non_empty("SERVICE_FEE")
                .and_then(|v| v.trim().parse().ok())
                .filter(|fee: &f64| fee.is_finite() && *fee >= 0.0)
                .unwrap_or(SERVICE_FEE),
            log_level: non_empty("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: non_empty("LOG_DIR"),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Order source client configuration
    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(&self.api_url).with_timeout(self.request_timeout_secs);
        match &self.api_token {
            Some(token) => config.with_token(token),
            None => config,
        }
    }
}
