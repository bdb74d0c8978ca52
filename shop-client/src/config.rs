//! Client configuration

/// Default shop API base URL
pub const DEFAULT_BASE_URL: &str = "https://grokart-2.onrender.com/api/v1";

/// Client configuration for connecting to the shop API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "https://shop.example.com/api/v1")
    pub base_url: String,

    /// Session token established by the login flow
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: 15,
        }
    }

    /// Set the session token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Create a network order source from this configuration
    pub fn build_order_source(&self) -> crate::ClientResult<crate::NetworkOrderSource> {
        crate::NetworkOrderSource::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
