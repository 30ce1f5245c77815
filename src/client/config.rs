use std::time::Duration;

/// Default client endpoint of an etcd member
pub const DEFAULT_ENDPOINT: &str = "127.0.0.1:2379";

/// Store client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Store endpoint, either `host:port` or a full `http(s)://` URL
    pub endpoint: String,

    /// Time allowed to establish the connection
    pub dial_timeout: Duration,

    /// Time allowed for the whole transaction call
    pub command_timeout: Duration,
}

impl ClientConfig {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            dial_timeout: Duration::from_secs(2),
            command_timeout: Duration::from_secs(5),
        }
    }

    /// Set connection timeout
    pub fn dial_timeout(mut self, timeout: Duration) -> Self {
        self.dial_timeout = timeout;
        self
    }

    /// Set transaction call timeout
    pub fn command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = timeout;
        self
    }

    /// Endpoint as a base URL; bare `host:port` defaults to plain http
    pub fn endpoint_url(&self) -> String {
        let endpoint = self.endpoint.trim().trim_end_matches('/');
        if endpoint.contains("://") {
            endpoint.to_string()
        } else {
            format!("http://{}", endpoint)
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.endpoint.trim().is_empty() {
            return Err("endpoint cannot be empty".to_string());
        }

        let url = self.endpoint_url();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(format!("unsupported endpoint scheme in '{}'", self.endpoint));
        }

        if self.dial_timeout.is_zero() {
            return Err("dial_timeout must be > 0".to_string());
        }

        if self.command_timeout.is_zero() {
            return Err("command_timeout must be > 0".to_string());
        }

        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}
