#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Confirmation key for the juso.go.kr road-address search API.
    pub juso_confm_key: String,
    /// API key for the Seoul open-data portal (rent prices, air quality).
    pub seoul_data_key: Option<String>,
    /// Decoded service key for apis.data.go.kr (building ledger, flood stats).
    pub data_go_kr_key: Option<String>,
    pub juso_base_url: String,
    pub request_timeout_secs: u64,
    /// The Seoul rent dataset is slow; it gets its own, longer timeout.
    pub seoul_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("juso_confm_key", &"[redacted]")
            .field(
                "seoul_data_key",
                &self.seoul_data_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "data_go_kr_key",
                &self.data_go_kr_key.as_ref().map(|_| "[redacted]"),
            )
            .field("juso_base_url", &self.juso_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("seoul_timeout_secs", &self.seoul_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .finish()
    }
}
