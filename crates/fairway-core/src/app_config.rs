use std::net::SocketAddr;
use std::path::PathBuf;

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
    pub database_url: String,
    pub serpapi_key: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub queries_path: PathBuf,
    /// Logical collection holding the grouped-product documents.
    pub collection: String,
    /// ISO 4217 code stamped onto every extracted offer.
    pub currency: String,
    pub country: String,
    pub language: String,
    pub page_size: u32,
    /// Number of result pages fetched per query, at `page_size` strides.
    pub page_count: u32,
    /// Cron expression for scheduled runs; `None` disables the scheduler.
    pub schedule: Option<String>,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub serp_request_timeout_secs: u64,
    pub serp_max_retries: u32,
    pub serp_retry_backoff_base_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("queries_path", &self.queries_path)
            .field("database_url", &"[redacted]")
            .field("serpapi_key", &"[redacted]")
            .field("collection", &self.collection)
            .field("currency", &self.currency)
            .field("country", &self.country)
            .field("language", &self.language)
            .field("page_size", &self.page_size)
            .field("page_count", &self.page_count)
            .field("schedule", &self.schedule)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field(
                "serp_request_timeout_secs",
                &self.serp_request_timeout_secs,
            )
            .field("serp_max_retries", &self.serp_max_retries)
            .field(
                "serp_retry_backoff_base_ms",
                &self.serp_retry_backoff_base_ms,
            )
            .finish()
    }
}
