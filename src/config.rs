//! Service configuration, read once from the environment at startup.

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the bot backend exposing /profit_curve, /latest, /stats
    pub backend_base: String,
    /// Address the dashboard itself binds to
    pub listen_addr: String,
    /// Timeout for each upstream request, in seconds
    pub http_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            backend_base: std::env::var("BACKEND_BASE")
                .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string()),
            listen_addr: std::env::var("DASH_LISTEN")
                .unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            http_timeout_secs: std::env::var("HTTP_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }
}
