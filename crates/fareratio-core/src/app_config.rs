use std::net::SocketAddr;

#[derive(Clone)]
pub struct AppConfig {
    pub kiwi_api_key: String,
    pub kiwi_base_url: String,
    pub currency: String,
    /// `None` leaves the HTTP client on its default (no overall timeout).
    pub request_timeout_secs: Option<u64>,
    pub bind_addr: SocketAddr,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("kiwi_api_key", &"[redacted]")
            .field("kiwi_base_url", &self.kiwi_base_url)
            .field("currency", &self.currency)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .finish()
    }
}
