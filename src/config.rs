use serde::Deserialize;

/// Orchestration tunables. Defaults match the stock tool chain.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Local intercepting-proxy listener port.
    pub proxy_port: u16,
    /// Tor SOCKS port used when the alternate transport is selected.
    pub tor_port: u16,
    /// Seconds to wait for the proxy port to accept connections.
    pub readiness_timeout_secs: u64,
    /// Ports the liveness prober fans out over.
    pub probe_ports: String,
    /// Prober thread count.
    pub probe_threads: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            proxy_port: 8080,
            tor_port: 9050,
            readiness_timeout_secs: 9999,
            probe_ports: "443,80,8080,8000,888".to_string(),
            probe_threads: 200,
        }
    }
}
