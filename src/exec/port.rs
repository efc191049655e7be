use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time::{timeout, Instant};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);
const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Poll `host:port` with short-lived connection attempts until one
/// succeeds or `wait` elapses. Failures while polling are expected and
/// logged at debug level only.
pub async fn wait_for_port(host: &str, port: u16, wait: Duration) -> bool {
    let deadline = Instant::now() + wait;
    while Instant::now() < deadline {
        match timeout(CONNECT_TIMEOUT, TcpStream::connect((host, port))).await {
            Ok(Ok(_)) => {
                tracing::info!("port {port} on {host} is open");
                return true;
            }
            Ok(Err(e)) => tracing::debug!("waiting for {host}:{port}: {e}"),
            Err(_) => tracing::debug!("waiting for {host}:{port}: connect timed out"),
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
    tracing::error!("timeout waiting for port {port} on {host}");
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn free_port() -> u16 {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    }

    #[tokio::test]
    async fn closed_port_returns_false_after_the_deadline() {
        let port = free_port();
        let start = std::time::Instant::now();
        assert!(!wait_for_port("127.0.0.1", port, Duration::from_secs(2)).await);
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(2));
        // no later than the deadline plus one poll interval, with slack
        assert!(elapsed < Duration::from_secs(4));
    }

    #[tokio::test]
    async fn listener_appearing_mid_wait_is_detected() {
        let port = free_port();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(1500)).await;
            let _listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });
        let start = std::time::Instant::now();
        assert!(wait_for_port("127.0.0.1", port, Duration::from_secs(10)).await);
        // detected within one poll interval of the listener starting
        assert!(start.elapsed() < Duration::from_secs(4));
    }
}
