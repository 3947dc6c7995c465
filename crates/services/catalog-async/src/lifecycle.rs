use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use crate::{client::Client, config::Settings};

/// Owns the process's one [`Client`].
///
/// Hand an `Arc<ClientLifecycle>` to whatever hosts the tools. The client is built
/// on first demand under a lock and torn down by [`ClientLifecycle::shutdown`];
/// demand after a shutdown builds a new one.
#[derive(Debug)]
pub struct ClientLifecycle {
    settings: Settings,
    slot: Mutex<Option<Arc<Client>>>,
}

impl ClientLifecycle {
    /// Creates an empty lifecycle; no client exists until first demand.
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            slot: Mutex::new(None),
        }
    }

    /// Returns the live client, creating it if none exists.
    pub async fn get_or_create(&self) -> Arc<Client> {
        let mut slot = self.slot.lock().await;
        match slot.as_ref() {
            Some(client) => Arc::clone(client),
            None => {
                let client = Arc::new(Client::new(self.settings.clone()));
                *slot = Some(Arc::clone(&client));
                client
            }
        }
    }

    /// Releases the client's connections and forgets it. Safe to call repeatedly.
    pub async fn shutdown(&self) {
        let client = self.slot.lock().await.take();
        if let Some(client) = client {
            client.release().await;
            info!("catalog client shut down");
        }
    }

    /// Whether a client currently exists.
    pub async fn is_live(&self) -> bool {
        self.slot.lock().await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::ENV_API_TIMEOUT;
    use crate::test_support::EnvGuard;
    use serial_test::serial;

    fn lifecycle() -> ClientLifecycle {
        ClientLifecycle::new(
            Settings::new()
                .with_api_base("http://127.0.0.1:9")
                .with_api_key("k")
                .with_timeout(Duration::from_secs(5)),
        )
    }

    #[tokio::test]
    async fn get_or_create_reuses_instance() {
        let lc = lifecycle();
        assert!(!lc.is_live().await);

        let a = lc.get_or_create().await;
        let b = lc.get_or_create().await;
        assert!(Arc::ptr_eq(&a, &b));
        assert!(lc.is_live().await);
    }

    #[tokio::test]
    async fn shutdown_releases_pool_and_clears_slot() {
        let lc = lifecycle();
        let client = lc.get_or_create().await;
        client.acquire().await.unwrap();
        assert!(client.is_connected().await);

        lc.shutdown().await;
        assert!(!lc.is_live().await);
        assert!(!client.is_connected().await);
    }

    #[tokio::test]
    #[serial(env)]
    async fn shutdown_ignores_malformed_timeout_env() {
        let _env = EnvGuard::new().set(ENV_API_TIMEOUT, "soon");
        let lc = lifecycle();
        let client = lc.get_or_create().await;
        client.acquire().await.unwrap();

        lc.shutdown().await;
        assert!(!client.is_connected().await);
    }

    #[tokio::test]
    async fn shutdown_twice_is_safe() {
        let lc = lifecycle();
        lc.get_or_create().await;

        lc.shutdown().await;
        lc.shutdown().await;
        assert!(!lc.is_live().await);
    }

    #[tokio::test]
    async fn recreated_after_shutdown() {
        let lc = lifecycle();
        let before = lc.get_or_create().await;
        lc.shutdown().await;

        let after = lc.get_or_create().await;
        assert!(!Arc::ptr_eq(&before, &after));
        assert!(lc.is_live().await);
    }

    #[tokio::test]
    async fn concurrent_first_calls_share_one_client() {
        let lc = Arc::new(lifecycle());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let lc = Arc::clone(&lc);
                tokio::spawn(async move { lc.get_or_create().await })
            })
            .collect();

        let mut clients = Vec::new();
        for h in handles {
            clients.push(h.await.unwrap());
        }
        assert!(clients.iter().all(|c| Arc::ptr_eq(c, &clients[0])));
    }
}
