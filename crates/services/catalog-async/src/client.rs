use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use reqwest::Method;
use secrecy::ExposeSecret;
use serde_json::Value;
use tokio::sync::{Mutex, Semaphore};
use tracing::{debug, warn};

use crate::{config::Settings, error::CatalogError};

/// Upper bound on requests in flight through one pool.
pub const MAX_CONNECTIONS: usize = 10;
/// Upper bound on idle keep-alive connections per host.
pub const MAX_IDLE_PER_HOST: usize = 5;
/// Identifying `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("catalog-mcp/", env!("CARGO_PKG_VERSION"));
/// Query parameter carrying the API key.
pub const API_KEY_PARAM: &str = "api_key";

/// A live pooled connection handle.
///
/// Dropping the last reference closes its idle connections.
#[derive(Debug)]
pub struct HttpPool {
    http: reqwest::Client,
    permits: Semaphore,
    generation: u64,
}

impl HttpPool {
    /// Sequence number of this pool; each construction increments it.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// Catalog API client.
///
/// Holds at most one [`HttpPool`]. The pool is built on first use and kept until
/// [`Client::release`]; the next request after a release builds a fresh one.
/// Construction happens under a lock, so concurrent first callers share one pool.
#[derive(Debug)]
pub struct Client {
    settings: Settings,
    pool: Mutex<Option<Arc<HttpPool>>>,
    pools_created: AtomicU64,
}

impl Client {
    /// Creates a disconnected client.
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            pool: Mutex::new(None),
            pools_created: AtomicU64::new(0),
        }
    }

    /// Returns a reference to the client's settings
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the live pool, building one if the client is disconnected.
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout setting is invalid or the HTTP client cannot
    /// be built.
    pub async fn acquire(&self) -> Result<Arc<HttpPool>, CatalogError> {
        let mut slot = self.pool.lock().await;
        if let Some(pool) = slot.as_ref() {
            return Ok(Arc::clone(pool));
        }

        let timeout = self.settings.api_timeout()?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(MAX_IDLE_PER_HOST)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| CatalogError::Config(format!("failed to build HTTP client: {e}")))?;

        let generation = self.pools_created.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(generation, ?timeout, "opened catalog connection pool");

        let pool = Arc::new(HttpPool {
            http,
            permits: Semaphore::new(MAX_CONNECTIONS),
            generation,
        });
        *slot = Some(Arc::clone(&pool));
        Ok(pool)
    }

    /// Drops the live pool, if any. Requests already holding it run to completion.
    pub async fn release(&self) {
        if let Some(pool) = self.pool.lock().await.take() {
            debug!(generation = pool.generation, "released catalog connection pool");
        }
    }

    /// Whether a pool is currently held.
    pub async fn is_connected(&self) -> bool {
        self.pool.lock().await.is_some()
    }

    /// Number of pools built over the client's lifetime.
    #[must_use]
    pub fn pools_created(&self) -> u64 {
        self.pools_created.load(Ordering::SeqCst)
    }

    /// Issues a `GET` to `endpoint`.
    ///
    /// # Errors
    ///
    /// See [`Client::request`].
    pub async fn get(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<Value, CatalogError> {
        self.request(Method::GET, endpoint, query).await
    }

    /// Sends one request and returns the decoded JSON body.
    ///
    /// The API key is merged into `query` (replacing any caller-supplied
    /// `api_key`). No retries are attempted.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Config`] when no API key is configured; nothing is sent.
    /// - [`CatalogError::Transport`] on network failure or timeout.
    /// - [`CatalogError::Status`] when the upstream answers with status >= 400.
    /// - [`CatalogError::Decode`] when a successful body is not JSON.
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<Value, CatalogError> {
        let key = self.settings.api_key()?;
        let pool = self.acquire().await?;

        let mut params: Vec<(&str, &str)> = query
            .iter()
            .filter(|(k, _)| *k != API_KEY_PARAM)
            .map(|(k, v)| (*k, v.as_str()))
            .collect();
        params.push((API_KEY_PARAM, key.expose_secret()));

        let _permit = pool
            .permits
            .acquire()
            .await
            .map_err(|_| CatalogError::Transport("connection pool closed".into()))?;

        debug!(%method, endpoint, "catalog request");
        let url = self.settings.url(endpoint);
        let result = send(&pool.http, method.clone(), &url, &params, endpoint).await;
        if let Err(e) = &result {
            warn!(%method, endpoint, error = %e, "catalog request failed");
        }
        result
    }
}

async fn send(
    http: &reqwest::Client,
    method: Method,
    url: &str,
    params: &[(&str, &str)],
    endpoint: &str,
) -> Result<Value, CatalogError> {
    let response = http.request(method, url).query(params).send().await?;

    let status = response.status();
    let bytes = response.bytes().await?;

    if !status.is_success() {
        return Err(CatalogError::from_status(status, endpoint, &bytes));
    }

    serde_json::from_slice(&bytes).map_err(|e| crate::error::map_deser(&e, &bytes))
}
