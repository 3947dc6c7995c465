use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use crate::error::CatalogError;

/// Default upstream API base URL
pub const DEFAULT_API_BASE: &str = "https://api.example.com/v1";
/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: f64 = 30.0;
/// Default ceiling on results per call
pub const DEFAULT_MAX_RESULTS: u32 = 50;
/// Default cache lifetime in seconds
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Environment variable holding the API base URL
pub const ENV_API_BASE_URL: &str = "API_BASE_URL";
/// Environment variable holding the API key
pub const ENV_API_KEY: &str = "API_KEY";
/// Environment variable holding the request timeout
pub const ENV_API_TIMEOUT: &str = "API_TIMEOUT";
/// Environment variable holding the result ceiling
pub const ENV_MAX_RESULTS: &str = "MAX_RESULTS";
/// Environment variable holding the cache lifetime
pub const ENV_CACHE_TTL: &str = "CACHE_TTL";

/// Operating parameters for the catalog client.
///
/// Every accessor consults the process environment at call time, so a changed
/// variable takes effect on the next read. Values set through the `with_*`
/// builders take precedence over the environment.
///
/// Debug output redacts the API key via [`SecretString`].
#[derive(Clone, Debug, Default)]
pub struct Settings {
    api_base: Option<String>,
    api_key: Option<SecretString>,
    timeout: Option<Duration>,
}

impl Settings {
    /// Creates settings that read everything from the environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pins the API base URL, ignoring `API_BASE_URL`.
    #[must_use]
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = Some(base.into());
        self
    }

    /// Pins the API key, ignoring `API_KEY`.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(key.into()));
        self
    }

    /// Pins the request timeout, ignoring `API_TIMEOUT`.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Base URL of the upstream API.
    #[must_use]
    pub fn api_base_url(&self) -> String {
        self.api_base
            .clone()
            .or_else(|| env_value(ENV_API_BASE_URL))
            .unwrap_or_else(|| DEFAULT_API_BASE.into())
    }

    /// API key sent with every request.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Config`] when no key is configured. There is no
    /// default: the client refuses to run without a credential.
    pub fn api_key(&self) -> Result<SecretString, CatalogError> {
        if let Some(secret) = &self.api_key {
            let key = secret.expose_secret().trim();
            if key.is_empty() {
                return Err(missing_key());
            }
            return Ok(SecretString::from(key.to_string()));
        }

        env_value(ENV_API_KEY)
            .map(SecretString::from)
            .ok_or_else(missing_key)
    }

    /// Per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Config`] when `API_TIMEOUT` is not a non-negative
    /// number of seconds.
    pub fn api_timeout(&self) -> Result<Duration, CatalogError> {
        if let Some(timeout) = self.timeout {
            return Ok(timeout);
        }
        let secs: f64 = parse_env(ENV_API_TIMEOUT, DEFAULT_TIMEOUT_SECS)?;
        Duration::try_from_secs_f64(secs).map_err(|_| {
            CatalogError::Config(format!(
                "{ENV_API_TIMEOUT} must be a non-negative number of seconds, got {secs}"
            ))
        })
    }

    /// Configured `MAX_RESULTS`. Request limits are clamped to the fixed
    /// [`MAX_LIMIT`](crate::resources::MAX_LIMIT) regardless of this value.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Config`] when `MAX_RESULTS` is not an unsigned integer.
    pub fn max_results(&self) -> Result<u32, CatalogError> {
        parse_env(ENV_MAX_RESULTS, DEFAULT_MAX_RESULTS)
    }

    /// How long responses may be cached, in seconds. Nothing consults this yet.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Config`] when `CACHE_TTL` is not an unsigned integer.
    pub fn cache_ttl(&self) -> Result<u64, CatalogError> {
        parse_env(ENV_CACHE_TTL, DEFAULT_CACHE_TTL_SECS)
    }

    /// Reads every setting once, reporting the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first [`CatalogError::Config`] encountered.
    pub fn validate(&self) -> Result<(), CatalogError> {
        self.api_key()?;
        self.api_timeout()?;
        self.max_results()?;
        self.cache_ttl()?;
        Ok(())
    }

    /// Joins the base URL and an endpoint path with exactly one slash.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        let base = self.api_base_url();
        let base = base.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T, CatalogError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env_value(key) {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|e| CatalogError::Config(format!("{key} has invalid value {raw:?}: {e}"))),
    }
}

fn missing_key() -> CatalogError {
    CatalogError::Config(format!(
        "{ENV_API_KEY} environment variable is required. \
         Get a key from your API provider and add it to your .env file."
    ))
}
