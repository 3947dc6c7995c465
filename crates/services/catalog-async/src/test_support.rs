//! Test-only utilities for safely mutating process-global state in tests.

/// RAII guard for temporarily changing environment variables.
///
/// Every variable touched through the guard is restored to its previous state
/// (or removed if it was not set) when the guard is dropped, in reverse order.
///
/// ```ignore
/// let _env = EnvGuard::new()
///     .set("API_KEY", "test-key")
///     .remove("API_BASE_URL");
/// ```
#[derive(Default)]
pub struct EnvGuard {
    saved: Vec<(&'static str, Option<String>)>,
}

impl EnvGuard {
    /// Create an empty guard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `val` until the guard drops.
    ///
    /// # Safety
    ///
    /// `std::env::set_var` can race with concurrent readers. Callers must mark the
    /// test `#[serial(env)]`.
    #[must_use]
    pub fn set(mut self, key: &'static str, val: &str) -> Self {
        self.saved.push((key, std::env::var(key).ok()));
        unsafe { std::env::set_var(key, val) };
        self
    }

    /// Remove `key` until the guard drops.
    ///
    /// # Safety
    ///
    /// Same constraint as [`EnvGuard::set`].
    #[must_use]
    pub fn remove(mut self, key: &'static str) -> Self {
        self.saved.push((key, std::env::var(key).ok()));
        unsafe { std::env::remove_var(key) };
        self
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        while let Some((key, prev)) = self.saved.pop() {
            match prev {
                Some(v) => unsafe { std::env::set_var(key, v) },
                None => unsafe { std::env::remove_var(key) },
            }
        }
    }
}
