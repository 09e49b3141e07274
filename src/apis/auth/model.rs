use secrecy::{ExposeSecret, Secret};
use std::fmt;

/// Secret API key of a payment provider (`sk_live_...` / `sk_test_...`).
///
/// It is a wrapper around a [`secrecy::Secret`](secrecy::Secret), so the key is redacted
/// when printed and the backing memory is wiped on drop.
///
/// ```rust
/// # use paygate::apis::auth::ApiKey;
/// let key = ApiKey::new("sk_test_supersecret");
///
/// // The secret is redacted when printed with Debug
/// assert!(!format!("{:?}", key).contains("supersecret"));
///
/// // But can be manually exposed calling `expose_secret()`
/// assert_eq!(key.expose_secret(), "sk_test_supersecret");
/// ```
#[derive(Clone)]
pub struct ApiKey(Secret<String>);

impl ApiKey {
    /// Wraps a secret string in a new `ApiKey`.
    pub fn new<T: Into<String>>(s: T) -> Self {
        Self(Secret::new(s.into()))
    }

    /// Exposes a reference to the underlying secret string.
    pub fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }

    /// Whether this is a test-mode key, according to the `sk_test_` prefix both providers use.
    pub fn is_test_key(&self) -> bool {
        self.expose_secret().starts_with("sk_test_")
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&"[REDACTED]").finish()
    }
}

impl<T> From<T> for ApiKey
where
    T: Into<String>,
{
    fn from(s: T) -> Self {
        ApiKey::new(s)
    }
}
