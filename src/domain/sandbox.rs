use std::time::Duration;
use tokio::sync::Mutex;

/// Resource path negotiating the sandbox signing key.
///
/// Already lives under the sandbox namespace and is always signed with the
/// static merchant key, otherwise fetching the sandbox key would require one.
pub const SIGN_KEY_ENDPOINT: &str = "sandboxnew/pay/getsignkey";

/// Namespace segment prefixed to resource paths in sandbox mode.
const SANDBOX_PREFIX: &str = "sandboxnew/";

/// Shared-store lifetime of a negotiated sandbox key.
pub const SIGN_KEY_TTL: Duration = Duration::from_secs(24 * 3600);

const SIGN_KEY_CACHE_PREFIX: &str = "easywechat.payment.sandbox.";

/// Sandbox capability embedded by a payment client.
///
/// Holds the mode flag and the per-instance negotiated key. The key slot is a
/// mutex held across resolution, so concurrent operations on one client
/// negotiate at most once.
pub struct Sandbox {
    enabled: bool,
    pub(crate) sign_key: Mutex<Option<String>>,
}

impl Sandbox {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            sign_key: Mutex::new(None),
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Actual path to call for `resource` under the current mode.
    ///
    /// Idempotent: a resource already under the sandbox namespace keeps its
    /// path, so the negotiation endpoint is never double-prefixed.
    pub fn rewrite_endpoint(&self, resource: &str) -> String {
        if self.enabled && !resource.starts_with(SANDBOX_PREFIX) {
            format!("{SANDBOX_PREFIX}{resource}")
        } else {
            resource.to_string()
        }
    }

    /// Whether a call to `resource` is signed with the static merchant key.
    pub fn uses_static_key(&self, resource: &str) -> bool {
        !self.enabled || resource == SIGN_KEY_ENDPOINT
    }

    /// Shared-store key holding a merchant's negotiated sandbox key.
    pub fn cache_key(merchant_id: &str) -> String {
        format!("{SIGN_KEY_CACHE_PREFIX}{merchant_id}")
    }
}
