use crate::domain::envelope::{self, Envelope};
use crate::domain::merchant::Merchant;
use crate::domain::ports::{CacheStoreBox, TransportBox};
use crate::domain::sandbox::{SIGN_KEY_ENDPOINT, SIGN_KEY_TTL, Sandbox};
use crate::domain::sign;
use crate::error::{PaymentError, Result};
use std::collections::BTreeMap;
use tracing::debug;

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.mch.weixin.qq.com/";

/// Signed-request primitive shared by the payment API clients.
///
/// Owns the merchant credentials and the injected collaborators, routes every
/// call through the sandbox capability and awaits one round trip per
/// operation.
pub struct PaymentClient {
    merchant: Merchant,
    base_url: String,
    transport: TransportBox,
    cache: CacheStoreBox,
    sandbox: Sandbox,
}

impl PaymentClient {
    pub fn new(merchant: Merchant, transport: TransportBox, cache: CacheStoreBox) -> Self {
        Self {
            merchant,
            base_url: DEFAULT_BASE_URL.to_string(),
            transport,
            cache,
            sandbox: Sandbox::new(false),
        }
    }

    /// Routes subsequent calls through the platform's sandbox namespace.
    ///
    /// Also resets any previously negotiated key for this instance.
    pub fn sandbox_mode(mut self, enabled: bool) -> Self {
        self.sandbox = Sandbox::new(enabled);
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn merchant(&self) -> &Merchant {
        &self.merchant
    }

    /// Sends a signed request and returns the raw response body.
    ///
    /// The fixed fields (`mch_id`, `appid`, `nonce_str`) and the `sign`
    /// computed with the key resolved for `resource` are merged into the
    /// payload before it is encoded and posted.
    pub async fn request(
        &self,
        resource: &str,
        mut payload: BTreeMap<String, String>,
    ) -> Result<String> {
        payload.insert("mch_id".to_string(), self.merchant.merchant_id.clone());
        payload.insert("appid".to_string(), self.merchant.app_id.clone());
        payload.insert("nonce_str".to_string(), sign::nonce());

        let key = self.sign_key_for(resource).await?;
        let signature = sign::signature(&payload, &key);
        payload.insert("sign".to_string(), signature);

        let endpoint = self.sandbox.rewrite_endpoint(resource);
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(endpoint = %endpoint, "sending signed payment request");
        self.transport.post(&url, envelope::to_xml(&payload)).await
    }

    /// Sends a signed request and parses the XML envelope.
    ///
    /// The envelope is returned as-is; interpreting `return_code` is left to
    /// the caller.
    pub async fn safe_request(
        &self,
        resource: &str,
        payload: BTreeMap<String, String>,
    ) -> Result<Envelope> {
        let body = self.request(resource, payload).await?;
        Envelope::parse(&body)
    }

    /// Signing key for a call to `resource`.
    ///
    /// The static merchant key outside sandbox mode and for the negotiation
    /// endpoint itself; the negotiated sandbox key everywhere else.
    pub async fn sign_key_for(&self, resource: &str) -> Result<String> {
        if self.sandbox.uses_static_key(resource) {
            return Ok(self.merchant.key.clone());
        }
        self.sandbox_sign_key().await
    }

    /// Resolves the sandbox signing key, memoizing across calls.
    ///
    /// Checks the per-instance slot, then the shared store, and only then
    /// negotiates over the network. Nothing is written on failure.
    pub async fn sandbox_sign_key(&self) -> Result<String> {
        let mut slot = self.sandbox.sign_key.lock().await;
        if let Some(key) = slot.as_ref() {
            return Ok(key.clone());
        }

        let cache_key = Sandbox::cache_key(&self.merchant.merchant_id);
        if let Some(key) = self.cache.get(&cache_key).await? {
            debug!("sandbox sign key found in shared store");
            *slot = Some(key.clone());
            return Ok(key);
        }

        let body = Box::pin(self.request(SIGN_KEY_ENDPOINT, BTreeMap::new())).await?;
        let result = Envelope::parse(&body)?;
        if !result.is_success() {
            return Err(PaymentError::InvalidArgument(result.return_msg().to_string()));
        }

        let key = result.require("sandbox_signkey")?.to_string();
        self.cache.set(&cache_key, &key, SIGN_KEY_TTL).await?;
        *slot = Some(key.clone());
        debug!("negotiated sandbox sign key");
        Ok(key)
    }
}
