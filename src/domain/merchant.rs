use serde::Deserialize;

/// Merchant credentials issued by the payment platform.
///
/// Read-only input for the clients; loading it from a configuration source is
/// the embedding application's concern.
#[derive(Debug, Clone, Deserialize)]
pub struct Merchant {
    /// Merchant id (`mch_id`).
    pub merchant_id: String,
    /// Bound official-account app id (`appid`).
    pub app_id: String,
    /// Static API signing key configured in the merchant console.
    pub key: String,
}

impl Merchant {
    pub fn new(
        merchant_id: impl Into<String>,
        app_id: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            app_id: app_id.into(),
            key: key.into(),
        }
    }
}
