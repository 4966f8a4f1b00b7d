use super::client::PaymentClient;
use crate::domain::envelope::Envelope;
use crate::error::Result;
use std::collections::BTreeMap;

/// Cash-coupon operations.
///
/// Thin wrappers over [`PaymentClient::safe_request`]; each call is one
/// signed round trip.
pub struct CouponClient {
    client: PaymentClient,
}

impl CouponClient {
    pub fn new(client: PaymentClient) -> Self {
        Self { client }
    }

    /// The wrapped client, for direct access to the request primitives.
    pub fn client(&self) -> &PaymentClient {
        &self.client
    }

    /// Sends a cash coupon to a user.
    ///
    /// The platform accepts one recipient per call, so `openid_count` is
    /// pinned to `1`.
    pub async fn send(&self, mut params: BTreeMap<String, String>) -> Result<Envelope> {
        params.insert("openid_count".to_string(), "1".to_string());
        self.client
            .safe_request("mmpaymkttransfers/send_coupon", params)
            .await
    }

    /// Queries a coupon stock.
    pub async fn query_stock(&self, params: BTreeMap<String, String>) -> Result<Envelope> {
        self.client
            .safe_request("mmpaymkttransfers/query_coupon_stock", params)
            .await
    }

    /// Queries the details of an issued coupon.
    pub async fn query(&self, params: BTreeMap<String, String>) -> Result<Envelope> {
        self.client
            .safe_request("mmpaymkttransfers/querycouponsinfo", params)
            .await
    }
}
