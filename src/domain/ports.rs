use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Shared store for negotiated signing keys.
///
/// Injected explicitly rather than resolved from a global, so tests and
/// embedders can substitute their own backend.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;
}

/// HTTP transport performing one round trip per call.
///
/// Returns the raw response body; envelope parsing happens above this seam.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, url: &str, body: String) -> Result<String>;
}

pub type CacheStoreBox = Box<dyn CacheStore>;
pub type TransportBox = Box<dyn Transport>;
