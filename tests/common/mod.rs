use async_trait::async_trait;
use easywechat::domain::ports::{CacheStore, Transport};
use easywechat::domain::sign;
use easywechat::error::Result;
use easywechat::{Envelope, Merchant, PaymentClient};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const STATIC_KEY: &str = "merchant-static-key";

pub fn merchant() -> Merchant {
    Merchant::new("1900000109", "wx1234567890abcdef", STATIC_KEY)
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub url: String,
    pub body: String,
}

/// Transport fake returning scripted bodies and recording every call.
#[derive(Default, Clone)]
pub struct MockTransport {
    responses: Arc<Mutex<VecDeque<String>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockTransport {
    pub fn with_responses(bodies: impl IntoIterator<Item = String>) -> Self {
        let transport = Self::default();
        transport.responses.lock().unwrap().extend(bodies);
        transport
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post(&self, url: &str, body: String) -> Result<String> {
        self.calls.lock().unwrap().push(RecordedCall {
            url: url.to_string(),
            body,
        });
        Ok(self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted response left for request"))
    }
}

/// Cache fake recording writes together with their TTL.
#[derive(Default, Clone)]
pub struct RecordingCacheStore {
    entries: Arc<Mutex<HashMap<String, (String, Duration)>>>,
    reads: Arc<Mutex<usize>>,
}

impl RecordingCacheStore {
    pub fn seeded(key: &str, value: &str) -> Self {
        let store = Self::default();
        store
            .entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), Duration::ZERO));
        store
    }

    pub fn entry(&self, key: &str) -> Option<(String, Duration)> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }

    pub fn reads(&self) -> usize {
        *self.reads.lock().unwrap()
    }
}

#[async_trait]
impl CacheStore for RecordingCacheStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        *self.reads.lock().unwrap() += 1;
        Ok(self
            .entries
            .lock()
            .unwrap()
            .get(key)
            .map(|(value, _)| value.clone()))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), ttl));
        Ok(())
    }
}

pub fn client(transport: &MockTransport, cache: &RecordingCacheStore, sandbox: bool) -> PaymentClient {
    PaymentClient::new(merchant(), Box::new(transport.clone()), Box::new(cache.clone()))
        .sandbox_mode(sandbox)
}

pub fn sign_key_success(key: &str) -> String {
    format!(
        "<xml><return_code><![CDATA[SUCCESS]]></return_code><return_msg><![CDATA[OK]]></return_msg><sandbox_signkey><![CDATA[{key}]]></sandbox_signkey></xml>"
    )
}

pub fn sign_key_failure(msg: &str) -> String {
    format!(
        "<xml><return_code><![CDATA[FAIL]]></return_code><return_msg><![CDATA[{msg}]]></return_msg></xml>"
    )
}

pub fn ok_envelope() -> String {
    "<xml><return_code><![CDATA[SUCCESS]]></return_code><result_code><![CDATA[SUCCESS]]></result_code></xml>"
        .to_string()
}

/// Parses a recorded request body and checks its `sign` against `key`.
pub fn assert_signed_with(body: &str, key: &str) -> Envelope {
    let envelope = Envelope::parse(body).unwrap();
    let mut params = envelope.values().clone();
    let sent = params.remove("sign").expect("request body carries a sign field");
    assert_eq!(sent, sign::signature(&params, key), "signature mismatch");
    envelope
}
