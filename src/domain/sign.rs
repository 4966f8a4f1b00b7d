use md5::{Digest, Md5};
use rand::Rng;
use rand::distributions::Alphanumeric;
use std::collections::BTreeMap;

const NONCE_LEN: usize = 32;

/// MD5 signature over a request payload.
///
/// Pairs are taken in key order, skipping empty values and any existing
/// `sign` field, joined as `k=v&...` with `&key=<signing key>` appended. The
/// platform compares the uppercase hex digest.
pub fn signature(params: &BTreeMap<String, String>, key: &str) -> String {
    let mut base = params
        .iter()
        .filter(|(field, value)| field.as_str() != "sign" && !value.is_empty())
        .map(|(field, value)| format!("{field}={value}"))
        .collect::<Vec<_>>()
        .join("&");
    base.push_str("&key=");
    base.push_str(key);

    let mut hasher = Md5::new();
    hasher.update(base.as_bytes());
    hex::encode(hasher.finalize()).to_uppercase()
}

/// Random alphanumeric `nonce_str` for an outbound request.
pub fn nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LEN)
        .map(char::from)
        .collect()
}
