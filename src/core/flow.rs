//! Flow identifier derivation and validation.
//!
//! A flow id ties every analytics event in a user journey back to the
//! request that started it. The id is an HMAC-SHA256 over a random salt,
//! the flow begin time and the requesting user agent, keyed with the
//! `flow_id_key` secret, so the server can later check that a reported
//! flow id was minted here and has not expired.

use chrono::Utc;
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::core::errors::ServerError;

type HmacSha256 = Hmac<Sha256>;

const SALT_BYTES: usize = 16;
const SALT_HEX_LEN: usize = SALT_BYTES * 2;
const SIGNATURE_HEX_LEN: usize = 32;

/// Total length of a flow id: 32 hex chars of salt + 32 hex chars of
/// truncated signature.
pub const FLOW_ID_HEX_LEN: usize = SALT_HEX_LEN + SIGNATURE_HEX_LEN;

/// Flow identifier and begin timestamp minted for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowEventData {
    pub flow_id: String,
    /// Milliseconds since the epoch.
    pub flow_begin_time: i64,
}

/// Mint a new flow id for a request with the given user agent.
pub fn create(key: &str, user_agent: &str) -> Result<FlowEventData, ServerError> {
    let mut salt_bytes = [0u8; SALT_BYTES];
    rand::thread_rng().fill_bytes(&mut salt_bytes);
    let salt = hex::encode(salt_bytes);

    let flow_begin_time = Utc::now().timestamp_millis();
    let flow_id = derive(key, &salt, flow_begin_time, user_agent)?;

    Ok(FlowEventData {
        flow_id,
        flow_begin_time,
    })
}

/// Deterministic derivation: same key, salt, begin time and user agent
/// always produce the same flow id.
pub fn derive(
    key: &str,
    salt: &str,
    flow_begin_time: i64,
    user_agent: &str,
) -> Result<String, ServerError> {
    let mut mac = HmacSha256::new_from_slice(key.as_bytes())
        .map_err(|e| ServerError::CryptoError(e.to_string()))?;

    mac.update(salt.as_bytes());
    mac.update(format!("{:x}", flow_begin_time).as_bytes());
    mac.update(user_agent.as_bytes());

    let signature = hex::encode(mac.finalize().into_bytes());

    Ok(format!("{}{}", salt, &signature[..SIGNATURE_HEX_LEN]))
}

/// Check that a reported flow id was minted with `key` for this user agent
/// and begin time, and that the flow has not outlived `expiry_ms`.
///
/// Signature comparison is constant-time. Any malformed input fails closed.
pub fn validate(
    key: &str,
    flow_id: &str,
    flow_begin_time: i64,
    user_agent: &str,
    expiry_ms: i64,
) -> bool {
    if flow_id.len() != FLOW_ID_HEX_LEN {
        return false;
    }

    let age = Utc::now().timestamp_millis() - flow_begin_time;
    if age < 0 || age > expiry_ms {
        return false;
    }

    let salt = &flow_id[..SALT_HEX_LEN];
    let expected = match derive(key, salt, flow_begin_time, user_agent) {
        Ok(id) => id,
        Err(_) => return false,
    };

    expected.as_bytes().ct_eq(flow_id.as_bytes()).into()
}
