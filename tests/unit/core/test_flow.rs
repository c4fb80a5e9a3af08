// Unit tests for flow id derivation and validation

use accounts_server::core::flow::{self, FLOW_ID_HEX_LEN};

const KEY: &str = "0123456789abcdef0123456789abcdef";
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:109.0) Gecko/20100101 Firefox/115.0";
const EXPIRY_MS: i64 = 7_200_000;

#[test]
fn test_create_produces_64_hex_chars() {
    let data = flow::create(KEY, USER_AGENT).unwrap();

    assert_eq!(data.flow_id.len(), FLOW_ID_HEX_LEN);
    assert!(data
        .flow_id
        .chars()
        .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    assert!(data.flow_begin_time > 0);
}

#[test]
fn test_create_ids_are_unique() {
    let first = flow::create(KEY, USER_AGENT).unwrap();
    let second = flow::create(KEY, USER_AGENT).unwrap();

    // Fresh salt per call
    assert_ne!(first.flow_id, second.flow_id);
}

#[test]
fn test_derive_is_deterministic() {
    let salt = "aabbccddeeff00112233445566778899";
    let time = 1_400_000_000_000;

    let first = flow::derive(KEY, salt, time, USER_AGENT).unwrap();
    let second = flow::derive(KEY, salt, time, USER_AGENT).unwrap();

    assert_eq!(first, second);
    assert!(first.starts_with(salt));
    assert_eq!(first.len(), FLOW_ID_HEX_LEN);
}

#[test]
fn test_derive_depends_on_every_input() {
    let salt = "aabbccddeeff00112233445566778899";
    let time = 1_400_000_000_000;
    let base = flow::derive(KEY, salt, time, USER_AGENT).unwrap();

    let other_key = flow::derive("another-secret-key-of-enough-len", salt, time, USER_AGENT);
    let other_time = flow::derive(KEY, salt, time + 1, USER_AGENT);
    let other_ua = flow::derive(KEY, salt, time, "curl/8.0");

    assert_ne!(base, other_key.unwrap());
    assert_ne!(base, other_time.unwrap());
    assert_ne!(base, other_ua.unwrap());
}

#[test]
fn test_validate_accepts_fresh_flow() {
    let data = flow::create(KEY, USER_AGENT).unwrap();

    assert!(flow::validate(
        KEY,
        &data.flow_id,
        data.flow_begin_time,
        USER_AGENT,
        EXPIRY_MS,
    ));
}

#[test]
fn test_validate_rejects_wrong_user_agent() {
    let data = flow::create(KEY, USER_AGENT).unwrap();

    assert!(!flow::validate(
        KEY,
        &data.flow_id,
        data.flow_begin_time,
        "curl/8.0",
        EXPIRY_MS,
    ));
}

#[test]
fn test_validate_rejects_wrong_key() {
    let data = flow::create(KEY, USER_AGENT).unwrap();

    assert!(!flow::validate(
        "another-secret-key-of-enough-len",
        &data.flow_id,
        data.flow_begin_time,
        USER_AGENT,
        EXPIRY_MS,
    ));
}

#[test]
fn test_validate_rejects_malformed_id() {
    let data = flow::create(KEY, USER_AGENT).unwrap();

    assert!(!flow::validate(
        KEY,
        &data.flow_id[..FLOW_ID_HEX_LEN - 2],
        data.flow_begin_time,
        USER_AGENT,
        EXPIRY_MS,
    ));
    assert!(!flow::validate(
        KEY,
        "",
        data.flow_begin_time,
        USER_AGENT,
        EXPIRY_MS,
    ));
}

#[test]
fn test_validate_rejects_expired_flow() {
    let data = flow::create(KEY, USER_AGENT).unwrap();
    let stale_begin_time = data.flow_begin_time - EXPIRY_MS - 1;

    assert!(!flow::validate(
        KEY,
        &data.flow_id,
        stale_begin_time,
        USER_AGENT,
        EXPIRY_MS,
    ));
}

#[test]
fn test_validate_rejects_future_begin_time() {
    let data = flow::create(KEY, USER_AGENT).unwrap();
    let future_begin_time = data.flow_begin_time + 60_000;

    assert!(!flow::validate(
        KEY,
        &data.flow_id,
        future_begin_time,
        USER_AGENT,
        EXPIRY_MS,
    ));
}

#[test]
fn test_validate_rejects_tampered_signature() {
    let data = flow::create(KEY, USER_AGENT).unwrap();
    let mut tampered = data.flow_id.clone();
    let last = tampered.pop().unwrap();
    tampered.push(if last == '0' { '1' } else { '0' });

    assert!(!flow::validate(
        KEY,
        &tampered,
        data.flow_begin_time,
        USER_AGENT,
        EXPIRY_MS,
    ));
}
