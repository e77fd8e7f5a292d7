// Unit tests for admin API key hashing

use sw_admin::auth::api_key::{ApiKey, ApiKeyHash};

#[test]
fn test_hash_is_deterministic_hex() {
    let hash = ApiKeyHash::from_api_key("admin-secret");
    assert_eq!(hash.as_str().len(), 64);
    assert!(hash.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(hash, ApiKeyHash::from_api_key("admin-secret"));
}

#[test]
fn test_hash_string_round_trip_ignores_case() {
    let hash = ApiKeyHash::from_api_key("admin-secret");
    let upper = hash.as_str().to_ascii_uppercase();

    let parsed = ApiKeyHash::from_hash_string(&upper).unwrap();
    assert!(parsed.matches(&hash));
}

#[test]
fn test_hash_string_rejects_bad_input() {
    assert!(ApiKeyHash::from_hash_string("abc").is_err());
    assert!(ApiKeyHash::from_hash_string(&"z".repeat(64)).is_err());
}

#[test]
fn test_api_key_debug_is_redacted() {
    let key = ApiKey::new("admin-secret");
    assert!(!format!("{:?}", key).contains("admin-secret"));
    assert!(key.hash().matches(&ApiKeyHash::from_api_key("admin-secret")));
}
