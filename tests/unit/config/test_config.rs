// Unit tests for configuration loading from the process environment
// NOTE: These tests must run sequentially to avoid environment variable conflicts

use std::env;
use std::sync::Mutex;
use std::time::Duration;

use sw_admin::config::Config;
use sw_admin::core::errors::ConfigError;

// Global mutex to serialize environment variable access in tests
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const VARS: [&str; 12] = [
    "BIND_ADDRESS",
    "PORT",
    "SW_ADMIN_ENABLED",
    "CACHE_ENDPOINTS",
    "RESELLER_PREFIXES",
    "CACHE_OPERATION_TIMEOUT_MS",
    "CACHE_CONNECTION_TIMEOUT_SECS",
    "ADMIN_API_KEY_HASHES",
    "REQUEST_TIMEOUT_SECS",
    "BODY_SIZE_LIMIT_BYTES",
    "LOG_LEVEL",
    "LOG_FORMAT",
];

fn clear_env_vars() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
fn test_from_env_reads_variables() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    clear_env_vars();

    env::set_var("SW_ADMIN_ENABLED", "on");
    env::set_var("CACHE_ENDPOINTS", "redis://cache-1:6379/0, redis://cache-2:6379/0");
    env::set_var("RESELLER_PREFIXES", "AUTH_,SERVICE_");
    env::set_var("CACHE_OPERATION_TIMEOUT_MS", "750");
    env::set_var("PORT", "9090");

    let config = Config::from_env();
    clear_env_vars();
    let config = config.unwrap();

    assert!(config.feature.enabled);
    assert_eq!(
        config.feature.cache_endpoints,
        vec!["redis://cache-1:6379/0", "redis://cache-2:6379/0"]
    );
    assert_eq!(config.feature.default_reseller_prefix().unwrap(), "AUTH_");
    assert_eq!(config.cache_operation_timeout(), Duration::from_millis(750));
    assert_eq!(config.port, 9090);
}

#[test]
fn test_from_env_rejects_invalid_timeout() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    clear_env_vars();

    env::set_var("REQUEST_TIMEOUT_SECS", "soon");
    let result = Config::from_env();
    clear_env_vars();

    match result {
        Err(ConfigError::InvalidValue { key, .. }) => assert_eq!(key, "REQUEST_TIMEOUT_SECS"),
        other => panic!("expected invalid value, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_unrecognized_flag_value_is_false() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    clear_env_vars();

    env::set_var("SW_ADMIN_ENABLED", "enabled");
    let config = Config::from_env();
    clear_env_vars();

    assert!(!config.unwrap().feature.enabled);
}
