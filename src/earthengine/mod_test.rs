use super::*;
use crate::error::ErrorCode;
use crate::geo::{LatLng, Region};

const EE_VARS: [&str; 4] = ["EE_API_KEY_ENV", "EE_SOURCE_TEST_KEY", "EE_PROJECT", "EE_BASE_URL"];

/// # Safety
/// Callers must hold `env_lock()`.
unsafe fn clear_env() {
    for var in EE_VARS {
        unsafe { std::env::remove_var(var) };
    }
}

fn query() -> AnalysisQuery {
    let region = Region::new(LatLng { lat: -4.0, lng: -63.0 }, LatLng { lat: -3.0, lng: -62.0 }).unwrap();
    AnalysisQuery::for_region(region)
}

#[tokio::test]
async fn source_from_env_without_key_reports_missing_key() {
    let source = {
        let _guard = env_lock();
        unsafe { clear_env() };
        source_from_env()
    };

    let err = source.fetch(&query()).await.unwrap_err();
    assert_eq!(err.error_code(), "E_MISSING_API_KEY");
    assert!(err.to_string().contains("EE_API_KEY_ENV"));
}

#[tokio::test]
async fn source_from_env_keeps_config_error_when_key_is_set() {
    let source = {
        let _guard = env_lock();
        unsafe {
            clear_env();
            std::env::set_var("EE_API_KEY_ENV", "EE_SOURCE_TEST_KEY");
            std::env::set_var("EE_SOURCE_TEST_KEY", "secret");
            std::env::set_var("EE_PROJECT", "a/b");
        }
        let source = source_from_env();
        unsafe { clear_env() };
        source
    };

    let err = source.fetch(&query()).await.unwrap_err();
    assert_eq!(err.error_code(), "E_CONFIG_PARSE");
    assert!(err.to_string().contains("invalid EE_PROJECT"), "{err}");
    assert!(!err.to_string().contains("missing API key"));
}

#[tokio::test]
async fn unconfigured_source_replays_its_cause() {
    let source = UnconfiguredSource::new(EarthEngineError::HttpClientBuild("tls backend unavailable".into()));
    assert_eq!(source.cause().error_code(), "E_HTTP_CLIENT_BUILD");

    let err = source.fetch(&query()).await.unwrap_err();
    assert!(matches!(err, EarthEngineError::HttpClientBuild(ref m) if m == "tls backend unavailable"));
}
