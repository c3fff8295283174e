use super::*;
use crate::error::ErrorCode;

// =============================================================================
// LlmError::error_code
// =============================================================================

#[test]
fn error_code_config_parse() {
    let err = LlmError::ConfigParse("bad".into());
    assert_eq!(err.error_code(), "E_CONFIG_PARSE");
}

#[test]
fn error_code_missing_api_key() {
    let err = LlmError::MissingApiKey { var: "API_KEY".into() };
    assert_eq!(err.error_code(), "E_MISSING_API_KEY");
    assert_eq!(err.to_string(), "missing API key: env var API_KEY not set");
}

#[test]
fn error_code_api_response() {
    let err = LlmError::ApiResponse { status: 500, body: "oops".into() };
    assert_eq!(err.error_code(), "E_API_RESPONSE");
}

#[test]
fn error_code_empty_response() {
    let err = LlmError::EmptyResponse("SAFETY".into());
    assert_eq!(err.error_code(), "E_EMPTY_RESPONSE");
}

// =============================================================================
// LlmError::retryable
// =============================================================================

#[test]
fn retryable_api_request() {
    assert!(LlmError::ApiRequest("conn refused".into()).retryable());
}

#[test]
fn retryable_api_response_429_and_5xx() {
    assert!(LlmError::ApiResponse { status: 429, body: String::new() }.retryable());
    assert!(LlmError::ApiResponse { status: 503, body: String::new() }.retryable());
}

#[test]
fn not_retryable_client_errors() {
    assert!(!LlmError::ApiResponse { status: 400, body: String::new() }.retryable());
    assert!(!LlmError::ApiParse("eof".into()).retryable());
    assert!(!LlmError::EmptyResponse("no candidates".into()).retryable());
    assert!(!LlmError::MissingApiKey { var: "K".into() }.retryable());
}

// =============================================================================
// Sampling
// =============================================================================

#[test]
fn default_sampling() {
    let s = Sampling::default();
    assert!((s.temperature - 0.7).abs() < f32::EPSILON);
    assert!((s.top_p - 0.95).abs() < f32::EPSILON);
    assert_eq!(s.top_k, 40);
}
