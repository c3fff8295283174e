use super::*;

fn make_response(parts: serde_json::Value) -> String {
    serde_json::json!({
        "candidates": [{
            "content": { "role": "model", "parts": parts },
            "finishReason": "STOP",
            "index": 0
        }],
        "usageMetadata": { "promptTokenCount": 20, "candidatesTokenCount": 40 },
        "modelVersion": "gemini-3-pro-preview"
    })
    .to_string()
}

#[test]
fn parse_text_response() {
    let json = make_response(serde_json::json!([{ "text": "**x = 4**" }]));
    assert_eq!(parse_response(&json).unwrap(), "**x = 4**");
}

#[test]
fn parse_joins_parts_and_skips_thoughts() {
    let json = make_response(serde_json::json!([
        { "text": "weighing options", "thought": true },
        { "text": "Step 1. " },
        { "text": "Step 2." }
    ]));
    assert_eq!(parse_response(&json).unwrap(), "Step 1. Step 2.");
}

#[test]
fn parse_blocked_prompt() {
    let json = serde_json::json!({ "promptFeedback": { "blockReason": "SAFETY" } }).to_string();
    let err = parse_response(&json).unwrap_err();
    assert!(matches!(err, LlmError::EmptyResponse(ref r) if r == "prompt blocked: SAFETY"));
}

#[test]
fn parse_candidate_without_text() {
    let json = serde_json::json!({
        "candidates": [{ "finishReason": "MAX_TOKENS" }]
    })
    .to_string();
    let err = parse_response(&json).unwrap_err();
    assert!(matches!(err, LlmError::EmptyResponse(ref r) if r == "MAX_TOKENS"));
}

#[test]
fn parse_invalid_json() {
    assert!(matches!(parse_response("<html>"), Err(LlmError::ApiParse(_))));
}

#[test]
fn request_carries_prompt_and_sampling() {
    let body = serde_json::to_value(build_request("2+2?", &Sampling::default())).unwrap();
    assert_eq!(body["contents"][0]["role"], "user");
    assert_eq!(body["contents"][0]["parts"][0]["text"], "2+2?");
    let cfg = &body["generationConfig"];
    assert_eq!(cfg["topK"], 40);
    assert!((cfg["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    assert!((cfg["topP"].as_f64().unwrap() - 0.95).abs() < 1e-6);
}

#[test]
fn endpoint_format() {
    assert_eq!(
        endpoint("https://generativelanguage.googleapis.com/v1beta/", "gemini-3-pro-preview"),
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-3-pro-preview:generateContent"
    );
}
