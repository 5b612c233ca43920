//! End-to-end tests for the explain endpoint, with wiremock standing in for
//! the Gemini API.

mod common;

use std::time::Duration;

use common::TestApp;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/models/gemini-2.5-flash:generateContent";
const MODELS_PATH: &str = "/models";

/// A Gemini reply whose single candidate carries `text`.
fn gemini_reply(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{ "text": text }]
            },
            "finishReason": "STOP"
        }]
    })
}

async fn post_explain(app: &TestApp, body: serde_json::Value) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{}/api/v1/tutor/explain", app.address))
        .json(&body)
        .send()
        .await
        .expect("Failed to send request")
}

#[tokio::test]
async fn explain_returns_validated_explanation() {
    let mock_server = MockServer::start().await;
    let payload =
        "```json\n{\"explanation\":\"hi\",\"visual_type\":\"svg\",\"visual_code\":\"<svg/>\"}\n```";

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(body_partial_json(json!({
            "contents": [{
                "role": "user",
                "parts": [{
                    "text": "Explica el concepto 'fractions' para un niño de 7 años. Responde SOLO con el JSON solicitado."
                }]
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply(payload)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = TestApp::spawn(&mock_server.uri()).await;
    let response = post_explain(&app, json!({ "concept": "fractions", "age": 7 })).await;

    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["explanation"], "hi");
    assert_eq!(body["visual_type"], "svg");
    assert_eq!(body["visual_code"], "<svg/>");
}

#[tokio::test]
async fn explain_sends_system_instruction() {
    let mock_server = MockServer::start().await;
    let payload = r#"{"explanation":"e","visual_type":"mermaid","visual_code":"graph TD"}"#;

    // The MateMago instruction must ride along on every generation call.
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(body_partial_json(json!({
            "systemInstruction": {}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply(payload)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = TestApp::spawn(&mock_server.uri()).await;
    let response = post_explain(&app, json!({ "concept": "sumas", "age": 6 })).await;

    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn explain_maps_missing_field_to_bad_gateway() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(gemini_reply(r#"{"explanation":"hi"}"#)),
        )
        .mount(&mock_server)
        .await;

    let app = TestApp::spawn(&mock_server.uri()).await;
    let response = post_explain(&app, json!({ "concept": "fractions", "age": 7 })).await;

    assert_eq!(response.status().as_u16(), 502);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    let error = body["error"].as_str().expect("error should be a string");
    assert!(error.contains("Bad Gateway"));
    assert!(error.contains("visual_type"));
}

#[tokio::test]
async fn explain_maps_non_json_reply_to_bad_gateway() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(gemini_reply("not json at all")),
        )
        .mount(&mock_server)
        .await;

    let app = TestApp::spawn(&mock_server.uri()).await;
    let response = post_explain(&app, json!({ "concept": "fractions", "age": 7 })).await;

    assert_eq!(response.status().as_u16(), 502);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    let error = body["error"].as_str().expect("error should be a string");
    assert!(error.contains("Invalid response from AI service"));
}

#[tokio::test]
async fn explain_maps_upstream_error_to_gateway_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&mock_server)
        .await;

    let app = TestApp::spawn(&mock_server.uri()).await;
    let response = post_explain(&app, json!({ "concept": "fractions", "age": 7 })).await;

    assert_eq!(response.status().as_u16(), 504);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    let error = body["error"].as_str().expect("error should be a string");
    assert!(error.contains("Gateway Timeout"));
    assert!(error.contains("Could not connect to AI service"));
}

#[tokio::test]
async fn explain_maps_unreachable_upstream_to_gateway_timeout() {
    // Nothing is listening here.
    let app = TestApp::spawn("http://127.0.0.1:9").await;
    let response = post_explain(&app, json!({ "concept": "fractions", "age": 7 })).await;

    assert_eq!(response.status().as_u16(), 504);
}

#[tokio::test]
async fn explain_times_out_slow_upstream() {
    let mock_server = MockServer::start().await;
    let payload = r#"{"explanation":"e","visual_type":"svg","visual_code":"<svg/>"}"#;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(gemini_reply(payload))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let app = TestApp::spawn_with_timeout(&mock_server.uri(), 1).await;
    let response = post_explain(&app, json!({ "concept": "fractions", "age": 7 })).await;

    assert_eq!(response.status().as_u16(), 504);
}

#[tokio::test]
async fn explain_rejects_empty_concept() {
    let app = TestApp::spawn("http://127.0.0.1:9").await;
    let response = post_explain(&app, json!({ "concept": "", "age": 7 })).await;

    assert_eq!(response.status().as_u16(), 422);
}

#[tokio::test]
async fn explain_rejects_out_of_range_age() {
    let app = TestApp::spawn("http://127.0.0.1:9").await;
    let response = post_explain(&app, json!({ "concept": "fractions", "age": 42 })).await;

    assert_eq!(response.status().as_u16(), 422);
}

#[tokio::test]
async fn explain_rejects_malformed_request_body() {
    let app = TestApp::spawn("http://127.0.0.1:9").await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/v1/tutor/explain", app.address))
        .header("content-type", "application/json")
        .body("this is not json")
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn readiness_check_reports_ready_upstream() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(MODELS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "models": [] })))
        .mount(&mock_server)
        .await;

    let app = TestApp::spawn(&mock_server.uri()).await;

    let response = reqwest::Client::new()
        .get(format!("{}/ready", app.address))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 200);
}
