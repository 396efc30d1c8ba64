#![allow(dead_code)]

use axum::body::Body;
use axum::http::Request;
use slack_options_responder::core::signature::compute_signature;
use slack_options_responder::domain::model::{CatalogEntry, CatalogOption};
use slack_options_responder::{Catalog, RequestPipeline, SignatureVerifier};
use std::sync::Arc;

pub const SECRET: &str = "test-secret";
pub const FORM: &str = "application/x-www-form-urlencoded";

pub fn entry(action_id: &str, options: &[(&str, &str)]) -> CatalogEntry {
    CatalogEntry {
        action_id: action_id.to_string(),
        options: options
            .iter()
            .map(|(text, value)| CatalogOption::new(*text, *value))
            .collect(),
    }
}

/// test_action 兩個選項 + services 五個選項
pub fn test_catalog() -> Catalog {
    Catalog::new(vec![
        entry("test_action", &[("Option 1", "opt1"), ("Option 2", "opt2")]),
        entry(
            "services",
            &[
                ("InnerGate", "innergate"),
                ("OctoSlack", "octoslack"),
                ("Poppit", "poppit"),
                ("SlackLiner", "slackliner"),
                ("Gateway", "gateway"),
            ],
        ),
    ])
}

pub fn pipeline() -> Arc<RequestPipeline> {
    Arc::new(RequestPipeline::new(
        Arc::new(test_catalog()),
        SignatureVerifier::new(SECRET),
    ))
}

pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

pub fn payload_json(action_id: &str, query: &str) -> String {
    serde_json::json!({
        "type": "block_suggestion",
        "action_id": action_id,
        "block_id": "test_block",
        "value": query,
    })
    .to_string()
}

pub fn form_body(payload: &str) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .append_pair("payload", payload)
        .finish()
}

/// 以指定時間戳簽章的 POST 請求
pub fn signed_request_at(content_type: Option<&str>, body: &str, timestamp: i64) -> Request<Body> {
    let ts = timestamp.to_string();
    let signature = compute_signature(SECRET.as_bytes(), &ts, body.as_bytes()).unwrap();

    let mut builder = Request::builder()
        .method("POST")
        .uri("/")
        .header("X-Slack-Request-Timestamp", ts)
        .header("X-Slack-Signature", signature);
    if let Some(content_type) = content_type {
        builder = builder.header("Content-Type", content_type);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn signed_request(content_type: Option<&str>, body: &str) -> Request<Body> {
    signed_request_at(content_type, body, now())
}

pub fn form_request(action_id: &str, query: &str) -> Request<Body> {
    signed_request(Some(FORM), &form_body(&payload_json(action_id, query)))
}

pub fn json_request(action_id: &str, query: &str) -> Request<Body> {
    signed_request(Some("application/json"), &payload_json(action_id, query))
}
