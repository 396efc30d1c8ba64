mod common;

use anyhow::Result;
use common::*;
use slack_options_responder::adapters::http::serve_listener;
use slack_options_responder::core::signature::compute_signature;
use slack_options_responder::domain::ports::CatalogSource;
use slack_options_responder::{FileCatalogSource, RequestPipeline, SignatureVerifier};
use std::io::Write;
use std::sync::Arc;
use tokio::net::TcpListener;

/// 在隨機埠啟動伺服器，回傳 base URL
async fn spawn_server(pipeline: Arc<RequestPipeline>) -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = serve_listener(listener, pipeline).await;
    });
    Ok(format!("http://{}/", addr))
}

async fn post_signed(
    client: &reqwest::Client,
    url: &str,
    content_type: &str,
    body: String,
) -> Result<reqwest::Response> {
    let ts = now().to_string();
    let signature = compute_signature(SECRET.as_bytes(), &ts, body.as_bytes())?;
    Ok(client
        .post(url)
        .header("Content-Type", content_type)
        .header("X-Slack-Request-Timestamp", ts)
        .header("X-Slack-Signature", signature)
        .body(body)
        .send()
        .await?)
}

#[tokio::test]
async fn test_end_to_end_with_catalog_file() -> Result<()> {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile()?;
    file.write_all(
        serde_json::json!([
            {"actionId": "services", "options": [
                {"text": "InnerGate", "value": "innergate"},
                {"text": "OctoSlack", "value": "octoslack"},
                {"text": "Poppit", "value": "poppit"},
                {"text": "SlackLiner", "value": "slackliner"},
                {"text": "Gateway", "value": "gateway"}
            ]}
        ])
        .to_string()
        .as_bytes(),
    )?;

    let catalog = FileCatalogSource::new(file.path()).load()?;
    let pipeline = Arc::new(RequestPipeline::new(
        Arc::new(catalog),
        SignatureVerifier::new(SECRET),
    ));
    let url = spawn_server(pipeline).await?;
    let client = reqwest::Client::new();

    let response = post_signed(
        &client,
        &url,
        FORM,
        form_body(&payload_json("services", "slack")),
    )
    .await?;
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()["content-type"].to_str()?,
        "application/json"
    );

    let json: serde_json::Value = response.json().await?;
    assert_eq!(
        json,
        serde_json::json!({
            "options": [
                {"text": {"type": "plain_text", "text": "OctoSlack"}, "value": "octoslack"},
                {"text": {"type": "plain_text", "text": "SlackLiner"}, "value": "slackliner"}
            ]
        })
    );

    Ok(())
}

#[tokio::test]
async fn test_status_codes_over_the_wire() -> Result<()> {
    let url = spawn_server(pipeline()).await?;
    let client = reqwest::Client::new();

    let get = client.get(&url).send().await?;
    assert_eq!(get.status(), 405);

    let unsigned = client
        .post(&url)
        .header("Content-Type", "application/json")
        .body(payload_json("test_action", ""))
        .send()
        .await?;
    assert_eq!(unsigned.status(), 401);

    let plain = post_signed(&client, &url, "text/plain", "hello".to_string()).await?;
    assert_eq!(plain.status(), 415);

    let missing = post_signed(&client, &url, FORM, "other_field=value".to_string()).await?;
    assert_eq!(missing.status(), 400);

    let ok = post_signed(
        &client,
        &url,
        "application/json",
        payload_json("test_action", ""),
    )
    .await?;
    assert_eq!(ok.status(), 200);

    Ok(())
}

#[tokio::test]
async fn test_concurrent_requests_share_catalog() -> Result<()> {
    let url = spawn_server(pipeline()).await?;
    let client = reqwest::Client::new();

    let mut handles = Vec::new();
    for query in ["", "Slack", "gate", "xyz123", "poppit"] {
        let client = client.clone();
        let url = url.clone();
        handles.push(tokio::spawn(async move {
            let response = post_signed(
                &client,
                &url,
                FORM,
                form_body(&payload_json("services", query)),
            )
            .await?;
            let json: serde_json::Value = response.json().await?;
            Ok::<_, anyhow::Error>(json["options"].as_array().map(Vec::len).unwrap_or(0))
        }));
    }

    let mut counts = Vec::new();
    for handle in handles {
        counts.push(handle.await??);
    }
    assert_eq!(counts, vec![5, 2, 2, 0, 1]);

    Ok(())
}
