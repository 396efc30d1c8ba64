use anyhow::{bail, Context, Result};
use clap::Parser;
use slack_options_responder::core::decoder::{FORM_URLENCODED, PAYLOAD_FIELD};
use slack_options_responder::core::pipeline::{SIGNATURE_HEADER, TIMESTAMP_HEADER};
use slack_options_responder::core::signature::compute_signature;
use slack_options_responder::domain::model::IncomingRequest;

/// 產生已簽章的測試請求，方便用 curl 打本機服務
#[derive(Parser)]
#[command(name = "sign-request")]
#[command(about = "Build and sign a block_suggestion request for local testing")]
struct Args {
    /// Signing secret (defaults to SLACK_SIGNING_SECRET)
    #[arg(long)]
    secret: Option<String>,

    /// action_id to request
    #[arg(long, default_value = "test_action")]
    action_id: String,

    /// Filter query (the `value` field)
    #[arg(long, default_value = "")]
    query: String,

    /// Send direct JSON instead of the form-encoded payload envelope
    #[arg(long)]
    json: bool,

    /// Sign this raw body verbatim instead of building one
    #[arg(long)]
    body: Option<String>,

    /// Unix timestamp to sign with (defaults to now)
    #[arg(long)]
    timestamp: Option<i64>,

    /// Server URL used in the printed curl command
    #[arg(long, default_value = "http://localhost:8080/")]
    url: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let secret = match args.secret {
        Some(secret) => secret,
        None => std::env::var("SLACK_SIGNING_SECRET")
            .context("pass --secret or set SLACK_SIGNING_SECRET")?,
    };
    if secret.is_empty() {
        bail!("signing secret must not be empty");
    }

    let content_type = if args.json {
        "application/json"
    } else {
        FORM_URLENCODED
    };

    let body = match args.body {
        Some(body) => body,
        None => {
            let request = IncomingRequest {
                kind: "block_suggestion".to_string(),
                action_id: args.action_id,
                block_id: "sign_request_block".to_string(),
                value: args.query,
            };
            let payload = serde_json::to_string(&request)?;
            if args.json {
                payload
            } else {
                url::form_urlencoded::Serializer::new(String::new())
                    .append_pair(PAYLOAD_FIELD, &payload)
                    .finish()
            }
        }
    };

    let timestamp = args
        .timestamp
        .unwrap_or_else(|| chrono::Utc::now().timestamp())
        .to_string();
    let signature = compute_signature(secret.as_bytes(), &timestamp, body.as_bytes())?;

    println!("Content-Type: {}", content_type);
    println!("{}: {}", TIMESTAMP_HEADER, timestamp);
    println!("{}: {}", SIGNATURE_HEADER, signature);
    println!("Body: {}", body);
    println!();
    println!(
        "curl -sS -X POST '{}' -H 'Content-Type: {}' -H '{}: {}' -H '{}: {}' --data-raw '{}'",
        args.url,
        content_type,
        TIMESTAMP_HEADER,
        timestamp,
        SIGNATURE_HEADER,
        signature,
        body.replace('\'', r"'\''")
    );

    Ok(())
}
