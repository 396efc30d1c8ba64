use crate::core::pipeline::{RequestPipeline, Stage};
use crate::domain::model::OptionsResponse;
use crate::domain::ports::Clock;
use crate::utils::error::{ResponderError, Result};
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, HeaderValue, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// 所有路徑都交給同一個 handler
pub fn router<C: Clock + 'static>(pipeline: Arc<RequestPipeline<C>>) -> Router {
    Router::new()
        .fallback(handle_request::<C>)
        .with_state(pipeline)
        .layer(TraceLayer::new_for_http())
}

async fn handle_request<C: Clock + 'static>(
    State(pipeline): State<Arc<RequestPipeline<C>>>,
    request: Request<Body>,
) -> Response {
    match pipeline.handle(request).await {
        Ok(options) => json_response(&options),
        Err(err) => error_response(&err),
    }
}

fn json_response(options: &OptionsResponse) -> Response {
    match serde_json::to_vec(options) {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
            body,
        )
            .into_response(),
        Err(e) => error_response(&ResponderError::SerializationError(e)),
    }
}

/// 記錄完整錯誤，只回傳通用訊息
pub fn error_response(err: &ResponderError) -> Response {
    let status = err.status_code();
    let stage = Stage::of_error(err);

    if status.is_server_error() {
        tracing::error!(?stage, status = status.as_u16(), "❌ Request failed: {}", err);
    } else {
        tracing::warn!(?stage, status = status.as_u16(), "Request rejected: {}", err);
    }

    let mut response = (status, err.public_message()).into_response();
    if status == StatusCode::METHOD_NOT_ALLOWED {
        response
            .headers_mut()
            .insert(header::ALLOW, HeaderValue::from_static("POST"));
    }
    response
}

/// 綁定位址並服務直到收到關閉訊號
pub async fn serve<C: Clock + 'static>(
    bind_address: &str,
    pipeline: Arc<RequestPipeline<C>>,
) -> Result<()> {
    let listener = TcpListener::bind(bind_address)
        .await
        .map_err(|e| ResponderError::ConfigError {
            message: format!("Cannot bind {}: {}", bind_address, e),
        })?;
    tracing::info!("🚀 Listening on http://{}", listener.local_addr()?);

    serve_listener(listener, pipeline).await
}

pub async fn serve_listener<C: Clock + 'static>(
    listener: TcpListener,
    pipeline: Arc<RequestPipeline<C>>,
) -> Result<()> {
    axum::serve(listener, router(pipeline))
        .with_graceful_shutdown(wait_for_shutdown())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn wait_for_shutdown() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
