use crate::core::catalog::Catalog;
use crate::core::decoder;
use crate::core::filter::filter_options;
use crate::core::signature::SignatureVerifier;
use crate::domain::model::OptionsResponse;
use crate::domain::ports::{Clock, SystemClock};
use crate::utils::error::{DecodeError, ResponderError, Result};
use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request};
use std::sync::Arc;

pub const TIMESTAMP_HEADER: &str = "x-slack-request-timestamp";
pub const SIGNATURE_HEADER: &str = "x-slack-signature";

/// 請求 body 上限
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// 單一請求經過的階段，失敗時用於日誌
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Received,
    Authenticated,
    Decoded,
    Resolved,
}

impl Stage {
    /// 發生錯誤時請求停留的階段
    pub fn of_error(error: &ResponderError) -> Self {
        match error {
            ResponderError::MethodNotAllowed { .. }
            | ResponderError::BodyReadError { .. }
            | ResponderError::SignatureInvalid(_) => Self::Received,
            ResponderError::DecodeError(_) => Self::Authenticated,
            ResponderError::SerializationError(_) => Self::Resolved,
            // 啟動階段的錯誤沒有請求；歸到 Received
            ResponderError::IoError(_)
            | ResponderError::ConfigError { .. }
            | ResponderError::MissingConfigError { .. }
            | ResponderError::InvalidConfigValueError { .. }
            | ResponderError::CatalogError { .. } => Self::Received,
        }
    }
}

/// verify → decode → lookup → filter
pub struct RequestPipeline<C: Clock = SystemClock> {
    catalog: Arc<Catalog>,
    verifier: SignatureVerifier<C>,
}

impl<C: Clock> RequestPipeline<C> {
    pub fn new(catalog: Arc<Catalog>, verifier: SignatureVerifier<C>) -> Self {
        Self { catalog, verifier }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// 處理完整的 HTTP 請求 (含方法檢查與讀取 body)
    pub async fn handle(&self, request: Request<Body>) -> Result<OptionsResponse> {
        let (parts, body) = request.into_parts();

        if parts.method != Method::POST {
            return Err(ResponderError::MethodNotAllowed {
                method: parts.method.to_string(),
            });
        }

        let body = axum::body::to_bytes(body, MAX_BODY_BYTES)
            .await
            .map_err(|e| ResponderError::BodyReadError {
                message: e.to_string(),
            })?;

        self.process(&parts.headers, &body)
    }

    /// 已讀取的 headers 與 body
    pub fn process(&self, headers: &HeaderMap, body: &[u8]) -> Result<OptionsResponse> {
        let timestamp = header_str(headers, TIMESTAMP_HEADER).unwrap_or_default();
        let signature = header_str(headers, SIGNATURE_HEADER).unwrap_or_default();
        self.verifier.check(timestamp, body, signature)?;

        let content_type = content_type(headers)?;
        let request = decoder::decode(content_type, body)?;

        let options = self.catalog.lookup(&request.action_id);
        let matched = filter_options(options, &request.value);

        tracing::info!(
            action_id = %request.action_id,
            block_id = %request.block_id,
            query = %request.value,
            available = options.len(),
            matched = matched.len(),
            "Resolved options request"
        );

        Ok(OptionsResponse::from_options(matched))
    }
}

/// 非 UTF-8 的 header 視同缺少
fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// 缺少 Content-Type 回傳 None；有值但不是可見 ASCII 則視為不支援的類型
fn content_type(headers: &HeaderMap) -> std::result::Result<Option<&str>, DecodeError> {
    headers
        .get(header::CONTENT_TYPE)
        .map(|value| {
            value
                .to_str()
                .map_err(|_| DecodeError::UnsupportedMediaType {
                    content_type: String::from_utf8_lossy(value.as_bytes()).into_owned(),
                })
        })
        .transpose()
}
