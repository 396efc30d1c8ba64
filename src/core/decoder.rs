use crate::domain::model::IncomingRequest;
use crate::utils::error::DecodeError;

pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
pub const PAYLOAD_FIELD: &str = "payload";

/// 依 Content-Type 決定的請求格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// `payload=<json>` 表單封裝
    FormEnvelope,
    /// 直接的 JSON body
    Json,
}

impl MediaKind {
    /// 只比對主類型 (忽略 `; charset=...` 等參數，不分大小寫)。
    /// 沒有 Content-Type 時視為 JSON。
    pub fn from_content_type(content_type: Option<&str>) -> Result<Self, DecodeError> {
        let raw = content_type.unwrap_or_default();
        let base = raw
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if base.is_empty() {
            return Ok(Self::Json);
        }
        if base == FORM_URLENCODED {
            return Ok(Self::FormEnvelope);
        }
        if is_json_like(&base) {
            return Ok(Self::Json);
        }

        Err(DecodeError::UnsupportedMediaType {
            content_type: raw.to_string(),
        })
    }
}

fn is_json_like(base: &str) -> bool {
    match base.split_once('/') {
        Some(("application", "json")) | Some(("text", "json")) => true,
        Some(("application", subtype)) => subtype.ends_with("+json"),
        _ => false,
    }
}

/// 把 body 解成 IncomingRequest
pub fn decode(content_type: Option<&str>, body: &[u8]) -> Result<IncomingRequest, DecodeError> {
    match MediaKind::from_content_type(content_type)? {
        MediaKind::FormEnvelope => decode_form(body),
        MediaKind::Json => decode_json(body),
    }
}

fn decode_form(body: &[u8]) -> Result<IncomingRequest, DecodeError> {
    // 重複的 key 取第一個；空字串視同缺少
    let payload = url::form_urlencoded::parse(body)
        .find(|(key, _)| key == PAYLOAD_FIELD)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
        .ok_or(DecodeError::MissingPayload)?;

    decode_json(payload.as_bytes())
}

fn decode_json(body: &[u8]) -> Result<IncomingRequest, DecodeError> {
    serde_json::from_slice(body).map_err(DecodeError::InvalidJson)
}
