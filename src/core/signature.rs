use crate::domain::ports::{Clock, SystemClock};
use crate::utils::error::SignatureError;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

pub const SIGNATURE_VERSION: &str = "v0";

/// 時間戳與伺服器時間允許的最大差距 (秒)，前後對稱
pub const REPLAY_WINDOW_SECS: u64 = 300;

/// 計算 `v0=<hex(HMAC-SHA256(secret, "v0:{timestamp}:{body}"))>`
pub fn compute_signature(
    secret: &[u8],
    timestamp: &str,
    body: &[u8],
) -> Result<String, SignatureError> {
    let mut mac = HmacSha256::new_from_slice(secret).map_err(|_| SignatureError::InvalidKey)?;
    mac.update(SIGNATURE_VERSION.as_bytes());
    mac.update(b":");
    mac.update(timestamp.as_bytes());
    mac.update(b":");
    mac.update(body);

    Ok(format!(
        "{}={}",
        SIGNATURE_VERSION,
        hex::encode(mac.finalize().into_bytes())
    ))
}

/// 驗證簽章，回傳失敗原因以便記錄
pub fn check_signature(
    secret: &[u8],
    timestamp_header: &str,
    body: &[u8],
    signature_header: &str,
    now: i64,
) -> Result<(), SignatureError> {
    let timestamp: i64 = timestamp_header
        .parse()
        .map_err(|_| SignatureError::InvalidTimestamp {
            value: timestamp_header.to_string(),
        })?;

    if now.abs_diff(timestamp) > REPLAY_WINDOW_SECS {
        return Err(SignatureError::Stale { timestamp, now });
    }

    let expected = compute_signature(secret, timestamp_header, body)?;

    // 長度不同時 ct_eq 直接回傳 false；長度本身不是秘密
    if bool::from(expected.as_bytes().ct_eq(signature_header.as_bytes())) {
        Ok(())
    } else {
        Err(SignatureError::Mismatch)
    }
}

/// `check_signature` 的布林版本
pub fn verify(
    secret: &[u8],
    timestamp_header: &str,
    body: &[u8],
    signature_header: &str,
    now: i64,
) -> bool {
    check_signature(secret, timestamp_header, body, signature_header, now).is_ok()
}

/// 持有簽章密鑰與時鐘的驗證器
pub struct SignatureVerifier<C: Clock = SystemClock> {
    secret: Vec<u8>,
    clock: C,
}

impl SignatureVerifier<SystemClock> {
    pub fn new(secret: impl Into<String>) -> Self {
        Self::with_clock(secret, SystemClock)
    }
}

impl<C: Clock> SignatureVerifier<C> {
    pub fn with_clock(secret: impl Into<String>, clock: C) -> Self {
        Self {
            secret: secret.into().into_bytes(),
            clock,
        }
    }

    pub fn check(
        &self,
        timestamp_header: &str,
        body: &[u8],
        signature_header: &str,
    ) -> Result<(), SignatureError> {
        check_signature(
            &self.secret,
            timestamp_header,
            body,
            signature_header,
            self.clock.now_unix(),
        )
    }

    pub fn verify(&self, timestamp_header: &str, body: &[u8], signature_header: &str) -> bool {
        self.check(timestamp_header, body, signature_header).is_ok()
    }
}

// 不印出密鑰
impl<C: Clock> std::fmt::Debug for SignatureVerifier<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureVerifier")
            .field("secret", &"<redacted>")
            .finish()
    }
}
