use crate::core::catalog::Catalog;
use crate::utils::error::Result;

/// 提供目前 Unix 時間 (秒)
pub trait Clock: Send + Sync {
    fn now_unix(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// 固定時間，用於測試與重放簽章
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_unix(&self) -> i64 {
        self.0
    }
}

/// 啟動時載入目錄的來源
pub trait CatalogSource {
    fn load(&self) -> Result<Catalog>;
    fn describe(&self) -> String;
}
