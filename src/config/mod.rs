pub mod catalog_file;
#[cfg(feature = "cli")]
pub mod cli;

use crate::utils::error::{ResponderError, Result};
use crate::utils::validation::{self, Validate};
use std::env;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_CATALOG_FILE: &str = "catalog.json";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "compact" | "text" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            _ => Err(ResponderError::InvalidConfigValueError {
                field: "LOG_FORMAT".to_string(),
                value: value.to_string(),
                reason: "Expected one of: compact, json".to_string(),
            }),
        }
    }
}

/// 伺服器設定 (來自環境變數，可被命令列覆蓋)
#[derive(Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub signing_secret: String,
    pub catalog_file: String,
    pub log_format: LogFormat,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 以任意 key 查詢函式建立設定 (方便測試)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match non_empty("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| ResponderError::InvalidConfigValueError {
                    field: "PORT".to_string(),
                    value: raw.clone(),
                    reason: format!("Not a valid port number: {}", e),
                })?,
            None => DEFAULT_PORT,
        };

        let signing_secret =
            non_empty("SLACK_SIGNING_SECRET").ok_or_else(|| ResponderError::MissingConfigError {
                field: "SLACK_SIGNING_SECRET".to_string(),
            })?;

        let log_format = match non_empty("LOG_FORMAT") {
            Some(raw) => LogFormat::parse(&raw)?,
            None => LogFormat::default(),
        };

        Ok(Self {
            host: non_empty("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            signing_secret,
            catalog_file: non_empty("CONFIG_FILE")
                .unwrap_or_else(|| DEFAULT_CATALOG_FILE.to_string()),
            log_format,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// 不印出 signing secret
impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("signing_secret", &"<redacted>")
            .field("catalog_file", &self.catalog_file)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("SLACK_SIGNING_SECRET", &self.signing_secret)?;
        validation::validate_non_empty_string("HOST", &self.host)?;
        validation::validate_listen_port("PORT", self.port)?;
        validation::validate_catalog_path("CONFIG_FILE", &self.catalog_file)?;
        validation::validate_file_extensions(
            "CONFIG_FILE",
            std::slice::from_ref(&self.catalog_file),
            &["json", "toml"],
        )?;

        tracing::debug!("Server configuration validation passed");
        Ok(())
    }
}
