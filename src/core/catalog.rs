use crate::domain::model::{CatalogEntry, CatalogOption};
use crate::utils::error::{ResponderError, Result};
use serde::Deserialize;
use std::collections::HashSet;

/// 啟動時載入、之後唯讀的選項目錄
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

/// TOML 目錄的頂層結構 (`[[catalog]]`)
#[derive(Debug, Deserialize)]
struct TomlCatalog {
    #[serde(default)]
    catalog: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.action_id.as_str()) {
                tracing::warn!(
                    action_id = %entry.action_id,
                    "Duplicate catalog entry; only the first one is served"
                );
            }
        }

        Self { entries }
    }

    /// 從 JSON 陣列解析
    pub fn from_json_str(content: &str) -> Result<Self> {
        let entries: Vec<CatalogEntry> =
            serde_json::from_str(content).map_err(|e| ResponderError::CatalogError {
                message: format!("JSON parsing error: {}", e),
            })?;
        Ok(Self::new(entries))
    }

    /// 從 TOML (`[[catalog]]` 表格陣列) 解析
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let parsed: TomlCatalog = toml::from_str(content).map_err(|e| ResponderError::CatalogError {
            message: format!("TOML parsing error: {}", e),
        })?;
        Ok(Self::new(parsed.catalog))
    }

    /// 第一個 action_id 完全相符 (區分大小寫) 的選項；找不到時為空
    pub fn lookup(&self, action_id: &str) -> &[CatalogOption] {
        self.entries
            .iter()
            .find(|entry| entry.action_id == action_id)
            .map(|entry| entry.options.as_slice())
            .unwrap_or(&[])
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
