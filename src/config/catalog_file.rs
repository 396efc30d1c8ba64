use crate::core::catalog::Catalog;
use crate::domain::ports::CatalogSource;
use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// 從本機檔案載入目錄；`.toml` 以 TOML 解析，其餘以 JSON 解析
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_toml(&self) -> bool {
        self.path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
    }
}

impl CatalogSource for FileCatalogSource {
    fn load(&self) -> Result<Catalog> {
        let content = fs::read_to_string(&self.path)?;

        let catalog = if self.is_toml() {
            Catalog::from_toml_str(&content)?
        } else {
            Catalog::from_json_str(&content)?
        };

        tracing::info!(
            "Loaded {} catalog entries from {}",
            catalog.len(),
            self.path.display()
        );
        Ok(catalog)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}
