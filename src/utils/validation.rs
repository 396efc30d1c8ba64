use crate::utils::error::{ResponderError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 目錄檔路徑：必須指向一個檔案
pub fn validate_catalog_path(field_name: &str, path: &str) -> Result<()> {
    let reason = if path.trim().is_empty() {
        "No catalog file given; the responder has nothing to serve"
    } else if path.contains('\0') {
        "Catalog path contains a NUL byte and cannot be opened"
    } else if path.ends_with('/') || path.ends_with(std::path::MAIN_SEPARATOR) {
        "Catalog path names a directory, expected a .json or .toml file"
    } else {
        return Ok(());
    };

    Err(ResponderError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: path.to_string(),
        reason: reason.to_string(),
    })
}

/// 監聽埠不可為 0 (系統會隨機指派，Slack 無從得知)
pub fn validate_listen_port(field_name: &str, port: u16) -> Result<()> {
    if port == 0 {
        return Err(ResponderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: port.to_string(),
            reason: "Port 0 binds a random port that Slack cannot be pointed at".to_string(),
        });
    }
    Ok(())
}

pub fn validate_file_extensions(
    field_name: &str,
    files: &[String],
    allowed_extensions: &[&str],
) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    for file in files {
        let extension = std::path::Path::new(file)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension {
            Some(extension) if allowed_set.contains(extension.as_str()) => {}
            Some(extension) => {
                return Err(ResponderError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.clone(),
                    reason: format!(
                        "Unsupported file extension: {}. Allowed extensions: {}",
                        extension,
                        allowed_extensions.join(", ")
                    ),
                });
            }
            None => {
                return Err(ResponderError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.clone(),
                    reason: "File has no extension or invalid filename".to_string(),
                });
            }
        }
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ResponderError::InvalidConfigValueError {
            field: field_name.to_string(),
            // 可能是密鑰，不回顯內容
            value: String::new(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason_of(result: Result<()>) -> String {
        match result {
            Err(ResponderError::InvalidConfigValueError { reason, .. }) => reason,
            other => panic!("expected InvalidConfigValueError, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_catalog_path() {
        assert!(validate_catalog_path("CONFIG_FILE", "catalog.json").is_ok());
        assert!(validate_catalog_path("CONFIG_FILE", "/etc/options/catalog.toml").is_ok());

        assert!(reason_of(validate_catalog_path("CONFIG_FILE", "")).contains("No catalog file"));
        assert!(reason_of(validate_catalog_path("CONFIG_FILE", "  ")).contains("No catalog file"));
        assert!(reason_of(validate_catalog_path("CONFIG_FILE", "cata\0log.json")).contains("NUL"));
        assert!(reason_of(validate_catalog_path("CONFIG_FILE", "catalogs/")).contains("directory"));
    }

    #[test]
    fn test_validate_listen_port() {
        assert!(validate_listen_port("PORT", 8080).is_ok());
        assert!(validate_listen_port("PORT", 1).is_ok());
        assert!(reason_of(validate_listen_port("PORT", 0)).contains("Slack"));
    }

    #[test]
    fn test_validate_file_extensions() {
        let files = vec!["catalog.json".to_string(), "catalog.TOML".to_string()];
        assert!(validate_file_extensions("CONFIG_FILE", &files, &["json", "toml"]).is_ok());

        let invalid_files = vec!["catalog.yaml".to_string()];
        assert!(validate_file_extensions("CONFIG_FILE", &invalid_files, &["json", "toml"]).is_err());

        let no_extension = vec!["catalog".to_string()];
        assert!(validate_file_extensions("CONFIG_FILE", &no_extension, &["json"]).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("HOST", "localhost").is_ok());
        assert!(validate_non_empty_string("HOST", "   ").is_err());
    }
}
