use serde::{Deserialize, Deserializer, Serialize};

/// 目錄中的單一選項
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogOption {
    pub text: String,
    pub value: String,
}

impl CatalogOption {
    pub fn new(text: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            value: value.into(),
        }
    }
}

/// 一個 action_id 對應的選項清單
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(rename = "actionId")]
    pub action_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub options: Vec<CatalogOption>,
}

/// `"options": null` 視同空清單
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Slack 送來的 block_suggestion 請求 (未知欄位忽略)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomingRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub action_id: String,
    pub block_id: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlainText {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

impl PlainText {
    pub const KIND: &'static str = "plain_text";

    pub fn new(text: impl Into<String>) -> Self {
        Self {
            kind: Self::KIND.to_string(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedOption {
    pub text: PlainText,
    pub value: String,
}

impl From<CatalogOption> for ResolvedOption {
    fn from(option: CatalogOption) -> Self {
        Self {
            text: PlainText::new(option.text),
            value: option.value,
        }
    }
}

/// 回傳給 Slack 的 options 回應
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionsResponse {
    pub options: Vec<ResolvedOption>,
}

impl OptionsResponse {
    pub fn from_options(options: Vec<CatalogOption>) -> Self {
        Self {
            options: options.into_iter().map(ResolvedOption::from).collect(),
        }
    }
}
