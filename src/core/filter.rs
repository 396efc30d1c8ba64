use crate::domain::model::CatalogOption;

/// 依 query 過濾選項：text 或 value 包含 query (不分大小寫) 即保留，順序不變。
/// query 為空時回傳全部。
pub fn filter_options(options: &[CatalogOption], query: &str) -> Vec<CatalogOption> {
    if query.is_empty() {
        return options.to_vec();
    }

    let needle = query.to_lowercase();
    options
        .iter()
        .filter(|option| {
            option.text.to_lowercase().contains(&needle)
                || option.value.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}
