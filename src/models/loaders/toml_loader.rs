use crate::error::AppResult;
use crate::models::dataset::DatasetCatalog;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// 解析 TOML 格式的数据集目录
///
/// ```toml
/// [[datasets]]
/// file = "patterns_book1.json"
/// label = "Book 1 – 기본 패턴"
/// ```
pub fn parse_catalog(content: &str) -> AppResult<DatasetCatalog> {
    let catalog: DatasetCatalog = toml::from_str(content)?;
    Ok(catalog)
}

/// 从 TOML 文件加载数据集目录
///
/// 文件不存在时使用内置目录。
pub async fn load_catalog(catalog_path: &Path) -> Result<DatasetCatalog> {
    if !catalog_path.exists() {
        tracing::info!(
            "未找到数据集目录 {}，使用内置目录",
            catalog_path.display()
        );
        return Ok(DatasetCatalog::builtin());
    }

    let content = fs::read_to_string(catalog_path)
        .await
        .with_context(|| format!("无法读取TOML文件: {}", catalog_path.display()))?;

    let catalog = parse_catalog(&content)
        .with_context(|| format!("无法解析TOML文件: {}", catalog_path.display()))?;

    if catalog.is_empty() {
        tracing::warn!("数据集目录 {} 为空", catalog_path.display());
    } else {
        tracing::info!("成功加载 {} 个数据集", catalog.datasets.len());
    }

    Ok(catalog)
}
