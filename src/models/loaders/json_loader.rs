use crate::error::{AppError, AppResult};
use crate::models::dataset::Dataset;
use crate::models::pattern::{PatternRecord, SectionKind};
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// 解析 JSON 格式的模式数据集
///
/// 数据是模式对象数组，到达顺序任意，解析后按编号升序排列。
pub fn parse_dataset(content: &str) -> AppResult<Dataset> {
    let records: Vec<PatternRecord> = serde_json::from_str(content)?;
    Ok(Dataset::from_records(records))
}

/// 从 JSON 文件加载数据集
pub async fn load_dataset(json_file_path: &Path) -> Result<Dataset> {
    let content = fs::read_to_string(json_file_path)
        .await
        .map_err(|e| AppError::file_read_failed(json_file_path.display().to_string(), e))
        .with_context(|| format!("无法读取JSON文件: {}", json_file_path.display()))?;

    let file_name = json_file_path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    let dataset = parse_dataset(&content)
        .with_context(|| format!("无法解析JSON文件: {}", json_file_path.display()))?
        .with_source(file_name.clone());

    let question_count: usize = dataset
        .patterns()
        .iter()
        .map(|p| SectionKind::ALL.iter().map(|k| p.pool(*k).len()).sum::<usize>())
        .sum();
    tracing::info!(
        "成功加载 {} 个模式, 共 {} 道题 ({})",
        dataset.len(),
        question_count,
        file_name
    );

    Ok(dataset)
}
