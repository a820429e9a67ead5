//! 练习卷生成应用 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责数据加载、选择和输出。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：写日志文件头、加载数据集目录和默认数据集
//! 2. **选择**：把用户输入的编号应用到 `AppState`
//! 3. **生成**：委托 `WorksheetFlow` 组装并序列化练习卷
//! 4. **输出**：写入输出目录并汇总统计

use crate::config::Config;
use crate::error::{AppError, DatasetError};
use crate::models::{load_catalog, load_dataset, DatasetCatalog, DatasetInfo};
use crate::services::formatting::parse_pattern_numbers;
use crate::services::SelectionError;
use crate::utils::logging::{
    append_log_line, init_log_file, log_dataset_loaded, log_startup, print_final_stats,
};
use crate::workflow::{AppState, WorksheetFlow};
use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use std::path::PathBuf;
use tokio::fs;
use tracing::{info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    catalog: DatasetCatalog,
    state: AppState,
    flow: WorksheetFlow,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        config.validate()?;

        // 初始化日志文件
        init_log_file(&config.output_log_file)?;

        log_startup(
            config.target_count,
            config.max_selection,
            &config.layout_mode.to_string(),
        );

        info!("\n📁 正在读取数据集目录...");
        let catalog = load_catalog(&config.catalog_path()).await?;
        let entry = resolve_dataset(&catalog, config.dataset_file.as_deref())?;

        let dataset = load_dataset(&config.dataset_path(&entry.file)).await?;
        log_dataset_loaded(&entry.label, dataset.len());

        let state = AppState::new(entry.label, dataset, config.max_selection);
        let flow = WorksheetFlow::new(&config);

        Ok(Self {
            config,
            catalog,
            state,
            flow,
        })
    }

    pub fn catalog(&self) -> &DatasetCatalog {
        &self.catalog
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// 切换到目录中的另一个数据集，之前的选择会被清空
    pub async fn switch_dataset(&mut self, file: &str) -> Result<()> {
        let entry = resolve_dataset(&self.catalog, Some(file))?;
        let dataset = load_dataset(&self.config.dataset_path(&entry.file)).await?;
        log_dataset_loaded(&entry.label, dataset.len());

        self.state.switch_dataset(entry.label, dataset);
        Ok(())
    }

    /// 应用用户输入的模式编号
    ///
    /// 数据集中不存在的编号只记录警告；超过上限时报错。
    pub fn apply_selection(&mut self, input: &str) -> Result<()> {
        for number in parse_pattern_numbers(input)? {
            match self.state.select(number) {
                Ok(_) => {}
                Err(SelectionError::UnknownPattern { number }) => {
                    warn!("⚠️ 模式 {} 不在当前数据集中, 已忽略", number);
                }
                Err(e) => return Err(AppError::from(e).into()),
            }
        }
        info!("{}", self.state.selection);
        Ok(())
    }

    /// 运行应用主逻辑，返回输出文件路径
    pub async fn run(&mut self) -> Result<PathBuf> {
        let input = self.config.selected_patterns.clone();
        self.apply_selection(&input)?;

        let worksheet = self.flow.generate(&self.state, worksheet_date())?;
        let bytes = self.flow.render(&worksheet)?;

        let output_path = self.write_output(&worksheet.file_name, &bytes).await?;
        let output_display = output_path.display().to_string();

        append_log_line(
            &self.config.output_log_file,
            &format!(
                "{} | 模式 {:?} | {} 字节",
                output_display,
                worksheet.pattern_numbers,
                bytes.len()
            ),
        )?;

        // 输出最终统计
        print_final_stats(
            worksheet.pattern_numbers.len(),
            worksheet.document.pages().len(),
            &output_display,
            &self.config.output_log_file,
        );

        Ok(output_path)
    }

    /// 写入输出目录
    async fn write_output(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let folder = PathBuf::from(&self.config.output_folder);
        fs::create_dir_all(&folder)
            .await
            .with_context(|| format!("无法创建输出目录: {}", folder.display()))?;

        let path = folder.join(file_name);
        fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;

        info!("💾 已写入: {}", path.display());
        Ok(path)
    }
}

/// 文件名里的日期按 UTC 计算
fn worksheet_date() -> NaiveDate {
    Utc::now().date_naive()
}

/// 根据配置选出要加载的数据集
fn resolve_dataset(catalog: &DatasetCatalog, file: Option<&str>) -> Result<DatasetInfo, AppError> {
    match file {
        Some(file) => catalog
            .find(file)
            .cloned()
            .ok_or_else(|| AppError::unknown_dataset(file)),
        None => catalog
            .default_entry()
            .cloned()
            .ok_or(AppError::Dataset(DatasetError::EmptyCatalog)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worksheet_date_uses_utc() {
        let before = Utc::now().date_naive();
        let date = worksheet_date();
        let after = Utc::now().date_naive();
        assert!(date == before || date == after);
    }

    #[test]
    fn test_resolve_dataset() {
        let catalog = DatasetCatalog::builtin();
        assert_eq!(
            resolve_dataset(&catalog, None).unwrap().file,
            "patterns_book1.json"
        );
        assert_eq!(
            resolve_dataset(&catalog, Some("patterns_book2.json"))
                .unwrap()
                .label,
            "Book 2 – 감정 표현"
        );
        assert!(matches!(
            resolve_dataset(&catalog, Some("nope.json")),
            Err(AppError::Dataset(DatasetError::UnknownDataset { .. }))
        ));

        let empty = DatasetCatalog { datasets: vec![] };
        assert!(matches!(
            resolve_dataset(&empty, None),
            Err(AppError::Dataset(DatasetError::EmptyCatalog))
        ));
    }
}
