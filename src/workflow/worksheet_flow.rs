//! 练习卷生成流程 - 流程层
//!
//! 核心职责：定义"一次生成"的完整流程
//!
//! 流程顺序：
//! 1. 检查选择
//! 2. 组装文档模型
//! 3. 生成文件名
//! 4. 序列化（由调用方决定何时写盘）

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::AppResult;
use crate::models::document::DocumentModel;
use crate::services::formatting::worksheet_file_name;
use crate::services::{Assembler, DocumentSerializer, LayoutMode};
use crate::workflow::app_state::AppState;

/// 一次生成的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedWorksheet {
    /// 输出文件名
    pub file_name: String,
    /// 练习卷包含的模式编号（升序）
    pub pattern_numbers: Vec<u32>,
    pub document: DocumentModel,
}

/// 练习卷生成流程
///
/// - 不持有数据集和选择，每次从 `AppState` 读取
/// - 只依赖业务能力（services）
pub struct WorksheetFlow {
    assembler: Assembler,
    layout_mode: LayoutMode,
    serializer: Box<dyn DocumentSerializer>,
}

impl WorksheetFlow {
    /// 创建新的生成流程
    pub fn new(config: &Config) -> Self {
        Self {
            assembler: Assembler::from_config(config),
            layout_mode: config.layout_mode,
            serializer: config.output_format.serializer(),
        }
    }

    pub fn with_layout(mut self, layout_mode: LayoutMode) -> Self {
        self.layout_mode = layout_mode;
        self
    }

    pub fn with_serializer(mut self, serializer: Box<dyn DocumentSerializer>) -> Self {
        self.serializer = serializer;
        self
    }

    pub fn layout_mode(&self) -> LayoutMode {
        self.layout_mode
    }

    /// 根据当前状态生成练习卷
    ///
    /// `date` 只用于文件名。
    pub fn generate(&self, state: &AppState, date: NaiveDate) -> AppResult<GeneratedWorksheet> {
        state.selection.ensure_non_empty()?;

        let pattern_numbers = state.selection.numbers();
        info!(
            "{} 📝 正在生成练习卷 (版式: {})...",
            state, self.layout_mode
        );

        let document = self
            .assembler
            .assemble(&pattern_numbers, &state.dataset, self.layout_mode)?;

        if document.is_empty() {
            warn!("⚠️ 选中的模式都不在当前数据集中, 练习卷为空");
        }

        let file_name = worksheet_file_name(&pattern_numbers, date, self.serializer.extension());
        info!(
            "✓ 练习卷生成完成: {} 个文档块, {} 页",
            document.len(),
            document.pages().len()
        );

        Ok(GeneratedWorksheet {
            file_name,
            pattern_numbers,
            document,
        })
    }

    /// 序列化为输出字节
    pub fn render(&self, worksheet: &GeneratedWorksheet) -> AppResult<Vec<u8>> {
        self.serializer.serialize(&worksheet.document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::dataset::Dataset;
    use crate::models::pattern::{PatternRecord, QuestionItem, SectionKind};
    use crate::services::{OutputFormat, SelectionError};

    fn state_with(numbers: &[u32]) -> AppState {
        let dataset = Dataset::from_records(vec![
            PatternRecord::new(2, "I want ~").with_section(
                SectionKind::SpeakingII,
                vec![QuestionItem::prompt_only("What do you want?")],
            ),
            PatternRecord::new(5, "He goes ~"),
        ]);
        let mut state = AppState::new("Book 1", dataset, 5);
        for &number in numbers {
            state.select(number).unwrap();
        }
        state
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    #[test]
    fn test_generate_names_file_after_selection() {
        let flow = WorksheetFlow::new(&Config::default());
        let worksheet = flow.generate(&state_with(&[5, 2]), date()).unwrap();

        assert_eq!(worksheet.file_name, "Worksheet_Patterns_2_5_2026-10-17.txt");
        assert_eq!(worksheet.pattern_numbers, vec![2, 5]);
        assert_eq!(worksheet.document.page_break_count(), 0);
    }

    #[test]
    fn test_generate_requires_selection() {
        let flow = WorksheetFlow::new(&Config::default());
        let err = flow.generate(&state_with(&[]), date()).unwrap_err();
        assert!(matches!(err, AppError::Selection(SelectionError::Empty)));
    }

    #[test]
    fn test_paginated_json_output() {
        let config = Config {
            output_format: OutputFormat::Json,
            ..Config::default()
        };
        let flow = WorksheetFlow::new(&config).with_layout(LayoutMode::PerPatternPaginated);
        let worksheet = flow.generate(&state_with(&[2, 5]), date()).unwrap();

        assert!(worksheet.file_name.ends_with(".json"));
        assert_eq!(worksheet.document.pages().len(), 2);

        let bytes = flow.render(&worksheet).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(value["blocks"].as_array().unwrap().len() > 10);
    }
}
