//! 练习卷组装
//!
//! 把选中的模式组装成文档模型。每一页的顺序固定：
//! 标题 → 副标题 → 姓名/日期 → Speaking I → Speaking II → Unscramble → GRADE/REMARK。

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::dataset::PatternLookup;
use crate::models::document::{Block, DocumentModel, Paragraph};
use crate::models::pattern::{PatternRecord, QuestionItem, SectionKind};
use crate::services::distributor::{distribute, DEFAULT_TARGET_COUNT, MAX_TARGET_COUNT};
use crate::services::formatting::{
    numbered_line, pattern_subtitle, placeholder_prompt, subtitle, unscramble_line,
    GRADE_LINE, NAME_DATE_LINE, REMARK_LINE, SPEAKING_I_PROMPTS, WORKSHEET_TITLE,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;
use crate::utils::logging::truncate_text;
use tracing::{debug, warn};

const SUBTITLE_SIZE: u16 = 12;
const LINE_SPACING: u16 = 6;
const SECTION_SPACING: u16 = 12;
/// 排序题后面紧跟书写线，段后间距小一些
const UNSCRAMBLE_SPACING: u16 = 2;

/// 版式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutMode {
    /// 所有选中模式合并成一张练习卷
    #[default]
    CombinedSheet,
    /// 每个模式单独一页，页与页之间分页
    PerPatternPaginated,
}

impl FromStr for LayoutMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "combined" | "combined-sheet" => Ok(LayoutMode::CombinedSheet),
            "per-pattern" | "per-pattern-paginated" | "paginated" => {
                Ok(LayoutMode::PerPatternPaginated)
            }
            other => Err(AppError::invalid_input(format!("未知版式: '{}'", other))),
        }
    }
}

impl std::fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutMode::CombinedSheet => write!(f, "combined"),
            LayoutMode::PerPatternPaginated => write!(f, "per-pattern"),
        }
    }
}

/// 练习卷组装器
///
/// 不持有任何状态，每次调用都是独立的纯变换。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assembler {
    target_count: usize,
}

impl Assembler {
    /// 题数超过 `MAX_TARGET_COUNT` 时按上限处理
    pub fn new(target_count: usize) -> Self {
        if target_count > MAX_TARGET_COUNT {
            warn!(
                "⚠️ 每个分区题数 {} 超过上限, 按 {} 处理",
                target_count, MAX_TARGET_COUNT
            );
        }
        Self {
            target_count: target_count.min(MAX_TARGET_COUNT),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.target_count)
    }

    pub fn target_count(&self) -> usize {
        self.target_count
    }

    /// 组装练习卷
    ///
    /// # 参数
    /// - `selected_numbers`: 选中的模式编号（任意顺序，重复会被合并）
    /// - `patterns`: 按编号查找模式
    /// - `mode`: 版式
    ///
    /// # 返回
    /// 没有选择任何模式时返回 `InvalidInput`；找不到的编号直接跳过。
    pub fn assemble<L>(
        &self,
        selected_numbers: &[u32],
        patterns: &L,
        mode: LayoutMode,
    ) -> AppResult<DocumentModel>
    where
        L: PatternLookup + ?Sized,
    {
        let numbers: Vec<u32> = selected_numbers
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        if numbers.is_empty() {
            return Err(AppError::invalid_input("没有选择任何模式"));
        }

        let records: Vec<&PatternRecord> = numbers
            .iter()
            .filter_map(|&number| {
                let record = patterns.pattern(number);
                if record.is_none() {
                    debug!("模式 {} 不存在, 跳过", number);
                }
                record
            })
            .collect();

        let mut document = DocumentModel::new();
        match mode {
            LayoutMode::CombinedSheet => self.write_combined(&mut document, &numbers, &records),
            LayoutMode::PerPatternPaginated => self.write_paginated(&mut document, &records),
        }

        debug!(
            "练习卷组装完成: 版式 {}, {} 个模式, {} 个文档块",
            mode,
            records.len(),
            document.len()
        );
        Ok(document)
    }

    /// 合并版式：副标题列出全部选中编号，题目按分配规则从各模式取
    fn write_combined(
        &self,
        document: &mut DocumentModel,
        numbers: &[u32],
        records: &[&PatternRecord],
    ) {
        let distribution = distribute(records, self.target_count);

        write_header(document, subtitle(numbers));

        let static_prompts: Vec<String> =
            SPEAKING_I_PROMPTS.iter().map(|p| p.to_string()).collect();
        write_prompt_section(document, SectionKind::SpeakingI, &static_prompts);
        // 不足的行直接省略
        write_prompt_section(document, SectionKind::SpeakingII, &distribution.speaking2);
        write_unscramble_section(document, &distribution.unscramble);

        write_footer(document);
    }

    /// 分页版式：每个模式一页，题目只取自己的题目池，不足时用占位文字补齐
    fn write_paginated(&self, document: &mut DocumentModel, records: &[&PatternRecord]) {
        for (idx, record) in records.iter().enumerate() {
            if idx > 0 {
                document.push(Block::PageBreak);
            }

            debug!(
                "第 {} 页: 模式 {} {}",
                idx + 1,
                record.number,
                truncate_text(&record.name, 20)
            );
            write_header(document, pattern_subtitle(record.number, &record.name));

            let speaking1 = self.padded_prompts(record, SectionKind::SpeakingI);
            let speaking2 = self.padded_prompts(record, SectionKind::SpeakingII);
            write_prompt_section(document, SectionKind::SpeakingI, &speaking1);
            write_prompt_section(document, SectionKind::SpeakingII, &speaking2);
            write_unscramble_section(document, &self.padded_items(record));

            write_footer(document);
        }
    }

    fn padded_prompts(&self, record: &PatternRecord, kind: SectionKind) -> Vec<String> {
        let mut prompts: Vec<String> = record
            .pool(kind)
            .iter()
            .take(self.target_count)
            .map(|item| item.prompt_text.clone())
            .collect();
        prompts.resize(self.target_count, placeholder_prompt(record.number));
        prompts
    }

    fn padded_items(&self, record: &PatternRecord) -> Vec<QuestionItem> {
        let mut items: Vec<QuestionItem> = record
            .pool(SectionKind::Unscramble)
            .iter()
            .take(self.target_count)
            .cloned()
            .collect();
        items.resize(
            self.target_count,
            QuestionItem::prompt_only(placeholder_prompt(record.number)),
        );
        items
    }
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_COUNT)
    }
}

fn write_header(document: &mut DocumentModel, subtitle_text: String) {
    document.push(Block::title(WORKSHEET_TITLE));
    document.push(
        Paragraph::new(subtitle_text)
            .italic()
            .size(SUBTITLE_SIZE)
            .spacing_after(LINE_SPACING),
    );
    document.push(Paragraph::new(NAME_DATE_LINE).spacing_after(SECTION_SPACING));
}

fn write_prompt_section(document: &mut DocumentModel, kind: SectionKind, prompts: &[String]) {
    document.push(Block::heading(kind.key()));
    for (idx, prompt) in prompts.iter().enumerate() {
        document.push(Paragraph::new(numbered_line(idx + 1, prompt)).spacing_after(LINE_SPACING));
    }
}

fn write_unscramble_section(document: &mut DocumentModel, items: &[QuestionItem]) {
    document.push(Block::heading(SectionKind::Unscramble.key()));
    for (idx, item) in items.iter().enumerate() {
        document.push(Paragraph::new(unscramble_line(idx + 1, item)).spacing_after(UNSCRAMBLE_SPACING));
        document.push(Block::Rule);
    }
}

fn write_footer(document: &mut DocumentModel) {
    document.push(Paragraph::new(GRADE_LINE).bold().spacing_after(LINE_SPACING));
    document.push(Paragraph::new(REMARK_LINE).bold());
}
