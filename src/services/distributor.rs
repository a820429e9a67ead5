//! 题目分配
//!
//! 把目标题数按 `base + remainder` 规则分摊到各个模式上：
//! 前 `target % n` 个模式各多分一题。每个模式只从自己的题目池里按顺序取，
//! 题目池不够时少取，不足部分不会由其他模式补齐。

use crate::models::pattern::{PatternRecord, QuestionItem, SectionKind};
use serde::Serialize;
use std::borrow::Borrow;
use tracing::debug;

/// 每个分区的默认题数
pub const DEFAULT_TARGET_COUNT: usize = 5;

/// 每个分区题数的上限
pub const MAX_TARGET_COUNT: usize = 100;

/// 分配结果，每个序列长度都不超过目标题数
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DistributionResult {
    pub speaking1: Vec<String>,
    pub speaking2: Vec<String>,
    pub unscramble: Vec<QuestionItem>,
}

impl DistributionResult {
    pub fn is_empty(&self) -> bool {
        self.speaking1.is_empty() && self.speaking2.is_empty() && self.unscramble.is_empty()
    }

    /// 某个分区实际分到的题数
    pub fn len_of(&self, kind: SectionKind) -> usize {
        match kind {
            SectionKind::SpeakingI => self.speaking1.len(),
            SectionKind::SpeakingII => self.speaking2.len(),
            SectionKind::Unscramble => self.unscramble.len(),
        }
    }
}

/// 计算每个模式应取的题数
pub fn allocate(pattern_count: usize, target_count: usize) -> Vec<usize> {
    if pattern_count == 0 {
        return Vec::new();
    }

    let base = target_count / pattern_count;
    let remainder = target_count % pattern_count;

    (0..pattern_count)
        .map(|idx| base + usize::from(idx < remainder))
        .collect()
}

/// 按给定的模式顺序分配三个分区的题目
///
/// 调用方负责把模式按编号升序排好；输入不会被修改。
pub fn distribute<P: Borrow<PatternRecord>>(
    patterns: &[P],
    target_count: usize,
) -> DistributionResult {
    if patterns.is_empty() || target_count == 0 {
        return DistributionResult::default();
    }

    let takes = allocate(patterns.len(), target_count);
    debug!("题目分配: {} 个模式, 目标 {} 题, 分配 {:?}", patterns.len(), target_count, takes);

    let prompts = |kind: SectionKind| -> Vec<String> {
        collect_section(patterns, &takes, kind, target_count)
            .into_iter()
            .map(|item| item.prompt_text)
            .collect()
    };

    DistributionResult {
        speaking1: prompts(SectionKind::SpeakingI),
        speaking2: prompts(SectionKind::SpeakingII),
        unscramble: collect_section(patterns, &takes, SectionKind::Unscramble, target_count),
    }
}

fn collect_section<P: Borrow<PatternRecord>>(
    patterns: &[P],
    takes: &[usize],
    kind: SectionKind,
    target_count: usize,
) -> Vec<QuestionItem> {
    let mut collected: Vec<QuestionItem> = patterns
        .iter()
        .zip(takes)
        .flat_map(|(pattern, &take)| pattern.borrow().pool(kind).iter().take(take).cloned())
        .collect();

    if collected.len() > target_count {
        debug!("{} 分区题目超出目标, 截断为 {} 题", kind, target_count);
        collected.truncate(target_count);
    }
    if collected.len() < target_count {
        debug!("{} 分区题目不足: {}/{}", kind, collected.len(), target_count);
    }

    collected
}
