//! 数据集与数据集目录

use crate::models::pattern::PatternRecord;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::warn;

/// 按编号查找模式的能力
///
/// 组装练习卷时只需要这一项能力，调用方可以传入 `Dataset`，
/// 也可以直接传入一个以编号为键的 map。
pub trait PatternLookup {
    fn pattern(&self, number: u32) -> Option<&PatternRecord>;
}

impl PatternLookup for HashMap<u32, PatternRecord> {
    fn pattern(&self, number: u32) -> Option<&PatternRecord> {
        self.get(&number)
    }
}

impl PatternLookup for BTreeMap<u32, PatternRecord> {
    fn pattern(&self, number: u32) -> Option<&PatternRecord> {
        self.get(&number)
    }
}

impl PatternLookup for [PatternRecord] {
    fn pattern(&self, number: u32) -> Option<&PatternRecord> {
        self.iter().find(|p| p.number == number)
    }
}

/// 已加载到内存中的数据集
///
/// 模式按编号升序排列，编号唯一。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    /// 数据来源（文件名），仅用于日志
    pub source: Option<String>,
    patterns: Vec<PatternRecord>,
}

impl Dataset {
    /// 从任意顺序的模式列表构建数据集
    ///
    /// 按编号升序排序；编号重复时保留最先出现的那一个。
    pub fn from_records(records: Vec<PatternRecord>) -> Self {
        let mut seen: HashSet<u32> = HashSet::with_capacity(records.len());
        let mut patterns: Vec<PatternRecord> = Vec::with_capacity(records.len());
        for record in records {
            if !seen.insert(record.number) {
                warn!("⚠️ 模式编号 {} 重复，保留第一次出现的记录", record.number);
                continue;
            }
            patterns.push(record);
        }
        // 稳定排序
        patterns.sort_by_key(|p| p.number);

        Self {
            source: None,
            patterns,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn patterns(&self) -> &[PatternRecord] {
        &self.patterns
    }

    pub fn get(&self, number: u32) -> Option<&PatternRecord> {
        self.patterns
            .binary_search_by_key(&number, |p| p.number)
            .ok()
            .map(|idx| &self.patterns[idx])
    }

    pub fn contains(&self, number: u32) -> bool {
        self.get(number).is_some()
    }

    /// 所有模式编号（升序）
    pub fn numbers(&self) -> Vec<u32> {
        self.patterns.iter().map(|p| p.number).collect()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl PatternLookup for Dataset {
    fn pattern(&self, number: u32) -> Option<&PatternRecord> {
        self.get(number)
    }
}

/// 数据集目录中的一项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetInfo {
    /// 实际的 JSON 文件名
    pub file: String,
    /// 展示给用户的名称
    pub label: String,
}

impl DatasetInfo {
    pub fn new(file: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            label: label.into(),
        }
    }
}

impl std::fmt::Display for DatasetInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.label, self.file)
    }
}

/// 可选数据集目录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetCatalog {
    #[serde(default)]
    pub datasets: Vec<DatasetInfo>,
}

impl DatasetCatalog {
    /// 内置目录，没有目录文件时使用
    pub fn builtin() -> Self {
        Self {
            datasets: vec![
                DatasetInfo::new("patterns_book1.json", "Book 1 – 기본 패턴"),
                DatasetInfo::new("patterns_book2.json", "Book 2 – 감정 표현"),
            ],
        }
    }

    /// 默认数据集（目录中的第一项）
    pub fn default_entry(&self) -> Option<&DatasetInfo> {
        self.datasets.first()
    }

    pub fn find(&self, file: &str) -> Option<&DatasetInfo> {
        self.datasets.iter().find(|d| d.file == file)
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_records_sorts_and_dedups() {
        let dataset = Dataset::from_records(vec![
            PatternRecord::new(5, "five"),
            PatternRecord::new(2, "two"),
            PatternRecord::new(5, "five again"),
            PatternRecord::new(3, "three"),
        ]);

        assert_eq!(dataset.numbers(), vec![2, 3, 5]);
        assert_eq!(dataset.get(5).map(|p| p.name.as_str()), Some("five"));
        assert!(dataset.get(4).is_none());
        assert!(dataset.contains(3));
    }

    #[test]
    fn test_from_records_keeps_first_of_many_duplicates() {
        let mut records: Vec<PatternRecord> = (1..=500u32)
            .rev()
            .map(|n| PatternRecord::new(n, format!("first {}", n)))
            .collect();
        records.extend((1..=500u32).map(|n| PatternRecord::new(n, format!("second {}", n))));

        let dataset = Dataset::from_records(records);
        assert_eq!(dataset.len(), 500);
        assert_eq!(dataset.numbers(), (1..=500u32).collect::<Vec<_>>());
        assert!(dataset.patterns().iter().all(|p| p.name.starts_with("first")));
    }

    #[test]
    fn test_lookup_implementations_agree() {
        let records = vec![PatternRecord::new(1, "a"), PatternRecord::new(9, "b")];
        let dataset = Dataset::from_records(records.clone());
        let map: HashMap<u32, PatternRecord> =
            records.iter().cloned().map(|p| (p.number, p)).collect();

        for number in [1, 9, 4] {
            assert_eq!(dataset.pattern(number), map.pattern(number));
            assert_eq!(dataset.pattern(number), records.as_slice().pattern(number));
        }
    }

    #[test]
    fn test_builtin_catalog_default_entry() {
        let catalog = DatasetCatalog::builtin();
        assert_eq!(
            catalog.default_entry().map(|d| d.file.as_str()),
            Some("patterns_book1.json")
        );
        assert!(catalog.find("patterns_book2.json").is_some());
        assert!(catalog.find("patterns_book9.json").is_none());
    }
}
