//! 应用状态
//!
//! 当前加载的数据集和当前选择，由调用方持有，每次生成时显式传入。

use crate::models::dataset::Dataset;
use crate::models::pattern::PatternRecord;
use crate::services::selection::{Selection, SelectionError};
use std::fmt::Display;

/// 应用状态
#[derive(Debug, Clone)]
pub struct AppState {
    /// 数据集名称（仅用于日志显示）
    pub dataset_label: String,

    /// 当前数据集
    pub dataset: Dataset,

    /// 当前选择
    pub selection: Selection,
}

impl AppState {
    pub fn new(dataset_label: impl Into<String>, dataset: Dataset, max_selection: usize) -> Self {
        Self {
            dataset_label: dataset_label.into(),
            dataset,
            selection: Selection::new(max_selection),
        }
    }

    /// 选中一个模式，编号必须存在于当前数据集
    pub fn select(&mut self, number: u32) -> Result<bool, SelectionError> {
        if !self.dataset.contains(number) {
            return Err(SelectionError::UnknownPattern { number });
        }
        self.selection.select(number)
    }

    pub fn toggle(&mut self, number: u32) -> Result<bool, SelectionError> {
        if !self.selection.contains(number) && !self.dataset.contains(number) {
            return Err(SelectionError::UnknownPattern { number });
        }
        self.selection.toggle(number)
    }

    pub fn deselect(&mut self, number: u32) -> bool {
        self.selection.deselect(number)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// 切换数据集，同时清空选择
    pub fn switch_dataset(&mut self, dataset_label: impl Into<String>, dataset: Dataset) {
        self.dataset_label = dataset_label.into();
        self.dataset = dataset;
        self.selection.clear();
    }

    /// 选中的模式记录（按编号升序）
    pub fn selected_patterns(&self) -> Vec<&PatternRecord> {
        self.selection
            .numbers()
            .into_iter()
            .filter_map(|number| self.dataset.get(number))
            .collect()
    }
}

impl Display for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[数据集 {} 模式#{} 已选 {:?}]",
            self.dataset_label,
            self.dataset.len(),
            self.selection.numbers()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        let dataset = Dataset::from_records(
            (1..=8).map(|n| PatternRecord::new(n, format!("p{}", n))).collect(),
        );
        AppState::new("Book 1", dataset, 5)
    }

    #[test]
    fn test_select_rejects_unknown_pattern() {
        let mut state = state();
        assert_eq!(
            state.select(42),
            Err(SelectionError::UnknownPattern { number: 42 })
        );
        assert_eq!(state.toggle(42), Err(SelectionError::UnknownPattern { number: 42 }));
        assert!(state.selection.is_empty());
    }

    #[test]
    fn test_selected_patterns_sorted() {
        let mut state = state();
        state.select(6).unwrap();
        state.select(3).unwrap();
        let numbers: Vec<u32> = state.selected_patterns().iter().map(|p| p.number).collect();
        assert_eq!(numbers, vec![3, 6]);
        assert_eq!(state.to_string(), "[数据集 Book 1 模式#8 已选 [3, 6]]");
    }

    #[test]
    fn test_switch_dataset_clears_selection() {
        let mut state = state();
        state.select(1).unwrap();
        state.switch_dataset("Book 2", Dataset::from_records(vec![PatternRecord::new(1, "x")]));
        assert!(state.selection.is_empty());
        assert_eq!(state.dataset.len(), 1);
        assert_eq!(state.dataset_label, "Book 2");
    }
}
