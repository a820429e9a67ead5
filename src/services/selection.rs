//! 模式选择状态
//!
//! 最多同时选择 `MAX_SELECTION` 个模式，编号始终保持唯一且升序。

use std::collections::BTreeSet;
use thiserror::Error;

/// 可同时选择的最大模式数
pub const MAX_SELECTION: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("最多只能选择 {max} 个模式")]
    LimitReached { max: usize },
    #[error("模式 {number} 不在当前数据集中")]
    UnknownPattern { number: u32 },
    #[error("请至少选择 1 个模式")]
    Empty,
}

/// 当前选中的模式编号
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    max: usize,
    numbers: BTreeSet<u32>,
}

impl Selection {
    pub fn new(max: usize) -> Self {
        Self {
            max,
            numbers: BTreeSet::new(),
        }
    }

    /// 从编号列表构建，超过上限时报错
    pub fn from_numbers(
        numbers: impl IntoIterator<Item = u32>,
        max: usize,
    ) -> Result<Self, SelectionError> {
        let mut selection = Self::new(max);
        for number in numbers {
            selection.select(number)?;
        }
        Ok(selection)
    }

    /// 选中一个模式，返回是否为新增
    pub fn select(&mut self, number: u32) -> Result<bool, SelectionError> {
        if self.numbers.contains(&number) {
            return Ok(false);
        }
        if self.is_full() {
            return Err(SelectionError::LimitReached { max: self.max });
        }
        Ok(self.numbers.insert(number))
    }

    /// 取消选中，返回之前是否已选中
    pub fn deselect(&mut self, number: u32) -> bool {
        self.numbers.remove(&number)
    }

    /// 切换选中状态，返回切换后是否为选中
    pub fn toggle(&mut self, number: u32) -> Result<bool, SelectionError> {
        if self.deselect(number) {
            Ok(false)
        } else {
            self.select(number).map(|_| true)
        }
    }

    /// 全部取消
    pub fn clear(&mut self) {
        self.numbers.clear();
    }

    pub fn contains(&self, number: u32) -> bool {
        self.numbers.contains(&number)
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.numbers.len() >= self.max
    }

    pub fn max(&self) -> usize {
        self.max
    }

    /// 选中的编号（升序）
    pub fn numbers(&self) -> Vec<u32> {
        self.numbers.iter().copied().collect()
    }

    pub fn ensure_non_empty(&self) -> Result<(), SelectionError> {
        if self.is_empty() {
            Err(SelectionError::Empty)
        } else {
            Ok(())
        }
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new(MAX_SELECTION)
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "已选择模式: {}个 / 最多 {}个", self.len(), self.max)
    }
}
