//! 练习卷文字格式化工具

use crate::error::{AppError, AppResult};
use crate::models::pattern::QuestionItem;
use chrono::NaiveDate;
use regex::Regex;

/// 练习卷标题
pub const WORKSHEET_TITLE: &str = "English Pattern Worksheet";
/// 级别标签
pub const LEVEL_LABEL: &str = "Pattern Level A";
/// 姓名 / 日期填写行
pub const NAME_DATE_LINE: &str = "Name: ____________________    Date: ____________________";
pub const GRADE_LINE: &str = "GRADE: ____________________";
pub const REMARK_LINE: &str = "REMARK: ____________________";

/// 合并模式下 Speaking I 的固定题目
pub const SPEAKING_I_PROMPTS: [&str; 5] = [
    "Introduce yourself to your partner.",
    "What did you do yesterday?",
    "What is your favorite food? Why?",
    "What do you want to do this weekend?",
    "Tell me about your best friend.",
];

/// 用分隔符连接模式编号
pub fn join_numbers(numbers: &[u32], separator: &str) -> String {
    numbers
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(separator)
}

/// 副标题，例如 `Pattern Level A - Patterns: 2, 5`
pub fn subtitle(numbers: &[u32]) -> String {
    format!("{} - Patterns: {}", LEVEL_LABEL, join_numbers(numbers, ", "))
}

/// 单个模式页的副标题，带上模式名称
pub fn pattern_subtitle(number: u32, name: &str) -> String {
    let base = subtitle(&[number]);
    if name.is_empty() {
        base
    } else {
        format!("{} ({})", base, name)
    }
}

/// 编号行，例如 `3. What do you want?`
pub fn numbered_line(index: usize, text: &str) -> String {
    format!("{}. {}", index, text)
}

/// 排序题的编号行，有提示时在末尾追加 ` (提示)`
pub fn unscramble_line(index: usize, item: &QuestionItem) -> String {
    if item.has_hint() {
        format!("{}. {} ({})", index, item.prompt_text, item.scrambled_hint)
    } else {
        numbered_line(index, &item.prompt_text)
    }
}

/// 题目不足时使用的占位文字
pub fn placeholder_prompt(number: u32) -> String {
    format!("Pattern {}", number)
}

/// 输出文件名，例如 `Worksheet_Patterns_2_5_2026-10-17.txt`
pub fn worksheet_file_name(numbers: &[u32], date: NaiveDate, extension: &str) -> String {
    format!(
        "Worksheet_Patterns_{}_{}.{}",
        join_numbers(numbers, "_"),
        date.format("%Y-%m-%d"),
        extension
    )
}

/// 解析用户输入的模式编号，逗号或空白分隔
///
/// 例如 `"2,5"`、`"2 5"`、`"2, 5,  7"`。
pub fn parse_pattern_numbers(input: &str) -> AppResult<Vec<u32>> {
    let separator = Regex::new(r"[,\s]+").map_err(|e| AppError::Other(e.to_string()))?;

    separator
        .split(input.trim())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<u32>()
                .map_err(|_| AppError::invalid_input(format!("无效的模式编号: '{}'", token)))
        })
        .collect()
}
