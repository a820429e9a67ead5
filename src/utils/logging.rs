use anyhow::Result;
/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use std::fs::{self, OpenOptions};
use std::io::Write;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化 tracing 日志
///
/// 优先使用 `RUST_LOG`，否则按 `verbose` 选择 debug / info 级别。重复调用无副作用。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n练习卷生成日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 向日志文件追加一行
pub fn append_log_line(log_file_path: &str, line: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;
    writeln!(
        file,
        "[{}] {}",
        chrono::Local::now().format("%H:%M:%S"),
        line
    )?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(target_count: usize, max_selection: usize, layout: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 模式练习卷生成");
    info!("📊 每个分区题数: {} | 最多选择: {} 个模式", target_count, max_selection);
    info!("📐 版式: {}", layout);
    info!("{}", "=".repeat(60));
}

/// 记录数据集加载信息
pub fn log_dataset_loaded(label: &str, pattern_count: usize) {
    info!("✓ 数据集 {} 加载完成, 共 {} 个模式", label, pattern_count);
}

/// 打印最终统计信息
///
/// # 参数
/// - `pattern_count`: 练习卷包含的模式数
/// - `page_count`: 页数
/// - `output_path`: 输出文件路径
/// - `log_file_path`: 日志文件路径
pub fn print_final_stats(
    pattern_count: usize,
    page_count: usize,
    output_path: &str,
    log_file_path: &str,
) {
    info!("\n{}", "=".repeat(60));
    info!("📊 练习卷生成完成");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 模式: {} 个 | 页数: {}", pattern_count, page_count);
    info!("📄 输出文件: {}", output_path);
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
}

/// 截断长文本供日志预览，按字符计数，超出部分以 `...` 结尾
pub fn truncate_text(text: &str, max_len: usize) -> String {
    match text.char_indices().nth(max_len) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text_counts_chars() {
        assert_eq!(truncate_text("나는 사과를 원해", 4), "나는 사...");
        assert_eq!(truncate_text("short", 10), "short");
    }

    #[test]
    fn test_log_file_header_and_append() {
        let path = std::env::temp_dir().join("pattern_worksheet_logging_test.log");
        let path_str = path.to_string_lossy().to_string();

        init_log_file(&path_str).unwrap();
        append_log_line(&path_str, "生成 Worksheet_Patterns_2_5.txt").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("练习卷生成日志"));
        assert!(content.trim_end().ends_with("生成 Worksheet_Patterns_2_5.txt"));

        let _ = fs::remove_file(&path);
    }
}
